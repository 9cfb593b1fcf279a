use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use log::{debug, error, info};
use parking_lot::{Condvar, Mutex};

use crate::queue::BoundedQueue;
use crate::{PoolError, Result};

/// Default upper bound on the worker count.
pub const DEFAULT_MAX_THREADS: u32 = 10;

/// Default capacity of the pending-task queue.
pub const DEFAULT_QUEUE_CAPACITY: usize = 256;

/// A queued unit of work: a one-shot closure owning its captured state.
type Task = Box<dyn FnOnce() + Send + 'static>;

/// Construction parameters for a [`ThreadPool`].
///
/// The defaults use one worker per CPU (capped at
/// [`DEFAULT_MAX_THREADS`]) and a queue of [`DEFAULT_QUEUE_CAPACITY`]
/// pending tasks.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Number of worker threads to spawn.
    pub threads: u32,
    /// Upper bound on `threads`; construction fails above it.
    pub max_threads: u32,
    /// Capacity of the pending-task queue; submissions beyond it are
    /// rejected, never blocked.
    pub queue_capacity: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        let cpus = num_cpus::get() as u32;
        PoolConfig {
            threads: cpus.clamp(1, DEFAULT_MAX_THREADS),
            max_threads: DEFAULT_MAX_THREADS,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

/// State shared between the pool handle and its workers, guarded by the
/// single pool-wide lock.
struct PoolState {
    queue: BoundedQueue<Task>,
    shutdown: bool,
}

struct PoolInner {
    state: Mutex<PoolState>,
    /// Signalled once per submission, broadcast at shutdown.
    work_available: Condvar,
}

/// A fixed-size worker thread pool with a bounded FIFO task queue.
///
/// Workers are spawned at construction and live until [`shutdown`]
/// (or drop). Tasks are dispatched in submission order; when the queue
/// is full, [`spawn`] rejects the task immediately instead of blocking
/// the caller.
///
/// Tasks still queued when the pool shuts down are discarded without
/// being executed. Callers that need every submitted task to run must
/// wait for completion before shutting down.
///
/// [`shutdown`]: ThreadPool::shutdown
/// [`spawn`]: ThreadPool::spawn
pub struct ThreadPool {
    inner: Arc<PoolInner>,
    workers: Vec<JoinHandle<()>>,
}

impl ThreadPool {
    /// Creates a pool with `threads` workers and default bounds.
    ///
    /// # Errors
    ///
    /// Returns an error if `threads` is outside `1..=max_threads` or a
    /// worker thread cannot be spawned.
    pub fn new(threads: u32) -> Result<Self> {
        ThreadPool::with_config(PoolConfig {
            threads,
            ..PoolConfig::default()
        })
    }

    /// Creates a pool from explicit configuration.
    ///
    /// If any worker fails to spawn, the workers already started are
    /// signalled and joined before the error is returned; no partial
    /// pool is ever left running.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or a worker
    /// thread cannot be spawned.
    pub fn with_config(config: PoolConfig) -> Result<Self> {
        if config.threads == 0 || config.threads > config.max_threads {
            error!(
                "invalid thread count {} (expected 1..={})",
                config.threads, config.max_threads
            );
            return Err(PoolError::InvalidThreadCount {
                given: config.threads,
                max: config.max_threads,
            });
        }
        if config.queue_capacity == 0 {
            error!("invalid queue capacity 0");
            return Err(PoolError::InvalidQueueCapacity);
        }

        let inner = Arc::new(PoolInner {
            state: Mutex::new(PoolState {
                queue: BoundedQueue::new(config.queue_capacity),
                shutdown: false,
            }),
            work_available: Condvar::new(),
        });

        let mut workers = Vec::with_capacity(config.threads as usize);
        for id in 0..config.threads {
            let worker_inner = Arc::clone(&inner);
            let handle = thread::Builder::new()
                .name(format!("pool-worker-{id}"))
                .spawn(move || worker_loop(id, &worker_inner));
            match handle {
                Ok(handle) => workers.push(handle),
                Err(e) => {
                    error!("failed to spawn worker {id}: {e}");
                    // Unwind the partial pool: stop and join the workers
                    // that did start before reporting the failure.
                    {
                        let mut state = inner.state.lock();
                        state.shutdown = true;
                        inner.work_available.notify_all();
                    }
                    for handle in workers {
                        let _ = handle.join();
                    }
                    return Err(PoolError::ThreadSpawn(e));
                }
            }
        }

        info!(
            "thread pool created with {} workers (queue capacity {})",
            config.threads, config.queue_capacity
        );
        Ok(ThreadPool { inner, workers })
    }

    /// Submits a task for execution by one of the workers.
    ///
    /// Never blocks: the task is either enqueued and a waiting worker
    /// woken, or rejected immediately.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Shutdown`] if the pool has been shut down,
    /// or [`PoolError::QueueFull`] if the queue is at capacity. Either
    /// way the task is dropped without running and the queue is
    /// unchanged.
    pub fn spawn<F>(&self, job: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        let mut state = self.inner.state.lock();
        if state.shutdown {
            error!("task rejected: pool is shut down");
            return Err(PoolError::Shutdown);
        }
        if state.queue.push_back(Box::new(job)).is_err() {
            let capacity = state.queue.capacity();
            error!("task rejected: queue full (capacity {capacity})");
            return Err(PoolError::QueueFull { capacity });
        }
        self.inner.work_available.notify_one();
        Ok(())
    }

    /// Shuts the pool down: rejects further submissions, wakes every
    /// worker, and blocks until all of them have exited.
    ///
    /// In-flight tasks run to completion; tasks still queued once the
    /// workers have stopped are discarded without being executed.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Shutdown`] if the pool was already shut
    /// down; the call is otherwise a no-op in that case.
    pub fn shutdown(&mut self) -> Result<()> {
        if self.workers.is_empty() {
            return Err(PoolError::Shutdown);
        }

        {
            let mut state = self.inner.state.lock();
            state.shutdown = true;
            self.inner.work_available.notify_all();
        }

        let workers = std::mem::take(&mut self.workers);
        let joined = workers.len();
        for handle in workers {
            // A worker that panicked outside a task is still joinable.
            let _ = handle.join();
        }

        let discarded = self.inner.state.lock().queue.clear();
        if discarded > 0 {
            debug!("discarded {discarded} queued tasks during shutdown");
        }
        info!("thread pool shut down ({joined} workers joined)");
        Ok(())
    }

    /// Number of worker threads in the pool.
    pub fn thread_count(&self) -> usize {
        self.workers.len()
    }

    /// Number of tasks currently queued and not yet dispatched.
    pub fn queued(&self) -> usize {
        self.inner.state.lock().queue.len()
    }

    /// Capacity of the pending-task queue.
    pub fn queue_capacity(&self) -> usize {
        self.inner.state.lock().queue.capacity()
    }
}

impl Drop for ThreadPool {
    fn drop(&mut self) {
        if !self.workers.is_empty() {
            let _ = self.shutdown();
        }
    }
}

/// The worker dispatch loop.
///
/// Blocks on the condition variable while the queue is empty, pops the
/// head task when one arrives, and runs it outside the lock so long
/// tasks never stall submitters or other workers. Exits once shutdown
/// is observed, even if tasks remain queued.
fn worker_loop(id: u32, inner: &PoolInner) {
    debug!("worker {id} started");
    loop {
        let task = {
            let mut state = inner.state.lock();
            // Loop over the predicate: condvar waits can wake spuriously.
            while state.queue.is_empty() && !state.shutdown {
                inner.work_available.wait(&mut state);
            }
            if state.shutdown {
                debug!("worker {id}: shutdown observed, exiting");
                return;
            }
            state.queue.pop_front()
        };

        if let Some(task) = task {
            debug!("worker {id} executing task");
            // Catch panics so one bad task doesn't take the worker down
            if panic::catch_unwind(AssertUnwindSafe(task)).is_err() {
                error!("worker {id}: task panicked, continuing");
            }
        }
    }
}
