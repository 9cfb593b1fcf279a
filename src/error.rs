use std::io;
use thiserror::Error;

/// Error type for thread pool operations.
#[derive(Error, Debug)]
pub enum PoolError {
    /// The requested worker count is outside `1..=max_threads`.
    #[error("invalid thread count {given} (expected 1..={max})")]
    InvalidThreadCount {
        /// The count the caller asked for.
        given: u32,
        /// The configured upper bound on workers.
        max: u32,
    },

    /// The configured queue capacity is zero.
    #[error("queue capacity must be at least 1")]
    InvalidQueueCapacity,

    /// Spawning a worker thread failed.
    #[error("failed to spawn worker thread: {0}")]
    ThreadSpawn(#[from] io::Error),

    /// The task queue is at capacity; the task was not enqueued.
    #[error("task queue is full (capacity {capacity})")]
    QueueFull {
        /// The fixed capacity of the queue.
        capacity: usize,
    },

    /// The pool has been shut down and accepts no further tasks.
    #[error("thread pool is shut down")]
    Shutdown,
}

/// Result type alias for thread pool operations.
pub type Result<T> = std::result::Result<T, PoolError>;
