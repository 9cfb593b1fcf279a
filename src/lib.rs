#![deny(missing_docs)]

//! A fixed-size worker thread pool with a bounded FIFO task queue.
//!
//! Tasks are one-shot closures submitted through [`ThreadPool::spawn`]
//! and executed by a set of long-lived worker threads in submission
//! order. The pending-task queue has a hard capacity: when it is full,
//! submission fails immediately with [`PoolError::QueueFull`] rather
//! than blocking the caller.
//!
//! Shutdown is one-way. [`ThreadPool::shutdown`] (or dropping the pool)
//! wakes every worker, waits for in-flight tasks to finish, and
//! discards any tasks still queued without executing them.
//!
//! Diagnostics are emitted through the [`log`] facade; install any
//! `log::Log` implementation to receive them.
//!
//! # Example
//!
//! ```
//! use taskpool::ThreadPool;
//!
//! # fn main() -> taskpool::Result<()> {
//! let mut pool = ThreadPool::new(4)?;
//! for i in 0..8 {
//!     pool.spawn(move || println!("task {i}"))?;
//! }
//! pool.shutdown()?;
//! # Ok(())
//! # }
//! ```

mod error;
mod pool;
mod queue;

pub use error::{PoolError, Result};
pub use pool::{PoolConfig, ThreadPool, DEFAULT_MAX_THREADS, DEFAULT_QUEUE_CAPACITY};
