#![deny(missing_docs)]

//! A fixed-size worker thread pool with a shared FIFO job queue.
//!
//! Jobs are dispatched fire-and-forget from any thread and picked up in
//! submission order by a bank of worker threads coordinated through one
//! mutex and two condition variables. Shutting down first drains every
//! queued job, then stops and joins the workers, so accepted work is
//! never lost.
//!
//! The queue is unbounded: [`ThreadPool::dispatch`] never blocks on queue
//! depth, and producers that outrun the workers grow the queue without
//! limit. Bounding memory use is the caller's responsibility.

mod error;
mod pool;
mod queue;
mod worker;

pub use error::{PoolError, Result};
pub use pool::{DispatchResult, ThreadPool, MAX_POOL_SIZE};
