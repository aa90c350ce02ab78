use std::sync::Arc;
use std::thread::{self, JoinHandle};

use log::{debug, error};

use crate::error::{PoolError, Result};
use crate::worker::{self, Shared};

/// Upper bound on the number of worker threads a single pool may own.
///
/// [`ThreadPool::new`] rejects counts above it.
pub const MAX_POOL_SIZE: usize = 100;

/// Outcome of a [`ThreadPool::dispatch`] call.
///
/// Ignoring the value gives fire-and-forget submission; checking it lets
/// a producer learn that its job was dropped instead of queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchResult {
    /// The job was queued and will run exactly once.
    Accepted,
    /// The pool is no longer accepting jobs; the job was dropped without
    /// running.
    Rejected,
}

impl DispatchResult {
    /// Returns true if the job was queued.
    pub fn is_accepted(self) -> bool {
        matches!(self, DispatchResult::Accepted)
    }

    /// Returns true if the job was dropped.
    pub fn is_rejected(self) -> bool {
        matches!(self, DispatchResult::Rejected)
    }
}

/// A fixed-size pool of worker threads draining one shared FIFO queue.
///
/// Jobs dispatched from any number of threads are dequeued in submission
/// order by whichever worker frees up first. Shutdown first drains every
/// queued job, then stops and joins the workers, so an accepted job is
/// never lost. The handle is not `Clone`: exactly one owner decides when
/// the pool shuts down.
pub struct ThreadPool {
    shared: Arc<Shared>,
    workers: Vec<JoinHandle<()>>,
}

impl ThreadPool {
    /// Creates a pool with `threads` worker threads, each blocked on the
    /// empty queue until work arrives.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidThreadCount`] if `threads` is zero or
    /// above [`MAX_POOL_SIZE`], and [`PoolError::Spawn`] if the OS fails
    /// to start a worker. A spawn failure stops and joins the workers
    /// already started, so no pool threads outlive the error.
    pub fn new(threads: usize) -> Result<ThreadPool> {
        if threads == 0 || threads > MAX_POOL_SIZE {
            return Err(PoolError::InvalidThreadCount(threads));
        }

        let shared = Arc::new(Shared::new());
        let mut workers = Vec::with_capacity(threads);
        for id in 0..threads {
            let worker_shared = Arc::clone(&shared);
            let spawned = thread::Builder::new()
                .name(format!("pool-worker-{id}"))
                .spawn(move || worker::run(id, &worker_shared));
            match spawned {
                Ok(handle) => workers.push(handle),
                Err(e) => {
                    drain_and_join(&shared, &mut workers);
                    return Err(PoolError::Spawn(e));
                }
            }
        }

        debug!("pool started with {threads} workers");
        Ok(ThreadPool { shared, workers })
    }

    /// Number of worker threads in this pool, fixed at creation.
    pub fn thread_count(&self) -> usize {
        self.workers.len()
    }

    /// Queues a job for execution and wakes one idle worker.
    ///
    /// Returns [`DispatchResult::Rejected`], without queueing, once the
    /// pool has begun shutting down. Never blocks beyond the queue's
    /// constant-time critical section, regardless of queue depth.
    pub fn dispatch<F>(&self, job: F) -> DispatchResult
    where
        F: FnOnce() + Send + 'static,
    {
        let mut state = self.shared.lock_state();
        if !state.accepting {
            return DispatchResult::Rejected;
        }
        state.queue.push(Box::new(job));
        drop(state);

        // One new job, so one waiting worker needs to know.
        self.shared.not_empty.notify_one();
        DispatchResult::Accepted
    }

    /// Shuts the pool down: stops accepting jobs, waits for workers to
    /// finish everything already queued, then joins every worker.
    ///
    /// Blocks without timeout until the last accepted job has completed.
    /// Consuming `self` makes a second shutdown, or a dispatch after
    /// shutdown, a compile error rather than a runtime question.
    pub fn shutdown(mut self) {
        drain_and_join(&self.shared, &mut self.workers);
    }
}

impl Drop for ThreadPool {
    /// A pool dropped without an explicit [`ThreadPool::shutdown`] call
    /// drains and joins the same way.
    fn drop(&mut self) {
        drain_and_join(&self.shared, &mut self.workers);
    }
}

/// Closes the pool to new jobs, waits until the queue is empty, then
/// signals stop and joins `workers`. Idempotent once `workers` is empty.
fn drain_and_join(shared: &Shared, workers: &mut Vec<JoinHandle<()>>) {
    if workers.is_empty() {
        return;
    }

    {
        let mut state = shared.lock_state();
        state.accepting = false;
        debug!("shutdown: draining {} queued jobs", state.queue.len());
        while !state.queue.is_empty() {
            state = shared
                .drained
                .wait(state)
                .expect("pool state lock poisoned");
        }
        state.stopping = true;
    }
    shared.not_empty.notify_all();

    for handle in workers.drain(..) {
        if handle.join().is_err() {
            error!("worker thread panicked before exiting");
        }
    }
    debug!("shutdown complete");
}
