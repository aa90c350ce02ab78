use std::panic::{self, AssertUnwindSafe};
use std::sync::{Condvar, Mutex, MutexGuard};

use log::{debug, error};

use crate::queue::JobQueue;

/// Everything the pool lock guards.
pub(crate) struct PoolState {
    /// Pending jobs, oldest first.
    pub(crate) queue: JobQueue,
    /// True until shutdown begins; a closed pool rejects new jobs.
    pub(crate) accepting: bool,
    /// True once the queue has drained during shutdown; workers exit on
    /// observing it. Set exactly once, strictly after `accepting` flips.
    pub(crate) stopping: bool,
}

/// State shared between the pool handle and its workers: one mutex and
/// the two conditions coordinated through it.
pub(crate) struct Shared {
    pub(crate) state: Mutex<PoolState>,
    /// Signaled once per accepted job; wakes one idle worker. Broadcast
    /// at shutdown so every idle worker observes `stopping`.
    pub(crate) not_empty: Condvar,
    /// Signaled when a worker empties the queue while the pool is closed
    /// to new jobs; wakes the thread blocked in shutdown.
    pub(crate) drained: Condvar,
}

impl Shared {
    pub(crate) fn new() -> Shared {
        Shared {
            state: Mutex::new(PoolState {
                queue: JobQueue::new(),
                accepting: true,
                stopping: false,
            }),
            not_empty: Condvar::new(),
            drained: Condvar::new(),
        }
    }

    pub(crate) fn lock_state(&self) -> MutexGuard<'_, PoolState> {
        self.state.lock().expect("pool state lock poisoned")
    }
}

/// Body of one worker thread: wait for a job, run it with the lock
/// released, repeat until the pool is stopping.
pub(crate) fn run(id: usize, shared: &Shared) {
    loop {
        let job = {
            let mut state = shared.lock_state();
            loop {
                if state.stopping {
                    debug!("worker {id}: stopping");
                    return;
                }
                if let Some(job) = state.queue.pop() {
                    break job;
                }
                state = shared
                    .not_empty
                    .wait(state)
                    .expect("pool state lock poisoned");
            }
        };

        // The lock is released while the job runs: a slow job never
        // blocks producers or the other workers.
        debug!("worker {id}: executing job");
        if panic::catch_unwind(AssertUnwindSafe(job)).is_err() {
            error!("worker {id}: job panicked");
        }

        let state = shared.lock_state();
        if state.queue.is_empty() && !state.accepting {
            shared.drained.notify_one();
        }
    }
}
