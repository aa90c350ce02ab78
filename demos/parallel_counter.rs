//! Dispatches a burst of jobs from several producer threads, then shuts
//! the pool down and reports how many ran.
//!
//! Run with `RUST_LOG=debug` to watch the workers pick jobs up.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crossbeam_utils::thread::scope;
use jobpool::ThreadPool;

const PRODUCERS: usize = 5;
const JOBS_PER_PRODUCER: usize = 10;

fn main() -> jobpool::Result<()> {
    env_logger::init();

    let pool = ThreadPool::new(4)?;
    let counter = Arc::new(AtomicUsize::new(0));

    scope(|s| {
        for _ in 0..PRODUCERS {
            let pool = &pool;
            let counter = &counter;
            s.spawn(move |_| {
                for _ in 0..JOBS_PER_PRODUCER {
                    let c = Arc::clone(counter);
                    pool.dispatch(move || {
                        c.fetch_add(1, Ordering::SeqCst);
                    });
                }
            });
        }
    })
    .expect("producer thread panicked");

    pool.shutdown();
    println!(
        "executed {} of {} jobs",
        counter.load(Ordering::SeqCst),
        PRODUCERS * JOBS_PER_PRODUCER
    );
    Ok(())
}
