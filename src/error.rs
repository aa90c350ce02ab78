use std::io;
use thiserror::Error;

use crate::pool::MAX_POOL_SIZE;

/// Error type for pool operations.
#[derive(Error, Debug)]
pub enum PoolError {
    /// Worker count outside the accepted range at pool creation.
    #[error("invalid thread count {0}: must be between 1 and {max}", max = MAX_POOL_SIZE)]
    InvalidThreadCount(usize),

    /// The OS failed to start a worker thread during pool creation.
    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[from] io::Error),
}

/// Result type alias for pool operations.
pub type Result<T> = std::result::Result<T, PoolError>;
