//! Error module - failures of the engine runtime

use blockfall_core::SnapshotError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("engine actor has stopped")]
    Closed,
    #[error(transparent)]
    Restore(#[from] SnapshotError),
    #[error("failed to start engine runtime: {0}")]
    Io(#[from] std::io::Error),
}
