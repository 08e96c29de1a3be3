//! Save module - JSON persistence of game snapshots
//!
//! The engine only produces and accepts [`GameSnapshot`]s; this crate owns the byte
//! format and the directory layout.
//!
//! [`GameSnapshot`]: blockfall_core::GameSnapshot

use std::io;
use std::path::PathBuf;

use blockfall_core::SnapshotError;
use thiserror::Error;

pub mod record;
pub mod store;

pub use record::{SaveFile, SavedCell, SavedPiece, FORMAT_VERSION};
pub use store::{decode, encode, SaveConfig, SaveStore};

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed save file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported save format version {0}")]
    Version(u32),
    #[error("unknown piece kind {0:?}")]
    UnknownKind(String),
    #[error("piece has {0} offsets, expected 4")]
    OffsetCount(usize),
    #[error(transparent)]
    Invalid(#[from] SnapshotError),
    #[error("invalid save name {0:?}")]
    Name(String),
    #[error("no save named {0:?}")]
    NotFound(String),
}
