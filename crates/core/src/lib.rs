//! Core simulation module - grid, pieces, rows and scoring
//!
//! Everything here is synchronous and deterministic for a given random source. Nothing
//! draws, reads input or touches the filesystem.
//!
//! # Module Structure
//!
//! - [`shape`]: the seven four-cell geometries and clockwise rotation
//! - [`cell`]: one grid slot, color plus locked flag
//! - [`grid`]: 10x20 matrix, row completion, compaction and loss detection
//! - [`piece`]: the falling piece with movement, collision and locking
//! - [`engine`]: spawning, frame ticks, hand-off and score
//! - [`view`] / [`snapshot`]: read-only captures for presentation and persistence
//!
//! # Example
//!
//! ```
//! use blockfall_core::Engine;
//!
//! let mut engine = Engine::seeded(12345);
//! engine.tick();
//! assert!(engine.current().is_active());
//! engine.hard_drop();
//! ```

pub use blockfall_types as types;

pub mod cell;
pub mod engine;
pub mod grid;
pub mod piece;
pub mod shape;
pub mod snapshot;
pub mod view;

pub use cell::Cell;
pub use engine::{Engine, TickOutcome};
pub use grid::{ClearedRows, Grid, HEIGHT, WIDTH};
pub use piece::{Descent, Piece, PieceId, PieceState};
pub use shape::{canonical_offsets, Reach, Shape, ShapeOffsets};
pub use snapshot::{CellSnapshot, GameSnapshot, PieceSnapshot, SnapshotError};
pub use view::{CellView, EngineView, PieceView};
