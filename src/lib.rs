//! Blockfall (workspace facade crate).
//!
//! Re-exports the workspace crates under one name and hosts the plain-text console used by
//! the headless binary.

pub mod console;

pub use blockfall_core as core;
pub use blockfall_runtime as runtime;
pub use blockfall_save as save;
pub use blockfall_types as types;
