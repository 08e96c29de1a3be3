//! Runtime module - serialized access to an [`Engine`] from concurrent callers
//!
//! One tokio task owns the engine and drains a bounded request queue. Player commands,
//! frame ticks and the per-piece descent driver all go through that queue, so every
//! mutation runs to completion before the next one starts and every read sees a
//! consistent state.
//!
//! [`Engine`]: blockfall_core::Engine

mod actor;
mod blocking;
mod config;
mod driver;
mod error;
mod frame;

pub use actor::{spawn_engine, EngineHandle};
pub use blocking::BlockingEngine;
pub use config::RuntimeConfig;
pub use error::RuntimeError;
pub use frame::spawn_frame_driver;
