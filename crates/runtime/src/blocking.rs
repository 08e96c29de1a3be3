//! Blocking facade for synchronous presentation layers

use blockfall_core::{Engine, EngineView, GameSnapshot, TickOutcome};
use blockfall_types::Command;
use rand::rngs::StdRng;
use tokio::runtime::{Builder, Runtime};
use tokio::task::JoinHandle;
use tracing::warn;

use crate::actor::{spawn_engine, EngineHandle};
use crate::config::RuntimeConfig;
use crate::error::RuntimeError;
use crate::frame::spawn_frame_driver;

/// Engine actor on a private runtime, driven through blocking calls.
///
/// Must not be used from inside an async context.
pub struct BlockingEngine {
    runtime: Runtime,
    handle: EngineHandle,
    frames: Option<JoinHandle<()>>,
    config: RuntimeConfig,
}

impl BlockingEngine {
    pub fn start(engine: Engine<StdRng>, config: RuntimeConfig) -> Result<Self, RuntimeError> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("blockfall-engine")
            .enable_all()
            .build()?;
        let (handle, _actor) = {
            let _guard = runtime.enter();
            spawn_engine(engine, &config)
        };
        Ok(Self {
            runtime,
            handle,
            frames: None,
            config,
        })
    }

    /// Start ticking at the configured frame interval; no-op if already running
    pub fn run_frames(&mut self) {
        if self.frames.as_ref().is_some_and(|task| !task.is_finished()) {
            return;
        }
        let _guard = self.runtime.enter();
        self.frames = Some(spawn_frame_driver(
            self.handle.clone(),
            self.config.frame_interval,
        ));
    }

    pub fn handle(&self) -> &EngineHandle {
        &self.handle
    }

    pub fn command(&self, command: Command) -> Result<bool, RuntimeError> {
        self.runtime.block_on(self.handle.command(command))
    }

    pub fn move_left(&self) -> Result<bool, RuntimeError> {
        self.command(Command::MoveLeft)
    }

    pub fn move_right(&self) -> Result<bool, RuntimeError> {
        self.command(Command::MoveRight)
    }

    pub fn rotate(&self) -> Result<bool, RuntimeError> {
        self.command(Command::Rotate)
    }

    pub fn hard_drop(&self) -> Result<bool, RuntimeError> {
        self.command(Command::HardDrop)
    }

    pub fn pause(&self) -> Result<bool, RuntimeError> {
        self.command(Command::Pause)
    }

    pub fn resume(&self) -> Result<bool, RuntimeError> {
        self.command(Command::Resume)
    }

    pub fn tick(&self) -> Result<TickOutcome, RuntimeError> {
        self.runtime.block_on(self.handle.tick())
    }

    pub fn view(&self) -> Result<EngineView, RuntimeError> {
        self.runtime.block_on(self.handle.view())
    }

    pub fn take_dirty(&self) -> Result<bool, RuntimeError> {
        self.runtime.block_on(self.handle.take_dirty())
    }

    pub fn snapshot(&self) -> Result<GameSnapshot, RuntimeError> {
        self.runtime.block_on(self.handle.snapshot())
    }

    pub fn restore(&self, snapshot: GameSnapshot) -> Result<(), RuntimeError> {
        self.runtime.block_on(self.handle.restore(snapshot))
    }
}

impl Drop for BlockingEngine {
    fn drop(&mut self) {
        if let Some(frames) = self.frames.take() {
            frames.abort();
        }
        if let Err(err) = self.runtime.block_on(self.handle.shutdown()) {
            warn!(%err, "engine already stopped");
        }
    }
}
