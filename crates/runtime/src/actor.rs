//! Engine actor and its cloneable handle

use std::time::Duration;

use blockfall_core::{Descent, Engine, EngineView, GameSnapshot, PieceId, SnapshotError, TickOutcome};
use blockfall_types::Command;
use rand::Rng;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::config::RuntimeConfig;
use crate::driver::DescentDriver;
use crate::error::RuntimeError;

/// Request delivered to the engine actor
#[derive(Debug)]
pub(crate) enum Request {
    Command {
        command: Command,
        reply: oneshot::Sender<bool>,
    },
    Tick {
        reply: oneshot::Sender<TickOutcome>,
    },
    /// From a descent driver; no reply
    Descend {
        piece: PieceId,
    },
    View {
        reply: oneshot::Sender<EngineView>,
    },
    TakeDirty {
        reply: oneshot::Sender<bool>,
    },
    Snapshot {
        reply: oneshot::Sender<GameSnapshot>,
    },
    Restore {
        snapshot: Box<GameSnapshot>,
        reply: oneshot::Sender<Result<(), SnapshotError>>,
    },
    Shutdown {
        reply: oneshot::Sender<()>,
    },
}

struct EngineActor<R> {
    engine: Engine<R>,
    driver: Option<DescentDriver>,
    descent_interval: Duration,
    requests: mpsc::WeakSender<Request>,
}

impl<R: Rng> EngineActor<R> {
    async fn run(mut self, mut inbox: mpsc::Receiver<Request>) -> Engine<R> {
        self.reconcile();
        while let Some(request) = inbox.recv().await {
            let keep_running = self.handle(request);
            self.reconcile();
            if !keep_running {
                break;
            }
        }
        if let Some(driver) = self.driver.take() {
            driver.stop();
        }
        info!(score = self.engine.score(), "engine actor stopped");
        self.engine
    }

    /// Returns false once shutdown was requested
    fn handle(&mut self, request: Request) -> bool {
        // A dropped reply receiver means the caller gave up; the mutation still stands.
        match request {
            Request::Command { command, reply } => {
                let applied = self.engine.apply(command);
                let _ = reply.send(applied);
            }
            Request::Tick { reply } => {
                let _ = reply.send(self.engine.tick());
            }
            Request::Descend { piece } => {
                if self.engine.descend(piece) == Descent::Locked {
                    debug!(piece = piece.0, "descent locked piece");
                }
            }
            Request::View { reply } => {
                let _ = reply.send(self.engine.view());
            }
            Request::TakeDirty { reply } => {
                let _ = reply.send(self.engine.take_dirty());
            }
            Request::Snapshot { reply } => {
                let _ = reply.send(self.engine.snapshot());
            }
            Request::Restore { snapshot, reply } => {
                let _ = reply.send(self.engine.restore(&snapshot));
            }
            Request::Shutdown { reply } => {
                let _ = reply.send(());
                return false;
            }
        }
        true
    }

    /// Make the running descent driver match the engine's current target
    fn reconcile(&mut self) {
        let target = self.engine.driver_target();
        if self.driver.as_ref().map(DescentDriver::piece) == target {
            return;
        }
        if let Some(driver) = self.driver.take() {
            debug!(piece = driver.piece().0, "stopping descent driver");
            driver.stop();
        }
        if let Some(piece) = target {
            debug!(piece = piece.0, "starting descent driver");
            self.driver = Some(DescentDriver::start(
                piece,
                self.descent_interval,
                self.requests.clone(),
            ));
        }
    }
}

/// Start the actor on the current tokio runtime.
///
/// The actor stops when every handle is dropped or on [`EngineHandle::shutdown`], and the
/// join handle yields the engine back.
pub fn spawn_engine<R>(engine: Engine<R>, config: &RuntimeConfig) -> (EngineHandle, JoinHandle<Engine<R>>)
where
    R: Rng + Send + 'static,
{
    let (sender, inbox) = mpsc::channel(config.queue_capacity.max(1));
    let actor = EngineActor {
        engine,
        driver: None,
        descent_interval: config.descent_interval,
        requests: sender.downgrade(),
    };
    let task = tokio::spawn(actor.run(inbox));
    (EngineHandle { requests: sender }, task)
}

/// Cloneable async access to a running engine.
///
/// Every call waits for the actor's reply, so its effect is visible once it returns.
#[derive(Debug, Clone)]
pub struct EngineHandle {
    requests: mpsc::Sender<Request>,
}

impl EngineHandle {
    async fn call<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<T>) -> Request,
    ) -> Result<T, RuntimeError> {
        let (reply, response) = oneshot::channel();
        self.requests
            .send(make(reply))
            .await
            .map_err(|_| RuntimeError::Closed)?;
        response.await.map_err(|_| RuntimeError::Closed)
    }

    pub async fn command(&self, command: Command) -> Result<bool, RuntimeError> {
        self.call(|reply| Request::Command { command, reply }).await
    }

    pub async fn move_left(&self) -> Result<bool, RuntimeError> {
        self.command(Command::MoveLeft).await
    }

    pub async fn move_right(&self) -> Result<bool, RuntimeError> {
        self.command(Command::MoveRight).await
    }

    pub async fn rotate(&self) -> Result<bool, RuntimeError> {
        self.command(Command::Rotate).await
    }

    pub async fn hard_drop(&self) -> Result<bool, RuntimeError> {
        self.command(Command::HardDrop).await
    }

    pub async fn pause(&self) -> Result<bool, RuntimeError> {
        self.command(Command::Pause).await
    }

    pub async fn resume(&self) -> Result<bool, RuntimeError> {
        self.command(Command::Resume).await
    }

    pub async fn tick(&self) -> Result<TickOutcome, RuntimeError> {
        self.call(|reply| Request::Tick { reply }).await
    }

    pub async fn view(&self) -> Result<EngineView, RuntimeError> {
        self.call(|reply| Request::View { reply }).await
    }

    /// Read and clear the change flag
    pub async fn take_dirty(&self) -> Result<bool, RuntimeError> {
        self.call(|reply| Request::TakeDirty { reply }).await
    }

    pub async fn snapshot(&self) -> Result<GameSnapshot, RuntimeError> {
        self.call(|reply| Request::Snapshot { reply }).await
    }

    /// Replace the game state; the descent driver restarts if the restored piece is active
    pub async fn restore(&self, snapshot: GameSnapshot) -> Result<(), RuntimeError> {
        let snapshot = Box::new(snapshot);
        self.call(|reply| Request::Restore { snapshot, reply })
            .await??;
        Ok(())
    }

    /// Stop the actor after the requests already queued
    pub async fn shutdown(&self) -> Result<(), RuntimeError> {
        self.call(|reply| Request::Shutdown { reply }).await
    }
}
