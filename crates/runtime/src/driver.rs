//! Autonomous descent driver of the active piece

use std::time::Duration;

use blockfall_core::PieceId;
use tokio::sync::mpsc::WeakSender;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::trace;

use crate::actor::Request;

/// Timer task bound to one piece.
///
/// Sends a descent request every period, the first one a full period after start. It
/// holds only a weak sender and never keeps the queue open. Dropping the driver aborts
/// the task at its next await point.
#[derive(Debug)]
pub(crate) struct DescentDriver {
    piece: PieceId,
    task: JoinHandle<()>,
}

impl DescentDriver {
    pub(crate) fn start(piece: PieceId, period: Duration, requests: WeakSender<Request>) -> Self {
        let task = tokio::spawn(async move {
            let mut ticks = time::interval_at(Instant::now() + period, period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticks.tick().await;
                let Some(sender) = requests.upgrade() else {
                    break;
                };
                trace!(piece = piece.0, "descent tick");
                if sender.send(Request::Descend { piece }).await.is_err() {
                    break;
                }
            }
        });
        Self { piece, task }
    }

    pub(crate) fn piece(&self) -> PieceId {
        self.piece
    }

    pub(crate) fn stop(self) {
        self.task.abort();
    }
}

impl Drop for DescentDriver {
    fn drop(&mut self) {
        self.task.abort();
    }
}
