//! Frame module - fixed-cadence tick driver

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::debug;

use crate::actor::EngineHandle;

/// Call [`EngineHandle::tick`] every `period` until the game is over or the actor stops
pub fn spawn_frame_driver(handle: EngineHandle, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut frames = time::interval(period);
        frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            frames.tick().await;
            match handle.tick().await {
                Ok(outcome) if outcome.game_over => {
                    debug!("frame driver finished: game over");
                    break;
                }
                Ok(_) => {}
                Err(_) => {
                    debug!("frame driver finished: engine closed");
                    break;
                }
            }
        }
    })
}
