//! Runtime configuration read from the environment

use std::env;
use std::time::Duration;

use blockfall_core::Engine;
use blockfall_types::{DESCENT_INTERVAL_MS, FRAME_INTERVAL_MS};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Period of the autonomous descent of the active piece
    pub descent_interval: Duration,
    /// Period of the external frame driver
    pub frame_interval: Duration,
    /// Capacity of the request queue
    pub queue_capacity: usize,
    /// Fixed seed for the piece sequence, entropy when absent
    pub seed: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            descent_interval: Duration::from_millis(DESCENT_INTERVAL_MS),
            frame_interval: Duration::from_millis(FRAME_INTERVAL_MS),
            queue_capacity: 64,
            seed: None,
        }
    }
}

impl RuntimeConfig {
    /// Read `BLOCKFALL_DESCENT_MS`, `BLOCKFALL_FRAME_MS`, `BLOCKFALL_MAX_PENDING` and
    /// `BLOCKFALL_SEED`, falling back to defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let descent_interval = positive(&lookup, "BLOCKFALL_DESCENT_MS")
            .map(Duration::from_millis)
            .unwrap_or(defaults.descent_interval);
        let frame_interval = positive(&lookup, "BLOCKFALL_FRAME_MS")
            .map(Duration::from_millis)
            .unwrap_or(defaults.frame_interval);
        let queue_capacity = positive(&lookup, "BLOCKFALL_MAX_PENDING")
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(defaults.queue_capacity);
        let seed = parsed(&lookup, "BLOCKFALL_SEED");

        Self {
            descent_interval,
            frame_interval,
            queue_capacity,
            seed,
        }
    }

    /// Fresh engine seeded from the config, or from entropy
    pub fn build_engine(&self) -> Engine<StdRng> {
        match self.seed {
            Some(seed) => Engine::seeded(seed),
            None => Engine::new(StdRng::from_entropy()),
        }
    }
}

fn parsed<F>(lookup: &F, key: &str) -> Option<u64>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = raw, "ignoring unparsable setting");
            None
        }
    }
}

/// Zero would stall a timer or the queue
fn positive<F>(lookup: &F, key: &str) -> Option<u64>
where
    F: Fn(&str) -> Option<String>,
{
    parsed(lookup, key).filter(|&value| {
        if value == 0 {
            warn!(key, "ignoring zero setting");
        }
        value > 0
    })
}
