//! Headless blockfall runner (default binary).
//!
//! Usage: `blockfall [save-name]`. Reads one command per line from stdin and prints the
//! grid whenever it changed. `RUST_LOG` controls log output on stderr.

use std::env;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{self, MissedTickBehavior};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use blockfall::console::{render_text, ConsoleInput};
use blockfall::runtime::{spawn_engine, spawn_frame_driver, EngineHandle, RuntimeConfig};
use blockfall::save::{SaveConfig, SaveStore};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = RuntimeConfig::from_env();
    let store = SaveStore::from_config(&SaveConfig::from_env());

    let mut engine = config.build_engine();
    if let Some(name) = env::args().nth(1) {
        let snapshot = store
            .load(&name)
            .with_context(|| format!("failed to load save {name:?}"))?;
        engine.restore(&snapshot)?;
        info!(name, "resuming saved game");
    }

    let (handle, actor) = spawn_engine(engine, &config);
    let frames = spawn_frame_driver(handle.clone(), config.frame_interval);

    let result = run(&handle, &store, &config).await;

    frames.abort();
    handle.shutdown().await?;
    let engine = actor.await?;
    println!("final score {}", engine.score());
    result
}

async fn run(handle: &EngineHandle, store: &SaveStore, config: &RuntimeConfig) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut redraw = time::interval(config.frame_interval);
    redraw.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    return Ok(());
                };
                match ConsoleInput::parse(&line) {
                    Some(ConsoleInput::Command(command)) => {
                        handle.command(command).await?;
                    }
                    Some(ConsoleInput::Save(name)) => {
                        let snapshot = handle.snapshot().await?;
                        match store.save(&name, &snapshot) {
                            Ok(path) => println!("saved to {}", path.display()),
                            Err(err) => warn!(%err, "save failed"),
                        }
                    }
                    Some(ConsoleInput::Quit) => return Ok(()),
                    None if line.trim().is_empty() => {}
                    None => println!("unknown command: {}", line.trim()),
                }
            }
            _ = redraw.tick() => {
                if handle.take_dirty().await? {
                    let view = handle.view().await?;
                    print!("{}", render_text(&view));
                    if !view.game_on {
                        return Ok(());
                    }
                }
            }
        }
    }
}
