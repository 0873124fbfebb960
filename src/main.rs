//! narrator-replay: drives the announcement engine over a JSON-lines pipe
//!
//! Reads host snapshots and user commands from stdin, ticks the engine on
//! a fixed frame interval and writes speech, pointer and event messages
//! to stdout. Logs go to stderr so stdout stays machine-readable.

mod lifecycle;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use narrator_engine::bridge::{LineOutput, Replay};
use narrator_engine::EngineConfig;

use crate::lifecycle::ShutdownSignal;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .with_writer(std::io::stderr)
        .init();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "narrator-replay starting"
    );

    let config = EngineConfig::load().context("failed to load configuration")?;
    info!(
        duplicate_window_ms = config.duplicate_window_ms,
        tick_interval_ms = config.tick_interval_ms,
        "configuration loaded"
    );

    let shutdown = ShutdownSignal::new();
    let mut replay = Replay::new(&config, LineOutput::stdout());

    let stats = replay
        .run(tokio::io::stdin(), shutdown.wait())
        .await
        .context("replay loop failed")?;

    info!(
        messages = stats.messages,
        commands = stats.commands,
        ticks = stats.ticks,
        rejected = stats.rejected,
        "narrator-replay stopped"
    );

    Ok(())
}
