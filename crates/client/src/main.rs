//! Battle-royale bot binary.
//!
//! Reads map updates as JSON lines (from a file argument or stdin), runs one
//! decision cycle per update and writes the resulting commands to stdout as
//! JSON lines. Logs go to stderr and to a per-session file.
//!
//! ```bash
//! SURVIV_TACTICS_CONFIG=tactics.toml surviv-bot recording.jsonl > commands.jsonl
//! ```
mod config;
mod logging;
mod replay;

use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, BufReader};
use tokio::sync::mpsc;

use bot_runtime::Bot;
use game_content::{ConfigLoader, ContentTables, TablesLoader};
use game_core::TacticsConfig;

use config::BotConfig;
use replay::{JsonLinesClient, ReplayClock};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = BotConfig::from_env();
    let _log_guard = logging::setup_logging(config.session_id.as_deref(), config.log_dir.as_deref())?;

    let tactics = match &config.tactics_path {
        Some(path) => ConfigLoader::load(path)?,
        None => TacticsConfig::default(),
    };
    let tables = match &config.tables_path {
        Some(path) => TablesLoader::load(path)?,
        None => ContentTables::builtin(),
    };
    tracing::info!(
        weapons = tables.weapons.len(),
        npcs = tables.npcs.len(),
        cooldown_ms = tactics.action_cooldown_ms,
        seed = config.rng_seed,
        "bot configured"
    );

    let step = config
        .tick_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| tactics.action_cooldown());
    let mut bot = Bot::new(
        JsonLinesClient::new(std::io::stdout()),
        tables,
        tactics,
        config.rng_seed,
    );

    let (tx, rx) = mpsc::channel(config.feed_buffer);
    let reader = open_input(std::env::args().nth(1)).await?;
    let feeder = tokio::spawn(replay::feed(reader, tx));

    let summary = replay::drive(&mut bot, rx, ReplayClock::new(step)).await;
    let forwarded = feeder.await.context("update reader panicked")??;

    tracing::info!(forwarded, ?summary, "replay finished");
    Ok(())
}

/// Opens the update source: a file path, or stdin when absent or `-`.
async fn open_input(path: Option<String>) -> Result<Box<dyn AsyncBufRead + Send + Unpin>> {
    match path.as_deref() {
        None | Some("-") => Ok(Box::new(BufReader::new(tokio::io::stdin()))),
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("failed to open update file {path}"))?;
            Ok(Box::new(BufReader::new(file)))
        }
    }
}
