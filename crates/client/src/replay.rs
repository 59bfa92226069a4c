//! Replays recorded map updates through the bot.
//!
//! Updates arrive as JSON lines. A reader task parses them and feeds a
//! bounded channel; the bot loop consumes the channel on a simulated clock
//! so replays are deterministic regardless of how fast the input is read.
//! Commands are written back out as JSON lines.

use std::io::Write;
use std::time::{Duration, Instant};

use anyhow::Result;
use serde_json::json;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;

use bot_runtime::{Bot, ClientError, CycleOutcome, Dispatch, GameClient};
use game_core::{CardinalDirection, MapUpdate};

/// Client that writes every command as one JSON line.
pub struct JsonLinesClient<W> {
    sink: W,
}

impl<W: Write> JsonLinesClient<W> {
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    pub fn into_inner(self) -> W {
        self.sink
    }

    fn emit(&mut self, command: serde_json::Value) -> Result<(), ClientError> {
        tracing::debug!(%command, "command sent");
        writeln!(self.sink, "{command}")?;
        self.sink.flush()?;
        Ok(())
    }
}

fn dir(direction: CardinalDirection) -> String {
    direction.as_char().to_string()
}

impl<W: Write> GameClient for JsonLinesClient<W> {
    fn move_path(&mut self, path: &str) -> Result<(), ClientError> {
        self.emit(json!({ "action": "move", "path": path }))
    }

    fn shoot(&mut self, direction: CardinalDirection) -> Result<(), ClientError> {
        self.emit(json!({ "action": "shoot", "direction": dir(direction) }))
    }

    fn attack(&mut self, direction: CardinalDirection) -> Result<(), ClientError> {
        self.emit(json!({ "action": "attack", "direction": dir(direction) }))
    }

    fn throw_item(&mut self, direction: CardinalDirection, distance: u32) -> Result<(), ClientError> {
        self.emit(json!({ "action": "throw", "direction": dir(direction), "distance": distance }))
    }

    fn use_special(&mut self, direction: CardinalDirection) -> Result<(), ClientError> {
        self.emit(json!({ "action": "special", "direction": dir(direction) }))
    }

    fn use_item(&mut self, item_id: &str) -> Result<(), ClientError> {
        self.emit(json!({ "action": "use", "item": item_id }))
    }

    fn pickup_item(&mut self) -> Result<(), ClientError> {
        self.emit(json!({ "action": "pickup" }))
    }
}

/// Monotonic clock advanced by a fixed step per update.
#[derive(Clone, Copy, Debug)]
pub struct ReplayClock {
    start: Instant,
    step: Duration,
    ticks: u32,
}

impl ReplayClock {
    pub fn new(step: Duration) -> Self {
        Self {
            start: Instant::now(),
            step,
            ticks: 0,
        }
    }

    /// Returns the current instant and advances by one step.
    pub fn tick(&mut self) -> Instant {
        let now = self.start + self.step * self.ticks;
        self.ticks += 1;
        now
    }
}

/// Counters reported at the end of a replay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub updates: usize,
    pub sent: usize,
    pub idle: usize,
    pub failed: usize,
    pub throttled: usize,
    pub skipped: usize,
}

/// Reads JSON-line map updates from `reader` into `tx` until EOF or until
/// the receiver goes away. Malformed lines are logged and dropped.
pub async fn feed<R>(reader: R, tx: mpsc::Sender<MapUpdate>) -> Result<usize>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut line_no = 0usize;
    let mut forwarded = 0usize;

    while let Some(line) = lines.next_line().await? {
        line_no += 1;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<MapUpdate>(&line) {
            Ok(update) => {
                if tx.send(update).await.is_err() {
                    tracing::debug!("update receiver closed");
                    break;
                }
                forwarded += 1;
            }
            Err(error) => tracing::warn!(line = line_no, %error, "malformed map update"),
        }
    }

    Ok(forwarded)
}

/// Drives `bot` with every update from `rx` until the channel closes.
pub async fn drive<C: GameClient>(
    bot: &mut Bot<C>,
    mut rx: mpsc::Receiver<MapUpdate>,
    mut clock: ReplayClock,
) -> ReplaySummary {
    let mut summary = ReplaySummary::default();

    while let Some(update) = rx.recv().await {
        summary.updates += 1;
        match bot.on_map_update(&update, clock.tick()) {
            CycleOutcome::Throttled => summary.throttled += 1,
            CycleOutcome::Skipped(_) => summary.skipped += 1,
            CycleOutcome::Acted { dispatch, .. } => match dispatch {
                Dispatch::Sent => summary.sent += 1,
                Dispatch::Idle => summary.idle += 1,
                Dispatch::Failed => summary.failed += 1,
                Dispatch::Throttled => summary.throttled += 1,
            },
        }
    }

    summary
}
