//! Errors surfaced by the game client seam.
use thiserror::Error;

/// Failure reported by a [`crate::GameClient`] call.
///
/// The executor logs these and skips the tick; they never abort the bot.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("connection to the game server is closed")]
    Disconnected,

    #[error("server rejected {action}: {reason}")]
    Rejected { action: &'static str, reason: String },

    #[error("transport failure")]
    Io(#[from] std::io::Error),
}
