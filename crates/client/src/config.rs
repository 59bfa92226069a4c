//! Process configuration read from the environment.
use std::env;
use std::path::PathBuf;

/// Everything the binary needs before the first map update arrives.
#[derive(Clone, Debug)]
pub struct BotConfig {
    /// TOML file overriding tactics tunables.
    pub tactics_path: Option<PathBuf>,
    /// RON file replacing the builtin content tables.
    pub tables_path: Option<PathBuf>,
    pub session_id: Option<String>,
    pub log_dir: Option<PathBuf>,
    pub rng_seed: u64,
    /// Simulated time between replayed updates. Defaults to the action cooldown.
    pub tick_ms: Option<u64>,
    pub feed_buffer: usize,
}

impl BotConfig {
    pub const DEFAULT_FEED_BUFFER: usize = 32;

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `SURVIV_TACTICS_CONFIG` - Tactics TOML file (default: builtin tunables)
    /// - `SURVIV_TABLES` - Content tables RON file (default: builtin tables)
    /// - `SURVIV_SESSION_ID` - Session identifier for the log directory
    /// - `SURVIV_LOG_DIR` - Log root (default: platform cache dir)
    /// - `SURVIV_RNG_SEED` - Seed for recovery steps (default: 0)
    /// - `SURVIV_TICK_MS` - Simulated milliseconds between replayed updates
    /// - `SURVIV_FEED_BUFFER` - Update queue size (default: 32)
    pub fn from_env() -> Self {
        Self {
            tactics_path: env::var_os("SURVIV_TACTICS_CONFIG").map(PathBuf::from),
            tables_path: env::var_os("SURVIV_TABLES").map(PathBuf::from),
            session_id: env::var("SURVIV_SESSION_ID").ok(),
            log_dir: env::var_os("SURVIV_LOG_DIR").map(PathBuf::from),
            rng_seed: read_env("SURVIV_RNG_SEED").unwrap_or(0),
            tick_ms: read_env("SURVIV_TICK_MS"),
            feed_buffer: read_env::<usize>("SURVIV_FEED_BUFFER")
                .unwrap_or(Self::DEFAULT_FEED_BUFFER)
                .max(1),
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
