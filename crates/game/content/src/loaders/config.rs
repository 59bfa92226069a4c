//! Tactics configuration loader.

use std::path::Path;

use game_core::TacticsConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`TacticsConfig`] from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load the tactics configuration from a TOML file.
    ///
    /// Keys missing from the file keep their default values.
    pub fn load(path: &Path) -> LoadResult<TacticsConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<TacticsConfig> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse tactics TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "critical_health = 30\naction_cooldown_ms = 250").expect("write");

        let config = ConfigLoader::load(file.path()).expect("load");
        assert_eq!(config.critical_health, 30);
        assert_eq!(config.action_cooldown_ms, 250);
        assert_eq!(config.npc_threat_radius, TacticsConfig::default().npc_threat_radius);
    }

    #[test]
    fn malformed_file_is_an_error() {
        assert!(ConfigLoader::parse("critical_health = \"low\"").is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(ConfigLoader::load(Path::new("/nonexistent/tactics.toml")).is_err());
    }
}
