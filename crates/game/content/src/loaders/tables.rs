//! Content table loader.

use std::collections::HashMap;
use std::path::Path;

use crate::loaders::{LoadResult, read_file};
use crate::tables::{ContentTables, NpcProfile, WeaponSpec};

/// Loader for content table overrides from RON files.
///
/// The file lists only the entries it adds or replaces; everything else
/// comes from [`ContentTables::builtin`].
pub struct TablesLoader;

impl TablesLoader {
    pub fn load(path: &Path) -> LoadResult<ContentTables> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<ContentTables> {
        let overrides: TableOverrides = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse content tables RON: {}", e))?;

        let mut tables = ContentTables::builtin();
        if let Some(default_npc) = overrides.default_npc {
            tables.default_npc = default_npc;
        }
        tables.extend(ContentTables {
            npcs: overrides.npcs,
            default_npc: tables.default_npc,
            weapons: overrides.weapons,
            healing: overrides.healing,
            default_healing: tables.default_healing,
            containers: overrides.containers,
        });
        Ok(tables)
    }
}

/// On-disk shape of a table override file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct TableOverrides {
    npcs: HashMap<String, NpcProfile>,
    default_npc: Option<NpcProfile>,
    weapons: HashMap<String, WeaponSpec>,
    healing: HashMap<String, u32>,
    containers: HashMap<String, u32>,
}
