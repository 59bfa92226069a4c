#![allow(dead_code)]

use std::time::Duration;

use bot_runtime::{
    ActionPlan, ClientError, DecisionPolicy, GameClient, GridSearch, PickupBlacklist,
    ThreatAssessor,
};
use game_content::ContentTables;
use game_core::{CardinalDirection, TacticsConfig, WorldSnapshot};

/// Runs the full policy once with builtin tables and default config.
pub fn decide(snapshot: &WorldSnapshot) -> ActionPlan {
    let tables = ContentTables::builtin();
    let config = TacticsConfig::default();
    let threats = ThreatAssessor::new(&tables, &config).assess(snapshot, None);
    let blacklist = PickupBlacklist::new(Duration::from_secs(10));
    DecisionPolicy::new().evaluate(snapshot, &threats, &tables, &config, &GridSearch, &blacklist)
}

/// Client that records every call as a short string.
#[derive(Default)]
pub struct RecordingClient {
    pub calls: Vec<String>,
}

impl GameClient for RecordingClient {
    fn move_path(&mut self, path: &str) -> Result<(), ClientError> {
        self.calls.push(format!("move {path}"));
        Ok(())
    }

    fn shoot(&mut self, direction: CardinalDirection) -> Result<(), ClientError> {
        self.calls.push(format!("shoot {}", direction.as_char()));
        Ok(())
    }

    fn attack(&mut self, direction: CardinalDirection) -> Result<(), ClientError> {
        self.calls.push(format!("attack {}", direction.as_char()));
        Ok(())
    }

    fn throw_item(&mut self, direction: CardinalDirection, distance: u32) -> Result<(), ClientError> {
        self.calls
            .push(format!("throw {} {distance}", direction.as_char()));
        Ok(())
    }

    fn use_special(&mut self, direction: CardinalDirection) -> Result<(), ClientError> {
        self.calls.push(format!("special {}", direction.as_char()));
        Ok(())
    }

    fn use_item(&mut self, item_id: &str) -> Result<(), ClientError> {
        self.calls.push(format!("use {item_id}"));
        Ok(())
    }

    fn pickup_item(&mut self) -> Result<(), ClientError> {
        self.calls.push("pickup".to_string());
        Ok(())
    }
}
