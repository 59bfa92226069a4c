//! Cross-tick memory owned by the bot driver.
//!
//! Snapshots are rebuilt every tick; these trackers carry the little that
//! must survive between ticks. All of them expire entries by wall-clock
//! [`Instant`]s supplied by the caller.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use game_core::{EntityId, Position, WorldSnapshot};

/// Last known whereabouts of an NPC.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackedEnemy {
    pub species: String,
    pub position: Position,
    pub last_seen: Instant,
}

/// Remembers recently seen NPCs so brief visibility gaps do not erase
/// their danger zones.
#[derive(Clone, Debug)]
pub struct EnemyTracker {
    entries: HashMap<EntityId, TrackedEnemy>,
    expiry: Duration,
}

impl EnemyTracker {
    pub fn new(expiry: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            expiry,
        }
    }

    /// Records every living NPC in `snapshot` and forgets dead ones.
    pub fn observe(&mut self, snapshot: &WorldSnapshot, now: Instant) {
        for npc in snapshot.npcs() {
            if npc.alive {
                self.entries.insert(
                    npc.id.clone(),
                    TrackedEnemy {
                        species: npc.species.clone(),
                        position: npc.position,
                        last_seen: now,
                    },
                );
            } else {
                self.entries.remove(&npc.id);
            }
        }
    }

    pub fn purge(&mut self, now: Instant) {
        let expiry = self.expiry;
        self.entries
            .retain(|_, enemy| now.saturating_duration_since(enemy.last_seen) < expiry);
    }

    /// Tracked NPCs that are not visible in `snapshot`.
    pub fn remembered<'a>(
        &'a self,
        snapshot: &'a WorldSnapshot,
    ) -> impl Iterator<Item = &'a TrackedEnemy> + 'a {
        self.entries
            .iter()
            .filter(|(id, _)| !snapshot.npcs().iter().any(|npc| &npc.id == *id))
            .map(|(_, enemy)| enemy)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Counts consecutive ticks where a move was issued but the agent stayed put.
#[derive(Clone, Debug, Default)]
pub struct MovementTracker {
    last_position: Option<Position>,
    stuck_count: u32,
}

impl MovementTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds the position seen this tick and whether the previous plan moved.
    pub fn record(&mut self, position: Position, moved_last_tick: bool) {
        match self.last_position {
            Some(last) if last == position => {
                if moved_last_tick {
                    self.stuck_count += 1;
                }
            }
            _ => self.stuck_count = 0,
        }
        self.last_position = Some(position);
    }

    pub fn stuck_count(&self) -> u32 {
        self.stuck_count
    }

    pub fn is_stuck(&self, threshold: u32) -> bool {
        self.stuck_count > threshold
    }

    pub fn reset(&mut self) {
        self.stuck_count = 0;
    }
}

/// Counts consecutive ticks that ended in a wait.
#[derive(Clone, Copy, Debug, Default)]
pub struct WaitTracker {
    streak: u32,
}

impl WaitTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds whether this tick's plan waits and returns the current streak.
    pub fn record(&mut self, waited: bool) -> u32 {
        self.streak = if waited { self.streak + 1 } else { 0 };
        self.streak
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn reset(&mut self) {
        self.streak = 0;
    }
}

/// Target cells the agent recently got stuck trying to reach.
#[derive(Clone, Debug)]
pub struct PickupBlacklist {
    entries: HashMap<Position, Instant>,
    expiry: Duration,
}

impl PickupBlacklist {
    pub fn new(expiry: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            expiry,
        }
    }

    pub fn insert(&mut self, position: Position, now: Instant) {
        self.entries.insert(position, now);
    }

    pub fn contains(&self, position: Position) -> bool {
        self.entries.contains_key(&position)
    }

    pub fn purge(&mut self, now: Instant) {
        let expiry = self.expiry;
        self.entries
            .retain(|_, since| now.saturating_duration_since(*since) < expiry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::SnapshotBuilder;

    #[test]
    fn enemy_tracker_remembers_hidden_npcs_until_expiry() {
        let start = Instant::now();
        let mut tracker = EnemyTracker::new(Duration::from_millis(5_000));

        let seen = SnapshotBuilder::new(20, Position::ORIGIN)
            .npc("n1", "RHINO", Position::new(5, 5))
            .build();
        tracker.observe(&seen, start);

        let hidden = SnapshotBuilder::new(20, Position::ORIGIN).build();
        let later = start + Duration::from_millis(4_000);
        tracker.purge(later);
        let remembered: Vec<_> = tracker.remembered(&hidden).collect();
        assert_eq!(remembered.len(), 1);
        assert_eq!(remembered[0].position, Position::new(5, 5));
        assert_eq!(tracker.remembered(&seen).count(), 0);

        tracker.purge(start + Duration::from_millis(5_000));
        assert!(tracker.is_empty());
    }

    #[test]
    fn movement_tracker_counts_only_failed_moves() {
        let mut tracker = MovementTracker::new();
        let cell = Position::new(3, 3);

        tracker.record(cell, false);
        tracker.record(cell, true);
        tracker.record(cell, true);
        tracker.record(cell, false);
        assert_eq!(tracker.stuck_count(), 2);
        assert!(!tracker.is_stuck(2));

        tracker.record(cell, true);
        assert!(tracker.is_stuck(2));

        tracker.record(Position::new(3, 4), true);
        assert_eq!(tracker.stuck_count(), 0);
    }

    #[test]
    fn wait_streak_breaks_on_any_other_plan() {
        let mut tracker = WaitTracker::new();
        assert_eq!(tracker.record(true), 1);
        assert_eq!(tracker.record(true), 2);
        assert_eq!(tracker.record(false), 0);
        assert_eq!(tracker.record(true), 1);

        tracker.reset();
        assert_eq!(tracker.streak(), 0);
    }

    #[test]
    fn blacklist_expires() {
        let start = Instant::now();
        let mut blacklist = PickupBlacklist::new(Duration::from_secs(10));
        blacklist.insert(Position::new(1, 2), start);
        assert!(blacklist.contains(Position::new(1, 2)));

        blacklist.purge(start + Duration::from_secs(9));
        assert_eq!(blacklist.len(), 1);
        blacklist.purge(start + Duration::from_secs(10));
        assert!(blacklist.is_empty());
    }
}
