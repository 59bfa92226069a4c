use std::time::Duration;

/// Tunable thresholds, radii and weights read by the tactical layer.
///
/// Every field has a default, so a TOML file only needs to list the values
/// it overrides.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TacticsConfig {
    // ===== health thresholds =====
    /// At or below this effective health the agent heals before anything else.
    pub critical_health: u32,
    /// Below this, healing items are valued higher.
    pub low_health_threshold: u32,
    /// Below this, combat is considered unfavorable.
    pub min_health_for_combat: u32,
    /// Health subtracted per active debuff when testing thresholds.
    pub debuff_health_penalty: u32,

    // ===== threat radii =====
    pub npc_threat_radius: u32,
    pub player_threat_radius: u32,
    /// NPCs within this distance feed the threat scalar.
    pub npc_scan_radius: u32,
    /// Players within this distance project danger zones.
    pub observation_range: u32,
    /// Assumed reach of an enemy player's weapon.
    pub player_weapon_range: u32,
    pub player_buffer_radius: u32,
    /// Extra cells added at both ends of an NPC movement corridor.
    pub corridor_extension: u32,
    pub player_threat_weight: f64,

    // ===== resource scoring =====
    pub empty_slot_multiplier: f64,
    pub armor_first_piece_multiplier: f64,
    pub armor_reduction_weight: f64,
    pub pickup_point_weight: f64,
    pub low_health_heal_multiplier: f64,
    pub beneficial_effect_multiplier: f64,
    /// Danger distance at which the safety factor reaches 1.0.
    pub safety_distance: f64,
    pub safety_floor: f64,

    // ===== positioning =====
    pub strategic_radius: u32,
    pub cover_min: u32,
    pub cover_max: u32,
    pub cover_bonus: f64,
    pub container_weight: f64,
    pub reposition_threat_weight: f64,
    pub reposition_min_gain: f64,
    /// Bonus for a cell inside a bush or other concealing obstacle.
    pub bush_bonus: f64,
    /// Consecutive idle ticks tolerated before a forced reposition.
    pub max_wait_streak: u32,

    // ===== combat =====
    pub evade_enemy_count: usize,
    pub cover_advantage_margin: u32,
    pub escape_radius: u32,
    /// Upper bound on candidate targets tried before a tier gives up.
    pub max_path_attempts: usize,

    // ===== timing =====
    pub action_cooldown_ms: u64,
    pub tracker_expiry_ms: u64,
    pub blacklist_expiry_ms: u64,
    /// Ticks without movement after a move before recovery kicks in.
    pub stuck_threshold: u32,
}

impl TacticsConfig {
    pub const DEFAULT_CRITICAL_HEALTH: u32 = 25;
    pub const DEFAULT_LOW_HEALTH_THRESHOLD: u32 = 50;
    pub const DEFAULT_MIN_HEALTH_FOR_COMBAT: u32 = 30;
    pub const DEFAULT_ACTION_COOLDOWN_MS: u64 = 100;
    pub const DEFAULT_TRACKER_EXPIRY_MS: u64 = 5_000;
    pub const DEFAULT_BLACKLIST_EXPIRY_MS: u64 = 10_000;

    pub fn new() -> Self {
        Self {
            critical_health: Self::DEFAULT_CRITICAL_HEALTH,
            low_health_threshold: Self::DEFAULT_LOW_HEALTH_THRESHOLD,
            min_health_for_combat: Self::DEFAULT_MIN_HEALTH_FOR_COMBAT,
            debuff_health_penalty: 10,

            npc_threat_radius: 3,
            player_threat_radius: 5,
            npc_scan_radius: 6,
            observation_range: 10,
            player_weapon_range: 8,
            player_buffer_radius: 1,
            corridor_extension: 1,
            player_threat_weight: 50.0,

            empty_slot_multiplier: 1.5,
            armor_first_piece_multiplier: 2.0,
            armor_reduction_weight: 3.0,
            pickup_point_weight: 0.1,
            low_health_heal_multiplier: 1.5,
            beneficial_effect_multiplier: 1.25,
            safety_distance: 5.0,
            safety_floor: 0.1,

            strategic_radius: 8,
            cover_min: 2,
            cover_max: 4,
            cover_bonus: 20.0,
            container_weight: 0.5,
            reposition_threat_weight: 2.0,
            reposition_min_gain: 10.0,
            bush_bonus: 15.0,
            max_wait_streak: 3,

            evade_enemy_count: 2,
            cover_advantage_margin: 2,
            escape_radius: 8,
            max_path_attempts: 8,

            action_cooldown_ms: Self::DEFAULT_ACTION_COOLDOWN_MS,
            tracker_expiry_ms: Self::DEFAULT_TRACKER_EXPIRY_MS,
            blacklist_expiry_ms: Self::DEFAULT_BLACKLIST_EXPIRY_MS,
            stuck_threshold: 2,
        }
    }

    pub fn action_cooldown(&self) -> Duration {
        Duration::from_millis(self.action_cooldown_ms)
    }

    pub fn tracker_expiry(&self) -> Duration {
        Duration::from_millis(self.tracker_expiry_ms)
    }

    pub fn blacklist_expiry(&self) -> Duration {
        Duration::from_millis(self.blacklist_expiry_ms)
    }

    /// Whether `count` obstacles around a cell make it good cover.
    pub fn is_cover_count(&self, count: u32) -> bool {
        (self.cover_min..=self.cover_max).contains(&count)
    }
}

impl Default for TacticsConfig {
    fn default() -> Self {
        Self::new()
    }
}
