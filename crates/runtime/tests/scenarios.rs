mod common;

use std::time::{Duration, Instant};

use bot_runtime::policy::combat;
use bot_runtime::threat::ThreatSource;
use bot_runtime::{
    ActionKind, ActionPlan, Bot, CycleOutcome, DecisionContext, GridSearch, PickupBlacklist,
    RoutePlanner, Threat, ThreatAssessor, Tier,
};
use common::{RecordingClient, decide};
use game_content::ContentTables;
use game_core::{
    Armor, ArmorSlot, CardinalDirection, EntityId, HealingItem, Inventory, MapUpdate,
    ObstacleTags, Path, Position, SnapshotBuilder, StatusEffect, TacticsConfig, Weapon,
    WeaponKind, WorldSnapshot,
};

fn armed_with(weapons: &[(&str, WeaponKind)]) -> Inventory {
    let mut inventory = Inventory::new();
    for (id, kind) in weapons {
        inventory.equip_weapon(Weapon::new(*id, *kind));
    }
    inventory
}

/// Runs the combat engagement against the player named `enemy`.
fn engage(snapshot: &WorldSnapshot, enemy: &str) -> Option<ActionPlan> {
    let tables = ContentTables::builtin();
    let config = TacticsConfig::default();
    let threats = ThreatAssessor::new(&tables, &config).assess(snapshot, None);
    let blacklist = PickupBlacklist::new(Duration::from_secs(10));
    let planner = RoutePlanner::new(&GridSearch, snapshot, &threats, &config);
    let ctx = DecisionContext::new(snapshot, &threats, &tables, &config, planner, &blacklist);

    let player = snapshot.players().iter().find(|p| p.name == enemy)?;
    let threat = Threat {
        source: ThreatSource::Player(player.name.clone()),
        position: player.position,
        distance: player.position.distance(snapshot.me().position),
    };
    combat::engage(&ctx, &threat)
}

/// Escape cells from the nearest threat, best first.
fn escape_order(snapshot: &WorldSnapshot) -> Vec<Position> {
    let tables = ContentTables::builtin();
    let config = TacticsConfig::default();
    let threats = ThreatAssessor::new(&tables, &config).assess(snapshot, None);
    let blacklist = PickupBlacklist::new(Duration::from_secs(10));
    let planner = RoutePlanner::new(&GridSearch, snapshot, &threats, &config);
    let ctx = DecisionContext::new(snapshot, &threats, &tables, &config, planner, &blacklist);

    let threat = threats.nearest().expect("a threat nearby");
    combat::escape_candidates(&ctx, threat)
}

#[test]
fn outside_the_zone_heads_for_the_center_ignoring_enemies() {
    let snapshot = SnapshotBuilder::new(20, Position::ORIGIN)
        .safe_zone_radius(5)
        .player("rival", Position::new(2, 0), 100)
        .inventory(armed_with(&[("CROSSBOW", WeaponKind::Gun)]))
        .build();

    let plan = decide(&snapshot);
    assert_eq!(plan.tier, Tier::SafeZone);
    assert_eq!(plan.target, Some(Position::new(10, 10)));
    let ActionKind::Move(path) = &plan.kind else {
        panic!("expected a move, got {:?}", plan.kind);
    };
    assert_eq!(path.len(), 20);
    assert!(matches!(
        path.first(),
        Some(CardinalDirection::North | CardinalDirection::East)
    ));
}

#[test]
fn walled_off_zone_core_still_leads_back_inside() {
    let center = Position::new(10, 10);
    let mut builder = SnapshotBuilder::new(20, Position::ORIGIN).safe_zone_radius(5);
    for cell in center.ring(3) {
        builder = builder.wall(cell);
    }
    let snapshot = builder.build();

    let plan = decide(&snapshot);
    assert_eq!(plan.tier, Tier::SafeZone);
    let ActionKind::Move(path) = &plan.kind else {
        panic!("expected a move, got {:?}", plan.kind);
    };
    let end = path.end(Position::ORIGIN);
    assert!(snapshot.safe_zone().contains(end), "path ends at {end}");
    assert_eq!(plan.target, Some(end));
    assert!(!snapshot.is_blocked(end));
}

#[test]
fn critical_health_uses_carried_healing() {
    let mut inventory = Inventory::new();
    inventory
        .add_healing(HealingItem::new("MERMAID_TAIL", 30))
        .expect("room in stack");
    let snapshot = SnapshotBuilder::new(20, Position::new(10, 10))
        .health(20)
        .inventory(inventory)
        .player("rival", Position::new(12, 10), 100)
        .build();

    let plan = decide(&snapshot);
    assert_eq!(plan.tier, Tier::CriticalHealth);
    assert_eq!(plan.kind, ActionKind::UseItem(EntityId::new("MERMAID_TAIL")));
}

#[test]
fn debuffs_push_health_into_the_critical_band() {
    let snapshot = SnapshotBuilder::new(20, Position::new(10, 10))
        .health(40)
        .effect(StatusEffect::Poison)
        .effect(StatusEffect::Bleed)
        .healing(HealingItem::new("PHOENIX_FEATHERS", 40), Position::new(10, 12))
        .build();

    let plan = decide(&snapshot);
    assert_eq!(plan.tier, Tier::CriticalHealth);
    assert_eq!(plan.target, Some(Position::new(10, 12)));
}

#[test]
fn crossbow_fires_at_eight_and_approaches_at_nine() {
    let me = Position::new(5, 10);
    let inventory = armed_with(&[("CROSSBOW", WeaponKind::Gun)]);

    let at_eight = SnapshotBuilder::new(30, me)
        .inventory(inventory.clone())
        .player("rival", Position::new(13, 10), 100)
        .build();
    let plan = engage(&at_eight, "rival").expect("plan");
    assert_eq!(plan.kind, ActionKind::AttackRanged(CardinalDirection::East));

    let at_nine = SnapshotBuilder::new(30, me)
        .inventory(inventory)
        .player("rival", Position::new(14, 10), 100)
        .build();
    let plan = engage(&at_nine, "rival").expect("plan");
    assert_eq!(plan.reason, "approach");
    assert_eq!(
        plan.kind,
        ActionKind::Move(Path::new(vec![CardinalDirection::East]))
    );
}

#[test]
fn every_weapon_fires_at_both_ends_of_its_band() {
    let tables = ContentTables::builtin();
    let me = Position::new(5, 20);

    for (id, spec) in &tables.weapons {
        for distance in [spec.band.min, spec.band.max] {
            let snapshot = SnapshotBuilder::new(40, me)
                .inventory(armed_with(&[(id.as_str(), spec.kind)]))
                .player("rival", Position::new(5 + distance as i32, 20), 100)
                .build();

            let plan = engage(&snapshot, "rival").expect("plan");
            let east = CardinalDirection::East;
            let expected = match spec.kind {
                WeaponKind::Gun => ActionKind::AttackRanged(east),
                WeaponKind::Melee => ActionKind::AttackMelee(east),
                WeaponKind::Throwable => ActionKind::Throw {
                    direction: east,
                    distance,
                },
                WeaponKind::Special => ActionKind::UseSpecial(east),
            };
            assert_eq!(plan.kind, expected, "{id} at distance {distance}");
        }
    }
}

#[test]
fn ranged_weapons_take_precedence_over_melee() {
    let snapshot = SnapshotBuilder::new(20, Position::new(10, 10))
        .inventory(armed_with(&[
            ("AXE", WeaponKind::Melee),
            ("BANANA", WeaponKind::Throwable),
            ("SHOTGUN", WeaponKind::Gun),
        ]))
        .player("rival", Position::new(10, 12), 100)
        .build();

    let plan = engage(&snapshot, "rival").expect("plan");
    assert_eq!(plan.kind, ActionKind::AttackRanged(CardinalDirection::North));
}

#[test]
fn threat_inside_every_minimum_range_is_kited() {
    let snapshot = SnapshotBuilder::new(20, Position::new(10, 10))
        .inventory(armed_with(&[("CROSSBOW", WeaponKind::Gun)]))
        .player("rival", Position::new(11, 10), 100)
        .build();

    let plan = decide(&snapshot);
    assert_eq!(plan.tier, Tier::Combat);
    assert_eq!(plan.reason, "kite");
    assert_eq!(
        plan.kind,
        ActionKind::Move(Path::new(vec![CardinalDirection::West]))
    );
}

#[test]
fn outnumbered_agent_evades() {
    let snapshot = SnapshotBuilder::new(30, Position::new(10, 10))
        .inventory(armed_with(&[("CROSSBOW", WeaponKind::Gun)]))
        .player("a", Position::new(13, 10), 100)
        .player("b", Position::new(10, 13), 100)
        .build();

    let plan = decide(&snapshot);
    assert_eq!(plan.tier, Tier::Combat);
    assert_eq!(plan.reason, "evade");
    let ActionKind::Move(path) = &plan.kind else {
        panic!("expected a move, got {:?}", plan.kind);
    };
    assert_eq!(path.len(), 1);
}

#[test]
fn first_helmet_beats_a_nearer_herb() {
    let me = Position::new(10, 10);
    let snapshot = SnapshotBuilder::new(20, me)
        .armor(Armor::new("WOODEN_HELMET", ArmorSlot::Helmet, 50, 0), Position::new(13, 10))
        .healing(HealingItem::new("MYSTERY_HERB", 40), Position::new(10, 11))
        .build();

    let plan = decide(&snapshot);
    assert_eq!(plan.tier, Tier::Equipment);
    assert_eq!(plan.target, Some(Position::new(13, 10)));
}

#[test]
fn dragon_egg_beats_a_nearer_chest() {
    let me = Position::new(10, 10);
    let egg = Position::new(10, 16);
    let snapshot = SnapshotBuilder::new(20, me)
        .obstacle("CHEST", Position::new(12, 10), ObstacleTags::DESTRUCTIBLE)
        .obstacle("DRAGON_EGG", egg, ObstacleTags::DESTRUCTIBLE)
        .build();

    let plan = decide(&snapshot);
    assert_eq!(plan.tier, Tier::Equipment);
    assert_eq!(plan.reason, "loot container");
    assert_eq!(plan.target, Some(egg));
    let ActionKind::Move(path) = &plan.kind else {
        panic!("expected a move, got {:?}", plan.kind);
    };
    // Stops next to the egg rather than walking into it.
    assert_eq!(path.end(me), Position::new(10, 15));
}

#[test]
fn container_next_to_the_agent_is_not_chased() {
    let me = Position::new(10, 10);
    let snapshot = SnapshotBuilder::new(20, me)
        .obstacle("CHEST", Position::new(11, 10), ObstacleTags::DESTRUCTIBLE)
        .build();

    let plan = decide(&snapshot);
    assert_ne!(plan.reason, "loot container");
}

#[test]
fn watched_agent_slips_into_a_bush() {
    let bush = Position::new(12, 10);
    let snapshot = SnapshotBuilder::new(20, Position::new(10, 10))
        .obstacle("BUSH", bush, ObstacleTags::CAN_GO_THROUGH | ObstacleTags::CAN_SHOOT_THROUGH)
        .player("rival", Position::new(10, 3), 100)
        .build();

    let plan = decide(&snapshot);
    assert_eq!(plan.tier, Tier::Reposition);
    assert_eq!(plan.target, Some(bush));
}

#[test]
fn bushes_rank_higher_as_escape_cells() {
    let me = Position::new(10, 10);
    let hideout = Position::new(5, 10);
    let base = || {
        SnapshotBuilder::new(30, me)
            .inventory(armed_with(&[("CROSSBOW", WeaponKind::Gun)]))
            .player("a", Position::new(13, 10), 100)
            .player("b", Position::new(10, 13), 100)
    };

    let open = escape_order(&base().build());
    let covered = escape_order(
        &base()
            .obstacle("BUSH", hideout, ObstacleTags::CAN_GO_THROUGH)
            .build(),
    );

    let rank = |order: &[Position]| order.iter().position(|cell| *cell == hideout);
    let (open_rank, covered_rank) = (rank(&open).expect("candidate"), rank(&covered).expect("candidate"));
    assert!(covered_rank < open_rank, "{covered_rank} vs {open_rank}");
}

#[test]
fn walled_in_agent_waits() {
    let me = Position::new(2, 2);
    let walled = |radius: u32| {
        let mut builder = SnapshotBuilder::new(20, me)
            .safe_zone_radius(radius)
            .weapon(Weapon::new("CROSSBOW", WeaponKind::Gun), Position::new(12, 12))
            .healing(HealingItem::new("ELIXIR", 5), Position::new(14, 3));
        for cell in me.neighbors() {
            builder = builder.wall(cell);
        }
        builder.build()
    };

    for radius in [20, 2] {
        let plan = decide(&walled(radius));
        assert_eq!(plan.kind, ActionKind::Wait, "zone radius {radius}");
        assert_eq!(plan.tier, Tier::Fallback);
    }
}

#[test]
fn cycles_inside_the_cooldown_make_at_most_one_call() {
    let update: MapUpdate = serde_json::from_str(
        r#"{
            "mapSize": 20,
            "safeZone": 20,
            "currentPlayer": "me",
            "players": [
                {"name": "me", "x": 10, "y": 10, "health": 90},
                {"name": "rival", "x": 12, "y": 10, "health": 80}
            ],
            "inventory": {"melee": {"id": "AXE"}}
        }"#,
    )
    .expect("valid json");

    let mut bot = Bot::new(
        RecordingClient::default(),
        ContentTables::builtin(),
        TacticsConfig::default(),
        1,
    );
    let start = Instant::now();

    let first = bot.on_map_update(&update, start);
    let second = bot.on_map_update(&update, start + Duration::from_millis(60));

    assert!(matches!(first, CycleOutcome::Acted { .. }));
    assert!(matches!(second, CycleOutcome::Throttled));
    assert_eq!(bot.client().calls, ["attack r"]);

    let third = bot.on_map_update(&update, start + Duration::from_millis(100));
    assert!(matches!(third, CycleOutcome::Acted { .. }));
    assert_eq!(bot.client().calls.len(), 2);
}
