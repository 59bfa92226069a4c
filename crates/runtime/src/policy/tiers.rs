//! Guard conditions and action nodes for the decision tiers.
//!
//! Each tier is a [`Condition`] paired with an action [`Behavior`]. An
//! action that cannot produce a plan returns [`Status::Failure`] and the
//! selector moves on to the next tier.

use behavior_tree::{Behavior, Condition, Status};
use game_content::ContentTables;
use game_core::{HealingItem, Located, Position};

use super::combat;
use super::context::DecisionContext;
use crate::plan::{ActionKind, ActionPlan, Tier};
use crate::route::{AvoidPolicy, Route};
use crate::scoring::{Candidate, PositionScorer, Ranked};

// ============================================================================
// Conditions
// ============================================================================

pub struct OutsideSafeZone;

impl Condition<DecisionContext<'_>> for OutsideSafeZone {
    fn check(&self, ctx: &DecisionContext<'_>) -> bool {
        !ctx.in_safe_zone()
    }
}

/// Effective health at or below the critical threshold, inside the zone.
pub struct CriticalHealth;

impl Condition<DecisionContext<'_>> for CriticalHealth {
    fn check(&self, ctx: &DecisionContext<'_>) -> bool {
        ctx.in_safe_zone() && ctx.effective_health() <= ctx.config.critical_health
    }
}

/// Threat level MEDIUM or HIGH, inside the zone.
pub struct ImmediateThreat;

impl Condition<DecisionContext<'_>> for ImmediateThreat {
    fn check(&self, ctx: &DecisionContext<'_>) -> bool {
        ctx.in_safe_zone() && ctx.threats.level.is_immediate()
    }
}

pub struct NoImmediateThreat;

impl Condition<DecisionContext<'_>> for NoImmediateThreat {
    fn check(&self, ctx: &DecisionContext<'_>) -> bool {
        !ctx.threats.level.is_immediate()
    }
}

// ============================================================================
// Actions
// ============================================================================

/// Moves back into the safe zone, ignoring everything but hard obstacles.
///
/// Walks interior cells ring by ring outward from the zone center and
/// routes to the first one the agent can actually reach.
pub struct ReturnToZone;

impl Behavior<DecisionContext<'_>> for ReturnToZone {
    fn tick(&self, ctx: &mut DecisionContext<'_>) -> Status {
        let zone = ctx.snapshot.safe_zone();
        let map = ctx.snapshot.map();

        let reachable = ctx.planner.reachable(AvoidPolicy::Minimal);

        let route = (0..=zone.radius)
            .flat_map(|radius| zone.center.ring(radius))
            .filter(|cell| map.contains(*cell) && zone.contains(*cell))
            .filter(|cell| reachable.contains(cell))
            .find_map(|cell| ctx.planner.plan(cell, AvoidPolicy::Minimal))
            .filter(|route| !route.is_arrived());

        match route {
            Some(route) => ctx.set_plan(move_plan(route, Tier::SafeZone, "return to safe zone")),
            None => {
                tracing::debug!(tier = %Tier::SafeZone, "no route into the safe zone");
                Status::Failure
            }
        }
    }
}

/// Drinks the best carried healing item, otherwise goes for one.
pub struct SeekHealing;

impl SeekHealing {
    fn heal_amount(tables: &ContentTables, item: &HealingItem) -> u32 {
        if item.heal_amount > 0 {
            item.heal_amount
        } else {
            tables.healing_value(item.id.as_str())
        }
    }
}

impl Behavior<DecisionContext<'_>> for SeekHealing {
    fn tick(&self, ctx: &mut DecisionContext<'_>) -> Status {
        let snapshot = ctx.snapshot;
        let tables = ctx.tables;
        let carried = snapshot
            .inventory()
            .healing_items()
            .iter()
            .max_by_key(|item| Self::heal_amount(tables, item));
        if let Some(item) = carried {
            let plan = ActionPlan::new(
                ActionKind::UseItem(item.id.clone()),
                Tier::CriticalHealth,
                "use healing item",
            );
            return ctx.set_plan(plan);
        }

        let candidates = snapshot
            .healing_items()
            .iter()
            .filter(|h| ctx.is_viable_target(h.position))
            .map(Candidate::Healing);
        let ranked = ctx
            .scorer
            .rank_all(snapshot, &ctx.threats.danger_zones, candidates);
        if let Some(plan) = first_reachable(ctx, &ranked, Tier::CriticalHealth, "fetch healing item") {
            return ctx.set_plan(plan);
        }

        // An ally heals; walking up to one is the last resort.
        let me = ctx.position();
        let ally = snapshot
            .allies()
            .iter()
            .filter(|ally| ally.position != me && !ctx.threats.is_dangerous(ally.position))
            .min_by_key(|ally| (ally.distance_to(me), ally.position));
        let route = ally.and_then(|ally| ctx.planner.plan(ally.position, AvoidPolicy::Full));

        match route {
            Some(route) if !route.is_arrived() => {
                ctx.set_plan(move_plan(route, Tier::CriticalHealth, "move to ally"))
            }
            _ => {
                tracing::debug!(tier = %Tier::CriticalHealth, "no healing reachable");
                Status::Failure
            }
        }
    }
}

/// Fights or evades the nearest threat.
pub struct Engage;

impl Behavior<DecisionContext<'_>> for Engage {
    fn tick(&self, ctx: &mut DecisionContext<'_>) -> Status {
        match combat::resolve(ctx) {
            Some(plan) => ctx.set_plan(plan),
            None => {
                tracing::debug!(tier = %Tier::Combat, "combat unresolved");
                Status::Failure
            }
        }
    }
}

/// Picks up gear: weapon upgrades, then armor upgrades, then healing items
/// while the stack has room, then loots the best-ranked container.
pub struct Equip;

impl Equip {
    /// Walks up to the best-ranked container not already adjacent.
    /// Containers drop their loot to an agent standing next to them.
    fn loot_container(ctx: &DecisionContext<'_>) -> Option<ActionPlan> {
        let snapshot = ctx.snapshot;
        let me = ctx.position();
        let containers = snapshot
            .obstacles()
            .iter()
            .filter(|o| ctx.scorer.container_value(o).is_some())
            .filter(|o| o.position.distance(me) > 1 && ctx.is_viable_target(o.position))
            .map(Candidate::Container);
        let ranked = ctx
            .scorer
            .rank_all(snapshot, &ctx.threats.danger_zones, containers);

        ranked
            .iter()
            .take(ctx.config.max_path_attempts)
            .find_map(|entry| {
                let route = ctx
                    .planner
                    .plan(entry.candidate.position(), AvoidPolicy::Full)?
                    .stop_short();
                tracing::debug!(container = entry.candidate.label(), score = entry.score, "container reachable");
                Some(move_plan(route, Tier::Equipment, "loot container"))
            })
    }
}

impl Behavior<DecisionContext<'_>> for Equip {
    fn tick(&self, ctx: &mut DecisionContext<'_>) -> Status {
        let snapshot = ctx.snapshot;
        let inventory = snapshot.inventory();
        let scorer = &ctx.scorer;

        let weapons: Vec<Candidate<'_>> = snapshot
            .weapons()
            .iter()
            .filter(|w| ctx.is_viable_target(w.position))
            .filter(|w| scorer.is_weapon_upgrade(&w.item, inventory))
            .map(Candidate::Weapon)
            .collect();

        let armors: Vec<Candidate<'_>> = snapshot
            .armors()
            .iter()
            .filter(|a| ctx.is_viable_target(a.position))
            .filter(|a| scorer.is_armor_upgrade(&a.item, inventory))
            .map(Candidate::Armor)
            .collect();

        let healing: Vec<Candidate<'_>> = if inventory.healing_is_full() {
            Vec::new()
        } else {
            snapshot
                .healing_items()
                .iter()
                .filter(|h| ctx.is_viable_target(h.position))
                .map(Candidate::Healing)
                .collect()
        };

        for (group, reason) in [
            (weapons, "pick up weapon"),
            (armors, "pick up armor"),
            (healing, "pick up healing item"),
        ] {
            let ranked = scorer.rank_all(snapshot, &ctx.threats.danger_zones, group);
            if let Some(plan) = first_reachable(ctx, &ranked, Tier::Equipment, reason) {
                return ctx.set_plan(plan);
            }
        }

        if let Some(plan) = Self::loot_container(ctx) {
            return ctx.set_plan(plan);
        }

        tracing::debug!(tier = %Tier::Equipment, "nothing worth picking up");
        Status::Failure
    }
}

/// Moves to a nearby cell with better cover, concealment or less threat.
pub struct Reposition;

impl Behavior<DecisionContext<'_>> for Reposition {
    fn tick(&self, ctx: &mut DecisionContext<'_>) -> Status {
        let scorer = PositionScorer::new(ctx.tables, ctx.config);
        let snapshot = ctx.snapshot;
        let me = ctx.position();
        let zone = snapshot.safe_zone();
        let current = scorer.score_with_threat(snapshot, me, ctx.threats.scalar);

        let mut cells: Vec<(f64, Position)> = (1..=ctx.config.strategic_radius)
            .flat_map(|radius| me.ring(radius))
            .filter(|cell| zone.contains(*cell))
            .filter(|cell| !snapshot.is_blocked(*cell))
            .filter(|cell| !ctx.planner.is_avoided(*cell, AvoidPolicy::Full))
            .filter(|cell| ctx.is_viable_target(*cell))
            .map(|cell| (scorer.score(snapshot, cell), cell))
            .filter(|(score, _)| *score > current + ctx.config.reposition_min_gain)
            .collect();
        cells.sort_by(|a, b| b.0.total_cmp(&a.0));

        let route = cells
            .iter()
            .take(ctx.config.max_path_attempts)
            .find_map(|(_, cell)| ctx.planner.plan(*cell, AvoidPolicy::Full));

        match route {
            Some(route) if !route.is_arrived() => {
                ctx.set_plan(move_plan(route, Tier::Reposition, "reposition"))
            }
            _ => Status::Failure,
        }
    }
}

/// Wanders toward the nearest point of interest, or toward the map center.
/// Containers are left to [`Equip`], which stops beside them.
pub struct Explore;

impl Explore {
    fn points_of_interest(ctx: &DecisionContext<'_>) -> Vec<Position> {
        let snapshot = ctx.snapshot;
        let me = ctx.position();
        let zone = snapshot.safe_zone();

        let mut points: Vec<Position> = snapshot
            .weapons()
            .iter()
            .map(|w| w.position)
            .chain(snapshot.healing_items().iter().map(|h| h.position))
            .chain(snapshot.allies().iter().map(|a| a.position))
            .filter(|cell| *cell != me && ctx.is_viable_target(*cell))
            .collect();

        // Inside the zone first, then nearest.
        points.sort_by_key(|cell| (!zone.contains(*cell), cell.distance(me), *cell));
        points.dedup();
        points
    }
}

impl Behavior<DecisionContext<'_>> for Explore {
    fn tick(&self, ctx: &mut DecisionContext<'_>) -> Status {
        let route = Self::points_of_interest(ctx)
            .into_iter()
            .take(ctx.config.max_path_attempts)
            .find_map(|cell| ctx.planner.plan(cell, AvoidPolicy::Full))
            .filter(|route| !route.is_arrived());
        if let Some(route) = route {
            return ctx.set_plan(move_plan(route, Tier::Explore, "explore"));
        }

        let center = ctx.snapshot.map().center();
        match ctx.planner.step_toward(center, AvoidPolicy::Full) {
            Some(route) if !route.is_arrived() => {
                ctx.set_plan(move_plan(route, Tier::Explore, "drift to center"))
            }
            _ => Status::Failure,
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn move_plan(route: Route, tier: Tier, reason: &'static str) -> ActionPlan {
    ActionPlan::new(ActionKind::Move(route.path), tier, reason).with_target(route.target)
}

/// Plan for the best-ranked candidate that has a safe route: `Pickup` when
/// already standing on it, `Move` otherwise.
fn first_reachable(
    ctx: &DecisionContext<'_>,
    ranked: &[Ranked<'_>],
    tier: Tier,
    reason: &'static str,
) -> Option<ActionPlan> {
    ranked
        .iter()
        .take(ctx.config.max_path_attempts)
        .find_map(|entry| {
            let target = entry.candidate.position();
            let route = ctx.planner.plan(target, AvoidPolicy::Full)?;
            tracing::debug!(%tier, target = entry.candidate.label(), score = entry.score, "candidate reachable");
            let plan = if route.is_arrived() {
                ActionPlan::new(ActionKind::Pickup, tier, reason).with_target(target)
            } else {
                move_plan(route, tier, reason)
            };
            Some(plan)
        })
}
