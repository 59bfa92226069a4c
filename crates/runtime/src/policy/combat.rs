//! Fight-or-flee resolution for the combat tier.

use std::cmp::Reverse;

use game_core::{CardinalDirection, Located, Path, Position, WeaponKind};

use super::context::DecisionContext;
use crate::plan::{ActionKind, ActionPlan, Tier};
use crate::route::AvoidPolicy;
use crate::threat::Threat;

/// Resolves the combat tier against the nearest threat.
///
/// Unfavourable fights are evaded first. When no escape cell is
/// reachable the agent fights with whatever it holds.
pub fn resolve(ctx: &DecisionContext<'_>) -> Option<ActionPlan> {
    let threat = ctx.threats.nearest()?;

    if should_evade(ctx, threat) {
        if let Some(plan) = evade(ctx, threat) {
            return Some(plan);
        }
        tracing::debug!(threat = %threat.position, "no escape route, standing ground");
    }
    engage(ctx, threat)
}

/// True when fighting `threat` from here is a bad idea.
pub fn should_evade(ctx: &DecisionContext<'_>, threat: &Threat) -> bool {
    let outnumbered = ctx.threats.nearby.len() >= ctx.config.evade_enemy_count;
    let weak = ctx.effective_health() < ctx.config.min_health_for_combat;
    let unarmed = !ctx.snapshot.inventory().is_armed();

    let own_cover = ctx.snapshot.cover_count(ctx.position());
    let enemy_cover = ctx.snapshot.cover_count(threat.position);
    let outcovered = enemy_cover >= own_cover + ctx.config.cover_advantage_margin;

    outnumbered || weak || unarmed || outcovered
}

/// Attack with the first weapon whose band covers the distance, otherwise
/// kite or close in.
pub fn engage(ctx: &DecisionContext<'_>, threat: &Threat) -> Option<ActionPlan> {
    let me = ctx.position();
    let distance = threat.distance;
    let direction = CardinalDirection::toward(me, threat.position)?;
    let inventory = ctx.snapshot.inventory();

    for weapon in inventory.weapons() {
        let band = ctx.tables.weapon_spec(weapon.id.as_str(), weapon.kind).band;
        if !band.contains(distance) {
            continue;
        }
        let kind = match weapon.kind {
            WeaponKind::Gun => ActionKind::AttackRanged(direction),
            WeaponKind::Melee => ActionKind::AttackMelee(direction),
            WeaponKind::Throwable => ActionKind::Throw {
                direction,
                distance: distance.clamp(1, band.max),
            },
            WeaponKind::Special => ActionKind::UseSpecial(direction),
        };
        tracing::debug!(weapon = %weapon.id, distance, "attacking");
        return Some(ActionPlan::new(kind, Tier::Combat, "attack").with_target(threat.position));
    }

    let too_close = inventory.weapons().next().is_some()
        && inventory.weapons().all(|weapon| {
            ctx.tables.weapon_spec(weapon.id.as_str(), weapon.kind).band.min > distance
        });

    if too_close {
        kite(ctx, threat)
    } else {
        approach(ctx, threat)
    }
}

/// One step straight away from the threat.
fn kite(ctx: &DecisionContext<'_>, threat: &Threat) -> Option<ActionPlan> {
    let me = ctx.position();
    let away = CardinalDirection::toward(threat.position, me)?;
    let cell = me.step(away);
    if ctx.snapshot.is_blocked(cell) || ctx.snapshot.is_player_at(cell) {
        return None;
    }
    Some(
        ActionPlan::new(ActionKind::Move(Path::new(vec![away])), Tier::Combat, "kite")
            .with_target(cell),
    )
}

/// One step along a path toward the threat.
///
/// Only static obstacles are avoided: closing in on an enemy means
/// entering its danger zone.
fn approach(ctx: &DecisionContext<'_>, threat: &Threat) -> Option<ActionPlan> {
    let route = ctx
        .planner
        .step_toward(threat.position, AvoidPolicy::Minimal)?;
    if route.is_arrived() {
        return None;
    }
    Some(ActionPlan::new(ActionKind::Move(route.path), Tier::Combat, "approach").with_target(threat.position))
}

/// Escape cells around the agent, best first.
///
/// Score: distance from the threat × 10, minus 3 per danger cell in the
/// candidate's 3×3 neighbourhood, plus the bush bonus for concealed cells.
pub fn escape_candidates(ctx: &DecisionContext<'_>, threat: &Threat) -> Vec<Position> {
    let me = ctx.position();
    let zone = ctx.snapshot.safe_zone();

    let mut scored: Vec<(i64, Position)> = (1..=ctx.config.escape_radius)
        .flat_map(|radius| me.ring(radius))
        .filter(|cell| !ctx.snapshot.is_blocked(*cell))
        .filter(|cell| zone.contains(*cell))
        .filter(|cell| !ctx.snapshot.is_player_at(*cell))
        .map(|cell| {
            let dangerous_around = cell
                .ring(0)
                .chain(cell.surrounding())
                .filter(|c| ctx.threats.is_dangerous(*c))
                .count() as i64;
            let hidden = if ctx.snapshot.is_concealed(cell) {
                ctx.config.bush_bonus.round() as i64
            } else {
                0
            };
            let score = i64::from(threat.distance_to(cell)) * 10 - dangerous_around * 3 + hidden;
            (score, cell)
        })
        .collect();

    // Stable: equal scores keep ring order, nearer rings first.
    scored.sort_by_key(|(score, _)| Reverse(*score));
    scored.into_iter().map(|(_, cell)| cell).collect()
}

/// Steps toward the best reachable escape cell. Safe routes are tried
/// first; when the agent is boxed in by danger, any walkable route will do.
fn evade(ctx: &DecisionContext<'_>, threat: &Threat) -> Option<ActionPlan> {
    let candidates: Vec<Position> = escape_candidates(ctx, threat)
        .into_iter()
        .take(ctx.config.max_path_attempts)
        .collect();

    [AvoidPolicy::Full, AvoidPolicy::Minimal]
        .into_iter()
        .find_map(|policy| {
            candidates
                .iter()
                .find_map(|cell| ctx.planner.step_toward(*cell, policy))
        })
        .filter(|route| !route.is_arrived())
        .map(|route| {
            ActionPlan::new(ActionKind::Move(route.path), Tier::Combat, "evade").with_target(route.target)
        })
}
