//! Priority-ordered tier policy.
//!
//! The policy is a behavior-tree selector over guarded rules, evaluated top
//! to bottom every cycle:
//!
//! | tier            | guard                                   |
//! |-----------------|-----------------------------------------|
//! | safe zone       | agent outside the zone                  |
//! | critical health | effective health ≤ critical, in zone    |
//! | combat          | threat MEDIUM or HIGH, in zone          |
//! | equipment       | threat SAFE or LOW                      |
//! | reposition      | always                                  |
//! | explore         | always                                  |
//!
//! A tier whose guard holds but which finds nothing to do falls through to
//! the next one. When every tier falls through the agent waits.
pub mod combat;
mod context;
pub mod tiers;

use behavior_tree::builder::{rule, selector};
use behavior_tree::{Behavior, Node};
use game_content::ContentTables;
use game_core::{TacticsConfig, WorldSnapshot};

pub use context::DecisionContext;

use crate::plan::ActionPlan;
use crate::route::{PathSearch, RoutePlanner};
use crate::threat::ThreatAssessment;
use crate::trackers::PickupBlacklist;

use tiers::{
    CriticalHealth, Engage, Equip, Explore, ImmediateThreat, NoImmediateThreat, OutsideSafeZone,
    Reposition, ReturnToZone, SeekHealing,
};

/// Stateless tier policy. All per-cycle inputs live in the [`DecisionContext`].
#[derive(Clone, Copy, Debug, Default)]
pub struct DecisionPolicy;

impl DecisionPolicy {
    pub fn new() -> Self {
        Self
    }

    fn tree<'n, 'a: 'n>() -> Node<'n, DecisionContext<'a>> {
        selector(vec![
            rule(OutsideSafeZone, Box::new(ReturnToZone)),
            rule(CriticalHealth, Box::new(SeekHealing)),
            rule(ImmediateThreat, Box::new(Engage)),
            rule(NoImmediateThreat, Box::new(Equip)),
            Box::new(Reposition),
            Box::new(Explore),
        ])
    }

    /// Runs the tiers against `ctx`. Always returns a plan.
    pub fn decide(&self, ctx: &mut DecisionContext<'_>) -> ActionPlan {
        let status = Self::tree().tick(ctx);
        let plan = match ctx.take_plan() {
            Some(plan) if status.is_success() => plan,
            _ => ActionPlan::wait("no tier resolved"),
        };

        tracing::info!(
            tier = %plan.tier,
            priority = plan.priority(),
            reason = plan.reason,
            target = ?plan.target,
            "plan chosen"
        );
        plan
    }

    /// Builds the context for one cycle and decides.
    pub fn evaluate(
        &self,
        snapshot: &WorldSnapshot,
        threats: &ThreatAssessment,
        tables: &ContentTables,
        config: &TacticsConfig,
        search: &dyn PathSearch,
        blacklist: &PickupBlacklist,
    ) -> ActionPlan {
        let planner = RoutePlanner::new(search, snapshot, threats, config);
        let mut ctx = DecisionContext::new(snapshot, threats, tables, config, planner, blacklist);
        self.decide(&mut ctx)
    }
}
