//! Blackboard shared by the decision tree nodes.

use behavior_tree::Status;
use game_content::ContentTables;
use game_core::{AgentState, Position, TacticsConfig, WorldSnapshot};

use crate::plan::ActionPlan;
use crate::route::RoutePlanner;
use crate::scoring::ResourceScorer;
use crate::threat::ThreatAssessment;
use crate::trackers::PickupBlacklist;

/// Everything a tier needs to resolve, for one decision cycle.
///
/// Conditions only read it. Action nodes read it and record the chosen
/// plan with [`DecisionContext::set_plan`]; the policy collects the plan
/// with [`DecisionContext::take_plan`] once the tree has been ticked.
///
/// The `'a` lifetime ties the context to the snapshot and the cross-tick
/// state it borrows; a context never outlives its cycle.
pub struct DecisionContext<'a> {
    pub snapshot: &'a WorldSnapshot,
    pub threats: &'a ThreatAssessment,
    pub tables: &'a ContentTables,
    pub config: &'a TacticsConfig,
    pub planner: RoutePlanner<'a>,
    pub scorer: ResourceScorer<'a>,
    pub blacklist: &'a PickupBlacklist,
    plan: Option<ActionPlan>,
}

impl<'a> DecisionContext<'a> {
    pub fn new(
        snapshot: &'a WorldSnapshot,
        threats: &'a ThreatAssessment,
        tables: &'a ContentTables,
        config: &'a TacticsConfig,
        planner: RoutePlanner<'a>,
        blacklist: &'a PickupBlacklist,
    ) -> Self {
        Self {
            snapshot,
            threats,
            tables,
            config,
            planner,
            scorer: ResourceScorer::new(tables, config),
            blacklist,
            plan: None,
        }
    }

    pub fn me(&self) -> &AgentState {
        self.snapshot.me()
    }

    pub fn position(&self) -> Position {
        self.snapshot.me().position
    }

    /// Health with the debuff penalty applied.
    pub fn effective_health(&self) -> u32 {
        self.snapshot
            .me()
            .effective_health(self.config.debuff_health_penalty)
    }

    pub fn in_safe_zone(&self) -> bool {
        self.snapshot.agent_in_safe_zone()
    }

    /// Whether `cell` may be picked as a pickup or exploration target.
    pub fn is_viable_target(&self, cell: Position) -> bool {
        !self.threats.is_dangerous(cell) && !self.blacklist.contains(cell)
    }

    /// Records the decision of an action node. Always returns success.
    pub fn set_plan(&mut self, plan: ActionPlan) -> Status {
        if let Some(previous) = &self.plan {
            tracing::warn!(
                previous = previous.reason,
                next = plan.reason,
                "plan replaced within one evaluation"
            );
        }
        self.plan = Some(plan);
        Status::Success
    }

    pub fn take_plan(&mut self) -> Option<ActionPlan> {
        self.plan.take()
    }
}
