//! Tactical decision and pathfinding engine for the battle-royale bot.
//!
//! One decision cycle runs per map update:
//!
//! 1. [`WorldSnapshot`](game_core::WorldSnapshot) ingestion (in `game-core`)
//! 2. [`threat`] classifies danger cells and the threat level
//! 3. [`policy`] walks the priority tiers, using [`scoring`] to value targets
//!    and [`route`] to find safe paths
//! 4. [`executor`] turns the chosen [`ActionPlan`] into one client call,
//!    throttled by the action cooldown
//!
//! [`Bot`] owns the cross-tick state (trackers, cooldown, RNG) and drives
//! the cycle.
pub mod bot;
pub mod error;
pub mod executor;
pub mod plan;
pub mod policy;
pub mod route;
pub mod scoring;
pub mod threat;
pub mod trackers;

pub use bot::{Bot, CycleOutcome};
pub use error::ClientError;
pub use executor::{ActionExecutor, Dispatch, GameClient};
pub use plan::{ActionKind, ActionPlan, Tier};
pub use policy::{DecisionContext, DecisionPolicy};
pub use route::{AvoidPolicy, GridSearch, PathSearch, Route, RoutePlanner};
pub use scoring::{Ranked, ResourceScorer};
pub use threat::{Threat, ThreatAssessment, ThreatAssessor, ThreatLevel};
pub use trackers::{EnemyTracker, MovementTracker, PickupBlacklist, WaitTracker};
