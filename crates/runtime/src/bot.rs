//! Decision-cycle driver.
//!
//! [`Bot`] owns everything that outlives a single map update: the action
//! cooldown, the trackers, the RNG used for recovery steps and the last
//! plan. Each call to [`Bot::on_map_update`] runs one full synchronous
//! cycle and issues at most one client call.

use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

use game_content::ContentTables;
use game_core::{
    CardinalDirection, IngestError, MapUpdate, Path, Position, TacticsConfig, WorldSnapshot,
};

use crate::executor::{ActionExecutor, Dispatch, GameClient};
use crate::plan::{ActionKind, ActionPlan, Tier};
use crate::policy::DecisionPolicy;
use crate::route::{AvoidPolicy, GridSearch, PathSearch, RoutePlanner};
use crate::threat::{ThreatAssessment, ThreatAssessor};
use crate::trackers::{EnemyTracker, MovementTracker, PickupBlacklist, WaitTracker};

/// Result of one decision cycle.
#[derive(Debug)]
pub enum CycleOutcome {
    /// Arrived inside the action cooldown. Nothing was evaluated or mutated.
    Throttled,
    /// The update could not be turned into a snapshot.
    Skipped(IngestError),
    Acted { plan: ActionPlan, dispatch: Dispatch },
}

impl CycleOutcome {
    pub fn plan(&self) -> Option<&ActionPlan> {
        match self {
            CycleOutcome::Acted { plan, .. } => Some(plan),
            _ => None,
        }
    }
}

pub struct Bot<C, S = GridSearch> {
    config: TacticsConfig,
    tables: ContentTables,
    policy: DecisionPolicy,
    executor: ActionExecutor,
    client: C,
    search: S,
    enemies: EnemyTracker,
    movement: MovementTracker,
    waits: WaitTracker,
    blacklist: PickupBlacklist,
    rng: StdRng,
    last_plan: Option<ActionPlan>,
}

impl<C: GameClient> Bot<C> {
    /// Bot using breadth-first grid search.
    pub fn new(client: C, tables: ContentTables, config: TacticsConfig, seed: u64) -> Self {
        Self::with_search(client, GridSearch, tables, config, seed)
    }
}

impl<C: GameClient, S: PathSearch> Bot<C, S> {
    pub fn with_search(
        client: C,
        search: S,
        tables: ContentTables,
        config: TacticsConfig,
        seed: u64,
    ) -> Self {
        Self {
            executor: ActionExecutor::new(config.action_cooldown()),
            enemies: EnemyTracker::new(config.tracker_expiry()),
            blacklist: PickupBlacklist::new(config.blacklist_expiry()),
            movement: MovementTracker::new(),
            waits: WaitTracker::new(),
            policy: DecisionPolicy::new(),
            rng: StdRng::seed_from_u64(seed),
            last_plan: None,
            config,
            tables,
            client,
            search,
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn client_mut(&mut self) -> &mut C {
        &mut self.client
    }

    pub fn config(&self) -> &TacticsConfig {
        &self.config
    }

    pub fn last_plan(&self) -> Option<&ActionPlan> {
        self.last_plan.as_ref()
    }

    pub fn blacklist(&self) -> &PickupBlacklist {
        &self.blacklist
    }

    /// Runs one cycle for a raw map update.
    pub fn on_map_update(&mut self, update: &MapUpdate, now: Instant) -> CycleOutcome {
        if !self.executor.ready(now) {
            tracing::trace!("cycle throttled");
            return CycleOutcome::Throttled;
        }

        match WorldSnapshot::ingest(update) {
            Ok(snapshot) => self.on_snapshot(&snapshot, now),
            Err(error) => {
                tracing::warn!(%error, "map update skipped");
                CycleOutcome::Skipped(error)
            }
        }
    }

    /// Runs one cycle for an already built snapshot.
    pub fn on_snapshot(&mut self, snapshot: &WorldSnapshot, now: Instant) -> CycleOutcome {
        if !self.executor.ready(now) {
            tracing::trace!("cycle throttled");
            return CycleOutcome::Throttled;
        }

        let moved_last_tick = self.last_plan.as_ref().is_some_and(ActionPlan::is_move);
        self.movement.record(snapshot.me().position, moved_last_tick);
        self.enemies.observe(snapshot, now);
        self.enemies.purge(now);
        self.blacklist.purge(now);
        self.note_looted_container(snapshot, now);

        let threats =
            ThreatAssessor::new(&self.tables, &self.config).assess(snapshot, Some(&self.enemies));

        let mut plan = if self.movement.is_stuck(self.config.stuck_threshold) {
            self.recover(snapshot, &threats, now)
        } else {
            self.policy.evaluate(
                snapshot,
                &threats,
                &self.tables,
                &self.config,
                &self.search,
                &self.blacklist,
            )
        };

        let streak = self.waits.record(plan.kind == ActionKind::Wait);
        if streak > self.config.max_wait_streak {
            if let Some(forced) = self.break_wait_streak(snapshot, &threats) {
                tracing::info!(streak, target = ?forced.target, "wait streak broken");
                plan = forced;
            }
            self.waits.reset();
        }

        let dispatch = self.executor.execute(&mut self.client, &plan, now);
        tracing::debug!(?dispatch, tier = %plan.tier, "cycle finished");
        self.last_plan = Some(plan.clone());
        CycleOutcome::Acted { plan, dispatch }
    }

    /// A container the agent walked up to has dropped its loot; stop
    /// targeting it until the blacklist entry expires.
    fn note_looted_container(&mut self, snapshot: &WorldSnapshot, now: Instant) {
        let me = snapshot.me().position;
        let looted = self
            .last_plan
            .as_ref()
            .filter(|plan| plan.tier == Tier::Equipment && plan.is_move())
            .and_then(|plan| plan.target)
            .filter(|target| snapshot.is_blocked(*target) && target.distance(me) <= 1);
        if let Some(target) = looted {
            tracing::debug!(%target, "container looted");
            self.blacklist.insert(target, now);
        }
    }

    /// Steps toward a random cell near the safe-zone center so the agent
    /// does not idle forever on a quiet map.
    fn break_wait_streak(
        &mut self,
        snapshot: &WorldSnapshot,
        threats: &ThreatAssessment,
    ) -> Option<ActionPlan> {
        const SPREAD: u32 = 3;

        let me = snapshot.me().position;
        let zone = snapshot.safe_zone();
        let planner = RoutePlanner::new(&self.search, snapshot, threats, &self.config);

        let spots: Vec<Position> = (0..=SPREAD)
            .flat_map(|radius| zone.center.ring(radius))
            .filter(|cell| *cell != me && !snapshot.is_blocked(*cell))
            .filter(|cell| zone.contains(*cell) && !threats.is_dangerous(*cell))
            .collect();
        let spot = *spots.choose(&mut self.rng)?;

        let route = [AvoidPolicy::Full, AvoidPolicy::Minimal]
            .into_iter()
            .find_map(|policy| planner.step_toward(spot, policy))
            .filter(|route| !route.is_arrived())?;
        Some(
            ActionPlan::new(ActionKind::Move(route.path), Tier::Reposition, "break wait streak")
                .with_target(spot),
        )
    }

    /// Blacklists the target the agent failed to reach and takes a random
    /// safe step to shake loose.
    fn recover(
        &mut self,
        snapshot: &WorldSnapshot,
        threats: &ThreatAssessment,
        now: Instant,
    ) -> ActionPlan {
        let stuck_for = self.movement.stuck_count();
        if let Some(target) = self.last_plan.as_ref().and_then(|plan| plan.target) {
            self.blacklist.insert(target, now);
            tracing::info!(%target, stuck_for, "target blacklisted");
        }
        self.movement.reset();

        let me = snapshot.me().position;
        let options: Vec<CardinalDirection> = CardinalDirection::ALL
            .into_iter()
            .filter(|direction| {
                let cell = me.step(*direction);
                !snapshot.is_blocked(cell) && !threats.is_dangerous(cell) && !snapshot.is_player_at(cell)
            })
            .collect();

        match options.choose(&mut self.rng) {
            Some(direction) => ActionPlan::new(
                ActionKind::Move(Path::new(vec![*direction])),
                Tier::Recovery,
                "unstick",
            )
            .with_target(me.step(*direction)),
            None => ActionPlan::wait("stuck with no safe step"),
        }
    }
}
