//! Translates plans into game-client calls.

use std::time::{Duration, Instant};

use game_core::CardinalDirection;

use crate::error::ClientError;
use crate::plan::{ActionKind, ActionPlan};

/// Outbound command surface of the game server connection.
///
/// Implementations are expected to be quick: the executor calls at most one
/// method per decision cycle.
pub trait GameClient {
    /// Sends a movement path encoded as direction letters (`"uurl"`).
    fn move_path(&mut self, path: &str) -> Result<(), ClientError>;
    fn shoot(&mut self, direction: CardinalDirection) -> Result<(), ClientError>;
    fn attack(&mut self, direction: CardinalDirection) -> Result<(), ClientError>;
    fn throw_item(&mut self, direction: CardinalDirection, distance: u32) -> Result<(), ClientError>;
    fn use_special(&mut self, direction: CardinalDirection) -> Result<(), ClientError>;
    fn use_item(&mut self, item_id: &str) -> Result<(), ClientError>;
    fn pickup_item(&mut self) -> Result<(), ClientError>;
}

impl<T: GameClient + ?Sized> GameClient for &mut T {
    fn move_path(&mut self, path: &str) -> Result<(), ClientError> {
        (**self).move_path(path)
    }

    fn shoot(&mut self, direction: CardinalDirection) -> Result<(), ClientError> {
        (**self).shoot(direction)
    }

    fn attack(&mut self, direction: CardinalDirection) -> Result<(), ClientError> {
        (**self).attack(direction)
    }

    fn throw_item(&mut self, direction: CardinalDirection, distance: u32) -> Result<(), ClientError> {
        (**self).throw_item(direction, distance)
    }

    fn use_special(&mut self, direction: CardinalDirection) -> Result<(), ClientError> {
        (**self).use_special(direction)
    }

    fn use_item(&mut self, item_id: &str) -> Result<(), ClientError> {
        (**self).use_item(item_id)
    }

    fn pickup_item(&mut self) -> Result<(), ClientError> {
        (**self).pickup_item()
    }
}

/// What happened to a plan handed to the executor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dispatch {
    /// Too soon after the previous call; nothing was sent.
    Throttled,
    /// The plan needs no call (`Wait`, or a move with an empty path).
    Idle,
    Sent,
    /// The client reported an error. Already logged.
    Failed,
}

/// Rate-limited dispatcher.
#[derive(Clone, Debug)]
pub struct ActionExecutor {
    cooldown: Duration,
    last_call: Option<Instant>,
}

impl ActionExecutor {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            last_call: None,
        }
    }

    /// Whether a call may be issued at `now`.
    pub fn ready(&self, now: Instant) -> bool {
        self.last_call
            .is_none_or(|last| now.saturating_duration_since(last) >= self.cooldown)
    }

    pub fn execute<C: GameClient + ?Sized>(
        &mut self,
        client: &mut C,
        plan: &ActionPlan,
        now: Instant,
    ) -> Dispatch {
        if !self.ready(now) {
            return Dispatch::Throttled;
        }

        let result = match &plan.kind {
            ActionKind::Wait => return Dispatch::Idle,
            ActionKind::Move(path) if path.is_empty() => return Dispatch::Idle,
            ActionKind::Move(path) => client.move_path(&path.to_string()),
            ActionKind::AttackRanged(direction) => client.shoot(*direction),
            ActionKind::AttackMelee(direction) => client.attack(*direction),
            ActionKind::Throw {
                direction,
                distance,
            } => client.throw_item(*direction, *distance),
            ActionKind::UseSpecial(direction) => client.use_special(*direction),
            ActionKind::UseItem(id) => client.use_item(id.as_str()),
            ActionKind::Pickup => client.pickup_item(),
        };
        self.last_call = Some(now);

        match result {
            Ok(()) => Dispatch::Sent,
            Err(error) => {
                tracing::warn!(tier = %plan.tier, reason = plan.reason, %error, "client call failed");
                Dispatch::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::Tier;
    use game_core::{EntityId, Path};

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
        fail: bool,
    }

    impl Recorder {
        fn record(&mut self, call: String) -> Result<(), ClientError> {
            self.calls.push(call);
            if self.fail {
                Err(ClientError::Disconnected)
            } else {
                Ok(())
            }
        }
    }

    impl GameClient for Recorder {
        fn move_path(&mut self, path: &str) -> Result<(), ClientError> {
            self.record(format!("move {path}"))
        }
        fn shoot(&mut self, direction: CardinalDirection) -> Result<(), ClientError> {
            self.record(format!("shoot {}", direction.as_char()))
        }
        fn attack(&mut self, direction: CardinalDirection) -> Result<(), ClientError> {
            self.record(format!("attack {}", direction.as_char()))
        }
        fn throw_item(&mut self, direction: CardinalDirection, distance: u32) -> Result<(), ClientError> {
            self.record(format!("throw {} {distance}", direction.as_char()))
        }
        fn use_special(&mut self, direction: CardinalDirection) -> Result<(), ClientError> {
            self.record(format!("special {}", direction.as_char()))
        }
        fn use_item(&mut self, item_id: &str) -> Result<(), ClientError> {
            self.record(format!("use {item_id}"))
        }
        fn pickup_item(&mut self) -> Result<(), ClientError> {
            self.record("pickup".to_string())
        }
    }

    fn plan(kind: ActionKind) -> ActionPlan {
        ActionPlan::new(kind, Tier::Combat, "test")
    }

    #[test]
    fn maps_each_action_to_one_call() {
        let mut client = Recorder::default();
        let mut executor = ActionExecutor::new(Duration::ZERO);
        let now = Instant::now();

        let plans = [
            plan(ActionKind::Move("uur".parse().expect("path"))),
            plan(ActionKind::AttackRanged(CardinalDirection::East)),
            plan(ActionKind::AttackMelee(CardinalDirection::West)),
            plan(ActionKind::Throw {
                direction: CardinalDirection::North,
                distance: 3,
            }),
            plan(ActionKind::UseSpecial(CardinalDirection::South)),
            plan(ActionKind::UseItem(EntityId::new("ELIXIR"))),
            plan(ActionKind::Pickup),
        ];
        for p in &plans {
            assert_eq!(executor.execute(&mut client, p, now), Dispatch::Sent);
        }

        assert_eq!(
            client.calls,
            ["move uur", "shoot r", "attack l", "throw u 3", "special d", "use ELIXIR", "pickup"]
        );
    }

    #[test]
    fn wait_and_empty_moves_make_no_call() {
        let mut client = Recorder::default();
        let mut executor = ActionExecutor::new(Duration::from_millis(100));
        let now = Instant::now();

        assert_eq!(executor.execute(&mut client, &ActionPlan::wait("idle"), now), Dispatch::Idle);
        assert_eq!(
            executor.execute(&mut client, &plan(ActionKind::Move(Path::default())), now),
            Dispatch::Idle
        );
        assert!(client.calls.is_empty());
        // No call was attempted, so the cooldown did not start.
        assert!(executor.ready(now));
    }

    #[test]
    fn calls_inside_the_cooldown_are_throttled() {
        let mut client = Recorder::default();
        let mut executor = ActionExecutor::new(Duration::from_millis(100));
        let start = Instant::now();
        let attack = plan(ActionKind::AttackMelee(CardinalDirection::North));

        assert_eq!(executor.execute(&mut client, &attack, start), Dispatch::Sent);
        assert_eq!(
            executor.execute(&mut client, &attack, start + Duration::from_millis(99)),
            Dispatch::Throttled
        );
        assert_eq!(
            executor.execute(&mut client, &attack, start + Duration::from_millis(100)),
            Dispatch::Sent
        );
        assert_eq!(client.calls.len(), 2);
    }

    #[test]
    fn client_failures_are_reported_not_propagated() {
        let mut client = Recorder {
            fail: true,
            ..Recorder::default()
        };
        let mut executor = ActionExecutor::new(Duration::from_millis(100));
        let now = Instant::now();

        assert_eq!(executor.execute(&mut client, &plan(ActionKind::Pickup), now), Dispatch::Failed);
        assert!(!executor.ready(now));
    }
}
