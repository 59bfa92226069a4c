//! Node and condition traits.

use crate::Status;

/// A behavior tree node evaluated against a context (the blackboard).
pub trait Behavior<C>: Send + Sync {
    /// Evaluate this node. Action nodes record their result in the context.
    fn tick(&self, ctx: &mut C) -> Status;
}

/// Boxed node borrowed for `'n`, so trees can run over short-lived contexts.
pub type Node<'n, C> = Box<dyn Behavior<C> + 'n>;

impl<C> Behavior<C> for Node<'_, C> {
    #[inline]
    fn tick(&self, ctx: &mut C) -> Status {
        (**self).tick(ctx)
    }
}

/// Read-only predicate over a context.
///
/// Conditions only get a shared borrow, so they cannot record anything.
pub trait Condition<C>: Send + Sync {
    fn check(&self, ctx: &C) -> bool;
}

/// Node that succeeds exactly when its condition holds.
pub struct Check<T>(pub T);

impl<C, T: Condition<C>> Behavior<C> for Check<T> {
    #[inline]
    fn tick(&self, ctx: &mut C) -> Status {
        Status::from(self.0.check(ctx))
    }
}
