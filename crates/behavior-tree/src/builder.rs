//! Shorthands for building trees without spelling out `Box::new`.

use crate::{Check, Condition, Node, Selector, Sequence};

#[inline]
pub fn sequence<'n, C: 'n>(children: Vec<Node<'n, C>>) -> Node<'n, C> {
    Box::new(Sequence::new(children))
}

#[inline]
pub fn selector<'n, C: 'n>(children: Vec<Node<'n, C>>) -> Node<'n, C> {
    Box::new(Selector::new(children))
}

/// A rule: runs `action` only when `condition` holds.
///
/// Shorthand for `sequence(vec![Box::new(Check(condition)), action])`.
#[inline]
pub fn rule<'n, C: 'n, T>(condition: T, action: Node<'n, C>) -> Node<'n, C>
where
    T: Condition<C> + 'n,
{
    sequence(vec![Box::new(Check(condition)), action])
}
