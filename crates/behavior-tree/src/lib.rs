//! Minimal behavior tree for per-tick decisions.
//!
//! Every tick is evaluated to completion: nodes either succeed or fail, there
//! is no `Running` state. A prioritised rule list is a [`Selector`] of
//! [`Sequence`]s, each starting with a [`Check`] on a read-only
//! [`Condition`]; a rule whose action fails falls through to the next one.
//!
//! - [`Behavior`]: node trait, evaluated against a mutable blackboard
//! - [`Condition`]: read-only predicate, lifted into a node by [`Check`]
//! - [`Sequence`], [`Selector`]: AND / OR composites
//! - [`builder`]: boxing shorthands

pub mod behavior;
pub mod builder;
pub mod composite;
pub mod status;

pub use behavior::{Behavior, Check, Condition, Node};
pub use composite::{Selector, Sequence};
pub use status::Status;
