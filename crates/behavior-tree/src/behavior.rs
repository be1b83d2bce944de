//! Core behavior trait.
//!
//! This module defines the [`Behavior`] trait, which is the fundamental
//! abstraction for all chain nodes. The trait is generic over a context type
//! `C` (the per-tick blackboard), allowing nodes to read the world snapshot and
//! record their decision.

use crate::Status;

/// A node that can be evaluated against a per-tick context.
pub trait Behavior<C>: Send + Sync {
    /// Evaluate this node against the given context.
    ///
    /// # Returns
    ///
    /// - `Status::Commit` if the node decided what happens this tick
    /// - `Status::Pass` if evaluation should move on to the next node
    fn tick(&self, ctx: &mut C) -> Status;

    /// Human-readable node name used in logs.
    fn name(&self) -> &'static str {
        "anonymous"
    }
}

/// Blanket implementation for boxed behaviors.
///
/// This allows `Box<dyn Behavior<C>>` to also implement `Behavior<C>`,
/// enabling heterogeneous collections of nodes.
impl<C> Behavior<C> for Box<dyn Behavior<C>> {
    #[inline]
    fn tick(&self, ctx: &mut C) -> Status {
        (**self).tick(ctx)
    }

    #[inline]
    fn name(&self) -> &'static str {
        (**self).name()
    }
}
