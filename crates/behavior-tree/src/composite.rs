//! Composite behavior nodes.
//!
//! [`Selector`] controls the evaluation order of its children: first commit
//! wins, the shape of a priority chain.

use tracing::trace;

use crate::{Behavior, Status};

/// Evaluates children in priority order until one commits.
///
/// # Semantics
///
/// - If a child returns `Commit`, the selector **stops immediately** and commits
/// - If a child returns `Pass`, the selector **continues** to the next child
/// - If every child passes, the selector passes
/// - A selector without children always passes
///
/// Children are never reordered, so a given context always walks the same
/// path through the selector.
pub struct Selector<C> {
    name: &'static str,
    children: Vec<Box<dyn Behavior<C>>>,
}

impl<C> Selector<C> {
    /// Creates a new selector with the given children.
    pub fn new(children: Vec<Box<dyn Behavior<C>>>) -> Self {
        Self::named("selector", children)
    }

    /// Creates a named selector, see [`Selector::new`].
    pub fn named(name: &'static str, children: Vec<Box<dyn Behavior<C>>>) -> Self {
        Self { name, children }
    }

    /// Walks the children and returns the name of the one that committed.
    ///
    /// Returns `None` when every child passed.
    pub fn run(&self, ctx: &mut C) -> Option<&'static str> {
        for child in &self.children {
            match child.tick(ctx) {
                Status::Commit => {
                    trace!(selector = self.name, step = child.name(), "committed");
                    return Some(child.name());
                }
                Status::Pass => trace!(selector = self.name, step = child.name(), "passed"),
            }
        }
        None
    }

    /// Number of children in priority order.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Child names in evaluation order.
    pub fn step_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.children.iter().map(|child| child.name())
    }
}

impl<C> Behavior<C> for Selector<C> {
    fn tick(&self, ctx: &mut C) -> Status {
        Status::from_bool(self.run(ctx).is_some())
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Trace {
        visited: Vec<&'static str>,
    }

    struct Commits(&'static str);
    impl Behavior<Trace> for Commits {
        fn tick(&self, ctx: &mut Trace) -> Status {
            ctx.visited.push(self.0);
            Status::Commit
        }

        fn name(&self) -> &'static str {
            self.0
        }
    }

    struct Passes(&'static str);
    impl Behavior<Trace> for Passes {
        fn tick(&self, ctx: &mut Trace) -> Status {
            ctx.visited.push(self.0);
            Status::Pass
        }

        fn name(&self) -> &'static str {
            self.0
        }
    }

    #[test]
    fn selector_stops_at_first_commit() {
        let chain = Selector::new(vec![
            Box::new(Passes("buffs")),
            Box::new(Commits("attack")),
            Box::new(Commits("never")),
        ]);

        let mut ctx = Trace::default();
        assert_eq!(chain.run(&mut ctx), Some("attack"));
        assert_eq!(ctx.visited, vec!["buffs", "attack"]);
    }

    #[test]
    fn selector_passes_when_every_child_passes() {
        let chain = Selector::new(vec![Box::new(Passes("a")), Box::new(Passes("b"))]);

        let mut ctx = Trace::default();
        assert_eq!(chain.run(&mut ctx), None);
        assert_eq!(chain.tick(&mut ctx), Status::Pass);
        assert_eq!(ctx.visited, vec!["a", "b", "a", "b"]);
    }

    #[test]
    fn selector_reports_step_order() {
        let chain = Selector::named(
            "combat",
            vec![Box::new(Passes("first")), Box::new(Commits("second"))],
        );
        assert_eq!(chain.step_names().collect::<Vec<_>>(), vec!["first", "second"]);
        assert_eq!(chain.len(), 2);
        assert_eq!(Behavior::<Trace>::name(&chain), "combat");
    }

    #[test]
    fn empty_selector_passes() {
        let chain = Selector::<Trace>::new(Vec::new());
        let mut ctx = Trace::default();
        assert!(chain.is_empty());
        assert_eq!(chain.run(&mut ctx), None);
        assert_eq!(chain.tick(&mut ctx), Status::Pass);
    }
}
