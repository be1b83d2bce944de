//! Candidate filtering and ranking.
//!
//! The engine holds two ordered rule lists. A candidate is eligible only when
//! every inclusion rule accepts it; eligible candidates start from a baseline
//! of `-distance / 2` and every weight rule adds to that score. The result is
//! sorted by descending score, ties keeping enumeration order.
//!
//! The engine keeps no memory between queries: the rule lists are the only
//! state, and they change only through [`TargetingEngine::add_inclusion`],
//! [`TargetingEngine::add_weight`] and [`TargetingEngine::reset`].
mod policy;
mod rules;

use tracing::{debug, error};

use crate::entity::{Candidate, EntityId};

pub use policy::{
    IGNORED_AURAS, default_inclusion_rules, default_weight_rules, register_default_rules,
};
pub use rules::{InclusionRule, RuleError, RuleScope, TargetMode, WeightRule};

/// An eligible candidate with its final score.
#[derive(Clone, Copy, Debug)]
pub struct RankedTarget<'a> {
    pub candidate: &'a Candidate,
    pub score: f32,
}

/// Eligible candidates, best first.
#[derive(Clone, Debug, Default)]
pub struct TargetingResult<'a> {
    ranked: Vec<RankedTarget<'a>>,
}

impl<'a> TargetingResult<'a> {
    pub fn best(&self) -> Option<&'a Candidate> {
        self.ranked.first().map(|ranked| ranked.candidate)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RankedTarget<'a>> {
        self.ranked.iter()
    }

    pub fn ids(&self) -> Vec<EntityId> {
        self.ranked.iter().map(|ranked| ranked.candidate.id).collect()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.ranked.iter().any(|ranked| ranked.candidate.id == id)
    }

    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }
}

/// Ordered inclusion and weight rules.
#[derive(Default)]
pub struct TargetingEngine {
    inclusion: Vec<InclusionRule>,
    weights: Vec<WeightRule>,
}

impl TargetingEngine {
    /// An engine without rules: every candidate is eligible.
    pub fn new() -> Self {
        Self::default()
    }

    /// An engine with the stock combat rules registered.
    pub fn with_default_rules(ignored_auras: &[&str]) -> Self {
        let mut engine = Self::new();
        register_default_rules(&mut engine, ignored_auras);
        engine
    }

    pub fn add_inclusion(&mut self, rule: InclusionRule) {
        self.inclusion.push(rule);
    }

    pub fn add_weight(&mut self, rule: WeightRule) {
        self.weights.push(rule);
    }

    /// Drops every registered rule.
    pub fn reset(&mut self) {
        self.inclusion.clear();
        self.weights.clear();
    }

    pub fn inclusion_rules(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.inclusion.iter().map(InclusionRule::name)
    }

    pub fn weight_rules(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.weights.iter().map(WeightRule::name)
    }

    /// Whether every inclusion rule accepts `candidate`.
    ///
    /// Stops at the first rejection. A failing rule counts as a rejection.
    pub fn is_eligible(&self, candidate: &Candidate, scope: &mut RuleScope<'_, '_>) -> bool {
        for rule in &self.inclusion {
            match rule.evaluate(candidate, scope) {
                Ok(true) => {}
                Ok(false) => {
                    debug!(id = %candidate.id, rule = rule.name(), "excluded");
                    return false;
                }
                Err(err) => {
                    error!(id = %candidate.id, rule = rule.name(), %err, "inclusion rule failed");
                    return false;
                }
            }
        }
        true
    }

    /// Final score of an eligible candidate.
    pub fn score(&self, candidate: &Candidate) -> f32 {
        let mut score = -candidate.distance / 2.0;
        for rule in &self.weights {
            rule.apply(candidate, &mut score);
        }
        score
    }

    /// Filters and ranks `scope.hostiles`.
    pub fn rank<'h>(&self, scope: &mut RuleScope<'h, '_>) -> TargetingResult<'h> {
        let hostiles = scope.hostiles;
        let mut ranked: Vec<RankedTarget<'h>> = hostiles
            .iter()
            .filter(|candidate| self.is_eligible(candidate, scope))
            .map(|candidate| RankedTarget {
                candidate,
                score: self.score(candidate),
            })
            .collect();
        // `sort_by` is stable, so equal scores keep enumeration order.
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        TargetingResult { ranked }
    }
}
