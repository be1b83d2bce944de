//! Inclusion and weight rules.
use crate::entity::{Candidate, EntityId};
use crate::env::Blacklist;

/// Which population a ranking query is about.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum TargetMode {
    /// Live hostiles to fight.
    #[default]
    Living,
    /// Bodies of dead hostiles, for corpse abilities.
    Corpses,
}

/// A rule could not decide about a candidate.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum RuleError {
    #[error("candidate {id} reports an invalid distance {distance}")]
    InvalidDistance { id: EntityId, distance: f32 },

    #[error("candidate {id} is missing {attribute}")]
    MissingAttribute { id: EntityId, attribute: &'static str },

    #[error("rule {rule} failed: {reason}")]
    Failed { rule: &'static str, reason: String },
}

/// Per-query inputs shared by every rule.
///
/// The snapshot and the blacklist are borrowed separately so that ranked
/// candidates stay usable once the blacklist is handed back.
pub struct RuleScope<'h, 'b> {
    /// The whole snapshot being ranked, in enumeration order.
    pub hostiles: &'h [Candidate],
    /// Candidates further than this are out of range.
    pub max_range: f32,
    pub mode: TargetMode,
    pub blacklist: &'b mut dyn Blacklist,
}

impl<'h, 'b> RuleScope<'h, 'b> {
    pub fn new(
        hostiles: &'h [Candidate],
        max_range: f32,
        blacklist: &'b mut dyn Blacklist,
    ) -> Self {
        Self {
            hostiles,
            max_range,
            mode: TargetMode::Living,
            blacklist,
        }
    }

    pub fn with_mode(mut self, mode: TargetMode) -> Self {
        self.mode = mode;
        self
    }

    /// First hostile in the snapshot carrying `name`.
    pub fn find_by_name(&self, name: &str) -> Option<&'h Candidate> {
        self.hostiles.iter().find(|candidate| candidate.name == name)
    }
}

type InclusionFn =
    dyn Fn(&Candidate, &mut RuleScope<'_, '_>) -> Result<bool, RuleError> + Send + Sync;
type WeightFn = dyn Fn(&Candidate, &mut f32) + Send + Sync;

/// Predicate deciding whether a candidate may be targeted at all.
pub struct InclusionRule {
    name: &'static str,
    check: Box<InclusionFn>,
}

impl InclusionRule {
    pub fn new<F>(name: &'static str, check: F) -> Self
    where
        F: Fn(&Candidate, &mut RuleScope<'_, '_>) -> Result<bool, RuleError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            name,
            check: Box::new(check),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn evaluate(
        &self,
        candidate: &Candidate,
        scope: &mut RuleScope<'_, '_>,
    ) -> Result<bool, RuleError> {
        (self.check)(candidate, scope)
    }
}

/// Additive adjustment of a candidate's running score.
pub struct WeightRule {
    name: &'static str,
    apply: Box<WeightFn>,
}

impl WeightRule {
    pub fn new<F>(name: &'static str, apply: F) -> Self
    where
        F: Fn(&Candidate, &mut f32) + Send + Sync + 'static,
    {
        Self {
            name,
            apply: Box::new(apply),
        }
    }

    /// A rule adding a fixed `delta` whenever `applies` holds.
    pub fn flat<P>(name: &'static str, delta: f32, applies: P) -> Self
    where
        P: Fn(&Candidate) -> bool + Send + Sync + 'static,
    {
        Self::new(name, move |candidate, score| {
            if applies(candidate) {
                *score += delta;
            }
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn apply(&self, candidate: &Candidate, score: &mut f32) {
        (self.apply)(candidate, score)
    }
}
