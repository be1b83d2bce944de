//! What a tick did.
use std::fmt;

use combat_core::{Decision, EntityId};

use crate::error::ActionError;

/// Outcome of one pass through the decision chain.
#[derive(Clone, Debug, PartialEq)]
pub enum TickOutcome {
    /// A step committed and its decision was carried out.
    Acted {
        step: &'static str,
        decision: Decision,
    },
    /// A step chose an action but the environment refused it.
    ///
    /// The step does not count as committed, yet the tick still ends here.
    Failed {
        step: &'static str,
        decision: Decision,
        error: ActionError,
    },
    /// Nothing to do this tick; `step` names the step that decided so.
    Idle { step: Option<&'static str> },
}

impl TickOutcome {
    pub fn step(&self) -> Option<&'static str> {
        match self {
            TickOutcome::Acted { step, .. } | TickOutcome::Failed { step, .. } => Some(step),
            TickOutcome::Idle { step } => *step,
        }
    }

    /// The decision that reached the environment, `NoAction` when idle.
    pub fn decision(&self) -> Decision {
        match self {
            TickOutcome::Acted { decision, .. } | TickOutcome::Failed { decision, .. } => *decision,
            TickOutcome::Idle { .. } => Decision::NoAction,
        }
    }

    pub fn error(&self) -> Option<&ActionError> {
        match self {
            TickOutcome::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn is_committed(&self) -> bool {
        matches!(self, TickOutcome::Acted { .. })
    }
}

/// Summary of a tick, returned to the host.
#[derive(Clone, Debug, PartialEq)]
pub struct TickReport {
    pub tick: u64,
    /// Best-ranked hostile this tick, if any.
    pub target: Option<EntityId>,
    pub outcome: TickOutcome,
}

impl TickReport {
    pub fn decision(&self) -> Decision {
        self.outcome.decision()
    }

    pub fn step(&self) -> Option<&'static str> {
        self.outcome.step()
    }
}

impl fmt::Display for TickReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tick {:>4} ", self.tick)?;
        match &self.outcome {
            TickOutcome::Acted { step, decision } => write!(f, "[{step}] {decision}"),
            TickOutcome::Failed {
                step,
                decision,
                error,
            } => write!(f, "[{step}] {decision} failed: {error}"),
            TickOutcome::Idle { step: Some(step) } => write!(f, "[{step}] no action"),
            TickOutcome::Idle { step: None } => f.write_str("no action"),
        }
    }
}
