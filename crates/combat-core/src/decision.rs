//! The single outcome of a decision tick.
use std::fmt;

use crate::entity::EntityId;
use crate::geometry::Position;
use crate::skill::SlotId;

/// What the routine asked the environment to do this tick.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Decision {
    /// Use an ability once, optionally aimed at a point.
    UseAbility {
        slot: SlotId,
        at: Option<Position>,
        in_place: bool,
    },
    /// Press and hold an ability at a point.
    HoldAbility {
        slot: SlotId,
        at: Position,
        in_place: bool,
    },
    /// Re-aim the ability that is already held.
    SetAim(Position),
    MoveTowards(Position),
    Interact(EntityId),
    NoAction,
}

impl Decision {
    pub fn slot(&self) -> Option<SlotId> {
        match self {
            Decision::UseAbility { slot, .. } | Decision::HoldAbility { slot, .. } => Some(*slot),
            _ => None,
        }
    }

    pub fn is_no_action(&self) -> bool {
        matches!(self, Decision::NoAction)
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::UseAbility { slot, at, in_place } => match at {
                Some(at) => {
                    write!(f, "use {slot} at ({:.1}, {:.1}) in_place={in_place}", at.x, at.y)
                }
                None => write!(f, "use {slot} in_place={in_place}"),
            },
            Decision::HoldAbility { slot, at, in_place } => {
                write!(f, "hold {slot} at ({:.1}, {:.1}) in_place={in_place}", at.x, at.y)
            }
            Decision::SetAim(at) => write!(f, "aim at ({:.1}, {:.1})", at.x, at.y),
            Decision::MoveTowards(at) => write!(f, "move towards ({:.1}, {:.1})", at.x, at.y),
            Decision::Interact(id) => write!(f, "interact with {id}"),
            Decision::NoAction => f.write_str("no action"),
        }
    }
}
