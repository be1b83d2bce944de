//! Errors surfaced by the routine.
use combat_core::{BindError, ConfigError, EntityId, Position, SlotId, UseError};

/// Why the action chosen for a tick did not go through.
///
/// None of these stop the routine; they are logged and reported in the
/// [`crate::TickReport`] of the tick they happened in.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ActionError {
    #[error(transparent)]
    Use(#[from] UseError),

    #[error("could not bind aura: {0}")]
    Bind(#[from] BindError),

    #[error("aura {name} is still unbound after {attempts} attempts")]
    BindTimedOut { name: String, attempts: u32 },

    #[error("move towards ({:.1}, {:.1}) failed", .0.x, .0.y)]
    MoveFailed(Position),

    #[error("interaction with {0} failed")]
    InteractFailed(EntityId),

    #[error("there is no slot configured to use")]
    NoSlotConfigured,

    #[error("there is no skill in {0}")]
    EmptySlot(SlotId),
}

/// Failures of the command surface.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command {0}")]
    UnknownCommand(String),

    #[error("{command} expects an argument")]
    MissingArgument { command: String },

    #[error("{command} expects a {expected} value")]
    TypeMismatch {
        command: String,
        expected: &'static str,
    },

    #[error("{value} is out of range for {command}")]
    OutOfRange { command: String, value: i64 },

    #[error("{command} rejected: {source}")]
    Rejected {
        command: String,
        #[source]
        source: ConfigError,
    },
}
