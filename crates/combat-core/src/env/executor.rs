use crate::entity::EntityId;
use crate::geometry::Position;
use crate::skill::SlotId;

/// Reasons an ability use was refused.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UseError {
    #[error("{0} holds no ability")]
    EmptySlot(SlotId),

    #[error("ability in {0} cannot be used right now")]
    NotUsable(SlotId),

    #[error("no key is bound to {0}")]
    NoBoundKey(SlotId),

    #[error("target position is not valid")]
    InvalidTarget,

    #[error("agent is busy")]
    Busy,

    #[error("input rejected: {0}")]
    Rejected(String),
}

/// Low-level input and ability execution.
pub trait Executor {
    /// Uses the ability in `slot` once.
    fn use_ability(
        &mut self,
        slot: SlotId,
        at: Option<Position>,
        in_place: bool,
    ) -> Result<(), UseError>;

    /// Presses and keeps holding the ability in `slot`.
    fn begin_held_ability(
        &mut self,
        slot: SlotId,
        at: Position,
        in_place: bool,
    ) -> Result<(), UseError>;

    /// Moves the aim of the held ability.
    fn set_aim(&mut self, at: Position);

    fn is_held_key_down(&self, slot: SlotId) -> bool;

    /// Releases every held key.
    fn clear_key_states(&mut self);

    /// Interacts with an object; false when the interaction was not started.
    fn interact(&mut self, target: EntityId) -> bool;

    /// Flips the always-highlight overlay.
    fn toggle_highlight(&mut self);

    /// Lets `ms` milliseconds of latency pass.
    fn wait(&mut self, ms: u64);
}
