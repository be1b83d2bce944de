use crate::skill::{AbilitySlot, SlotId};

/// Reasons a skill could not be placed on the skill bar.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BindError {
    #[error("ability {0} is not known")]
    UnknownAbility(u32),

    #[error("{0} cannot hold this ability")]
    SlotRejected(SlotId),

    #[error("skill bar is locked")]
    Locked,
}

/// Ability metadata lookup.
pub trait SkillCatalog {
    /// Every ability the agent owns, bound or not.
    fn skills(&self) -> &[AbilitySlot];

    fn slot(&self, slot: SlotId) -> Option<&AbilitySlot> {
        self.skills().iter().find(|skill| skill.slot == Some(slot))
    }

    fn ability(&self, id: u32) -> Option<&AbilitySlot> {
        self.skills().iter().find(|skill| skill.id == id)
    }

    /// Places ability `id` into `slot`.
    fn assign(&mut self, slot: SlotId, id: u32) -> Result<(), BindError>;
}
