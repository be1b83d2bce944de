//! Ability slots on the agent's skill bar.
use std::fmt;

use bitflags::bitflags;

use crate::geometry::Position;

/// A skill-bar slot, numbered from 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SlotId(pub u8);

impl SlotId {
    /// Maps the `-1 = unset` integer convention onto an optional slot.
    pub fn from_raw(raw: i32) -> Option<Self> {
        u8::try_from(raw).ok().filter(|value| *value > 0).map(Self)
    }

    /// Inverse of [`SlotId::from_raw`].
    pub fn to_raw(slot: Option<Self>) -> i32 {
        slot.map_or(-1, |slot| i32::from(slot.0))
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slot {}", self.0)
    }
}

bitflags! {
    /// Classification tags reported for an ability.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct SkillTags: u16 {
        const MELEE   = 1 << 0;
        const RANGED  = 1 << 1;
        const AOE     = 1 << 2;
        const SINGLE  = 1 << 3;
        const AURA    = 1 << 4;
        const CURSE   = 1 << 5;
        const TOTEM   = 1 << 6;
        const SUMMON  = 1 << 7;
        const VAAL    = 1 << 8;
        const CHANNEL = 1 << 9;
        const TRAP    = 1 << 10;
        const MINE    = 1 << 11;
    }
}

/// An ability as reported by the skill catalog.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AbilitySlot {
    /// Catalog identifier of the ability, matched against the skill blacklist.
    pub id: u32,
    pub name: String,
    /// Bound skill-bar slot, `None` while the ability is not on the bar.
    pub slot: Option<SlotId>,
    pub tags: SkillTags,
    /// Whether the ability could be used right now (mana, cooldown, weapon).
    pub usable: bool,
    /// Whether the ability is an active skill at all.
    pub castable: bool,
    /// Positions of live deployed instances (minions, totems).
    pub deployed: Vec<Position>,
    pub max_deployed: u32,
    pub bound_key: Option<char>,
    /// Curse applied through an aura mechanic.
    pub aurified_curse: bool,
    /// Non-aura skill that behaves like one (reserved, toggled).
    pub considered_aura: bool,
    /// The aurified curse is currently active.
    pub cursing_with_this: bool,
    /// The considered aura is currently active.
    pub using_considered_aura: bool,
}

impl Default for AbilitySlot {
    fn default() -> Self {
        Self {
            id: 0,
            name: String::new(),
            slot: None,
            tags: SkillTags::empty(),
            usable: true,
            castable: true,
            deployed: Vec::new(),
            max_deployed: 0,
            bound_key: None,
            aurified_curse: false,
            considered_aura: false,
            cursing_with_this: false,
            using_considered_aura: false,
        }
    }
}

impl AbilitySlot {
    pub fn new(id: u32, name: impl Into<String>, slot: Option<SlotId>, tags: SkillTags) -> Self {
        Self {
            id,
            name: name.into(),
            slot,
            tags,
            ..Self::default()
        }
    }

    pub fn deployed_count(&self) -> u32 {
        u32::try_from(self.deployed.len()).unwrap_or(u32::MAX)
    }

    pub fn under_deploy_cap(&self) -> bool {
        self.deployed_count() < self.max_deployed
    }

    /// Castable active skill that is not a totem, trap or mine.
    pub fn is_plain_castable(&self) -> bool {
        self.castable && !self.tags.intersects(SkillTags::TOTEM | SkillTags::TRAP | SkillTags::MINE)
    }

    /// Tagged aura, excluding charged variants.
    pub fn is_tagged_aura(&self) -> bool {
        self.tags.contains(SkillTags::AURA) && !self.tags.contains(SkillTags::VAAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_slot_conversion() {
        assert_eq!(SlotId::from_raw(-1), None);
        assert_eq!(SlotId::from_raw(0), None);
        assert_eq!(SlotId::from_raw(3), Some(SlotId(3)));
        assert_eq!(SlotId::to_raw(None), -1);
        assert_eq!(SlotId::to_raw(Some(SlotId(5))), 5);
    }

    #[test]
    fn plain_castable_excludes_deployables() {
        let mut ability = AbilitySlot::new(1, "Searing Bond", Some(SlotId(2)), SkillTags::TOTEM);
        assert!(!ability.is_plain_castable());
        ability.tags = SkillTags::SUMMON;
        assert!(ability.is_plain_castable());
        ability.castable = false;
        assert!(!ability.is_plain_castable());
    }

    #[test]
    fn deploy_cap() {
        let mut ability = AbilitySlot::new(7, "Raise Zombie", Some(SlotId(4)), SkillTags::SUMMON);
        ability.max_deployed = 2;
        ability.deployed = vec![Position::ORIGIN];
        assert!(ability.under_deploy_cap());
        ability.deployed.push(Position::ORIGIN);
        assert!(!ability.under_deploy_cap());
    }
}
