//! Which skill-bar slot plays which role.
//!
//! Scanning the skill bar is comparatively expensive and its contents only
//! change on area transitions, so the result is cached in a [`SlotLayout`]
//! and rebuilt once, before the next chain run, after [`SlotLayout::invalidate`].
use arrayvec::ArrayVec;
use combat_core::{AbilitySlot, AgentState, SkillCatalog, SkillTags, SlotId};
use tracing::debug;

/// Upper bound on skill-bar slots.
pub const MAX_SLOTS: usize = 16;

pub const RAGING_SPIRITS: &str = "Summon Raging Spirit";
pub const SKELETONS: &str = "Summon Skeletons";
pub const BLOOD_RAGE: &str = "Blood Rage";
pub const RIGHTEOUS_FIRE: &str = "Righteous Fire";
pub const ENDURING_CRY: &str = "Enduring Cry";
pub const RAISE_SPECTRE: &str = "Raise Spectre";
pub const RAISE_ZOMBIE: &str = "Raise Zombie";

/// Golem summons, in scan order. The last one present wins.
pub const GOLEMS: &[&str] = &[
    "Summon Chaos Golem",
    "Summon Ice Golem",
    "Summon Flame Golem",
    "Summon Stone Golem",
    "Summon Lightning Golem",
];

/// Aura names recognised without an aura tag (item-granted auras).
pub const ITEM_AURAS: &[&str] = &[
    "Anger",
    "Clarity",
    "Determination",
    "Discipline",
    "Grace",
    "Haste",
    "Hatred",
    "Purity of Elements",
    "Purity of Fire",
    "Purity of Ice",
    "Purity of Lightning",
    "Vitality",
    "Wrath",
];

/// Whether `name` is an aura that items can grant.
///
/// Always false when item auras are disabled.
pub fn is_item_aura(name: &str, enable_auras_from_items: bool) -> bool {
    enable_auras_from_items && ITEM_AURAS.contains(&name)
}

/// Aura-like: tagged aura, item aura, aurified curse or considered aura.
pub fn is_aura_like(skill: &AbilitySlot, enable_auras_from_items: bool) -> bool {
    skill.is_tagged_aura()
        || is_item_aura(&skill.name, enable_auras_from_items)
        || skill.aurified_curse
        || skill.considered_aura
}

/// Role assignments discovered from the skill bar.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SlotLayout {
    stale: bool,
    pub curse_slots: ArrayVec<SlotId, MAX_SLOTS>,
    /// Slot new auras are bound into.
    pub aura_slot: Option<SlotId>,
    pub totem_slot: Option<SlotId>,
    pub raging_spirits: Option<SlotId>,
    pub skeletons: Option<SlotId>,
    pub blood_rage: Option<SlotId>,
    pub righteous_fire: Option<SlotId>,
    pub enduring_cry: Option<SlotId>,
    pub golem: Option<SlotId>,
    pub raise_spectre: Option<SlotId>,
    pub raise_zombie: Option<SlotId>,
    pub total_curses_allowed: u32,
}

impl SlotLayout {
    /// A layout that will be rebuilt before first use.
    pub fn stale() -> Self {
        Self {
            stale: true,
            ..Self::default()
        }
    }

    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub fn invalidate(&mut self) {
        self.stale = true;
    }

    /// Scans the skill bar.
    pub fn discover<C>(catalog: &C, agent: &AgentState, enable_auras_from_items: bool) -> Self
    where
        C: SkillCatalog + ?Sized,
    {
        let mut layout = SlotLayout {
            total_curses_allowed: agent.total_curses_allowed,
            ..SlotLayout::default()
        };

        for skill in catalog.skills() {
            let Some(slot) = skill.slot else {
                continue;
            };

            if skill.tags.contains(SkillTags::CURSE)
                && skill.castable
                && !skill.aurified_curse
                && layout.curse_slots.try_push(slot).is_err()
            {
                debug!(%slot, "curse slot list full");
            }

            if layout.aura_slot.is_none() && is_aura_like(skill, enable_auras_from_items) {
                layout.aura_slot = Some(slot);
            }

            if layout.totem_slot.is_none() && skill.tags.contains(SkillTags::TOTEM) {
                layout.totem_slot = Some(slot);
            }
        }

        let role = |name: &str| {
            catalog
                .skills()
                .iter()
                .find(|skill| skill.name == name)
                .filter(|skill| skill.is_plain_castable())
                .and_then(|skill| skill.slot)
        };

        layout.raging_spirits = role(RAGING_SPIRITS);
        layout.skeletons = role(SKELETONS);
        layout.righteous_fire = role(RIGHTEOUS_FIRE);
        layout.blood_rage = role(BLOOD_RAGE);
        layout.enduring_cry = role(ENDURING_CRY);
        layout.golem = GOLEMS.iter().filter_map(|name| role(name)).last();
        layout.raise_zombie = role(RAISE_ZOMBIE);
        layout.raise_spectre = role(RAISE_SPECTRE);

        debug!(?layout, "slot layout discovered");
        layout
    }
}
