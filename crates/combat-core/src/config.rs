//! Operator-tunable routine options.
use crate::skill::SlotId;

/// Validation failures of a [`RoutineConfig`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("no primary slot is configured; set at least one attack or fallback slot")]
    NoPrimarySlot,

    #[error("{name} must not be negative (got {value})")]
    NegativeRange { name: &'static str, value: i32 },

    #[error("burst count for {name} must be at least 1")]
    EmptyBurst { name: &'static str },
}

/// Uses per window and rest delay of a burst summon.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BurstConfig {
    pub count: u32,
    pub delay_ms: u64,
}

impl BurstConfig {
    pub const fn new(count: u32, delay_ms: u64) -> Self {
        Self { count, delay_ms }
    }
}

/// Options exposed to the operator and the command surface.
///
/// Ranges are in world units. Unset slots are `None`, written as `-1` when
/// serialized.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RoutineConfig {
    /// Hostiles further than this are ignored and never chased.
    pub combat_range: i32,
    pub max_melee_range: i32,
    pub max_range_range: i32,
    pub totem_delay_ms: u64,
    pub raging_spirit_burst: BurstConfig,
    pub skeleton_burst: BurstConfig,
    pub always_attack_in_place: bool,
    pub enable_auras_from_items: bool,
    pub debug_auras: bool,
    pub auto_cast_vaal_skills: bool,
    /// Ability ids never used for aura upkeep, separated by space, `,`, `;` or `-`.
    pub blacklisted_skill_ids: String,
    pub skip_shrines: bool,
    /// Allow navigation queries to leave the currently loaded region.
    pub leave_frame: bool,
    #[cfg_attr(feature = "serde", serde(with = "raw_slot"))]
    pub single_target_melee_slot: Option<SlotId>,
    #[cfg_attr(feature = "serde", serde(with = "raw_slot"))]
    pub single_target_ranged_slot: Option<SlotId>,
    #[cfg_attr(feature = "serde", serde(with = "raw_slot"))]
    pub aoe_melee_slot: Option<SlotId>,
    #[cfg_attr(feature = "serde", serde(with = "raw_slot"))]
    pub aoe_ranged_slot: Option<SlotId>,
    #[cfg_attr(feature = "serde", serde(with = "raw_slot"))]
    pub fallback_slot: Option<SlotId>,
}

impl Default for RoutineConfig {
    fn default() -> Self {
        Self {
            combat_range: 70,
            max_melee_range: 10,
            max_range_range: 35,
            totem_delay_ms: 5_000,
            raging_spirit_burst: BurstConfig::new(3, 5_000),
            skeleton_burst: BurstConfig::new(2, 1_000),
            always_attack_in_place: false,
            enable_auras_from_items: true,
            debug_auras: false,
            auto_cast_vaal_skills: true,
            blacklisted_skill_ids: String::new(),
            skip_shrines: false,
            leave_frame: false,
            single_target_melee_slot: None,
            single_target_ranged_slot: None,
            aoe_melee_slot: None,
            aoe_ranged_slot: None,
            fallback_slot: None,
        }
    }
}

impl RoutineConfig {
    /// Checks the options the routine cannot run without.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_values()?;
        if self.primary_slots().all(|slot| slot.is_none()) {
            return Err(ConfigError::NoPrimarySlot);
        }
        Ok(())
    }

    /// Range and burst checks alone, without requiring a primary slot.
    pub fn validate_values(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("combat_range", self.combat_range),
            ("max_melee_range", self.max_melee_range),
            ("max_range_range", self.max_range_range),
        ] {
            if value < 0 {
                return Err(ConfigError::NegativeRange { name, value });
            }
        }
        for (name, burst) in [
            ("raging_spirit_burst", self.raging_spirit_burst),
            ("skeleton_burst", self.skeleton_burst),
        ] {
            if burst.count == 0 {
                return Err(ConfigError::EmptyBurst { name });
            }
        }
        Ok(())
    }

    fn primary_slots(&self) -> impl Iterator<Item = Option<SlotId>> {
        [
            self.single_target_melee_slot,
            self.single_target_ranged_slot,
            self.aoe_melee_slot,
            self.aoe_ranged_slot,
            self.fallback_slot,
        ]
        .into_iter()
    }

    /// Ability ids parsed from [`RoutineConfig::blacklisted_skill_ids`].
    ///
    /// Tokens that are not integers are ignored.
    pub fn blacklisted_skills(&self) -> impl Iterator<Item = u32> + '_ {
        self.blacklisted_skill_ids
            .split([' ', ',', ';', '-'])
            .filter(|token| !token.is_empty())
            .filter_map(|token| token.parse().ok())
    }

    pub fn is_skill_blacklisted(&self, id: u32) -> bool {
        self.blacklisted_skills().any(|blacklisted| blacklisted == id)
    }
}

/// Slots are stored as raw integers, `-1` meaning unset.
#[cfg(feature = "serde")]
mod raw_slot {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::skill::SlotId;

    pub fn serialize<S: Serializer>(
        slot: &Option<SlotId>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(SlotId::to_raw(*slot))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<SlotId>, D::Error> {
        i32::deserialize(deserializer).map(SlotId::from_raw)
    }
}
