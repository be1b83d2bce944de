//! Snapshotted world entities.
//!
//! Everything here is a plain value copied out of the environment at the start
//! of a tick. Nothing is cached across ticks, so these types carry no handles
//! back into the live world.
use std::collections::BTreeSet;
use std::fmt;

use crate::geometry::Position;

/// Opaque identifier of a world entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Rarity tier of a hostile, ordered from weakest to strongest.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Rarity {
    #[default]
    Normal,
    Magic,
    Rare,
    Unique,
}

/// Whether an entity is a live hostile, a usable body, or neither.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Liveness {
    /// Alive and participating in combat.
    #[default]
    Active,
    /// Dead, but the body is still present in the world.
    ActiveDead,
    /// Despawned, dormant or otherwise not interactable.
    Inactive,
}

/// A modifier rolled onto a hostile.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Affix {
    /// Stable identifier, e.g. `MonsterRaisesUndeadText`.
    pub internal_name: String,
    /// Player-facing label, e.g. `Voidspawn of Abaxoth`.
    pub display_name: String,
}

impl Affix {
    pub fn new(internal_name: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            internal_name: internal_name.into(),
            display_name: display_name.into(),
        }
    }
}

/// Curse bookkeeping of a hostile.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CurseState {
    pub cursable: bool,
    pub count: u32,
    /// Names of the curse abilities already applied.
    pub applied: BTreeSet<String>,
}

impl Default for CurseState {
    fn default() -> Self {
        Self {
            cursable: true,
            count: 0,
            applied: BTreeSet::new(),
        }
    }
}

impl CurseState {
    pub fn has_curse_from(&self, ability: &str) -> bool {
        self.applied.contains(ability)
    }
}

/// A hostile entity as seen at the start of a tick.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Candidate {
    pub id: EntityId,
    pub name: String,
    /// Metadata path describing the entity kind, e.g. `Monsters/Totems/Shock`.
    pub kind: String,
    pub position: Position,
    /// Position the agent should aim at when interacting with this entity.
    pub interact_point: Option<Position>,
    /// Straight-line distance from the agent.
    pub distance: f32,
    pub liveness: Liveness,
    pub rarity: Rarity,
    pub auras: Vec<String>,
    pub affixes: Vec<Affix>,
    pub cannot_die: bool,
    pub proximity_shield: bool,
    pub targeting_agent: bool,
    pub expires_on_timer: bool,
    pub corpse_usable: bool,
    /// Encounter phase flag reported by scripted bosses.
    pub phase: u8,
    pub curses: CurseState,
}

impl Candidate {
    pub fn new(id: EntityId, name: impl Into<String>, position: Position) -> Self {
        Self {
            id,
            name: name.into(),
            position,
            ..Self::default()
        }
    }

    pub fn is_active(&self) -> bool {
        self.liveness == Liveness::Active
    }

    pub fn is_active_dead(&self) -> bool {
        self.liveness == Liveness::ActiveDead
    }

    pub fn has_aura(&self, aura: &str) -> bool {
        self.auras.iter().any(|a| a == aura)
    }

    pub fn has_any_aura(&self, auras: &[&str]) -> bool {
        auras.iter().any(|aura| self.has_aura(aura))
    }

    pub fn has_affix_containing(&self, fragment: &str) -> bool {
        self.affixes
            .iter()
            .any(|affix| affix.internal_name.contains(fragment))
    }

    pub fn has_affix_named(&self, display_name: &str) -> bool {
        self.affixes
            .iter()
            .any(|affix| affix.display_name == display_name)
    }

    /// Where casts against this entity should land.
    pub fn aim_point(&self) -> Position {
        self.interact_point.unwrap_or(self.position)
    }
}

/// A timed or permanent effect on the agent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Buff {
    pub name: String,
    /// Remaining duration, `None` for effects without one.
    pub remaining_ms: Option<u64>,
}

impl Buff {
    pub fn permanent(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            remaining_ms: None,
        }
    }

    pub fn timed(name: impl Into<String>, remaining_ms: u64) -> Self {
        Self {
            name: name.into(),
            remaining_ms: Some(remaining_ms),
        }
    }
}

/// The controlled agent.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AgentState {
    pub position: Position,
    /// Active buffs and auras by name.
    pub buffs: Vec<Buff>,
    /// Identifier of the ability behind the current action, if any.
    ///
    /// Interactions report `"Interaction"` and walking reports `"Move"`.
    pub current_action: Option<String>,
    pub total_curses_allowed: u32,
    pub max_totems: u32,
}

impl Default for AgentState {
    fn default() -> Self {
        Self {
            position: Position::ORIGIN,
            buffs: Vec::new(),
            current_action: None,
            total_curses_allowed: 1,
            max_totems: 1,
        }
    }
}

impl AgentState {
    pub fn buff(&self, name: &str) -> Option<&Buff> {
        self.buffs.iter().find(|buff| buff.name == name)
    }

    pub fn has_buff(&self, name: &str) -> bool {
        self.buff(name).is_some()
    }

    /// Remaining duration of `name`, zero when absent or untimed.
    pub fn buff_remaining_ms(&self, name: &str) -> u64 {
        self.buff(name)
            .and_then(|buff| buff.remaining_ms)
            .unwrap_or(0)
    }

    /// True while busy with something other than interacting or walking.
    pub fn is_busy_casting(&self) -> bool {
        self.current_action
            .as_deref()
            .is_some_and(|action| action != "Interaction" && action != "Move")
    }
}

/// A container in the world; only closed strongboxes matter to the routine.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Chest {
    pub id: EntityId,
    pub position: Position,
    pub opened: bool,
    pub strongbox: bool,
}

/// An interactable shrine.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Shrine {
    pub id: EntityId,
    pub position: Position,
    pub deactivated: bool,
    /// Shrine flavour, e.g. `Skeletons`.
    pub kind: String,
}

/// A door that may block line of travel.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Door {
    pub id: EntityId,
    pub position: Position,
    pub opened: bool,
}
