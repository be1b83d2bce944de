//! Named getters and setters over the routine options.
//!
//! Every option is reachable as `Get<Name>` and `Set<Name>`, e.g.
//! `GetCombatRange` or `SetFallbackSlot`. The table is fixed at compile time
//! by [`option_table!`]; the routine adds a few commands of its own on top
//! (see [`crate::CombatRoutine::execute`]).
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use combat_core::{RoutineConfig, SlotId};

use crate::error::CommandError;

/// A command argument or result.
#[derive(Clone, Debug, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum CommandValue {
    Int(i64),
    Bool(bool),
    Text(String),
}

impl CommandValue {
    pub fn kind(&self) -> &'static str {
        match self {
            CommandValue::Int(_) => "integer",
            CommandValue::Bool(_) => "boolean",
            CommandValue::Text(_) => "text",
        }
    }
}

impl fmt::Display for CommandValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandValue::Int(value) => write!(f, "{value}"),
            CommandValue::Bool(value) => write!(f, "{value}"),
            CommandValue::Text(value) => f.write_str(value),
        }
    }
}

/// Booleans and integers are recognised, anything else is text.
impl FromStr for CommandValue {
    type Err = Infallible;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Ok(match raw {
            "true" => CommandValue::Bool(true),
            "false" => CommandValue::Bool(false),
            _ => raw
                .parse()
                .map_or_else(|_| CommandValue::Text(raw.to_owned()), CommandValue::Int),
        })
    }
}

impl From<i64> for CommandValue {
    fn from(value: i64) -> Self {
        CommandValue::Int(value)
    }
}

impl From<bool> for CommandValue {
    fn from(value: bool) -> Self {
        CommandValue::Bool(value)
    }
}

impl From<&str> for CommandValue {
    fn from(value: &str) -> Self {
        CommandValue::Text(value.to_owned())
    }
}

/// Conversion between an option field and a [`CommandValue`].
pub trait OptionValue: Sized {
    const KIND: &'static str;

    fn to_value(&self) -> CommandValue;

    fn from_value(command: &str, value: CommandValue) -> Result<Self, CommandError>;
}

fn mismatch(command: &str, expected: &'static str) -> CommandError {
    CommandError::TypeMismatch {
        command: command.to_owned(),
        expected,
    }
}

fn int_in<T: TryFrom<i64>>(
    command: &str,
    value: CommandValue,
    expected: &'static str,
) -> Result<T, CommandError> {
    let CommandValue::Int(raw) = value else {
        return Err(mismatch(command, expected));
    };
    T::try_from(raw).map_err(|_| CommandError::OutOfRange {
        command: command.to_owned(),
        value: raw,
    })
}

impl OptionValue for i32 {
    const KIND: &'static str = "integer";

    fn to_value(&self) -> CommandValue {
        CommandValue::Int(i64::from(*self))
    }

    fn from_value(command: &str, value: CommandValue) -> Result<Self, CommandError> {
        int_in(command, value, Self::KIND)
    }
}

impl OptionValue for u32 {
    const KIND: &'static str = "integer";

    fn to_value(&self) -> CommandValue {
        CommandValue::Int(i64::from(*self))
    }

    fn from_value(command: &str, value: CommandValue) -> Result<Self, CommandError> {
        int_in(command, value, Self::KIND)
    }
}

impl OptionValue for u64 {
    const KIND: &'static str = "integer";

    fn to_value(&self) -> CommandValue {
        CommandValue::Int(i64::try_from(*self).unwrap_or(i64::MAX))
    }

    fn from_value(command: &str, value: CommandValue) -> Result<Self, CommandError> {
        int_in(command, value, Self::KIND)
    }
}

impl OptionValue for bool {
    const KIND: &'static str = "boolean";

    fn to_value(&self) -> CommandValue {
        CommandValue::Bool(*self)
    }

    fn from_value(command: &str, value: CommandValue) -> Result<Self, CommandError> {
        match value {
            CommandValue::Bool(value) => Ok(value),
            _ => Err(mismatch(command, Self::KIND)),
        }
    }
}

impl OptionValue for String {
    const KIND: &'static str = "text";

    fn to_value(&self) -> CommandValue {
        CommandValue::Text(self.clone())
    }

    fn from_value(command: &str, value: CommandValue) -> Result<Self, CommandError> {
        match value {
            CommandValue::Text(value) => Ok(value),
            _ => Err(mismatch(command, Self::KIND)),
        }
    }
}

/// Slots travel as raw integers, `-1` meaning unset.
impl OptionValue for Option<SlotId> {
    const KIND: &'static str = "slot";

    fn to_value(&self) -> CommandValue {
        CommandValue::Int(i64::from(SlotId::to_raw(*self)))
    }

    fn from_value(command: &str, value: CommandValue) -> Result<Self, CommandError> {
        let raw: i32 = int_in(command, value, Self::KIND)?;
        if raw < -1 || raw > i32::from(u8::MAX) {
            return Err(CommandError::OutOfRange {
                command: command.to_owned(),
                value: i64::from(raw),
            });
        }
        Ok(SlotId::from_raw(raw))
    }
}

/// One row of the option table.
pub struct OptionEntry {
    /// Option name without the `Get`/`Set` prefix.
    pub name: &'static str,
    pub kind: &'static str,
    pub get: fn(&RoutineConfig) -> CommandValue,
    pub set: fn(&mut RoutineConfig, CommandValue) -> Result<(), CommandError>,
}

impl fmt::Debug for OptionEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionEntry")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Builds the option table from `Name => field.path: Type` rows.
macro_rules! option_table {
    ($($name:literal => $($field:ident).+ : $ty:ty),+ $(,)?) => {
        /// Every option reachable through `Get<Name>` / `Set<Name>`.
        pub const OPTIONS: &[OptionEntry] = &[
            $(
                OptionEntry {
                    name: $name,
                    kind: <$ty as OptionValue>::KIND,
                    get: |config| <$ty as OptionValue>::to_value(&config.$($field).+),
                    set: |config, value| {
                        let command = concat!("Set", $name);
                        config.$($field).+ = <$ty as OptionValue>::from_value(command, value)?;
                        Ok(())
                    },
                },
            )+
        ];
    };
}

option_table! {
    "LeaveFrame" => leave_frame: bool,
    "SkipShrines" => skip_shrines: bool,
    "EnableAurasFromItems" => enable_auras_from_items: bool,
    "DebugAuras" => debug_auras: bool,
    "AutoCastVaalSkills" => auto_cast_vaal_skills: bool,
    "SummonRagingSpiritCountPerDelay" => raging_spirit_burst.count: u32,
    "SummonRagingSpiritDelayMs" => raging_spirit_burst.delay_ms: u64,
    "SummonSkeletonCountPerDelay" => skeleton_burst.count: u32,
    "SummonSkeletonDelayMs" => skeleton_burst.delay_ms: u64,
    "AlwaysAttackInPlace" => always_attack_in_place: bool,
    "SingleTargetMeleeSlot" => single_target_melee_slot: Option<SlotId>,
    "SingleTargetRangedSlot" => single_target_ranged_slot: Option<SlotId>,
    "AoeMeleeSlot" => aoe_melee_slot: Option<SlotId>,
    "AoeRangedSlot" => aoe_ranged_slot: Option<SlotId>,
    "FallbackSlot" => fallback_slot: Option<SlotId>,
    "CombatRange" => combat_range: i32,
    "MaxMeleeRange" => max_melee_range: i32,
    "MaxRangeRange" => max_range_range: i32,
    "TotemDelayMs" => totem_delay_ms: u64,
    "BlacklistedSkillIds" => blacklisted_skill_ids: String,
}

/// The table row for an option name.
pub fn option(name: &str) -> Option<&'static OptionEntry> {
    OPTIONS.iter().find(|entry| entry.name == name)
}

/// First argument of `command`, or an error naming it.
pub fn first_arg(command: &str, args: &[CommandValue]) -> Result<CommandValue, CommandError> {
    args.first().cloned().ok_or_else(|| CommandError::MissingArgument {
        command: command.to_owned(),
    })
}

/// Runs a `Get<Name>` or `Set<Name>` command against `config`.
///
/// Getters return the current value; setters return `None`. A setter that
/// would leave a negative range or an empty burst changes nothing.
pub fn dispatch(
    config: &mut RoutineConfig,
    command: &str,
    args: &[CommandValue],
) -> Result<Option<CommandValue>, CommandError> {
    let unknown = || CommandError::UnknownCommand(command.to_owned());

    if let Some(name) = command.strip_prefix("Get") {
        let entry = option(name).ok_or_else(unknown)?;
        return Ok(Some((entry.get)(config)));
    }
    if let Some(name) = command.strip_prefix("Set") {
        let entry = option(name).ok_or_else(unknown)?;
        let mut updated = config.clone();
        (entry.set)(&mut updated, first_arg(command, args)?)?;
        updated.validate_values().map_err(|source| CommandError::Rejected {
            command: command.to_owned(),
            source,
        })?;
        *config = updated;
        return Ok(None);
    }
    Err(unknown())
}
