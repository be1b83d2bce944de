//! Decision-core types shared by the combat routine and its environments.
//!
//! `combat-core` defines the snapshotted world model (candidates, ability
//! slots, agent state), the narrow traits an environment must implement, and
//! the stateful building blocks the routine is assembled from:
//!
//! - [`targeting`] filters and ranks hostile candidates
//! - [`cooldown`] tracks per-ability delays and bursts
//! - [`cast`] tracks the single in-flight held ability
//! - [`env`] declares the world, navigation, execution, blacklist, skill and
//!   clock boundaries
//! - [`config`] holds the operator-tunable options
pub mod cast;
pub mod config;
pub mod cooldown;
pub mod decision;
pub mod entity;
pub mod env;
pub mod geometry;
pub mod skill;
pub mod targeting;

pub use cast::CastState;
pub use config::{BurstConfig, ConfigError, RoutineConfig};
pub use cooldown::{BurstState, CooldownTimer, CooldownTracker};
pub use decision::Decision;
pub use entity::{
    Affix, AgentState, Buff, Candidate, Chest, CurseState, Door, EntityId, Liveness, Rarity,
    Shrine,
};
pub use env::{
    BindError, Blacklist, Clock, Environment, Executor, Navigator, SkillCatalog, UseError,
    WorldView,
};
pub use geometry::Position;
pub use skill::{AbilitySlot, SkillTags, SlotId};
pub use targeting::{
    InclusionRule, RankedTarget, RuleError, RuleScope, TargetMode, TargetingEngine,
    TargetingResult, WeightRule,
};
