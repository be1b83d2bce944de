//! Combat routine built on `combat-core`.
//!
//! [`CombatRoutine`] owns the options, the targeting engine and the state that
//! survives between ticks. Each [`CombatRoutine::tick`] walks the decision
//! chain from [`steps`] against a host [`combat_core::Environment`] and
//! returns a [`TickReport`] describing what, if anything, was done.
//!
//! - [`layout`] works out which skill-bar slot plays which role
//! - [`objective`] handles side objectives such as shrines
//! - [`commands`] exposes the options as named getters and setters
//! - [`loader`] reads options from TOML
pub mod commands;
pub mod context;
pub mod error;
pub mod events;
pub mod layout;
pub mod loader;
pub mod objective;
pub mod report;
pub mod routine;
pub mod spatial;
pub mod state;
pub mod steps;

pub use commands::{CommandValue, OPTIONS, OptionEntry};
pub use context::{Reach, TargetSnapshot, TickContext};
pub use error::{ActionError, CommandError};
pub use events::RoutineEvent;
pub use layout::SlotLayout;
pub use loader::{ConfigLoader, LoadResult};
pub use objective::{ObjectiveAction, ObjectiveHandler, ShrineHandler};
pub use report::{TickOutcome, TickReport};
pub use routine::CombatRoutine;
pub use state::{EngagementPhase, RoutineState, Throttle};
pub use steps::{AttackPlan, combat_chain};
