//! A scriptable in-memory environment for the combat routine.
//!
//! [`ScriptedWorld`] implements every environment trait from `combat-core`
//! over a [`Scenario`]: a fixed snapshot of the agent, hostiles, objects and
//! skill bar. Executor calls are recorded instead of performed, the clock
//! only moves when told to, and scenarios can be written by hand in RON.
pub mod scenario;
pub mod world;

pub use scenario::{Scenario, ScenarioError, ScenarioLoader};
pub use world::{Call, ScriptedWorld};
