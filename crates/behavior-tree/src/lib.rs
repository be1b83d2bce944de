//! Priority-ordered behavior chains for tick-polled agents.
//!
//! Every tick walks a fixed list of steps in priority order. The first step
//! that *commits* (decides on something to do) ends the tick; the remaining
//! steps are skipped until the next tick starts again from the top.
//!
//! - **No Running state**: a step either commits or passes within the tick
//! - **Deterministic**: identical contexts walk identical paths
//! - **Named steps**: the chain reports which step committed, for logging
//!
//! # Architecture
//!
//! - [`Behavior`]: Core trait for all nodes
//! - [`Status`]: Commit or Pass
//! - [`Selector`]: the chain itself, first commit wins

pub mod behavior;
pub mod composite;
pub mod status;

pub use behavior::Behavior;
pub use composite::Selector;
pub use status::Status;
