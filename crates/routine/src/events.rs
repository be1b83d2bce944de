//! Host lifecycle events the routine reacts to.

/// Events forwarded by the host between ticks.
#[derive(Debug, Clone, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum RoutineEvent {
    /// The agent entered a different area.
    ///
    /// Skill-bar roles are rediscovered and per-area objective bookkeeping
    /// is dropped.
    AreaChanged {
        old_seed: u32,
        new_seed: u32,
        area: String,
    },

    /// The agent died.
    PlayerDied {
        /// Deaths in the current instance, this one included.
        deaths: u32,
    },

    /// The agent gained a level.
    LevelUp { level: u32 },
}
