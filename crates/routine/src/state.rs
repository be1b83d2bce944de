//! State the routine keeps between ticks.
use combat_core::{CastState, CooldownTracker, RoutineConfig};
use tracing::info;

/// Interval between golem summons.
pub const GOLEM_INTERVAL_MS: u64 = 10_000;

/// Interval between scans for charged abilities.
pub const VAAL_INTERVAL_MS: u64 = 1_000;

/// Leash value meaning "use the combat range".
pub const NO_LEASH: i32 = -1;

/// Throttled abilities tracked by the cooldown tracker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Throttle {
    Golem,
    Totem,
    Vaal,
    RagingSpirits,
    Skeletons,
}

/// Whether the agent currently has something to fight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum EngagementPhase {
    #[default]
    Idle,
    Engaged,
}

/// Cooldowns, the held ability and the leash.
///
/// Only the decision chain mutates this; it survives across ticks but not
/// across process restarts.
#[derive(Clone, Debug)]
pub struct RoutineState {
    pub cooldowns: CooldownTracker<Throttle>,
    pub cast: CastState,
    /// Targeting range override, [`NO_LEASH`] when unset.
    pub leash: i32,
    pub phase: EngagementPhase,
    pub ticks: u64,
}

impl Default for RoutineState {
    fn default() -> Self {
        Self {
            cooldowns: CooldownTracker::new(),
            cast: CastState::new(),
            leash: NO_LEASH,
            phase: EngagementPhase::Idle,
            ticks: 0,
        }
    }
}

impl RoutineState {
    /// Registers every throttle, timers starting at `now_ms`.
    pub fn register_cooldowns(&mut self, config: &RoutineConfig, now_ms: u64) {
        let cooldowns = &mut self.cooldowns;
        cooldowns.register(Throttle::Golem, GOLEM_INTERVAL_MS, now_ms);
        cooldowns.register(Throttle::Totem, config.totem_delay_ms, now_ms);
        cooldowns.register(Throttle::Vaal, VAAL_INTERVAL_MS, now_ms);
        cooldowns.register_burst(
            Throttle::RagingSpirits,
            config.raging_spirit_burst.count,
            config.raging_spirit_burst.delay_ms,
            now_ms,
        );
        cooldowns.register_burst(
            Throttle::Skeletons,
            config.skeleton_burst.count,
            config.skeleton_burst.delay_ms,
            now_ms,
        );
    }

    /// Picks up option changes without restarting any timer.
    pub fn sync_cooldowns(&mut self, config: &RoutineConfig) {
        let cooldowns = &mut self.cooldowns;
        cooldowns.reconfigure(Throttle::Totem, config.totem_delay_ms, None);
        cooldowns.reconfigure(
            Throttle::RagingSpirits,
            config.raging_spirit_burst.delay_ms,
            Some(config.raging_spirit_burst.count),
        );
        cooldowns.reconfigure(
            Throttle::Skeletons,
            config.skeleton_burst.delay_ms,
            Some(config.skeleton_burst.count),
        );
    }

    /// Forgets uses counted in open burst windows. Rest delays keep running.
    pub fn clear_bursts(&mut self) {
        self.cooldowns.clear_burst(Throttle::RagingSpirits);
        self.cooldowns.clear_burst(Throttle::Skeletons);
    }

    /// Range hostiles must be within to be considered at all.
    pub fn effective_range(&self, config: &RoutineConfig) -> f32 {
        if self.leash != NO_LEASH {
            self.leash as f32
        } else {
            config.combat_range as f32
        }
    }

    pub fn enter_phase(&mut self, phase: EngagementPhase) {
        if self.phase != phase {
            info!(from = %self.phase, to = %phase, "engagement changed");
            self.phase = phase;
        }
    }
}
