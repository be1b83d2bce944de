//! The routine driver: lifecycle, ticks and commands.
use combat_core::targeting::{IGNORED_AURAS, register_default_rules};
use combat_core::{ConfigError, Environment, RoutineConfig, RuleScope, TargetingEngine};
use tracing::{debug, error, info, info_span, warn};

use crate::commands::{self, CommandValue, OptionValue, first_arg};
use crate::context::TickContext;
use crate::error::CommandError;
use crate::events::RoutineEvent;
use crate::layout::SlotLayout;
use crate::objective::{ObjectiveHandler, ShrineHandler};
use crate::report::{TickOutcome, TickReport};
use crate::state::{EngagementPhase, NO_LEASH, RoutineState};
use crate::steps::combat_chain;

/// Closed strongboxes within this distance get the highlight turned off.
pub const STRONGBOX_RADIUS: f32 = 70.0;

/// A combat routine driving one agent.
///
/// The host calls [`CombatRoutine::tick`] once per frame with a fresh view of
/// the world. Each tick ranks the hostiles, then walks the decision chain
/// until one step acts.
pub struct CombatRoutine {
    config: RoutineConfig,
    targeting: TargetingEngine,
    state: RoutineState,
    layout: SlotLayout,
    objectives: Box<dyn ObjectiveHandler>,
    running: bool,
}

impl CombatRoutine {
    /// A stopped routine with the stock targeting rules and shrine handling.
    pub fn new(config: RoutineConfig) -> Self {
        Self::with_objectives(config, Box::new(ShrineHandler::new()))
    }

    pub fn with_objectives(config: RoutineConfig, objectives: Box<dyn ObjectiveHandler>) -> Self {
        Self {
            config,
            targeting: TargetingEngine::with_default_rules(IGNORED_AURAS),
            state: RoutineState::default(),
            layout: SlotLayout::stale(),
            objectives,
            running: false,
        }
    }

    /// Validates the options and arms the routine.
    ///
    /// Throttle timers start counting at `now_ms`. A routine with an unusable
    /// config stays stopped.
    pub fn start(&mut self, now_ms: u64) -> Result<(), ConfigError> {
        if let Err(err) = self.config.validate() {
            error!(%err, "refusing to start");
            return Err(err);
        }
        self.layout.invalidate();
        self.state.register_cooldowns(&self.config, now_ms);
        self.running = true;
        info!(combat_range = self.config.combat_range, "routine started");
        Ok(())
    }

    pub fn stop(&mut self) {
        if self.running {
            info!(ticks = self.state.ticks, "routine stopped");
        }
        self.running = false;
        self.state.cast.clear();
        self.state.enter_phase(EngagementPhase::Idle);
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn handle_event(&mut self, event: &RoutineEvent) {
        match event {
            RoutineEvent::AreaChanged {
                old_seed,
                new_seed,
                area,
            } => {
                info!(old_seed, new_seed, %area, "area changed");
                self.layout.invalidate();
                self.objectives.reset();
            }
            RoutineEvent::PlayerDied { deaths } => {
                warn!(deaths, "player died");
            }
            RoutineEvent::LevelUp { level } => {
                info!(level, "level up");
            }
        }
    }

    /// Runs one decision tick against `env`.
    pub fn tick(&mut self, env: &mut dyn Environment) -> TickReport {
        self.state.ticks += 1;
        let tick = self.state.ticks;
        let span = info_span!("tick", n = tick);
        let _enter = span.enter();

        if !self.running {
            warn!("tick requested while stopped");
            return TickReport {
                tick,
                target: None,
                outcome: TickOutcome::Idle { step: None },
            };
        }

        let now_ms = env.now_ms();
        if self.layout.is_stale() {
            self.layout =
                SlotLayout::discover(&*env, env.agent(), self.config.enable_auras_from_items);
            self.state.clear_bursts();
        }
        self.state.sync_cooldowns(&self.config);

        let hostiles = env.hostiles().to_vec();
        let range = self.state.effective_range(&self.config);
        let ranked = {
            let mut scope = RuleScope::new(&hostiles, range, env.blacklist_mut());
            self.targeting.rank(&mut scope)
        };
        let best = ranked.best();
        debug!(candidates = hostiles.len(), eligible = ranked.len(), range, "ranked hostiles");

        let me = env.agent().position;
        let needs_highlight_off = env.chests().iter().any(|chest| {
            chest.strongbox && !chest.opened && chest.position.distance(me) < STRONGBOX_RADIUS
        });

        let mut ctx = TickContext::new(
            env,
            &self.config,
            &self.layout,
            &mut self.state,
            self.objectives.as_mut(),
            &hostiles,
            best,
            now_ms,
        )
        .with_highlight_flag(needs_highlight_off);

        let committed = combat_chain().run(&mut ctx);
        let outcome = ctx
            .into_outcome()
            .unwrap_or(TickOutcome::Idle { step: committed });

        self.state.enter_phase(if best.is_some() {
            EngagementPhase::Engaged
        } else {
            EngagementPhase::Idle
        });

        let report = TickReport {
            tick,
            target: best.map(|candidate| candidate.id),
            outcome,
        };
        debug!(%report, "tick done");
        report
    }

    /// Runs a named command.
    ///
    /// Besides `Get<Option>` / `Set<Option>` for every entry of
    /// [`commands::OPTIONS`] this understands `SetLeash`, `GetLeash`,
    /// `ResetCombatTargeting` and `ResetCastState`.
    pub fn execute(
        &mut self,
        command: &str,
        args: &[CommandValue],
    ) -> Result<Option<CommandValue>, CommandError> {
        match command {
            "SetLeash" => {
                let leash = i32::from_value(command, first_arg(command, args)?)?;
                if leash < NO_LEASH {
                    return Err(CommandError::OutOfRange {
                        command: command.to_owned(),
                        value: i64::from(leash),
                    });
                }
                self.set_leash(leash);
                Ok(None)
            }
            "GetLeash" => Ok(Some(CommandValue::Int(i64::from(self.leash())))),
            "ResetCombatTargeting" => {
                self.reset_targeting();
                Ok(None)
            }
            "ResetCastState" => {
                self.reset_cast_state();
                Ok(None)
            }
            _ => {
                let mut updated = self.config.clone();
                let result = commands::dispatch(&mut updated, command, args)?;
                if result.is_some() {
                    return Ok(result);
                }
                // A running routine must keep at least one primary slot.
                if self.running {
                    updated.validate().map_err(|source| CommandError::Rejected {
                        command: command.to_owned(),
                        source,
                    })?;
                }
                if updated.enable_auras_from_items != self.config.enable_auras_from_items {
                    self.layout.invalidate();
                }
                self.config = updated;
                info!(command, ?args, "option changed");
                Ok(None)
            }
        }
    }

    /// Overrides the targeting range; [`NO_LEASH`] restores the combat range.
    pub fn set_leash(&mut self, leash: i32) {
        debug!(leash, "leash set");
        self.state.leash = leash;
    }

    pub fn leash(&self) -> i32 {
        self.state.leash
    }

    /// Drops every targeting rule and registers the stock ones again.
    pub fn reset_targeting(&mut self) {
        self.targeting.reset();
        register_default_rules(&mut self.targeting, IGNORED_AURAS);
    }

    pub fn reset_cast_state(&mut self) {
        self.state.cast.clear();
    }

    pub fn config(&self) -> &RoutineConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut RoutineConfig {
        &mut self.config
    }

    pub fn targeting(&self) -> &TargetingEngine {
        &self.targeting
    }

    /// Custom rules are appended after the stock ones.
    pub fn targeting_mut(&mut self) -> &mut TargetingEngine {
        &mut self.targeting
    }

    pub fn state(&self) -> &RoutineState {
        &self.state
    }

    pub fn layout(&self) -> &SlotLayout {
        &self.layout
    }
}
