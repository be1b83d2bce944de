use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use routine::{CombatRoutine, CommandValue, TickOutcome};
use sandbox::{ScenarioLoader, ScriptedWorld};
use tracing::info;

use super::load_config;

/// Tick length used when neither the scenario nor the command line set one.
const DEFAULT_TICK_MS: u64 = 100;

/// Run a scenario
#[derive(Parser)]
pub struct Run {
    /// Scenario file (RON)
    #[arg(value_name = "SCENARIO", env = "ROUTINE_SCENARIO")]
    scenario: PathBuf,

    /// Options file (TOML); defaults apply when omitted
    #[arg(short, long, value_name = "FILE", env = "ROUTINE_CONFIG")]
    config: Option<PathBuf>,

    /// Number of ticks to run
    #[arg(short, long, default_value_t = 20, env = "ROUTINE_TICKS")]
    ticks: u32,

    /// Option override as Name=Value, e.g. CombatRange=40 (repeatable)
    #[arg(short, long = "set", value_name = "NAME=VALUE")]
    overrides: Vec<String>,

    /// Milliseconds between ticks; defaults to the scenario's tick length
    #[arg(long, value_name = "MS")]
    tick_ms: Option<u64>,

    /// Targeting range override (-1 for the combat range)
    #[arg(short, long, allow_negative_numbers = true)]
    leash: Option<i32>,
}

impl Run {
    pub fn execute(self) -> Result<()> {
        let config = load_config(self.config.as_deref())?;
        let mut routine = CombatRoutine::new(config);

        for entry in &self.overrides {
            let Some((name, raw)) = entry.split_once('=') else {
                bail!("override {entry:?} is not of the form Name=Value");
            };
            let value: CommandValue = raw.parse()?;
            routine
                .execute(&format!("Set{name}"), &[value])
                .with_context(|| format!("applying {entry}"))?;
        }
        if let Some(leash) = self.leash {
            routine.set_leash(leash);
        }

        let scenario = ScenarioLoader::load(&self.scenario)?;
        let tick_ms = match (self.tick_ms, scenario.tick_ms) {
            (Some(ms), _) => ms,
            (None, 0) => DEFAULT_TICK_MS,
            (None, ms) => ms,
        };
        let mut world = ScriptedWorld::new(scenario);
        routine.start(world.scenario().start_ms)?;

        let mut acted = 0;
        let mut failed = 0;
        for _ in 0..self.ticks {
            let report = routine.tick(&mut world);
            match report.outcome {
                TickOutcome::Acted { .. } => acted += 1,
                TickOutcome::Failed { .. } => failed += 1,
                TickOutcome::Idle { .. } => {}
            }
            println!("{report}");
            world.advance(tick_ms);
        }

        info!(ticks = self.ticks, acted, failed, "run finished");
        Ok(())
    }
}
