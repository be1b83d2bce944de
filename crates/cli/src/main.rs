//! Runs the combat routine against scripted scenarios.
//!
//! ```bash
//! # Ten ticks of the demo scenario with the demo options
//! routine-cli run demos/pack.ron --config demos/routine.toml --ticks 10
//!
//! # Override options for one run
//! routine-cli run demos/pack.ron --set CombatRange=40 --set AlwaysAttackInPlace=true
//!
//! # List every option command
//! routine-cli options
//! ```
//!
//! Log verbosity follows `RUST_LOG`; `.env` is read first if present.

mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Options, Run};

/// Scripted runs of the combat routine
#[derive(Parser)]
#[command(name = "routine-cli")]
#[command(about = "Drive the combat routine against scripted scenarios", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Run a scenario for a number of ticks and print each decision
    Run(Run),

    /// List the option commands and their current values
    Options(Options),
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Run(cmd) => cmd.execute(),
        Command::Options(cmd) => cmd.execute(),
    }
}
