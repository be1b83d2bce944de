use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use routine::OPTIONS;

use super::load_config;

/// List the option commands
#[derive(Parser)]
pub struct Options {
    /// Options file to read current values from
    #[arg(short, long, value_name = "FILE", env = "ROUTINE_CONFIG")]
    config: Option<PathBuf>,
}

impl Options {
    pub fn execute(self) -> Result<()> {
        let config = load_config(self.config.as_deref())?;

        println!("{:<34} {:<8} VALUE", "OPTION", "KIND");
        for entry in OPTIONS {
            println!("{:<34} {:<8} {}", entry.name, entry.kind, (entry.get)(&config));
        }
        println!();
        println!("Also: SetLeash <int>, GetLeash, ResetCombatTargeting, ResetCastState");
        Ok(())
    }
}
