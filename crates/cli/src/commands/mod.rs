mod options;
mod run;

pub use options::Options;
pub use run::Run;

use std::path::Path;

use anyhow::{Context, Result};
use combat_core::RoutineConfig;
use routine::ConfigLoader;

/// Options from `path`, or the defaults when no file is given.
fn load_config(path: Option<&Path>) -> Result<RoutineConfig> {
    match path {
        Some(path) => {
            ConfigLoader::load(path).with_context(|| format!("loading {}", path.display()))
        }
        None => Ok(RoutineConfig::default()),
    }
}
