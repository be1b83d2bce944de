//! Routine configuration loader.

use std::path::Path;

use combat_core::RoutineConfig;
use tracing::warn;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Loader for routine options from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load options from a TOML file.
    ///
    /// Missing keys keep their defaults. The result is validated, but an
    /// invalid config is still returned: the routine refuses to start on its
    /// own and the caller may want to fix it through commands first.
    pub fn load(path: &Path) -> LoadResult<RoutineConfig> {
        let content = read_file(path)?;
        let config = Self::parse(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse config TOML at {}: {}", path.display(), e)
        })?;

        if let Err(error) = config.validate() {
            warn!(path = %path.display(), %error, "loaded config is not usable as is");
        }
        Ok(config)
    }

    /// Parse options from TOML text.
    pub fn parse(content: &str) -> LoadResult<RoutineConfig> {
        Ok(toml::from_str(content)?)
    }
}
