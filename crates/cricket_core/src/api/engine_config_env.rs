use crate::engine::EngineConfig;
use crate::error::{MatchError, Result};
use std::path::Path;
use std::{env, fs};

/// Path to a JSON or YAML engine config applied when a request carries none.
pub const ENGINE_CONFIG_PATH_ENV: &str = "CRICKET_ENGINE_CONFIG";

/// Read an engine config file; `.yaml`/`.yml` are parsed as YAML, anything else as JSON.
pub fn engine_config_from_path(path: &Path) -> Result<EngineConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        MatchError::InvalidConfig(format!("failed to read engine config '{}': {e}", path.display()))
    })?;
    EngineConfig::from_file_contents(&path.to_string_lossy(), &content)
}

/// Engine config named by [`ENGINE_CONFIG_PATH_ENV`], if set.
pub fn engine_config_from_env() -> Result<Option<EngineConfig>> {
    config_from_var(ENGINE_CONFIG_PATH_ENV)
}

fn config_from_var(var: &str) -> Result<Option<EngineConfig>> {
    let Ok(path) = env::var(var) else {
        return Ok(None);
    };

    let path = path.trim();
    if path.is_empty() {
        return Ok(None);
    }

    engine_config_from_path(Path::new(path))
        .map(Some)
        .map_err(|e| MatchError::InvalidConfig(format!("{var}='{path}': {e}")))
}
