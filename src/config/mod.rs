pub mod types;

use crate::error::ConfigError;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = ".ha-analyzer.toml";

/// Get the global config file path (~/.ha-analyzer.toml)
pub fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(CONFIG_FILE_NAME))
}

/// Get the local config file path (<dir>/.ha-analyzer.toml)
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(CONFIG_FILE_NAME)
}

/// Load configuration.
///
/// An explicit path must exist and parse. Without one, the local config in
/// the working directory is tried first, then the global config, then
/// defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<types::Config, ConfigError> {
    if let Some(path) = explicit {
        return load_config_file(path);
    }

    let local = std::env::current_dir()
        .ok()
        .map(|dir| local_config_path(&dir));

    for candidate in local.into_iter().chain(global_config_path()) {
        if candidate.is_file() {
            log::debug!("Loading configuration from {}", candidate.display());
            return load_config_file(&candidate);
        }
    }

    log::debug!("No configuration file found, using defaults");
    Ok(types::Config::default())
}

/// Load and parse one config file.
pub fn load_config_file(path: &Path) -> Result<types::Config, ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    parse_config(&content).map_err(|e| match e {
        ConfigError::ParsingFailed { message, .. } => ConfigError::ParsingFailed {
            path: path.display().to_string(),
            message,
        },
        other => other,
    })
}

/// Parse config from TOML text.
pub fn parse_config(content: &str) -> Result<types::Config, ConfigError> {
    let config: types::Config =
        toml::from_str(content).map_err(|e| ConfigError::ParsingFailed {
            path: "<inline>".to_string(),
            message: e.to_string(),
        })?;

    if config.timeout_secs == Some(0) {
        return Err(ConfigError::InvalidValue(
            "timeout_secs must be greater than zero".to_string(),
        ));
    }

    Ok(config)
}
