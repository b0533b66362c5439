use crate::config::types::Settings;
use crate::config::validation::validate;
use crate::{ConfigError, ConfigResult};
use std::path::Path;

/// Loads, parses and validates a settings file
///
/// # Arguments
///
/// * `path` - Path to the TOML settings file
///
/// # Returns
///
/// * `Ok(Settings)` - Successfully loaded and validated settings
/// * `Err(ConfigError)` - Failed to load, parse, or validate the file
pub fn load_settings(path: &Path) -> ConfigResult<Settings> {
    let content = std::fs::read_to_string(path)?;
    parse_settings(&content)
}

/// Parses and validates settings from TOML text
pub fn parse_settings(content: &str) -> ConfigResult<Settings> {
    let settings: Settings = toml::from_str(content)?;
    validate(&settings)?;
    Ok(settings)
}

/// Loads settings from `path` when given, otherwise returns the defaults
pub fn load_settings_or_default(path: Option<&Path>) -> ConfigResult<Settings> {
    match path {
        Some(path) => {
            tracing::info!("Loading settings from: {}", path.display());
            load_settings(path)
        }
        None => {
            tracing::debug!("No settings file given, using defaults");
            Ok(Settings::default())
        }
    }
}
