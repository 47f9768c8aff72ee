use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::backend::BackendSettings;
use crate::provider::{Error, Result};

const CONFIG_PATH_ENV_VAR: &str = "CALENDARIO_CONFIG_FILE";

pub(crate) fn find_configfile_locations() -> Vec<PathBuf> {
    let mut locations = Vec::new();

    if let Ok(path) = env::var(CONFIG_PATH_ENV_VAR) {
        locations.push(PathBuf::from(path));
    }

    if let Some(dir) = dirs::config_dir() {
        locations.push(dir.join("calendario").join("config.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        locations.push(home.join(".calendario.toml"));
    }

    locations
}

/// Loads `path` if given, otherwise the first config file found in the
/// default locations, falling back to defaults. Backend settings from the
/// environment override the file.
pub fn load_suitable_config(path: Option<&Path>) -> Result<Config> {
    let config = if let Some(path) = path {
        Config::from_path(path)?
    } else if let Some(found) = find_configfile_locations()
        .into_iter()
        .find(|location| location.is_file())
    {
        Config::from_path(&found)?
    } else {
        log::info!("No config file found, using defaults");
        Config::default()
    };

    Ok(config.with_env_overrides())
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub today_day_char: Option<char>,
    pub focus_day_char: Option<char>,
    pub activity_day_char: Option<char>,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        ThemeConfig {
            today_day_char: Some('*'),
            focus_day_char: None,
            activity_day_char: Some('+'),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Refresh interval of the clock in milliseconds.
    #[serde(rename = "tick_rate")]
    tick_rate_ms: u64,
    pub theme: ThemeConfig,
    pub backend: BackendSettings,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            tick_rate_ms: 500,
            theme: ThemeConfig::default(),
            backend: BackendSettings::default(),
        }
    }
}

impl Config {
    pub fn from_path(path: &Path) -> Result<Config> {
        log::info!("Loading config from {}", path.display());
        let content = fs::read_to_string(path)
            .map_err(|err| Error::from(err).with_msg(&path.display().to_string()))?;
        content.parse()
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    fn with_env_overrides(mut self) -> Self {
        self.backend = self.backend.with_env_overrides();
        self
    }
}

impl FromStr for Config {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }
}
