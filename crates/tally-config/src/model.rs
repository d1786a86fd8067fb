use serde::{Deserialize, Serialize};
use std::{fmt, path::PathBuf, str::FromStr};

use tally_domain::Filter;

use crate::ConfigError;

/// What the controller does when a mutation cannot be written to storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveFailurePolicy {
    /// Keep the in-memory change and report it as unsaved.
    #[default]
    KeepInMemory,
    /// Restore the pre-mutation state and return the error.
    Rollback,
}

impl SaveFailurePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SaveFailurePolicy::KeepInMemory => "keep_in_memory",
            SaveFailurePolicy::Rollback => "rollback",
        }
    }
}

impl fmt::Display for SaveFailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SaveFailurePolicy {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "keep_in_memory" | "keep" => Ok(SaveFailurePolicy::KeepInMemory),
            "rollback" => Ok(SaveFailurePolicy::Rollback),
            other => Err(ConfigError::Serde(format!(
                "unknown save failure policy `{other}`"
            ))),
        }
    }
}

/// Stores user-configurable preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Custom storage directory. Defaults to `$TALLY_HOME` or `~/.tally`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    #[serde(default = "Config::default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default)]
    pub save_failure: SaveFailurePolicy,
    #[serde(default)]
    pub default_filter: Filter,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            currency_symbol: Self::default_currency_symbol(),
            save_failure: SaveFailurePolicy::default(),
            default_filter: Filter::default(),
            ui_color_enabled: Self::default_ui_color_enabled(),
        }
    }
}

impl Config {
    pub fn default_currency_symbol() -> String {
        "$".into()
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    /// Returns the configured storage directory or `fallback` when none is set.
    pub fn resolve_data_dir(&self, fallback: PathBuf) -> PathBuf {
        self.data_dir.clone().unwrap_or(fallback)
    }
}
