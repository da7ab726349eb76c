//! Host configuration loaded from TOML.

use brainvita_core::WinRule;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Default config file looked up when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "brainvita.toml";

/// Configuration for the terminal host.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct HostConfig {
    /// Presentation delay between a jump starting and being committed.
    #[serde(default = "default_move_delay_ms")]
    move_delay_ms: u64,

    /// What counts as a win once no jump is left.
    #[serde(default)]
    win_rule: WinRule,

    /// Emit notifications as JSON lines instead of text.
    #[serde(default)]
    json_events: bool,
}

#[instrument]
fn default_move_delay_ms() -> u64 {
    150
}

impl HostConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(
            move_delay_ms = config.move_delay_ms,
            win_rule = %config.win_rule,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Loads an explicit config file, or the default file when present.
    ///
    /// A missing explicit file is an error; a missing default file yields
    /// the built-in defaults.
    #[instrument]
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(DEFAULT_CONFIG_FILE)
            }
            None => {
                debug!("No config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Applies command-line overrides on top of file values.
    #[instrument(skip(self))]
    pub fn with_overrides(mut self, delay_ms: Option<u64>, center_only: bool, json: bool) -> Self {
        if let Some(delay_ms) = delay_ms {
            self.move_delay_ms = delay_ms;
        }
        if center_only {
            self.win_rule = WinRule::CenterOnly;
        }
        if json {
            self.json_events = true;
        }
        self
    }

    /// Presentation delay as a [`Duration`].
    pub fn move_delay(&self) -> Duration {
        Duration::from_millis(self.move_delay_ms)
    }
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            move_delay_ms: default_move_delay_ms(),
            win_rule: WinRule::default(),
            json_events: false,
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
