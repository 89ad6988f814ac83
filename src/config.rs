use std::time::Duration;

use log::info;
use thiserror::Error;

use crate::audio::RingtoneConfig;
use crate::roster::Roster;

/// Environment variable holding a path to a JSON roster file
pub const ROSTER_ENV: &str = "FAKE_CALL_ROSTER";
/// Environment variable that disables the ringtone when set to `off`
pub const RINGTONE_ENV: &str = "FAKE_CALL_RINGTONE";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("roster must contain at least one caller")]
    EmptyRoster,

    #[error("caller id must not be blank")]
    BlankCallerId,

    #[error("duplicate caller id: {0}")]
    DuplicateCaller(String),

    #[error("failed to parse roster: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read roster file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid value for {var}: {value}")]
    InvalidValue { var: &'static str, value: String },
}

/// Application configuration, provided to the UI as root context
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Callers offered on the selector screen
    pub roster: Roster,
    /// Ringtone synthesis settings
    pub ringtone: RingtoneConfig,
    /// Interval between elapsed-time ticks while connected
    pub tick_period: Duration,
    /// Stop ringing as soon as the call is answered instead of on hang-up
    pub stop_ringtone_on_answer: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            roster: Roster::default(),
            ringtone: RingtoneConfig::default(),
            tick_period: Duration::from_secs(1),
            stop_ringtone_on_answer: false,
        }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_roster(mut self, roster: Roster) -> Self {
        self.roster = roster;
        self
    }

    pub fn with_ringtone(mut self, ringtone: RingtoneConfig) -> Self {
        self.ringtone = ringtone;
        self
    }

    pub fn with_tick_period(mut self, period: Duration) -> Self {
        self.tick_period = period;
        self
    }

    pub fn with_stop_ringtone_on_answer(mut self, enabled: bool) -> Self {
        self.stop_ringtone_on_answer = enabled;
        self
    }

    /// Build the configuration from `FAKE_CALL_ROSTER` and `FAKE_CALL_RINGTONE`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = lookup(ROSTER_ENV) {
            info!("Loading roster from {}", path);
            config.roster = Roster::from_json_file(&path)?;
        }

        if let Some(value) = lookup(RINGTONE_ENV) {
            let enabled = match value.to_ascii_lowercase().as_str() {
                "on" | "1" | "true" => true,
                "off" | "0" | "false" => false,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        var: RINGTONE_ENV,
                        value,
                    })
                }
            };
            config.ringtone = config.ringtone.with_enabled(enabled);
        }

        Ok(config)
    }
}
