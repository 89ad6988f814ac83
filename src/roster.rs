use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::config::ConfigError;

/// A selectable identity for the simulated incoming call
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Caller {
    pub id: String,
    #[serde(default)]
    pub glyph: Option<String>,
}

impl Caller {
    pub fn new(id: impl Into<String>, glyph: Option<&str>) -> Self {
        Self {
            id: id.into(),
            glyph: glyph.map(str::to_string),
        }
    }

    /// Upper-cased first letter, shown as the avatar on the call screen
    pub fn initial(&self) -> String {
        self.id.chars().next().map(|c| c.to_uppercase().collect()).unwrap_or_default()
    }
}

/// Ordered set of callers shown on the selector screen
///
/// Only built through [`Roster::new`], so every roster is non-empty with unique ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    callers: Vec<Caller>,
}

impl Default for Roster {
    fn default() -> Self {
        Self {
            callers: vec![
                Caller::new("mom", Some("👩‍❤️‍👨")),
                Caller::new("wife", Some("💕")),
                Caller::new("jake", Some("👨")),
                Caller::new("boss", Some("💼")),
                Caller::new("doctor", Some("👨‍⚕️")),
                Caller::new("bank", Some("🏦")),
            ],
        }
    }
}

impl Roster {
    pub fn new(callers: Vec<Caller>) -> Result<Self, ConfigError> {
        if callers.is_empty() {
            return Err(ConfigError::EmptyRoster);
        }

        let mut seen = HashSet::new();
        for caller in &callers {
            if caller.id.trim().is_empty() {
                return Err(ConfigError::BlankCallerId);
            }
            if !seen.insert(caller.id.as_str()) {
                return Err(ConfigError::DuplicateCaller(caller.id.clone()));
            }
        }

        Ok(Self { callers })
    }

    /// Parse a roster from a JSON array of `{ "id": ..., "glyph": ... }` objects
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let callers: Vec<Caller> = serde_json::from_str(json)?;
        Self::new(callers)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn get(&self, id: &str) -> Option<&Caller> {
        self.callers.iter().find(|c| c.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Caller> {
        self.callers.iter()
    }

    pub fn len(&self) -> usize {
        self.callers.len()
    }
}
