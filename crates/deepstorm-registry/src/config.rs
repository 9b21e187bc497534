//! RON configuration for a journal registry
//!
//! ```ron
//! (
//!     defaults: (capacity: 200),
//!     journals: [
//!         (name: "orders", display_name: Some("New order flow")),
//!         (name: "templates", capacity: Some(50), logging_suppressed: Some(true)),
//!     ],
//! )
//! ```

use crate::error::{Error, Result};
use deepstorm_core::JournalConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Settings applied to journals the registry creates
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Settings for journals without a preset
    #[serde(default)]
    pub defaults: JournalConfig,
    /// Journals created up front, with per-journal overrides
    #[serde(default)]
    pub journals: Vec<JournalPreset>,
}

/// Per-journal overrides of the registry defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalPreset {
    /// Registry key
    pub name: String,
    /// Display name; the registry key is used when absent
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub capacity: Option<usize>,
    #[serde(default)]
    pub logging_suppressed: Option<bool>,
}

impl JournalPreset {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: None,
            capacity: None,
            logging_suppressed: None,
        }
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn suppressed(mut self) -> Self {
        self.logging_suppressed = Some(true);
        self
    }

    fn apply(&self, defaults: &JournalConfig) -> JournalConfig {
        JournalConfig {
            capacity: self.capacity.unwrap_or(defaults.capacity),
            logging_suppressed: self
                .logging_suppressed
                .unwrap_or(defaults.logging_suppressed),
        }
    }
}

impl RegistryConfig {
    /// Parse and validate a RON document
    pub fn from_ron_str(text: &str) -> Result<Self> {
        let config: Self = ron::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a RON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&text)
    }

    /// Reject presets that share a name
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for preset in &self.journals {
            if !seen.insert(preset.name.as_str()) {
                return Err(Error::DuplicatePreset(preset.name.clone()));
            }
        }
        Ok(())
    }

    pub fn preset(&self, name: &str) -> Option<&JournalPreset> {
        self.journals.iter().find(|preset| preset.name == name)
    }

    /// Display name and settings for a journal registered under `name`
    pub fn resolve(&self, name: &str) -> (String, JournalConfig) {
        match self.preset(name) {
            Some(preset) => (
                preset
                    .display_name
                    .clone()
                    .unwrap_or_else(|| name.to_string()),
                preset.apply(&self.defaults),
            ),
            None => (name.to_string(), self.defaults.clone()),
        }
    }
}
