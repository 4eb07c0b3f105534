//! On-disk settings (`~/.agentry/config.toml`).

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Settings file contents.
///
/// ```toml
/// default_model = "google:gemini-2.5-flash"
///
/// [agents.memory_agent]
/// model = "google:gemini-2.0-flash"
/// temperature = 0.2
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Replaces the stock Gemini model for recipes that do not pin a model.
    pub default_model: Option<String>,
    #[serde(default)]
    pub agents: HashMap<String, AgentSettings>,
}

/// Per-agent overrides, keyed by agent name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgentSettings {
    pub model: Option<String>,
    pub temperature: Option<f64>,
    pub max_output_tokens: Option<u32>,
}

impl Settings {
    /// Read settings from `path`. A missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(err) => return Err(err.into()),
        };
        Ok(toml::from_str(&raw)?)
    }

    pub fn default_path() -> PathBuf {
        directories::UserDirs::new()
            .map(|dirs| dirs.home_dir().join(".agentry"))
            .unwrap_or_else(|| PathBuf::from(".agentry"))
            .join("config.toml")
    }

    pub fn agent(&self, name: &str) -> Option<&AgentSettings> {
        self.agents.get(name)
    }
}
