//! Configuration system (layered: code > env > settings file).

pub mod settings;

pub use settings::{AgentSettings, Settings};

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::{Arc, RwLock};

use tracing::debug;

use crate::error::{AgentryError, Result};
use crate::models::LanguageModel;
use crate::types::GenerationSettings;

/// Environment variable holding a model selector that replaces the stock
/// Gemini model.
pub const MODEL_ENV_VAR: &str = "AGENTRY_MODEL";

const API_KEY_ENV_MAPPINGS: [(&str, &str); 5] = [
    ("GOOGLE_API_KEY", "google"),
    ("GEMINI_API_KEY", "google"),
    ("OPENROUTER_API_KEY", "openrouter"),
    ("OPENAI_API_KEY", "openai"),
    ("ANTHROPIC_API_KEY", "anthropic"),
];

/// Layered configuration.
///
/// Resolution order for a recipe's model:
/// 1. `[agents.<name>] model` from the settings file
/// 2. `AGENTRY_MODEL` (only for recipes on the stock Gemini model)
/// 3. `default_model` from the settings file (same restriction)
/// 4. the recipe's own model
#[derive(Clone, Default)]
pub struct AgentryConfig {
    api_keys: Arc<RwLock<HashMap<String, String>>>,
    model_override: Option<String>,
    settings: Settings,
}

impl fmt::Debug for AgentryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let providers: Vec<String> = self
            .api_keys
            .read()
            .map(|keys| keys.keys().cloned().collect())
            .unwrap_or_default();
        f.debug_struct("AgentryConfig")
            .field("api_keys_for", &providers)
            .field("model_override", &self.model_override)
            .field("settings", &self.settings)
            .finish()
    }
}

impl AgentryConfig {
    /// Create an empty config (no keys, no overrides).
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from environment variables, reading `.env` first if present.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup. The first variable found for
    /// a provider wins.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let config = Self::new();
        for (env_var, provider) in &API_KEY_ENV_MAPPINGS {
            if config.get_api_key(provider).is_some() {
                continue;
            }
            if let Some(key) = lookup(env_var).filter(|k| !k.trim().is_empty()) {
                debug!(provider, env_var, "loaded api key from environment");
                config.set_api_key(provider, key);
            }
        }
        Self {
            model_override: lookup(MODEL_ENV_VAR).filter(|m| !m.trim().is_empty()),
            ..config
        }
    }

    /// Environment plus settings file. With no explicit path the default
    /// location is used; a missing file is not an error.
    pub fn load(settings_path: Option<&Path>) -> Result<Self> {
        let path = settings_path
            .map(Path::to_path_buf)
            .unwrap_or_else(Settings::default_path);
        let settings = Settings::load(&path)?;
        debug!(path = %path.display(), "loaded settings");
        Ok(Self::from_env().with_settings(settings))
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_model_override(mut self, selector: impl Into<String>) -> Self {
        self.model_override = Some(selector.into());
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_api_key(&self, provider: &str, key: String) {
        if let Ok(mut keys) = self.api_keys.write() {
            keys.insert(provider.to_string(), key);
        }
    }

    pub fn get_api_key(&self, provider: &str) -> Option<String> {
        self.api_keys.read().ok()?.get(provider).cloned()
    }

    pub fn has_credentials(&self, provider: &str) -> bool {
        self.get_api_key(provider).is_some()
    }

    /// Resolve the model an agent should run on.
    pub fn model_for(&self, agent_name: &str, recipe_default: &LanguageModel) -> Result<LanguageModel> {
        if let Some(selector) = self.settings.agent(agent_name).and_then(|a| a.model.as_deref()) {
            return parse_selector(selector, agent_name);
        }
        if *recipe_default == LanguageModel::default_gemini() {
            if let Some(selector) = self
                .model_override
                .as_deref()
                .or(self.settings.default_model.as_deref())
            {
                return parse_selector(selector, agent_name);
            }
        }
        Ok(recipe_default.clone())
    }

    /// Apply per-agent generation overrides on top of a recipe's settings.
    pub fn generation_for(&self, agent_name: &str, base: GenerationSettings) -> GenerationSettings {
        let Some(overrides) = self.settings.agent(agent_name) else {
            return base;
        };
        GenerationSettings {
            temperature: overrides.temperature.or(base.temperature),
            max_output_tokens: overrides.max_output_tokens.or(base.max_output_tokens),
            ..base
        }
    }
}

fn parse_selector(selector: &str, agent_name: &str) -> Result<LanguageModel> {
    selector.parse().map_err(|e| {
        AgentryError::Configuration(format!("model for '{agent_name}' ('{selector}'): {e}"))
    })
}
