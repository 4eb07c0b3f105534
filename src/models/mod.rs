//! Model definitions and selection.

pub mod capabilities;
pub mod google;
pub mod selector;

pub use capabilities::ModelCapabilities;
pub use google::GoogleModel;
pub use selector::ModelSelector;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Top-level language model enum, dispatching to provider-specific variants.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "provider", content = "model", rename_all = "lowercase")]
pub enum LanguageModel {
    Google(GoogleModel),
    /// Routed through OpenRouter; the id keeps its upstream vendor prefix
    /// (`deepseek/deepseek-chat-v3.1:free`).
    OpenRouter(String),
    /// Custom model with explicit provider and model ID.
    Custom { provider: String, model_id: String },
}

impl LanguageModel {
    /// The default model used by recipes that do not pick their own.
    pub fn default_gemini() -> Self {
        Self::Google(GoogleModel::Gemini20Flash)
    }

    /// Get the model's API identifier string.
    pub fn model_id(&self) -> &str {
        match self {
            Self::Google(m) => m.as_str(),
            Self::OpenRouter(id) => id,
            Self::Custom { model_id, .. } => model_id,
        }
    }

    /// Get the provider name.
    pub fn provider_name(&self) -> &str {
        match self {
            Self::Google(_) => "google",
            Self::OpenRouter(_) => "openrouter",
            Self::Custom { provider, .. } => provider,
        }
    }

    /// Get capabilities for this model.
    pub fn capabilities(&self) -> ModelCapabilities {
        match self {
            Self::Google(m) => m.capabilities(),
            Self::OpenRouter(_) => ModelCapabilities {
                supports_tools: true,
                supports_json_mode: true,
                ..ModelCapabilities::default()
            },
            Self::Custom { .. } => ModelCapabilities::default(),
        }
    }

    /// Environment variables that can hold this model's credentials, in
    /// lookup order.
    pub fn api_key_env_vars(&self) -> &'static [&'static str] {
        match self {
            Self::Google(_) => &["GOOGLE_API_KEY", "GEMINI_API_KEY"],
            Self::OpenRouter(_) => &["OPENROUTER_API_KEY"],
            Self::Custom { provider, .. } => match provider.as_str() {
                "openai" => &["OPENAI_API_KEY"],
                "anthropic" => &["ANTHROPIC_API_KEY"],
                _ => &[],
            },
        }
    }
}

impl fmt::Display for LanguageModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.provider_name(), self.model_id())
    }
}
