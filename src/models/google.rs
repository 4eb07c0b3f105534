//! Google Gemini model definitions.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::ModelCapabilities;

/// Google Gemini models. Serialized as their API id (`gemini-2.0-flash`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Display, EnumString)]
#[serde(from = "String", into = "String")]
pub enum GoogleModel {
    #[strum(serialize = "gemini-2.5-pro")]
    Gemini25Pro,
    #[strum(serialize = "gemini-2.5-flash")]
    Gemini25Flash,
    #[strum(serialize = "gemini-2.0-flash")]
    Gemini20Flash,
    #[strum(serialize = "gemini-2.0-flash-lite")]
    Gemini20FlashLite,
    #[strum(serialize = "gemini-1.5-pro")]
    Gemini15Pro,
    #[strum(serialize = "gemini-1.5-flash")]
    Gemini15Flash,
    /// Custom/unknown Google model.
    #[strum(default)]
    Custom(String),
}

impl GoogleModel {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Gemini25Pro => "gemini-2.5-pro",
            Self::Gemini25Flash => "gemini-2.5-flash",
            Self::Gemini20Flash => "gemini-2.0-flash",
            Self::Gemini20FlashLite => "gemini-2.0-flash-lite",
            Self::Gemini15Pro => "gemini-1.5-pro",
            Self::Gemini15Flash => "gemini-1.5-flash",
            Self::Custom(s) => s,
        }
    }

    pub fn capabilities(&self) -> ModelCapabilities {
        let ctx = match self {
            Self::Gemini15Pro | Self::Gemini15Flash => 2_000_000,
            _ => 1_000_000,
        };
        ModelCapabilities {
            supports_tools: true,
            supports_json_mode: true,
            supports_json_schema: true,
            supports_system_messages: true,
            context_length: ctx,
            max_output_tokens: Some(8_192),
        }
    }
}

impl From<String> for GoogleModel {
    fn from(id: String) -> Self {
        id.parse().unwrap_or(Self::Custom(id))
    }
}

impl From<GoogleModel> for String {
    fn from(model: GoogleModel) -> Self {
        model.as_str().to_string()
    }
}
