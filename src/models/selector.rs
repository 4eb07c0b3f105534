//! Model selection and parsing.

use std::str::FromStr;

use super::{GoogleModel, LanguageModel};
use crate::error::AgentryError;

/// Parse a model selector string into a LanguageModel.
pub struct ModelSelector;

impl ModelSelector {
    /// Parse a selector into a LanguageModel.
    ///
    /// Accepted forms:
    /// - `provider:model_id` (`google:gemini-2.0-flash`)
    /// - `provider/model_id` as used by LiteLLM
    ///   (`openrouter/deepseek/deepseek-chat-v3.1:free`)
    /// - a bare Gemini name (`gemini-2.0-flash`)
    ///
    /// Whichever separator appears first decides the form, so model ids may
    /// themselves contain `/` or `:`.
    pub fn parse(s: &str) -> Result<LanguageModel, AgentryError> {
        let s = s.trim();
        let colon = s.find(':');
        let slash = s.find('/');

        let split_at = match (colon, slash) {
            (Some(c), Some(sl)) => Some(c.min(sl)),
            (Some(c), None) => Some(c),
            (None, Some(sl)) => Some(sl),
            (None, None) => None,
        };

        let Some(idx) = split_at else {
            if s.starts_with("gemini") {
                return Ok(LanguageModel::Google(parse_google(s)));
            }
            return Err(AgentryError::InvalidArgument(format!(
                "Invalid model selector '{s}': expected 'provider:model_id' or 'provider/model_id'"
            )));
        };

        let (provider, model_id) = (&s[..idx], &s[idx + 1..]);
        if provider.is_empty() || model_id.is_empty() {
            return Err(AgentryError::InvalidArgument(format!(
                "Invalid model selector '{s}': provider and model id must be non-empty"
            )));
        }

        match provider {
            "google" | "gemini" => Ok(LanguageModel::Google(parse_google(model_id))),
            "openrouter" => Ok(LanguageModel::OpenRouter(model_id.to_string())),
            _ => Ok(LanguageModel::Custom {
                provider: provider.to_string(),
                model_id: model_id.to_string(),
            }),
        }
    }
}

fn parse_google(model_id: &str) -> GoogleModel {
    GoogleModel::from_str(model_id).unwrap_or(GoogleModel::Custom(model_id.to_string()))
}

impl FromStr for LanguageModel {
    type Err = AgentryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModelSelector::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_google_model() {
        let model = ModelSelector::parse("google:gemini-2.5-pro").unwrap();
        assert_eq!(model.provider_name(), "google");
        assert_eq!(model.model_id(), "gemini-2.5-pro");
        assert!(matches!(model, LanguageModel::Google(GoogleModel::Gemini25Pro)));
    }

    #[test]
    fn parse_bare_gemini_name() {
        let model = ModelSelector::parse("gemini-2.0-flash").unwrap();
        assert_eq!(model, LanguageModel::Google(GoogleModel::Gemini20Flash));
    }

    #[test]
    fn parse_unknown_gemini_becomes_custom_google() {
        let model = ModelSelector::parse("gemini:gemini-9-ultra").unwrap();
        assert_eq!(model.provider_name(), "google");
        assert_eq!(model.model_id(), "gemini-9-ultra");
    }

    #[test]
    fn parse_litellm_openrouter_path() {
        let model = ModelSelector::parse("openrouter/deepseek/deepseek-chat-v3.1:free").unwrap();
        assert_eq!(model.provider_name(), "openrouter");
        assert_eq!(model.model_id(), "deepseek/deepseek-chat-v3.1:free");
    }

    #[test]
    fn parse_colon_openrouter_keeps_slashes_in_id() {
        let model = ModelSelector::parse("openrouter:deepseek/deepseek-chat-v3.1:free").unwrap();
        assert_eq!(model.model_id(), "deepseek/deepseek-chat-v3.1:free");
    }

    #[test]
    fn parse_unknown_provider_becomes_custom() {
        let model = ModelSelector::parse("somecloud:my-model").unwrap();
        assert_eq!(model.provider_name(), "somecloud");
        assert_eq!(model.model_id(), "my-model");
    }

    #[test]
    fn parse_missing_separator_is_error() {
        assert!(ModelSelector::parse("gpt-4o").is_err());
    }

    #[test]
    fn parse_empty_parts_are_errors() {
        assert!(ModelSelector::parse(":gemini-2.0-flash").is_err());
        assert!(ModelSelector::parse("google:").is_err());
    }

    #[test]
    fn roundtrip_display_parse() {
        for selector in [
            "google:gemini-2.0-flash",
            "openrouter/deepseek/deepseek-chat-v3.1:free",
        ] {
            let model = ModelSelector::parse(selector).unwrap();
            let parsed: LanguageModel = model.to_string().parse().unwrap();
            assert_eq!(parsed, model);
        }
    }
}
