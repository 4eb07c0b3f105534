//! Generation settings and related enums.

use bon::Builder;
use serde::{Deserialize, Serialize};

/// Settings forwarded to the model with every request an agent makes.
#[derive(Debug, Clone, Builder, Serialize, Deserialize, Default, PartialEq)]
pub struct GenerationSettings {
    pub temperature: Option<f64>,
    pub max_output_tokens: Option<u32>,
    pub response_format: Option<ResponseFormat>,
}

/// Requested response format.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseFormat {
    JsonObject,
    JsonSchema {
        schema: serde_json::Value,
        name: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_only_requested_fields() {
        let settings = GenerationSettings::builder()
            .temperature(0.1)
            .max_output_tokens(1000)
            .build();

        assert_eq!(settings.temperature, Some(0.1));
        assert_eq!(settings.max_output_tokens, Some(1000));
        assert_eq!(settings.response_format, None);
    }

    #[test]
    fn response_format_serializes_with_type_tag() {
        let format = ResponseFormat::JsonSchema {
            schema: serde_json::json!({"type": "object"}),
            name: "EmailContent".into(),
        };
        let value = serde_json::to_value(&format).unwrap();
        assert_eq!(value["type"], "json_schema");
        assert_eq!(value["name"], "EmailContent");
    }
}
