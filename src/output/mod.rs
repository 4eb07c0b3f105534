//! Structured output: typed objects an agent must reply with.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::Result;
use crate::models::ModelCapabilities;
use crate::types::ResponseFormat;

/// A type the model's final reply must deserialize into.
///
/// `json_schema` is what gets sent to the model; `validate` enforces the
/// constraints serde alone cannot (length bounds and the like).
pub trait OutputSchema: Serialize + DeserializeOwned {
    /// Schema name as sent to the provider.
    const NAME: &'static str;

    fn json_schema() -> Value;

    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

/// Type-erased handle on an [`OutputSchema`], stored on an agent.
#[derive(Clone)]
pub struct OutputSpec {
    pub name: &'static str,
    pub schema: Value,
    parse: fn(&str) -> Result<Value>,
}

impl OutputSpec {
    pub fn of<T: OutputSchema>() -> Self {
        Self {
            name: T::NAME,
            schema: T::json_schema(),
            parse: parse_normalized::<T>,
        }
    }

    /// Parse and validate a raw model reply, returning the normalized object
    /// (defaults filled in, field order fixed).
    pub fn parse(&self, raw: &str) -> Result<Value> {
        (self.parse)(raw)
    }

    /// Pick how to ask the model for this schema.
    ///
    /// Uses native JSON Schema mode if the model supports it, JSON-object mode
    /// otherwise; in the latter case the caller should also send
    /// [`OutputSpec::schema_instruction`].
    pub fn response_format(&self, capabilities: &ModelCapabilities) -> ResponseFormat {
        if capabilities.supports_json_schema {
            ResponseFormat::JsonSchema {
                schema: self.schema.clone(),
                name: self.name.to_string(),
            }
        } else {
            ResponseFormat::JsonObject
        }
    }

    pub fn schema_instruction(&self) -> String {
        let pretty = serde_json::to_string_pretty(&self.schema).unwrap_or_default();
        format!(
            "You must respond with ONLY valid JSON (no markdown, no explanation) matching this schema:\n```json\n{pretty}\n```"
        )
    }
}

impl std::fmt::Debug for OutputSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutputSpec").field("name", &self.name).finish()
    }
}

/// Parse a model reply into `T`, tolerating a surrounding markdown fence.
pub fn parse_structured<T: OutputSchema>(raw: &str) -> Result<T> {
    let json_text = strip_code_fences(raw);
    let object: T = serde_json::from_str(&json_text)?;
    object.validate()?;
    Ok(object)
}

fn parse_normalized<T: OutputSchema>(raw: &str) -> Result<Value> {
    let object = parse_structured::<T>(raw)?;
    Ok(serde_json::to_value(object)?)
}

/// Strip markdown code fences from JSON response.
pub fn strip_code_fences(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.starts_with("```") {
        let without_opening = if let Some(rest) = trimmed.strip_prefix("```json") {
            rest
        } else if let Some(rest) = trimmed.strip_prefix("```") {
            rest
        } else {
            trimmed
        };
        if let Some(stripped) = without_opening.strip_suffix("```") {
            return stripped.trim().to_string();
        }
        return without_opening.trim().to_string();
    }
    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_code_fences_plain_json() {
        assert_eq!(strip_code_fences(r#"{"key": "value"}"#), r#"{"key": "value"}"#);
    }

    #[test]
    fn strip_code_fences_with_json_fence() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_code_fences(input), r#"{"key": "value"}"#);
    }

    #[test]
    fn strip_code_fences_with_unterminated_fence() {
        let input = "```\n{\"key\": \"value\"}";
        assert_eq!(strip_code_fences(input), r#"{"key": "value"}"#);
    }
}
