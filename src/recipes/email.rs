//! An agent whose reply must be a structured email object.
//!
//! The agent carries no tools: structured-output agents cannot call any.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use strum::{Display, EnumString, VariantNames};

use crate::agent::Agent;
use crate::config::AgentryConfig;
use crate::error::{AgentryError, Result};
use crate::models::LanguageModel;
use crate::output::OutputSchema;

pub const NAME: &str = "email_agent";

/// State key the generated email is stored under.
pub const OUTPUT_KEY: &str = "email";

pub const SUBJECT_MIN_CHARS: usize = 5;
pub const SUBJECT_MAX_CHARS: usize = 120;
pub const BODY_MIN_CHARS: usize = 50;

const INSTRUCTION: &str = r#"You are an Email Generation Assistant.

Return ONLY valid JSON for the following schema:
{
  "subject": "...",
  "body": "...",
  "tone": "formal|neutral|friendly",
  "priority": "low|normal|high",
  "attachments": ["..."]
}

Guidelines:
- Subject: concise, informative.
- Body: greeting, concise content, closing, signature.
- Tone: match the user's request (default neutral).
- Priority: infer from urgency cues; use "normal" by default.
- Attachments: suggest filenames if relevant, else an empty list.

Do not include any explanations, markdown, or code blocks. JSON only."#;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, VariantNames,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Tone {
    Formal,
    #[default]
    Neutral,
    Friendly,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, VariantNames,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
}

/// The email the agent must produce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmailContent {
    pub subject: String,
    pub body: String,
    #[serde(default)]
    pub tone: Tone,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub attachments: Vec<String>,
}

impl OutputSchema for EmailContent {
    const NAME: &'static str = "EmailContent";

    fn json_schema() -> Value {
        json!({
            "title": "EmailContent",
            "type": "object",
            "properties": {
                "subject": {
                    "type": "string",
                    "minLength": SUBJECT_MIN_CHARS,
                    "maxLength": SUBJECT_MAX_CHARS,
                },
                "body": {
                    "type": "string",
                    "minLength": BODY_MIN_CHARS,
                },
                "tone": {
                    "type": "string",
                    "enum": Tone::VARIANTS,
                    "default": Tone::default().to_string(),
                },
                "priority": {
                    "type": "string",
                    "enum": Priority::VARIANTS,
                    "default": Priority::default().to_string(),
                },
                "attachments": {
                    "type": "array",
                    "items": { "type": "string" },
                },
            },
            "required": ["subject", "body"],
            "additionalProperties": false,
        })
    }

    /// Lengths are counted in characters, not bytes.
    fn validate(&self) -> Result<()> {
        let subject_len = self.subject.chars().count();
        if !(SUBJECT_MIN_CHARS..=SUBJECT_MAX_CHARS).contains(&subject_len) {
            return Err(AgentryError::schema(
                "subject",
                format!(
                    "length {subject_len} outside [{SUBJECT_MIN_CHARS}, {SUBJECT_MAX_CHARS}]"
                ),
            ));
        }
        let body_len = self.body.chars().count();
        if body_len < BODY_MIN_CHARS {
            return Err(AgentryError::schema(
                "body",
                format!("length {body_len} below minimum {BODY_MIN_CHARS}"),
            ));
        }
        Ok(())
    }
}

pub fn agent(config: &AgentryConfig) -> Result<Agent> {
    let agent = Agent::new(NAME, LanguageModel::default_gemini())
        .with_description(
            "Generates professional emails with structured subject, body, tone, priority, and attachments.",
        )
        .with_instruction(INSTRUCTION)
        .with_output_schema::<EmailContent>()
        .with_output_key(OUTPUT_KEY);
    super::configure(agent, config)
}
