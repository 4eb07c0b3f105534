//! Fill `{key}` placeholders in agent instructions from session state.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_json::Value;

use super::SessionState;
use crate::error::{AgentryError, Result};

static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{+[^{}]*\}+").expect("placeholder regex must compile")
});

static STATE_KEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?:app|user|temp):)?[A-Za-z_][A-Za-z0-9_]*$")
        .expect("state key regex must compile")
});

/// Replace `{key}` placeholders with values from `state`.
///
/// Only braces wrapping a state key are placeholders; anything else (for
/// example a JSON skeleton inside the instruction) is left untouched.
/// `{key?}` renders as the empty string when the key is absent, while a
/// missing `{key}` is an error. Strings are inserted verbatim, every other
/// value as compact JSON.
pub fn inject_state(template: &str, state: &SessionState) -> Result<String> {
    let mut missing: Option<String> = None;
    let mut lookup_error: Option<AgentryError> = None;

    let rendered = PLACEHOLDER_RE.replace_all(template, |caps: &Captures<'_>| {
        let whole = &caps[0];
        let inner = whole.trim_matches(|c| c == '{' || c == '}').trim();
        let (key, optional) = match inner.strip_suffix('?') {
            Some(key) => (key, true),
            None => (inner, false),
        };

        if !STATE_KEY_RE.is_match(key) {
            return whole.to_string();
        }

        match state.get(key) {
            Ok(Some(value)) => render_value(&value),
            Ok(None) if optional => String::new(),
            Ok(None) => {
                missing.get_or_insert_with(|| key.to_string());
                whole.to_string()
            }
            Err(e) => {
                lookup_error.get_or_insert(e);
                whole.to_string()
            }
        }
    });

    if let Some(e) = lookup_error {
        return Err(e);
    }
    if let Some(key) = missing {
        return Err(AgentryError::InvalidState(format!(
            "instruction references state key '{key}' which is not set"
        )));
    }
    Ok(rendered.into_owned())
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn state(value: Value) -> SessionState {
        SessionState::from_value(value).unwrap()
    }

    #[test]
    fn fills_string_and_list_values() {
        let state = state(json!({"user_name": "Ada", "reminders": ["buy milk"]}));
        let out = inject_state("Name: {user_name}\nReminders: {reminders}", &state).unwrap();
        assert_eq!(out, "Name: Ada\nReminders: [\"buy milk\"]");
    }

    #[test]
    fn optional_placeholder_renders_empty_when_absent() {
        let out = inject_state("Hi {user_name?}!", &SessionState::new()).unwrap();
        assert_eq!(out, "Hi !");
    }

    #[test]
    fn missing_required_key_is_an_error() {
        let err = inject_state("Hi {user_name}", &SessionState::new()).unwrap_err();
        assert!(err.to_string().contains("user_name"));
    }

    #[test]
    fn json_skeletons_are_left_alone() {
        let template = "Return:\n{\n  \"subject\": \"...\",\n  \"tone\": \"formal|neutral\"\n}";
        let out = inject_state(template, &SessionState::new()).unwrap();
        assert_eq!(out, template);
    }

    #[test]
    fn prefixed_keys_are_placeholders() {
        let state = state(json!({"user:theme": "dark"}));
        assert_eq!(inject_state("{user:theme}", &state).unwrap(), "dark");
    }
}
