//! Tests for configuration and the recipe catalog.

use std::io::Write;

use agentry::config::{AgentryConfig, Settings};
use agentry::error::{AgentryError, ErrorCategory};
use agentry::models::{GoogleModel, LanguageModel};
use agentry::recipes::{self, dad_jokes, email, reminders};
use pretty_assertions::assert_eq;

fn settings_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn with_settings(contents: &str) -> AgentryConfig {
    let file = settings_file(contents);
    AgentryConfig::new().with_settings(Settings::load(file.path()).unwrap())
}

#[test]
fn catalog_builds_every_recipe_in_order() {
    let agents = recipes::catalog(&AgentryConfig::new()).unwrap();
    let names: Vec<&str> = agents.iter().map(|a| a.name()).collect();
    assert_eq!(names, recipes::AGENT_NAMES.to_vec());
}

#[test]
fn unknown_agent_is_not_found() {
    let err = recipes::build("weather_agent", &AgentryConfig::new()).unwrap_err();
    assert!(matches!(err, AgentryError::AgentNotFound(ref name) if name == "weather_agent"));
    assert_eq!(err.category(), ErrorCategory::NotFound);
}

#[test]
fn dad_joke_agent_stays_on_openrouter_under_global_override() {
    let config = AgentryConfig::new().with_model_override("google:gemini-2.5-pro");
    let agent = recipes::build(dad_jokes::NAME, &config).unwrap();
    assert_eq!(agent.model(), &LanguageModel::OpenRouter(dad_jokes::MODEL_ID.into()));

    let greeter = recipes::build("greeting_agent", &config).unwrap();
    assert_eq!(greeter.model(), &LanguageModel::Google(GoogleModel::Gemini25Pro));
}

#[test]
fn dad_joke_agent_picks_up_openrouter_key() {
    let config = AgentryConfig::from_lookup(|name| {
        (name == "OPENROUTER_API_KEY").then(|| "sk-or-test".to_string())
    });
    let agent = recipes::build(dad_jokes::NAME, &config).unwrap();
    assert_eq!(agent.api_key(), Some("sk-or-test"));
    assert!(!format!("{agent:?}").contains("sk-or-test"));
}

#[test]
fn api_key_follows_the_resolved_model() {
    let keys = |name: &str| match name {
        "OPENROUTER_API_KEY" => Some("sk-or".to_string()),
        "GOOGLE_API_KEY" => Some("g-key".to_string()),
        _ => None,
    };
    let file = settings_file(
        r#"
[agents.dad_joke_agent]
model = "google:gemini-2.0-flash"
"#,
    );
    let config = AgentryConfig::from_lookup(keys).with_settings(Settings::load(file.path()).unwrap());

    let jokes = recipes::build(dad_jokes::NAME, &config).unwrap();
    assert_eq!(jokes.model(), &LanguageModel::Google(GoogleModel::Gemini20Flash));
    assert_eq!(jokes.api_key(), Some("g-key"));

    for name in ["greeting_agent", "tool_agent", email::NAME, reminders::NAME] {
        let agent = recipes::build(name, &config).unwrap();
        assert_eq!(agent.api_key(), Some("g-key"), "{name}");
        assert_eq!(agent.describe(None).unwrap()["has_api_key"], true, "{name}");
    }
}

#[test]
fn agents_without_credentials_have_no_key() {
    for agent in recipes::catalog(&AgentryConfig::new()).unwrap() {
        assert!(!agent.has_api_key(), "{}", agent.name());
    }
}

#[test]
fn per_agent_settings_override_model_and_generation() {
    let config = with_settings(
        r#"
default_model = "google:gemini-1.5-flash"

[agents.memory_agent]
model = "openrouter:meta-llama/llama-3-8b"
temperature = 0.4
"#,
    );

    let memory = recipes::build(reminders::NAME, &config).unwrap();
    assert_eq!(
        memory.model(),
        &LanguageModel::OpenRouter("meta-llama/llama-3-8b".into())
    );
    assert_eq!(memory.settings().temperature, Some(0.4));
    assert_eq!(memory.settings().max_output_tokens, Some(1000));

    let mailer = recipes::build(email::NAME, &config).unwrap();
    assert_eq!(mailer.model(), &LanguageModel::Google(GoogleModel::Gemini15Flash));
}

#[test]
fn bad_model_selector_is_a_configuration_error() {
    let config = with_settings(
        r#"
[agents.email_agent]
model = "openrouter:"
"#,
    );
    let err = recipes::build(email::NAME, &config).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Configuration);
}

#[test]
fn unknown_settings_keys_are_rejected() {
    let file = settings_file("default_modle = \"gemini-2.0-flash\"\n");
    let err = Settings::load(file.path()).unwrap_err();
    assert!(matches!(err, AgentryError::Settings(_)));
}

#[test]
fn missing_settings_file_loads_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = AgentryConfig::load(Some(dir.path().join("absent.toml").as_path())).unwrap();
    assert_eq!(config.settings(), &Settings::default());
}
