//! Per-session key/value state shared between an agent and its tools.

pub mod template;

pub use template::inject_state;

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde_json::{Map, Value};

use crate::error::{AgentryError, Result};

/// Well-known state keys used by the recipes.
pub mod keys {
    /// The user's display name (string, absent until set).
    pub const USER_NAME: &str = "user_name";
    /// Ordered reminder texts (array of strings, empty when absent).
    pub const REMINDERS: &str = "reminders";
}

/// Loosely-typed state bag for one session.
///
/// Cloning yields another handle to the same bag, so a tool receiving a
/// clone through its context mutates the session the caller holds.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    inner: Arc<RwLock<Map<String, Value>>>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a bag from a JSON object. `null` yields an empty bag.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self {
                inner: Arc::new(RwLock::new(map)),
            }),
            Value::Null => Ok(Self::new()),
            other => Err(AgentryError::InvalidArgument(format!(
                "session state must be a JSON object, got {other}"
            ))),
        }
    }

    /// Copy of the whole bag as a JSON object.
    pub fn snapshot(&self) -> Result<Value> {
        Ok(Value::Object(self.read()?.clone()))
    }

    pub fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.read()?.get(key).cloned())
    }

    pub fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.read()?.contains_key(key))
    }

    /// Insert or overwrite a key, returning the previous value.
    pub fn set(&self, key: impl Into<String>, value: Value) -> Result<Option<Value>> {
        Ok(self.write()?.insert(key.into(), value))
    }

    pub fn remove(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.write()?.remove(key))
    }

    pub fn keys(&self) -> Result<Vec<String>> {
        Ok(self.read()?.keys().cloned().collect())
    }

    /// Read a string value. Non-string values are treated as absent.
    pub fn get_str(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .read()?
            .get(key)
            .and_then(|v| v.as_str())
            .map(str::to_string))
    }

    /// Read a list of strings. Absent (or `null`) yields an empty list; any
    /// other non-list value is an error.
    pub fn get_string_list(&self, key: &str) -> Result<Vec<String>> {
        let guard = self.read()?;
        string_list(guard.get(key), key)
    }

    /// Run `f` against the raw map under a single write lock, so a
    /// read-check-write sequence cannot interleave with another writer.
    pub fn update<R>(&self, f: impl FnOnce(&mut Map<String, Value>) -> R) -> Result<R> {
        let mut guard = self.write()?;
        Ok(f(&mut guard))
    }

    pub fn user_name(&self) -> Result<Option<String>> {
        self.get_str(keys::USER_NAME)
    }

    pub fn reminders(&self) -> Result<Vec<String>> {
        self.get_string_list(keys::REMINDERS)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Map<String, Value>>> {
        self.inner
            .read()
            .map_err(|_| AgentryError::InvalidState("session state lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Map<String, Value>>> {
        self.inner
            .write()
            .map_err(|_| AgentryError::InvalidState("session state lock poisoned".into()))
    }
}

/// Decode an optional state value as a list of strings.
pub fn string_list(value: Option<&Value>, key: &str) -> Result<Vec<String>> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str().map(str::to_string).ok_or_else(|| {
                    AgentryError::InvalidState(format!("'{key}' must contain only strings"))
                })
            })
            .collect(),
        Some(other) => Err(AgentryError::InvalidState(format!(
            "'{key}' must be a list of strings, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn clones_share_the_same_bag() {
        let state = SessionState::new();
        let handle = state.clone();
        handle.set("user_name", json!("Ada")).unwrap();
        assert_eq!(state.user_name().unwrap(), Some("Ada".to_string()));
    }

    #[test]
    fn reminders_default_to_empty() {
        let state = SessionState::new();
        assert!(state.reminders().unwrap().is_empty());
    }

    #[test]
    fn reminders_reject_non_list_values() {
        let state = SessionState::from_value(json!({"reminders": "buy milk"})).unwrap();
        assert!(matches!(
            state.reminders(),
            Err(AgentryError::InvalidState(_))
        ));
    }

    #[test]
    fn from_value_rejects_non_objects() {
        assert!(SessionState::from_value(json!([1, 2])).is_err());
        assert!(SessionState::from_value(Value::Null).is_ok());
    }

    #[test]
    fn set_returns_previous_value() {
        let state = SessionState::new();
        assert_eq!(state.set("k", json!(1)).unwrap(), None);
        assert_eq!(state.set("k", json!(2)).unwrap(), Some(json!(1)));
        assert_eq!(state.snapshot().unwrap(), json!({"k": 2}));
    }
}
