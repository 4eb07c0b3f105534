//! In-memory session management.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::error::Result;
use crate::state::SessionState;

/// One conversation's identity and state bag.
///
/// Cloning is cheap; clones share the same state.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: String,
    pub app_name: String,
    pub user_id: String,
    pub state: SessionState,
    pub created_at: DateTime<Utc>,
    /// Creation order within the manager; timestamps can tie.
    seq: u64,
}

/// Manages sessions keyed by app, user and session id.
///
/// Sessions live only as long as the manager does.
#[derive(Debug, Default)]
pub struct SessionManager {
    sessions: HashMap<(String, String, String), Session>,
    next_seq: u64,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session seeded with `initial_state` (a JSON object or null).
    pub fn create(&mut self, app_name: &str, user_id: &str, initial_state: Value) -> Result<Session> {
        let state = SessionState::from_value(initial_state)?;
        let session = Session {
            id: Uuid::new_v4().to_string(),
            app_name: app_name.to_string(),
            user_id: user_id.to_string(),
            state,
            created_at: Utc::now(),
            seq: self.next_seq,
        };
        self.next_seq += 1;
        info!(app = app_name, user = user_id, session = %session.id, "created session");
        self.sessions.insert(
            (app_name.to_string(), user_id.to_string(), session.id.clone()),
            session.clone(),
        );
        Ok(session)
    }

    /// Get an existing session.
    pub fn get(&self, app_name: &str, user_id: &str, session_id: &str) -> Option<Session> {
        self.sessions
            .get(&(app_name.to_string(), user_id.to_string(), session_id.to_string()))
            .cloned()
    }

    /// Sessions of one user in one app, oldest first.
    pub fn list(&self, app_name: &str, user_id: &str) -> Vec<Session> {
        let mut sessions: Vec<Session> = self
            .sessions
            .iter()
            .filter(|((app, user, _), _)| app == app_name && user == user_id)
            .map(|(_, s)| s.clone())
            .collect();
        sessions.sort_by_key(|s| s.seq);
        sessions
    }

    /// Return the user's most recent session, or create one seeded with
    /// `initial_state` if there is none.
    pub fn resume_or_create(&mut self, app_name: &str, user_id: &str, initial_state: Value) -> Result<Session> {
        if let Some(latest) = self.list(app_name, user_id).pop() {
            info!(app = app_name, user = user_id, session = %latest.id, "resumed session");
            return Ok(latest);
        }
        self.create(app_name, user_id, initial_state)
    }

    /// Remove a session.
    pub fn remove(&mut self, app_name: &str, user_id: &str, session_id: &str) -> Option<Session> {
        self.sessions
            .remove(&(app_name.to_string(), user_id.to_string(), session_id.to_string()))
    }
}
