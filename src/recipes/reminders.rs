//! A reminder assistant that keeps its data in session state.
//!
//! Reminders are plain text in a list under `reminders`; the user's name
//! lives under `user_name`. Positions shown to the user are 1-based. An out of
//! range position is reported in the tool result with `"status": "error"` and
//! never changes the list.

use std::sync::Arc;

use serde_json::{json, Map, Value};
use tracing::{info, warn};

use crate::agent::Agent;
use crate::config::AgentryConfig;
use crate::error::Result;
use crate::models::LanguageModel;
use crate::state::{keys, string_list, SessionState};
use crate::tools::{AgentTool, AgentToolParameters, Tool};
use crate::types::GenerationSettings;

pub const NAME: &str = "memory_agent";

const INSTRUCTION: &str = r#"You are a helpful reminder assistant that remembers information across conversations.

CRITICAL: You are NOT a calendar or scheduling system. You simply store reminder TEXT that users provide.
You MUST accept and store ANY reminder text, including those with times and dates.

When users say things like:
- "add meeting with John at 2PM Friday" → use add_reminder("meeting with John at 2PM Friday")
- "set reminder for dentist appointment tomorrow 9am" → use add_reminder("dentist appointment tomorrow 9am")
- "remind me to call mom next Tuesday at 7:30pm" → use add_reminder("call mom next Tuesday at 7:30pm")

You are NOT setting actual alarms or calendar events - you're just storing text reminders.
NEVER refuse to add a reminder because it contains time information.

Current user state:
- User's name: {user_name}
- Reminders: {reminders}

Guidelines:
1. For adding: Always use add_reminder with the complete text including any time/date info
2. For viewing: Use view_reminders and format as numbered list
3. For updates/deletes: Match user intent to reminder indices using your best judgment
4. Be friendly and use the user's name when known
5. Normalize abbreviations (tmr→tomorrow, etc.) but keep all time information

Remember: You store TEXT reminders, not actual scheduled events. Time information is just part of the text."#;

/// State a new reminder session starts from.
pub fn initial_state(user_name: &str) -> Value {
    let mut state = Map::new();
    state.insert(keys::USER_NAME.into(), json!(user_name));
    state.insert(keys::REMINDERS.into(), json!([]));
    Value::Object(state)
}

/// Append `text` verbatim.
pub fn add_reminder(state: &SessionState, text: &str) -> Result<Value> {
    state.update(|map| -> Result<Value> {
        let mut reminders = string_list(map.get(keys::REMINDERS), keys::REMINDERS)?;
        reminders.push(text.to_string());
        map.insert(keys::REMINDERS.into(), json!(reminders));
        info!(count = reminders.len(), "added reminder");
        Ok(json!({
            "action": "add_reminder",
            "status": "success",
            "reminder": text,
            "message": format!("Added reminder: {text}"),
        }))
    })?
}

/// All reminders in order, with their count.
pub fn view_reminders(state: &SessionState) -> Result<Value> {
    let reminders = state.reminders()?;
    Ok(json!({
        "action": "view_reminders",
        "status": "success",
        "count": reminders.len(),
        "reminders": reminders,
    }))
}

/// Replace the reminder at 1-based `index`.
pub fn update_reminder(state: &SessionState, index: i64, updated_text: &str) -> Result<Value> {
    state.update(|map| -> Result<Value> {
        let mut reminders = string_list(map.get(keys::REMINDERS), keys::REMINDERS)?;
        let Some(slot) = position(index, reminders.len()) else {
            return Ok(out_of_range("update_reminder", index, reminders.len()));
        };
        let old_text = std::mem::replace(&mut reminders[slot], updated_text.to_string());
        map.insert(keys::REMINDERS.into(), json!(reminders));
        info!(index, "updated reminder");
        Ok(json!({
            "action": "update_reminder",
            "status": "success",
            "index": index,
            "old_text": old_text,
            "updated_text": updated_text,
            "message": format!("Updated reminder {index} from '{old_text}' to '{updated_text}'"),
        }))
    })?
}

/// Remove the reminder at 1-based `index`.
pub fn delete_reminder(state: &SessionState, index: i64) -> Result<Value> {
    state.update(|map| -> Result<Value> {
        let mut reminders = string_list(map.get(keys::REMINDERS), keys::REMINDERS)?;
        let Some(slot) = position(index, reminders.len()) else {
            return Ok(out_of_range("delete_reminder", index, reminders.len()));
        };
        let deleted = reminders.remove(slot);
        map.insert(keys::REMINDERS.into(), json!(reminders));
        info!(index, "deleted reminder");
        Ok(json!({
            "action": "delete_reminder",
            "status": "success",
            "index": index,
            "deleted_reminder": deleted,
            "message": format!("Deleted reminder {index}: '{deleted}'"),
        }))
    })?
}

/// Overwrite the user's name. The old name is reported as `""` when unset.
pub fn update_user_name(state: &SessionState, name: &str) -> Result<Value> {
    let old_name = state
        .set(keys::USER_NAME, json!(name))?
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default();
    info!(old = %old_name, new = name, "updated user name");
    Ok(json!({
        "action": "update_user_name",
        "status": "success",
        "old_name": old_name,
        "new_name": name,
        "message": format!("Updated your name to: {name}"),
    }))
}

/// Zero-based slot for a 1-based index, if it is within `1..=len`.
fn position(index: i64, len: usize) -> Option<usize> {
    let slot = usize::try_from(index).ok()?.checked_sub(1)?;
    (slot < len).then_some(slot)
}

fn out_of_range(action: &str, index: i64, len: usize) -> Value {
    warn!(action, index, len, "reminder index out of range");
    json!({
        "action": action,
        "status": "error",
        "message": format!(
            "Could not find reminder at position {index}. Currently there are {len} reminders."
        ),
    })
}

pub fn add_reminder_tool() -> Arc<dyn Tool> {
    Arc::new(AgentTool::from_fn(
        "add_reminder",
        "Add a new reminder to the user's reminder list. Accepts ANY reminder text, including \
         time specifications such as \"call mom at 6PM tomorrow\".",
        AgentToolParameters::object()
            .string(
                "reminder",
                "The complete reminder text including any time information",
                true,
            )
            .build(),
        |args, ctx| add_reminder(&ctx.state, args.get_str("reminder")?),
    ))
}

pub fn view_reminders_tool() -> Arc<dyn Tool> {
    Arc::new(AgentTool::from_fn(
        "view_reminders",
        "View all current reminders.",
        AgentToolParameters::empty(),
        |_args, ctx| view_reminders(&ctx.state),
    ))
}

pub fn update_reminder_tool() -> Arc<dyn Tool> {
    Arc::new(AgentTool::from_fn(
        "update_reminder",
        "Update an existing reminder.",
        AgentToolParameters::object()
            .integer("index", "The 1-based index of the reminder to update", true)
            .string("updated_text", "The new text for the reminder", true)
            .build(),
        |args, ctx| {
            update_reminder(&ctx.state, args.get_i64("index")?, args.get_str("updated_text")?)
        },
    ))
}

pub fn delete_reminder_tool() -> Arc<dyn Tool> {
    Arc::new(AgentTool::from_fn(
        "delete_reminder",
        "Delete a reminder.",
        AgentToolParameters::object()
            .integer("index", "The 1-based index of the reminder to delete", true)
            .build(),
        |args, ctx| delete_reminder(&ctx.state, args.get_i64("index")?),
    ))
}

pub fn update_user_name_tool() -> Arc<dyn Tool> {
    Arc::new(AgentTool::from_fn(
        "update_user_name",
        "Update the user's name.",
        AgentToolParameters::object()
            .string("name", "The new name for the user", true)
            .build(),
        |args, ctx| update_user_name(&ctx.state, args.get_str("name")?),
    ))
}

pub fn agent(config: &AgentryConfig) -> Result<Agent> {
    let agent = Agent::new(NAME, LanguageModel::default_gemini())
        .with_description(
            "A smart reminder agent with persistent memory that can handle any reminder text including times and dates",
        )
        .with_instruction(INSTRUCTION)
        .with_tools([
            add_reminder_tool(),
            view_reminders_tool(),
            update_reminder_tool(),
            delete_reminder_tool(),
            update_user_name_tool(),
        ])
        .with_settings(
            GenerationSettings::builder()
                .temperature(0.1)
                .max_output_tokens(1000)
                .build(),
        );
    super::configure(agent, config)
}
