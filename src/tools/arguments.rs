//! Typed access to tool call arguments.

use crate::error::AgentryError;

/// Wrapper around tool call arguments providing typed extraction.
#[derive(Debug, Clone)]
pub struct ToolArguments {
    value: serde_json::Value,
}

impl ToolArguments {
    pub fn new(value: serde_json::Value) -> Self {
        Self { value }
    }

    /// Get a string argument by key.
    pub fn get_str(&self, key: &str) -> Result<&str, AgentryError> {
        self.value
            .get(key)
            .and_then(|v| v.as_str())
            .ok_or_else(|| AgentryError::InvalidArgument(format!("Missing string argument: {key}")))
    }

    /// Get an optional string argument.
    pub fn get_str_opt(&self, key: &str) -> Option<&str> {
        self.value.get(key).and_then(|v| v.as_str())
    }

    /// Get a string argument, falling back to `default` when absent or null.
    pub fn get_str_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get_str_opt(key).unwrap_or(default)
    }

    /// Get an integer argument.
    ///
    /// Whole-valued floats (`2.0`) are accepted since some models emit every
    /// number that way. Values outside the `i64` range are rejected rather
    /// than clamped.
    pub fn get_i64(&self, key: &str) -> Result<i64, AgentryError> {
        let value = self
            .value
            .get(key)
            .ok_or_else(|| AgentryError::InvalidArgument(format!("Missing integer argument: {key}")))?;
        if let Some(i) = value.as_i64() {
            return Ok(i);
        }
        let out_of_range =
            || AgentryError::InvalidArgument(format!("Integer argument out of range: {key}"));
        if value.is_u64() {
            return Err(out_of_range());
        }
        match value.as_f64() {
            Some(f) if f.is_finite() && f.fract() == 0.0 => {
                // 2^63 is exactly representable; anything at or above it is not an i64.
                if f >= -(2f64.powi(63)) && f < 2f64.powi(63) {
                    Ok(f as i64)
                } else {
                    Err(out_of_range())
                }
            }
            _ => Err(AgentryError::InvalidArgument(format!(
                "Missing integer argument: {key}"
            ))),
        }
    }
}
