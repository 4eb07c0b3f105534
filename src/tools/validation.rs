//! Validate tool call arguments against JSON Schema before execution.

/// Validate tool arguments against a JSON Schema.
///
/// Performs top-level validation: schema type check, required field presence,
/// property type verification and string enum membership. Returns `Ok(())`
/// when valid, `Err(message)` describing the first violation found.
pub fn validate_arguments(
    args: &serde_json::Value,
    schema: &serde_json::Value,
) -> Result<(), String> {
    if let Some(schema_type) = schema.get("type").and_then(|v| v.as_str()) {
        // A tool without parameters may be called with `null` arguments.
        if schema_type == "object" && !args.is_object() && !args.is_null() {
            return Err(format!(
                "expected object arguments, got {}",
                json_type_name(args)
            ));
        }
    }

    let empty = serde_json::Map::new();
    let obj = args.as_object().unwrap_or(&empty);

    if let Some(required) = schema.get("required").and_then(|v| v.as_array()) {
        for field in required {
            if let Some(name) = field.as_str() {
                if !obj.contains_key(name) {
                    return Err(format!("missing required field '{name}'"));
                }
            }
        }
    }

    if let Some(properties) = schema.get("properties").and_then(|v| v.as_object()) {
        for (key, value) in obj {
            let Some(prop_schema) = properties.get(key) else {
                continue;
            };
            if let Some(expected_type) = prop_schema.get("type").and_then(|v| v.as_str()) {
                if !value_matches_type(value, expected_type) {
                    return Err(format!(
                        "field '{}' expected type '{}', got {}",
                        key,
                        expected_type,
                        json_type_name(value)
                    ));
                }
            }
            if let Some(allowed) = prop_schema.get("enum").and_then(|v| v.as_array()) {
                if !allowed.contains(value) {
                    return Err(format!("field '{key}' must be one of {}", render_enum(allowed)));
                }
            }
        }
    }

    Ok(())
}

fn value_matches_type(value: &serde_json::Value, expected: &str) -> bool {
    match expected {
        "string" => value.is_string(),
        "number" => value.is_number(),
        "integer" => {
            value.is_i64()
                || value.is_u64()
                || value.as_f64().is_some_and(|f| f.fract() == 0.0)
        }
        "boolean" => value.is_boolean(),
        "object" => value.is_object(),
        "array" => value.is_array(),
        "null" => value.is_null(),
        _ => true,
    }
}

fn render_enum(values: &[serde_json::Value]) -> String {
    let parts: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    format!("[{}]", parts.join(", "))
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reminder_index_schema() -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "index": { "type": "integer" },
                "updated_text": { "type": "string" },
            },
            "required": ["index", "updated_text"],
        })
    }

    #[test]
    fn rejects_non_object_args_when_schema_expects_object() {
        let schema = json!({ "type": "object", "properties": {}, "required": [] });
        let args = json!("not an object");

        let result = validate_arguments(&args, &schema);

        assert!(result.unwrap_err().contains("expected object"));
    }

    #[test]
    fn null_args_are_fine_for_parameterless_tools() {
        let schema = json!({ "type": "object", "properties": {}, "required": [] });

        assert!(validate_arguments(&serde_json::Value::Null, &schema).is_ok());
    }

    #[test]
    fn null_args_still_need_required_fields() {
        let result = validate_arguments(&serde_json::Value::Null, &reminder_index_schema());

        assert!(result.unwrap_err().contains("missing required field 'index'"));
    }

    #[test]
    fn rejects_when_any_required_field_is_absent() {
        let args = json!({ "index": 1 });

        let result = validate_arguments(&args, &reminder_index_schema());

        assert!(result
            .unwrap_err()
            .contains("missing required field 'updated_text'"));
    }

    #[test]
    fn accepts_valid_args_with_all_required_fields() {
        let args = json!({ "index": 2, "updated_text": "call mom" });

        assert!(validate_arguments(&args, &reminder_index_schema()).is_ok());
    }

    #[test]
    fn integer_accepts_whole_floats_only() {
        let schema = reminder_index_schema();

        assert!(validate_arguments(&json!({ "index": 2.0, "updated_text": "x" }), &schema).is_ok());
        let err = validate_arguments(&json!({ "index": 2.5, "updated_text": "x" }), &schema)
            .unwrap_err();
        assert!(err.contains("expected type 'integer'"));
    }

    #[test]
    fn rejects_field_with_wrong_type() {
        let args = json!({ "index": "first", "updated_text": "x" });

        let err = validate_arguments(&args, &reminder_index_schema()).unwrap_err();

        assert!(err.contains("field 'index'"));
        assert!(err.contains("expected type 'integer'"));
    }

    #[test]
    fn accepts_extra_fields_not_in_schema_properties() {
        let args = json!({ "index": 1, "updated_text": "x", "extra": true });

        assert!(validate_arguments(&args, &reminder_index_schema()).is_ok());
    }

    #[test]
    fn rejects_values_outside_enum() {
        let schema = json!({
            "type": "object",
            "properties": { "tone": { "type": "string", "enum": ["formal", "neutral"] } },
            "required": [],
        });

        assert!(validate_arguments(&json!({ "tone": "formal" }), &schema).is_ok());
        let err = validate_arguments(&json!({ "tone": "snarky" }), &schema).unwrap_err();
        assert!(err.contains("must be one of"));
    }

    #[test]
    fn accepts_any_args_when_schema_is_empty_object() {
        let schema = json!({});

        assert!(validate_arguments(&json!({ "anything": 42 }), &schema).is_ok());
        assert!(validate_arguments(&serde_json::Value::Null, &schema).is_ok());
    }
}
