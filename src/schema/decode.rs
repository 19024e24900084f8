//! Validation and decoding of raw extraction output

use serde_json::Value;

use crate::schema::descriptor::meeting_minutes_schema;
use crate::schema::models::{MeetingMinutes, Timestamp};
use crate::{MinutesError, Result};

/// Parse the function-call argument blob, which arrives as a JSON string.
pub fn parse_arguments(arguments: &str) -> Result<Value> {
    serde_json::from_str(arguments).map_err(|e| {
        MinutesError::schema_violation(format!("function arguments are not valid JSON: {}", e))
    })
}

/// [`parse_arguments`] followed by [`decode`].
pub fn decode_arguments(arguments: &str) -> Result<MeetingMinutes> {
    decode(&parse_arguments(arguments)?)
}

/// Validate `value` against the derived meeting-minutes schema and decode it.
///
/// Every violation found is reported, not just the first. Anything the
/// schema walk lets through but serde still rejects is reported with the
/// serde message.
pub fn decode(value: &Value) -> Result<MeetingMinutes> {
    let violations = validate(&meeting_minutes_schema(), value);
    if !violations.is_empty() {
        return Err(MinutesError::SchemaViolation { violations });
    }

    serde_json::from_value(value.clone())
        .map_err(|e| MinutesError::schema_violation(e.to_string()))
}

/// Check `value` against a JSON Schema such as [`meeting_minutes_schema`].
pub fn validate(schema: &Value, value: &Value) -> Vec<String> {
    let mut violations = Vec::new();
    check(schema, value, "", &mut violations);
    violations
}

fn check(schema: &Value, value: &Value, path: &str, violations: &mut Vec<String>) {
    let label = if path.is_empty() { "<root>" } else { path };
    let expected = schema["type"].as_str().unwrap_or("any");

    match expected {
        "object" => {
            let Some(fields) = value.as_object() else {
                violations.push(mismatch(label, "object", value));
                return;
            };

            let required: Vec<&str> = schema["required"]
                .as_array()
                .map(|names| names.iter().filter_map(Value::as_str).collect())
                .unwrap_or_default();

            // Walk properties rather than `required` so violations come out
            // in declared field order.
            if let Some(properties) = schema["properties"].as_object() {
                for (name, property) in properties {
                    match fields.get(name) {
                        Some(field) if !field.is_null() => {
                            check(property, field, &join(path, name), violations)
                        }
                        _ if required.contains(&name.as_str()) => violations.push(format!(
                            "{}: required field is missing",
                            join(path, name)
                        )),
                        _ => {}
                    }
                }
            }
        }
        "array" => {
            let Some(items) = value.as_array() else {
                violations.push(mismatch(label, "array", value));
                return;
            };
            for (i, item) in items.iter().enumerate() {
                check(&schema["items"], item, &format!("{}[{}]", path, i), violations);
            }
        }
        "string" => {
            let Some(s) = value.as_str() else {
                violations.push(mismatch(label, "string", value));
                return;
            };

            if let Some(allowed) = schema["enum"].as_array() {
                if !allowed.iter().any(|a| a.as_str() == Some(s)) {
                    let names: Vec<&str> = allowed.iter().filter_map(Value::as_str).collect();
                    violations.push(format!(
                        "{}: {:?} is not one of {}",
                        label,
                        s,
                        names.join(", ")
                    ));
                }
            }

            if schema["format"] == "date-time" {
                if let Err(e) = s.parse::<Timestamp>() {
                    violations.push(format!("{}: {}", label, e));
                }
            }
        }
        "integer" => {
            if value.as_i64().is_none() {
                violations.push(mismatch(label, "integer", value));
            }
        }
        "number" => {
            if !value.is_number() {
                violations.push(mismatch(label, "number", value));
            }
        }
        "boolean" => {
            if !value.is_boolean() {
                violations.push(mismatch(label, "boolean", value));
            }
        }
        _ => {}
    }
}

fn join(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", path, name)
    }
}

fn mismatch(label: &str, expected: &str, found: &Value) -> String {
    format!("{}: expected {}, found {}", label, expected, kind(found))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
