//! JSON Schema projection of the meeting-minutes model
//!
//! Derived from the records in [`crate::schema::models`]; their doc comments
//! become the field descriptions the completion API sees.

use schemars::gen::SchemaSettings;
use serde_json::{json, Value};

use crate::llm::prompts::FUNCTION_NAME;
use crate::schema::models::MeetingMinutes;

const FUNCTION_DESCRIPTION: &str =
    "Record the meeting minutes extracted from a meeting transcript.";

/// JSON Schema of the `MeetingMinutes` record, fields in declared order.
///
/// Nested records are inlined and optional fields are plain (not nullable)
/// types, which is the shape function-calling endpoints expect.
pub fn meeting_minutes_schema() -> Value {
    let generator = SchemaSettings::draft07()
        .with(|settings| {
            settings.inline_subschemas = true;
            settings.option_add_null_type = false;
            settings.option_nullable = false;
        })
        .into_generator();
    let root = generator.into_root_schema_for::<MeetingMinutes>();

    let mut schema = json!(root.schema);
    if let Some(fields) = schema.as_object_mut() {
        fields.remove("title");
    }
    schema
}

/// Function definition handed to the completion API.
pub fn function_definition() -> Value {
    json!({
        "name": FUNCTION_NAME,
        "description": FUNCTION_DESCRIPTION,
        "parameters": meeting_minutes_schema(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn required_names(schema: &Value) -> Vec<&str> {
        let mut names: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        names.sort_unstable();
        names
    }

    fn ticket_schema(schema: &Value) -> &Value {
        &schema["properties"]["actions"]["properties"]["items"]["items"]
    }

    #[test]
    fn root_required_fields_match_model() {
        let schema = meeting_minutes_schema();
        assert_eq!(
            required_names(&schema),
            vec![
                "agenda",
                "chairperson",
                "date",
                "discussions",
                "location",
                "meeting_title",
                "participants"
            ]
        );
    }

    #[test]
    fn optional_ticket_fields_are_not_required() {
        let schema = meeting_minutes_schema();
        assert_eq!(
            required_names(ticket_schema(&schema)),
            vec!["description", "id", "name", "priority"]
        );
    }

    #[test]
    fn properties_keep_declared_order() {
        let schema = meeting_minutes_schema();
        let keys: Vec<&String> = schema["properties"].as_object().unwrap().keys().collect();
        assert_eq!(keys.first().map(|k| k.as_str()), Some("meeting_title"));
        assert_eq!(keys.get(1).map(|k| k.as_str()), Some("date"));
        assert_eq!(keys.last().map(|k| k.as_str()), Some("next_meeting_agenda"));
        assert_eq!(keys.len(), 12);
    }

    #[test]
    fn every_root_field_carries_a_description() {
        let schema = meeting_minutes_schema();
        for (name, property) in schema["properties"].as_object().unwrap() {
            assert!(
                property["description"].as_str().is_some_and(|d| !d.is_empty()),
                "{} has no description",
                name
            );
        }
    }

    #[test]
    fn nested_records_are_inlined() {
        let schema = meeting_minutes_schema();
        assert!(schema.get("definitions").is_none());
        assert_eq!(schema["properties"]["participants"]["items"]["type"], "object");
        assert_eq!(schema["properties"]["motions"]["type"], "array");
    }

    #[test]
    fn priority_is_a_closed_enum() {
        let schema = meeting_minutes_schema();
        let priority = &ticket_schema(&schema)["properties"]["priority"];
        assert_eq!(priority["enum"], json!(["High", "Medium", "Low"]));
    }

    #[test]
    fn timestamps_are_date_time_strings() {
        let schema = meeting_minutes_schema();
        assert_eq!(schema["properties"]["date"]["type"], "string");
        assert_eq!(schema["properties"]["date"]["format"], "date-time");
        assert_eq!(schema["properties"]["next_meeting_date"]["format"], "date-time");
    }

    #[test]
    fn function_definition_wraps_parameters() {
        let definition = function_definition();
        assert_eq!(definition["name"], FUNCTION_NAME);
        assert_eq!(definition["parameters"]["type"], "object");
        assert!(definition["parameters"].get("$schema").is_none());
    }
}
