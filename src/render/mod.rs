//! Markdown rendering of nested records
//!
//! The renderer is driven purely by the shape of a [`Node`] tree:
//!
//! - a sequence field gets a `### Field name` heading, then each element is
//!   either flattened in place (records) or emitted as `- value` (scalars),
//!   and null elements are skipped;
//! - a record field is flattened in place with no heading;
//! - a scalar field becomes `**Field name**: value`;
//! - null fields produce nothing.

mod node;

pub use node::{Node, ToNode};

use serde_json::Value;

use crate::schema::MeetingMinutes;
use crate::{MinutesError, Result};

/// Render a record tree into Markdown, one line per emitted item.
///
/// Fails without emitting anything if the tree contains a shape the
/// flattening rules do not cover: a non-record root, or a sequence directly
/// inside a sequence.
pub fn render(root: &Node) -> Result<String> {
    let Node::Record(fields) = root else {
        return Err(MinutesError::RenderError(format!(
            "document root must be a record, found {}",
            root.kind()
        )));
    };

    let mut output = String::new();
    render_record(fields, &mut output)?;
    Ok(output)
}

pub fn render_minutes(minutes: &MeetingMinutes) -> Result<String> {
    render(&minutes.to_node())
}

pub fn render_value(value: &Value) -> Result<String> {
    render(&Node::from(value))
}

fn render_record(fields: &[(String, Node)], output: &mut String) -> Result<()> {
    for (name, value) in fields {
        render_field(name, value, output)?;
    }
    Ok(())
}

fn render_field(name: &str, value: &Node, output: &mut String) -> Result<()> {
    match value {
        Node::Null => {}
        Node::Sequence(items) => {
            output.push_str(&format!("### {}\n", field_label(name)));
            for (i, item) in items.iter().enumerate() {
                match item {
                    Node::Record(fields) => render_record(fields, output)?,
                    Node::Scalar(text) => output.push_str(&format!("- {}\n", text)),
                    Node::Null => {}
                    Node::Sequence(_) => {
                        return Err(MinutesError::RenderError(format!(
                            "{}[{}]: a {} cannot be rendered inside a sequence",
                            name,
                            i,
                            item.kind()
                        )));
                    }
                }
            }
        }
        Node::Record(fields) => render_record(fields, output)?,
        Node::Scalar(text) => output.push_str(&format!("**{}**: {}\n", field_label(name), text)),
    }
    Ok(())
}

/// `next_meeting_agenda` -> `Next meeting agenda`
pub fn field_label(name: &str) -> String {
    let spaced = name.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
