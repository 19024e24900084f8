//! Meeting-minutes schema
//!
//! The typed model, the JSON Schema derived from it for the completion API, and
//! the decode step that turns raw model output into the typed model.

mod decode;
mod descriptor;
mod models;

pub use decode::{decode, decode_arguments, parse_arguments, validate};
pub use descriptor::{function_definition, meeting_minutes_schema};
pub use models::{
    ActionItems, AgendaItem, DiscussionPoint, MeetingMinutes, Moment, Motion, Participant,
    Priority, Subtask, Ticket, Timestamp,
};
