//! Typed meeting-minutes records
//!
//! Doc comments on these types are part of the JSON Schema the model sees,
//! so they read as extraction guidance.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use schemars::gen::SchemaGenerator;
use schemars::schema::{InstanceType, Schema, SchemaObject};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Participant {
    /// The full name of the meeting participant.
    pub name: String,
    /// The role or title of the participant within the meeting.
    pub role: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AgendaItem {
    /// The title or topic of the agenda item.
    pub title: String,
    /// A brief description of the agenda item.
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DiscussionPoint {
    /// The name of the person speaking on this point.
    pub speaker: String,
    /// The content or substance of the discussion point.
    pub content: String,
}

// `result` stays free text ("passed", "failed", "tabled", ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Motion {
    /// The name of the person who proposed the motion.
    pub proposed_by: String,
    /// The name of the person who seconded the motion.
    pub seconded_by: String,
    /// A detailed description of what the motion entails.
    pub description: String,
    /// The result of the motion, e.g., passed, failed, tabled.
    pub result: Option<String>,
}

/// Urgency of the action item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Subtask derived from the transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Subtask {
    /// Identifier unique within the parent ticket.
    pub id: i64,
    /// Short name of the subtask.
    pub name: String,
}

/// Ticket representing an action item derived from the transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Ticket {
    /// Identifier unique within the action items.
    pub id: i64,
    /// Short name of the action item.
    pub name: String,
    /// What needs to be done.
    pub description: String,
    pub priority: Priority,
    /// Names of the people responsible for the action item.
    pub assignees: Option<Vec<String>>,
    /// Smaller steps that make up the action item.
    pub subtasks: Option<Vec<Subtask>>,
    // Not checked against the enclosing collection.
    /// Ids of other action items that must be completed first.
    pub dependencies: Option<Vec<i64>>,
}

/// A list of action items derived from the meeting transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ActionItems {
    /// The action items.
    pub items: Vec<Ticket>,
}

/// Meeting minutes extracted from a meeting transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MeetingMinutes {
    /// The official title of the meeting.
    pub meeting_title: String,
    /// The date and time when the meeting took place.
    pub date: Timestamp,
    /// The physical or virtual location of the meeting.
    pub location: String,
    /// The name of the individual chairing the meeting.
    pub chairperson: String,
    /// A list of participants who attended the meeting.
    pub participants: Vec<Participant>,
    /// A list of agenda items discussed during the meeting.
    pub agenda: Vec<AgendaItem>,
    /// A list of discussion points covered in the meeting.
    pub discussions: Vec<DiscussionPoint>,
    /// A list of motions proposed and voted on during the meeting.
    pub motions: Option<Vec<Motion>>,
    /// Action items agreed on during the meeting.
    pub actions: Option<ActionItems>,
    /// Conclusions or summary of the meeting outcomes.
    pub conclusions: Option<String>,
    /// The scheduled date and time for the next meeting.
    pub next_meeting_date: Option<Timestamp>,
    /// A preliminary agenda for the next meeting.
    pub next_meeting_agenda: Option<String>,
}

impl MeetingMinutes {
    /// First ticket carrying `id`, if any.
    pub fn ticket(&self, id: i64) -> Option<&Ticket> {
        self.tickets().find(|t| t.id == id)
    }

    pub fn tickets(&self) -> impl Iterator<Item = &Ticket> {
        self.actions.iter().flat_map(|a| a.items.iter())
    }

    /// `(ticket id, missing dependency id)` for every dependency that names
    /// no ticket in this result.
    pub fn unresolved_dependencies(&self) -> Vec<(i64, i64)> {
        self.tickets()
            .flat_map(|ticket| {
                ticket
                    .dependencies
                    .iter()
                    .flatten()
                    .filter(|dep| self.ticket(**dep).is_none())
                    .map(move |dep| (ticket.id, *dep))
            })
            .collect()
    }
}

/// A point in time as the model reported it.
///
/// The text is kept next to the parsed value, so displaying a timestamp
/// never changes its precision or offset notation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timestamp {
    text: String,
    moment: Moment,
}

/// Parsed form of a [`Timestamp`], at the precision the source had.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Moment {
    Zoned(DateTime<FixedOffset>),
    Local(NaiveDateTime),
    Date(NaiveDate),
}

impl Timestamp {
    pub fn moment(&self) -> Moment {
        self.moment
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

const LOCAL_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

fn parse_moment(s: &str) -> Option<Moment> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(Moment::Zoned(dt));
    }
    LOCAL_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
        .map(Moment::Local)
        .or_else(|| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok().map(Moment::Date))
}

impl FromStr for Timestamp {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        match parse_moment(s) {
            Some(moment) => Ok(Self {
                text: s.to_string(),
                moment,
            }),
            None => Err(format!("{:?} is not a recognizable date-time", s)),
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

impl JsonSchema for Timestamp {
    fn is_referenceable() -> bool {
        false
    }

    fn schema_name() -> String {
        "Timestamp".to_string()
    }

    fn json_schema(_gen: &mut SchemaGenerator) -> Schema {
        SchemaObject {
            instance_type: Some(InstanceType::String.into()),
            format: Some("date-time".to_string()),
            ..Default::default()
        }
        .into()
    }
}
