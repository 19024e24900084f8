//! Shape-only view of a document tree

use serde_json::Value;

use crate::schema::{
    ActionItems, AgendaItem, DiscussionPoint, MeetingMinutes, Motion, Participant, Priority,
    Subtask, Ticket, Timestamp,
};

/// A value the renderer can walk without knowing the schema.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Absent or unset; skipped when it is a field value.
    Null,
    Scalar(String),
    Sequence(Vec<Node>),
    /// Named fields in their declared order.
    Record(Vec<(String, Node)>),
}

impl Node {
    pub fn record<const N: usize>(fields: [(&str, Node); N]) -> Self {
        Self::Record(
            fields
                .into_iter()
                .map(|(name, node)| (name.to_string(), node))
                .collect(),
        )
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Scalar(_) => "scalar",
            Self::Sequence(_) => "sequence",
            Self::Record(_) => "record",
        }
    }
}

impl From<&Value> for Node {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Node::Null,
            Value::Bool(b) => Node::Scalar(b.to_string()),
            Value::Number(n) => Node::Scalar(n.to_string()),
            Value::String(s) => Node::Scalar(s.clone()),
            Value::Array(items) => Node::Sequence(items.iter().map(Node::from).collect()),
            Value::Object(fields) => Node::Record(
                fields
                    .iter()
                    .map(|(name, field)| (name.clone(), Node::from(field)))
                    .collect(),
            ),
        }
    }
}

/// Conversion of a typed record into a [`Node`] tree.
pub trait ToNode {
    fn to_node(&self) -> Node;
}

impl ToNode for String {
    fn to_node(&self) -> Node {
        Node::Scalar(self.clone())
    }
}

impl ToNode for i64 {
    fn to_node(&self) -> Node {
        Node::Scalar(self.to_string())
    }
}

impl ToNode for Timestamp {
    fn to_node(&self) -> Node {
        Node::Scalar(self.to_string())
    }
}

impl ToNode for Priority {
    fn to_node(&self) -> Node {
        Node::Scalar(self.as_str().to_string())
    }
}

impl<T: ToNode> ToNode for Option<T> {
    fn to_node(&self) -> Node {
        self.as_ref().map_or(Node::Null, ToNode::to_node)
    }
}

impl<T: ToNode> ToNode for Vec<T> {
    fn to_node(&self) -> Node {
        Node::Sequence(self.iter().map(ToNode::to_node).collect())
    }
}

impl ToNode for Participant {
    fn to_node(&self) -> Node {
        Node::record([("name", self.name.to_node()), ("role", self.role.to_node())])
    }
}

impl ToNode for AgendaItem {
    fn to_node(&self) -> Node {
        Node::record([
            ("title", self.title.to_node()),
            ("description", self.description.to_node()),
        ])
    }
}

impl ToNode for DiscussionPoint {
    fn to_node(&self) -> Node {
        Node::record([
            ("speaker", self.speaker.to_node()),
            ("content", self.content.to_node()),
        ])
    }
}

impl ToNode for Motion {
    fn to_node(&self) -> Node {
        Node::record([
            ("proposed_by", self.proposed_by.to_node()),
            ("seconded_by", self.seconded_by.to_node()),
            ("description", self.description.to_node()),
            ("result", self.result.to_node()),
        ])
    }
}

impl ToNode for Subtask {
    fn to_node(&self) -> Node {
        Node::record([("id", self.id.to_node()), ("name", self.name.to_node())])
    }
}

impl ToNode for Ticket {
    fn to_node(&self) -> Node {
        Node::record([
            ("id", self.id.to_node()),
            ("name", self.name.to_node()),
            ("description", self.description.to_node()),
            ("priority", self.priority.to_node()),
            ("assignees", self.assignees.to_node()),
            ("subtasks", self.subtasks.to_node()),
            ("dependencies", self.dependencies.to_node()),
        ])
    }
}

impl ToNode for ActionItems {
    fn to_node(&self) -> Node {
        Node::record([("items", self.items.to_node())])
    }
}

impl ToNode for MeetingMinutes {
    fn to_node(&self) -> Node {
        Node::record([
            ("meeting_title", self.meeting_title.to_node()),
            ("date", self.date.to_node()),
            ("location", self.location.to_node()),
            ("chairperson", self.chairperson.to_node()),
            ("participants", self.participants.to_node()),
            ("agenda", self.agenda.to_node()),
            ("discussions", self.discussions.to_node()),
            ("motions", self.motions.to_node()),
            ("actions", self.actions.to_node()),
            ("conclusions", self.conclusions.to_node()),
            ("next_meeting_date", self.next_meeting_date.to_node()),
            ("next_meeting_agenda", self.next_meeting_agenda.to_node()),
        ])
    }
}
