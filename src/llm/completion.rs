//! Completion envelope returned by the chat-completions API

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{MinutesError, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Completion {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub object: Option<String>,
    #[serde(default)]
    pub created: Option<i64>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub system_fingerprint: Option<String>,
    #[serde(default)]
    pub choices: Vec<CompletionChoice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompletionChoice {
    #[serde(default)]
    pub index: u32,
    #[serde(default)]
    pub finish_reason: Option<String>,
    #[serde(default)]
    pub message: Option<CompletionMessage>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompletionMessage {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub function_call: Option<FunctionCall>,
}

/// `arguments` is itself JSON, encoded as a string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FunctionCall {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub arguments: String,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u64,
    #[serde(default)]
    pub completion_tokens: u64,
    #[serde(default)]
    pub total_tokens: u64,
}

impl Completion {
    /// The first function call among the choices.
    pub fn function_call(&self) -> Result<&FunctionCall> {
        if let Some(call) = self
            .choices
            .iter()
            .filter_map(|c| c.message.as_ref())
            .find_map(|m| m.function_call.as_ref())
        {
            return Ok(call);
        }

        let reply = self
            .choices
            .iter()
            .filter_map(|c| c.message.as_ref())
            .filter_map(|m| m.content.as_deref())
            .map(str::trim)
            .find(|t| !t.is_empty());

        Err(match reply {
            Some(text) => MinutesError::extraction_permanent(format!(
                "model answered with text instead of a function call: {}",
                text
            )),
            None => MinutesError::extraction_permanent("completion contained no function call"),
        })
    }

    /// The envelope as JSON, with function-call arguments decoded in place
    /// where they parse.
    pub fn raw_view(&self) -> Value {
        let mut raw = serde_json::to_value(self).unwrap_or(Value::Null);
        if let Some(choices) = raw.get_mut("choices").and_then(Value::as_array_mut) {
            for choice in choices {
                let arguments = choice
                    .pointer_mut("/message/function_call/arguments")
                    .filter(|a| a.is_string());
                if let Some(arguments) = arguments {
                    let decoded = arguments
                        .as_str()
                        .and_then(|s| serde_json::from_str::<Value>(s).ok());
                    if let Some(decoded) = decoded {
                        *arguments = decoded;
                    }
                }
            }
        }
        raw
    }
}
