//! Transcript -> minutes pipeline
//!
//! Each run is independent: the result travels back to the caller as a
//! [`MinutesDocument`] and nothing is kept between runs.

use crate::config::Settings;
use crate::llm::prompts::FUNCTION_NAME;
use crate::llm::{build_provider, Completion, ExtractionProvider, ExtractionRequest};
use crate::render::render_value;
use crate::schema::{decode, parse_arguments, MeetingMinutes};
use crate::{MinutesError, Result};

/// Output of one successful extraction.
#[derive(Debug, Clone)]
pub struct MinutesDocument {
    pub completion: Completion,
    pub minutes: MeetingMinutes,
    pub markdown: String,
}

pub struct Pipeline {
    provider: Box<dyn ExtractionProvider>,
    models: Vec<String>,
}

impl Pipeline {
    pub fn new(provider: Box<dyn ExtractionProvider>, models: Vec<String>) -> Self {
        Self { provider, models }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self::new(
            build_provider(settings)?,
            settings.llm.models.clone(),
        ))
    }

    /// Extract, decode and render. Rendering only happens once decoding has
    /// fully succeeded, and it walks the arguments exactly as the model sent
    /// them.
    pub async fn run(&self, transcript: &str, model: &str) -> Result<MinutesDocument> {
        let transcript = transcript.trim();
        if transcript.is_empty() {
            return Err(MinutesError::InvalidInput(
                "transcript is empty".to_string(),
            ));
        }

        if !self.models.iter().any(|m| m == model) {
            return Err(MinutesError::Config(format!(
                "Model '{}' is not supported. Supported models: {}",
                model,
                self.models.join(", ")
            )));
        }

        tracing::info!(model, chars = transcript.len(), "Extracting meeting minutes");
        let completion = self
            .provider
            .extract(ExtractionRequest { transcript, model })
            .await?;

        let call = completion.function_call()?;
        if call.name != FUNCTION_NAME {
            tracing::warn!(name = %call.name, "Model called an unexpected function name");
        }

        let arguments = parse_arguments(&call.arguments)?;
        let minutes = decode(&arguments)?;
        for (ticket, missing) in minutes.unresolved_dependencies() {
            tracing::warn!(ticket, missing, "Action item depends on an unknown ticket id");
        }

        let markdown = render_value(&arguments)?;

        Ok(MinutesDocument {
            completion,
            minutes,
            markdown,
        })
    }
}
