use async_trait::async_trait;

use crate::config::Settings;
use crate::llm::completion::Completion;
use crate::llm::openai::OpenAiClient;
use crate::{MinutesError, Result};

/// Extraction request payload.
#[derive(Debug, Clone, Copy)]
pub struct ExtractionRequest<'a> {
    pub transcript: &'a str,
    pub model: &'a str,
}

/// A completion API able to populate the meeting-minutes function schema.
#[async_trait]
pub trait ExtractionProvider: Send + Sync {
    async fn extract(&self, request: ExtractionRequest<'_>) -> Result<Completion>;
}

/// Build an extraction provider from runtime settings.
pub fn build_provider(settings: &Settings) -> Result<Box<dyn ExtractionProvider>> {
    match settings.llm.provider.to_lowercase().as_str() {
        "openai" => Ok(Box::new(OpenAiClient::from_settings(settings)?)),
        other => Err(MinutesError::Config(format!(
            "Unsupported llm.provider '{}'. Supported providers: openai",
            other
        ))),
    }
}
