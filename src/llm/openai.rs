use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::RetryTransientMiddleware;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::Settings;
use crate::llm::client::{ExtractionProvider, ExtractionRequest};
use crate::llm::completion::Completion;
use crate::llm::prompts::{EXTRACTION_TEMPERATURE, SYSTEM_PROMPT};
use crate::llm::retry::Backoff;
use crate::schema::function_definition;
use crate::{MinutesError, Result};

const DEFAULT_OPENAI_ENDPOINT: &str = "https://api.openai.com/v1";

/// Chat-completions client. Transient failures (connect errors, timeouts,
/// 408, 429, 5xx) are retried by the middleware stack before a response
/// is classified.
pub struct OpenAiClient {
    http: ClientWithMiddleware,
    api_key: String,
    endpoint: String,
}

impl OpenAiClient {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let api_key = settings.llm.api_key.trim().to_string();
        if api_key.is_empty() {
            return Err(MinutesError::AuthenticationFailure(
                "OpenAI API key is missing. Set llm.api_key in config or MINUTES_OPENAI_API_KEY."
                    .to_string(),
            ));
        }

        let endpoint = if settings.llm.endpoint.trim().is_empty() {
            DEFAULT_OPENAI_ENDPOINT.to_string()
        } else {
            settings
                .llm
                .endpoint
                .trim()
                .trim_end_matches('/')
                .to_string()
        };

        let retry = Backoff::new(
            settings.llm.max_retries,
            Duration::from_millis(settings.llm.retry_base_delay_ms),
        );

        Self::new(
            api_key,
            endpoint,
            Duration::from_secs(settings.llm.timeout_secs),
            retry,
        )
    }

    pub fn new(
        api_key: String,
        endpoint: String,
        timeout: Duration,
        retry: Backoff,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MinutesError::Config(format!("Failed to build HTTP client: {}", e)))?;

        let http = ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry))
            .build();

        Ok(Self {
            http,
            api_key,
            endpoint,
        })
    }

    fn request_url(&self) -> String {
        format!("{}/chat/completions", self.endpoint)
    }

    async fn send(&self, body: &ChatCompletionRequest<'_>) -> Result<Completion> {
        let response = self
            .http
            .post(self.request_url())
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(middleware_error)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(status_error(status, &text));
        }

        let text = response.text().await.map_err(transport_error)?;
        serde_json::from_str(&text).map_err(|e| {
            MinutesError::extraction_permanent(format!(
                "Failed to parse completion response: {}",
                e
            ))
        })
    }
}

#[async_trait]
impl ExtractionProvider for OpenAiClient {
    async fn extract(&self, request: ExtractionRequest<'_>) -> Result<Completion> {
        let body = ChatCompletionRequest {
            model: request.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: request.transcript,
                },
            ],
            functions: vec![function_definition()],
            function_call: "auto",
            temperature: EXTRACTION_TEMPERATURE,
        };

        let completion = self.send(&body).await?;
        tracing::debug!(
            id = %completion.id,
            total_tokens = completion.usage.map(|u| u.total_tokens).unwrap_or(0),
            "Completion received"
        );
        Ok(completion)
    }
}

fn middleware_error(e: reqwest_middleware::Error) -> MinutesError {
    match e {
        reqwest_middleware::Error::Reqwest(e) => transport_error(e),
        reqwest_middleware::Error::Middleware(e) => {
            MinutesError::extraction_permanent(format!("request failed: {:#}", e))
        }
    }
}

fn transport_error(e: reqwest::Error) -> MinutesError {
    if e.is_timeout() {
        MinutesError::extraction_transient(format!("request timed out: {}", e))
    } else if e.is_connect() || e.is_request() || e.is_body() {
        MinutesError::extraction_transient(format!("request failed: {}", e))
    } else {
        MinutesError::extraction_permanent(format!("request failed: {}", e))
    }
}

fn status_error(status: StatusCode, body: &str) -> MinutesError {
    let detail = api_error_message(body).unwrap_or_else(|| body.trim().to_string());
    let message = if detail.is_empty() {
        status.to_string()
    } else {
        format!("{}: {}", status, detail)
    };

    match status.as_u16() {
        401 | 403 => MinutesError::AuthenticationFailure(message),
        408 | 429 | 500..=599 => MinutesError::extraction_transient(message),
        _ => MinutesError::extraction_permanent(message),
    }
}

/// `{"error": {"message": "..."}}` -> the message.
fn api_error_message(body: &str) -> Option<String> {
    let payload: ApiErrorResponse = serde_json::from_str(body).ok()?;
    Some(payload.error.message)
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    functions: Vec<Value>,
    function_call: &'static str,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}
