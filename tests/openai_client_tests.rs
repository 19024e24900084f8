//! OpenAI client behaviour against a mock chat-completions server.

use std::time::Duration;

use minutes_extract::llm::{ExtractionProvider, ExtractionRequest, OpenAiClient, Backoff};
use minutes_extract::pipeline::Pipeline;
use minutes_extract::schema::decode_arguments;
use minutes_extract::MinutesError;
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL: &str = "gpt-3.5-turbo";

fn client(server: &MockServer, max_retries: u32) -> OpenAiClient {
    OpenAiClient::new(
        "sk-test".to_string(),
        format!("{}/v1", server.uri()),
        Duration::from_secs(5),
        Backoff::new(max_retries, Duration::from_millis(1)),
    )
    .expect("build client")
}

fn minutes_arguments() -> String {
    json!({
        "meeting_title": "Budget Session",
        "date": "2024-01-10T10:00:00",
        "location": "Room 4",
        "chairperson": "A. Smith",
        "participants": [{"name": "A. Smith", "role": "Chair"}],
        "agenda": [{"title": "Budget Review"}],
        "discussions": [{"speaker": "A. Smith", "content": "Discussed Q1 spend."}],
        "motions": null,
        "actions": null
    })
    .to_string()
}

fn completion_body(arguments: &str) -> Value {
    json!({
        "id": "chatcmpl-8SXq",
        "object": "chat.completion",
        "created": 1701820800,
        "model": "gpt-3.5-turbo-0613",
        "system_fingerprint": null,
        "choices": [{
            "index": 0,
            "finish_reason": "function_call",
            "message": {
                "role": "assistant",
                "content": null,
                "function_call": {"name": "MeetingMinutes", "arguments": arguments}
            }
        }],
        "usage": {"prompt_tokens": 812, "completion_tokens": 96, "total_tokens": 908}
    })
}

fn request() -> ExtractionRequest<'static> {
    ExtractionRequest {
        transcript: "A. Smith: we discussed Q1 spend.",
        model: MODEL,
    }
}

#[tokio::test]
async fn sends_function_call_request_and_decodes_arguments() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": MODEL,
            "temperature": 0.0,
            "function_call": "auto",
            "functions": [{"name": "MeetingMinutes"}],
            "messages": [
                {"role": "system", "content": "Extract meeting minutes from the following transcript:"},
                {"role": "user", "content": "A. Smith: we discussed Q1 spend."}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(&minutes_arguments())))
        .expect(1)
        .mount(&server)
        .await;

    let completion = client(&server, 0).extract(request()).await.unwrap();

    assert_eq!(completion.id, "chatcmpl-8SXq");
    assert_eq!(completion.usage.map(|u| u.total_tokens), Some(908));
    let call = completion.function_call().unwrap();
    let minutes = decode_arguments(&call.arguments).unwrap();
    assert_eq!(minutes.location, "Room 4");
}

#[tokio::test]
async fn unauthorized_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"message": "Incorrect API key provided: sk-test.", "type": "invalid_request_error"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server, 3).extract(request()).await.unwrap_err();

    match err {
        MinutesError::AuthenticationFailure(message) => {
            assert!(message.contains("Incorrect API key provided"))
        }
        other => panic!("expected AuthenticationFailure, got {:?}", other),
    }
}

#[tokio::test]
async fn transient_failures_are_retried_until_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(&minutes_arguments())))
        .expect(1)
        .mount(&server)
        .await;

    let completion = client(&server, 2).extract(request()).await.unwrap();
    assert!(completion.function_call().is_ok());
}

#[tokio::test]
async fn retry_budget_is_bounded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": {"message": "Rate limit reached"}
        })))
        .expect(2)
        .mount(&server)
        .await;

    let err = client(&server, 1).extract(request()).await.unwrap_err();

    assert!(err.is_transient());
    assert!(err.to_string().contains("Rate limit reached"));
}

#[tokio::test]
async fn malformed_envelope_is_an_extraction_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server, 3).extract(request()).await.unwrap_err();
    assert!(matches!(
        err,
        MinutesError::ExtractionFailure {
            transient: false,
            ..
        }
    ));
}

#[tokio::test]
async fn unreachable_endpoint_is_an_extraction_failure() {
    let client = OpenAiClient::new(
        "sk-test".to_string(),
        "http://127.0.0.1:9/v1".to_string(),
        Duration::from_secs(5),
        Backoff::none(),
    )
    .unwrap();

    let err = client.extract(request()).await.unwrap_err();
    assert!(matches!(err, MinutesError::ExtractionFailure { .. }));
}

#[tokio::test]
async fn pipeline_rejects_bad_arguments_blob() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("{\"meeting_title\": ")))
        .mount(&server)
        .await;

    let pipeline = Pipeline::new(Box::new(client(&server, 0)), vec![MODEL.to_string()]);
    let err = pipeline
        .run("A. Smith: we discussed Q1 spend.", MODEL)
        .await
        .unwrap_err();

    assert!(matches!(err, MinutesError::SchemaViolation { .. }));
}

#[tokio::test]
async fn pipeline_renders_budget_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(&minutes_arguments())))
        .mount(&server)
        .await;

    let pipeline = Pipeline::new(Box::new(client(&server, 0)), vec![MODEL.to_string()]);
    let document = pipeline
        .run("A. Smith: we discussed Q1 spend.", MODEL)
        .await
        .unwrap();

    let lines: Vec<&str> = document.markdown.lines().collect();
    assert_eq!(
        lines,
        vec![
            "**Meeting title**: Budget Session",
            "**Date**: 2024-01-10T10:00:00",
            "**Location**: Room 4",
            "**Chairperson**: A. Smith",
            "### Participants",
            "**Name**: A. Smith",
            "**Role**: Chair",
            "### Agenda",
            "**Title**: Budget Review",
            "### Discussions",
            "**Speaker**: A. Smith",
            "**Content**: Discussed Q1 spend.",
        ]
    );
}
