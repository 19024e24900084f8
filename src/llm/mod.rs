//! LLM module for minutes-extract
//!
//! Sends transcripts to a function-calling completion API and returns the
//! raw completion envelope.

mod client;
mod completion;
mod openai;
pub mod prompts;
mod retry;

pub use client::{build_provider, ExtractionProvider, ExtractionRequest};
pub use completion::{Completion, CompletionChoice, CompletionMessage, FunctionCall, Usage};
pub use openai::OpenAiClient;
pub use retry::Backoff;
