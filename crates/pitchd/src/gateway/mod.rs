//! Remote model gateway.
//!
//! One operation: send role-tagged messages plus sampling parameters to a
//! chat-completions provider and get the generated text back. A single
//! attempt per call; retries are the caller's business.
//!
//! Production code uses `GroqClient`. Tests use `FakeGateway` with scripted
//! replies.

pub mod fake;
pub mod groq;

pub use fake::{FakeGateway, FakeGatewayBuilder};
pub use groq::GroqClient;

use async_trait::async_trait;
use pitch_common::config::API_KEY_ENV;
use pitch_common::ChatCompletionRequest;
use thiserror::Error;

/// Why a completion could not be obtained.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("No API key configured: set the {} environment variable", API_KEY_ENV)]
    MissingApiKey,

    #[error("Failed to send request to model provider: {0}")]
    Transport(String),

    #[error("Model provider returned error {status}: {body}")]
    Provider { status: u16, body: String },

    #[error("Failed to parse model provider response: {0}")]
    Decode(String),

    #[error("Model provider returned no completion text")]
    EmptyCompletion,
}

/// Chat-completions backend
#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// Run one completion and return the first choice's text
    async fn complete(&self, request: ChatCompletionRequest) -> Result<String, GatewayError>;
}
