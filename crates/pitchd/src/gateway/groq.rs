//! Groq chat-completions client.
//!
//! Groq serves the OpenAI-compatible `/chat/completions` shape, so this works
//! against any provider exposing that endpoint. One `reqwest::Client` is built
//! at startup and shared by every request.

use super::{ChatGateway, GatewayError};
use async_trait::async_trait;
use pitch_common::{ChatCompletionRequest, ChatCompletionResponse, LlmConfig};
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

pub struct GroqClient {
    http_client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl GroqClient {
    pub fn new(config: &LlmConfig) -> Self {
        Self {
            http_client: reqwest::Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .build()
                .unwrap_or_default(),
            endpoint: format!("{}/chat/completions", config.api_base.trim_end_matches('/')),
            api_key: config.api_key.clone(),
        }
    }

    /// Full URL that completions are posted to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

#[async_trait]
impl ChatGateway for GroqClient {
    async fn complete(&self, request: ChatCompletionRequest) -> Result<String, GatewayError> {
        let api_key = self.api_key.as_deref().ok_or(GatewayError::MissingApiKey)?;

        let prompt_chars: usize = request.messages.iter().map(|m| m.content.len()).sum();
        info!(
            "[>]  LLM CALL [{}] ({} messages, {} chars, temperature {}, max_tokens {})",
            request.model,
            request.messages.len(),
            prompt_chars,
            request.temperature,
            request.max_tokens
        );
        for message in &request.messages {
            debug!("[{}] {}", message.role, message.content);
        }

        let start = Instant::now();

        let response = self
            .http_client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("[-]  Provider error {}: {}", status, body);
            return Err(GatewayError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))?;

        let content = completion
            .first_content()
            .ok_or(GatewayError::EmptyCompletion)?
            .to_string();

        info!(
            "[<]  LLM RESPONSE ({} chars) in {:.2}s",
            content.len(),
            start.elapsed().as_secs_f64()
        );
        debug!("[assistant] {}", content);

        Ok(content)
    }
}
