//! Scripted gateway for deterministic testing.
//!
//! Replies are handed out in call order; every request is recorded so tests
//! can assert on prompts and sampling parameters without any network.
//!
//! ```rust,ignore
//! let fake = FakeGatewayBuilder::new()
//!     .reply("We mostly rely on referrals.")
//!     .reply(r#"{"warmth": "COOL"}"#)
//!     .build();
//! ```

use super::{ChatGateway, GatewayError};
use async_trait::async_trait;
use pitch_common::ChatCompletionRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

type Scripted = Result<String, GatewayError>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct FakeGateway {
    script: Mutex<VecDeque<Scripted>>,
    /// Returned once the script runs out
    exhausted: Scripted,
    requests: Arc<Mutex<Vec<ChatCompletionRequest>>>,
}

impl FakeGateway {
    /// Fake that answers every call with the same text
    pub fn always(text: &str) -> Self {
        FakeGatewayBuilder::new().when_exhausted(Ok(text.to_string())).build()
    }

    /// Fake that fails every call with `error`
    pub fn failing(error: GatewayError) -> Self {
        FakeGatewayBuilder::new().when_exhausted(Err(error)).build()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.requests).len()
    }

    /// Requests received so far, in call order
    pub fn requests(&self) -> Vec<ChatCompletionRequest> {
        lock(&self.requests).clone()
    }
}

#[async_trait]
impl ChatGateway for FakeGateway {
    async fn complete(&self, request: ChatCompletionRequest) -> Result<String, GatewayError> {
        lock(&self.requests).push(request);
        lock(&self.script)
            .pop_front()
            .unwrap_or_else(|| self.exhausted.clone())
    }
}

/// Builder for FakeGateway
pub struct FakeGatewayBuilder {
    script: VecDeque<Scripted>,
    exhausted: Scripted,
}

impl FakeGatewayBuilder {
    pub fn new() -> Self {
        Self {
            script: VecDeque::new(),
            exhausted: Err(GatewayError::Transport(
                "fake gateway has no scripted reply".to_string(),
            )),
        }
    }

    /// Queue a successful completion
    pub fn reply(mut self, text: &str) -> Self {
        self.script.push_back(Ok(text.to_string()));
        self
    }

    /// Queue a failed completion
    pub fn fail(mut self, error: GatewayError) -> Self {
        self.script.push_back(Err(error));
        self
    }

    /// Outcome for calls past the end of the script
    pub fn when_exhausted(mut self, outcome: Result<String, GatewayError>) -> Self {
        self.exhausted = outcome;
        self
    }

    pub fn build(self) -> FakeGateway {
        FakeGateway {
            script: Mutex::new(self.script),
            exhausted: self.exhausted,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl Default for FakeGatewayBuilder {
    fn default() -> Self {
        Self::new()
    }
}
