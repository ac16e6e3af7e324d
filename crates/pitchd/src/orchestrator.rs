//! Response orchestration.
//!
//! Flow per request:
//! 1. Persona prompt -> gateway call 1 (prospect reply)
//! 2. Evaluator prompt embedding the reply -> gateway call 2
//! 3. Evaluation parsing -> combined response
//!
//! Invariants:
//! - Call 2 is only issued after call 1 succeeded
//! - A failure in call 1 fails the whole request
//! - Nothing in step 2 or 3 can fail the request; it degrades to the
//!   fallback evaluation instead

use crate::gateway::{ChatGateway, GatewayError};
use pitch_common::{
    evaluator_messages, parse_evaluation, persona_messages, ChatCompletionRequest, ChatMessage,
    ConversationTurn, Evaluation, GenerateResponse, LlmConfig,
};
use std::sync::Arc;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

/// Model and sampling parameters for one kind of call
#[derive(Debug, Clone, PartialEq)]
pub struct Sampling {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Sampling {
    fn request(&self, messages: Vec<ChatMessage>) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

pub struct RoleplayOrchestrator {
    gateway: Arc<dyn ChatGateway>,
    reply: Sampling,
    evaluation: Sampling,
}

impl RoleplayOrchestrator {
    pub fn new(gateway: Arc<dyn ChatGateway>, config: &LlmConfig) -> Self {
        Self {
            gateway,
            reply: Sampling {
                model: config.model.clone(),
                temperature: config.reply_temperature,
                max_tokens: config.reply_max_tokens,
            },
            evaluation: Sampling {
                model: config.model.clone(),
                temperature: config.evaluation_temperature,
                max_tokens: config.evaluation_max_tokens,
            },
        }
    }

    pub fn reply_sampling(&self) -> &Sampling {
        &self.reply
    }

    pub fn evaluation_sampling(&self) -> &Sampling {
        &self.evaluation
    }

    /// Generate the prospect's reply and grade the exchange.
    ///
    /// Only the reply call can make this fail.
    pub async fn respond(&self, turn: &ConversationTurn) -> Result<GenerateResponse, GatewayError> {
        let request_id = Uuid::new_v4();
        let span = info_span!("generate", %request_id, round = turn.round);

        async move {
            info!(
                "Turn for '{}' ({}), transcript {} chars",
                turn.prospect_name,
                turn.prospect_type,
                turn.user_transcript.len()
            );

            let reply = self.prospect_reply(turn).await?;
            let evaluation = self.evaluate(turn, &reply).await;

            info!(
                "Turn complete: warmth={} got_pull={}",
                evaluation.warmth, evaluation.got_pull
            );
            Ok(GenerateResponse::new(reply, evaluation))
        }
        .instrument(span)
        .await
    }

    /// Gateway call 1: the prospect speaks, in character.
    pub async fn prospect_reply(&self, turn: &ConversationTurn) -> Result<String, GatewayError> {
        let request = self.reply.request(persona_messages(turn));
        self.gateway.complete(request).await
    }

    /// Gateway call 2 plus parsing. Never fails.
    pub async fn evaluate(&self, turn: &ConversationTurn, prospect_reply: &str) -> Evaluation {
        let request = self
            .evaluation
            .request(evaluator_messages(turn, prospect_reply));

        match self.gateway.complete(request).await {
            Ok(text) => parse_evaluation(&text),
            Err(e) => {
                warn!("Evaluation error: {}", e);
                Evaluation::fallback(e)
            }
        }
    }
}
