//! Shared types and logic for the pitchd sales-roleplay backend.
//!
//! Everything here is I/O free apart from config-file loading: wire types,
//! the two prompt templates and the evaluation parser.

pub mod config;
pub mod error;
pub mod evaluation;
pub mod prompts;
pub mod schemas;

pub use config::{LlmConfig, PitchConfig, ServerConfig};
pub use error::EvaluationError;
pub use evaluation::{parse_evaluation, strip_code_fence, try_parse_evaluation};
pub use prompts::{
    evaluator_messages, evaluator_prompt, persona_messages, persona_prompt, salesperson_message,
};
pub use schemas::{
    ChatChoice, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ChatReply,
    ConversationTurn, ErrorResponse, Evaluation, EvaluationSummary, GenerateResponse,
    HealthResponse, Warmth, FALLBACK_HINT,
};
