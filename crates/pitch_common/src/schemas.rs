//! Wire types for the roleplay API and the chat-completions provider.
//!
//! Field names on the HTTP surface are camelCase; provider types follow the
//! OpenAI-compatible chat-completions shape that Groq serves.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Treat an explicit `null` the same as an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn default_round() -> u32 {
    1
}

// ============================================================================
// Request
// ============================================================================

/// One salesperson utterance plus the persona it is aimed at.
///
/// Every field is optional on the wire. The client re-sends the persona on
/// each turn; nothing is kept between requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationTurn {
    #[serde(default = "default_round")]
    pub round: u32,

    #[serde(default, deserialize_with = "null_as_default")]
    pub user_transcript: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub prospect_name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub prospect_type: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub prospect_context: String,

    /// Answers from the client's prep screen. Accepted, never read.
    #[serde(default, deserialize_with = "null_as_default")]
    pub prep_answers: BTreeMap<String, serde_json::Value>,
}

impl Default for ConversationTurn {
    fn default() -> Self {
        Self {
            round: default_round(),
            user_transcript: String::new(),
            prospect_name: String::new(),
            prospect_type: String::new(),
            prospect_context: String::new(),
            prep_answers: BTreeMap::new(),
        }
    }
}

// ============================================================================
// Evaluation
// ============================================================================

/// How receptive the prospect is, from COLD up to HOT.
///
/// The evaluator model occasionally invents other labels; those are kept
/// verbatim in `Unrecognized` rather than clamped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Warmth {
    Hot,
    Warm,
    Cool,
    #[default]
    Cold,
    Unrecognized(String),
}

impl Warmth {
    pub fn as_str(&self) -> &str {
        match self {
            Warmth::Hot => "HOT",
            Warmth::Warm => "WARM",
            Warmth::Cool => "COOL",
            Warmth::Cold => "COLD",
            Warmth::Unrecognized(raw) => raw,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Warmth::Unrecognized(_))
    }
}

impl From<String> for Warmth {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "HOT" => Warmth::Hot,
            "WARM" => Warmth::Warm,
            "COOL" => Warmth::Cool,
            "COLD" => Warmth::Cold,
            _ => Warmth::Unrecognized(raw),
        }
    }
}

impl From<&str> for Warmth {
    fn from(raw: &str) -> Self {
        Warmth::from(raw.to_string())
    }
}

impl From<Warmth> for String {
    fn from(warmth: Warmth) -> Self {
        match warmth {
            Warmth::Unrecognized(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Warmth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sales-trainer verdict on a single exchange.
///
/// Absent or `null` fields decode to their defaults (false / COLD / empty).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    #[serde(default, deserialize_with = "null_as_default")]
    pub uncovered_pain: bool,

    #[serde(default, deserialize_with = "null_as_default")]
    pub created_urgency: bool,

    #[serde(default, deserialize_with = "null_as_default")]
    pub established_credibility: bool,

    #[serde(default, deserialize_with = "null_as_default")]
    pub got_pull: bool,

    #[serde(default, deserialize_with = "null_as_default")]
    pub warmth: Warmth,

    #[serde(default, deserialize_with = "null_as_default")]
    pub feedback: Vec<String>,
}

/// Coaching hint appended to every fallback evaluation.
pub const FALLBACK_HINT: &str = "Try again with more specific discovery questions";

impl Evaluation {
    /// Result used whenever the evaluator call or its parsing fails.
    pub fn fallback(reason: impl fmt::Display) -> Self {
        Self {
            uncovered_pain: false,
            created_urgency: false,
            established_credibility: false,
            got_pull: false,
            warmth: Warmth::Cold,
            feedback: vec![
                format!("Error evaluating conversation: {}", reason),
                FALLBACK_HINT.to_string(),
            ],
        }
    }

    /// True when this looks like `Evaluation::fallback` output.
    pub fn is_fallback(&self) -> bool {
        self.feedback.len() == 2
            && self.feedback[1] == FALLBACK_HINT
            && self.feedback[0].starts_with("Error evaluating conversation: ")
            && !self.got_pull
            && self.warmth == Warmth::Cold
    }
}

// ============================================================================
// Response
// ============================================================================

/// The nested `evaluation` object of the HTTP response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationSummary {
    pub uncovered_pain: bool,
    pub created_urgency: bool,
    pub established_credibility: bool,
    pub feedback: Vec<String>,
}

/// Body of a successful `POST /api/generate-response`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub response: String,
    pub evaluation: EvaluationSummary,
    pub got_pull: bool,
    pub warmth: Warmth,
}

impl GenerateResponse {
    pub fn new(reply: String, evaluation: Evaluation) -> Self {
        Self {
            response: reply,
            evaluation: EvaluationSummary {
                uncovered_pain: evaluation.uncovered_pain,
                created_urgency: evaluation.created_urgency,
                established_credibility: evaluation.established_credibility,
                feedback: evaluation.feedback,
            },
            got_pull: evaluation.got_pull,
            warmth: evaluation.warmth,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

// ============================================================================
// Chat completions (provider side)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatChoice {
    pub message: ChatReply,
}

/// Assistant message inside a choice; `content` may be null.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// Text of the first choice, if there is one.
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
    }
}
