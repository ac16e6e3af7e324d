//! Deterministic orchestration tests
//!
//! These use FakeGateway to verify the two-call flow without any network.

use pitch_common::{ConversationTurn, LlmConfig, Warmth};
use pitchd::gateway::{FakeGateway, FakeGatewayBuilder, GatewayError};
use pitchd::orchestrator::RoleplayOrchestrator;
use std::sync::Arc;

fn turn(round: u32, transcript: &str) -> ConversationTurn {
    ConversationTurn {
        round,
        user_transcript: transcript.to_string(),
        prospect_name: "Dave".to_string(),
        prospect_type: "HVAC contractor".to_string(),
        prospect_context: "Family business, 12 technicians, busy summers".to_string(),
        ..Default::default()
    }
}

fn orchestrator(gateway: Arc<FakeGateway>) -> RoleplayOrchestrator {
    RoleplayOrchestrator::new(gateway, &LlmConfig::default())
}

#[tokio::test]
async fn test_reply_call_uses_persona_prompt_and_reply_sampling() {
    let gateway = Arc::new(
        FakeGatewayBuilder::new()
            .reply("Winters are slow, sure.")
            .reply(r#"{"warmth": "COOL"}"#)
            .build(),
    );
    orchestrator(gateway.clone())
        .respond(&turn(2, "How do you fill the calendar in winter?"))
        .await
        .unwrap();

    let requests = gateway.requests();
    assert_eq!(requests.len(), 2);

    let reply = &requests[0];
    assert_eq!(reply.model, "llama-3.1-70b-versatile");
    assert_eq!(reply.max_tokens, 200);
    assert!((reply.temperature - 0.7).abs() < f32::EPSILON);
    assert_eq!(reply.messages.len(), 2);
    assert_eq!(reply.messages[0].role, "system");
    assert!(reply.messages[0]
        .content
        .starts_with("You are roleplaying as Dave, a HVAC contractor."));
    assert!(reply.messages[0].content.contains("round 2"));
    assert_eq!(
        reply.messages[1].content,
        "Salesperson says: How do you fill the calendar in winter?"
    );
}

#[tokio::test]
async fn test_evaluation_call_embeds_reply_and_uses_eval_sampling() {
    let gateway = Arc::new(
        FakeGatewayBuilder::new()
            .reply("Winters are slow, sure.")
            .reply(r#"{"warmth": "COOL"}"#)
            .build(),
    );
    orchestrator(gateway.clone())
        .respond(&turn(2, "How do you fill the calendar in winter?"))
        .await
        .unwrap();

    let eval = &gateway.requests()[1];
    assert_eq!(eval.max_tokens, 500);
    assert!((eval.temperature - 0.3).abs() < f32::EPSILON);
    assert_eq!(eval.messages.len(), 1);
    assert_eq!(eval.messages[0].role, "user");
    assert!(eval.messages[0]
        .content
        .contains(r#"Prospect responded: "Winters are slow, sure.""#));
    assert!(eval.messages[0].content.contains("Prospect type: HVAC contractor"));
    assert!(eval.messages[0].content.contains("Round: 2"));
}

#[tokio::test]
async fn test_response_assembled_from_both_calls() {
    let gateway = Arc::new(
        FakeGatewayBuilder::new()
            .reply("That's exactly our problem. How would you help with that?")
            .reply(
                r#"{"uncoveredPain": true, "createdUrgency": true, "establishedCredibility": false,
                   "gotPull": true, "warmth": "HOT", "feedback": ["Nice", "Add a case study"]}"#,
            )
            .build(),
    );
    let response = orchestrator(gateway)
        .respond(&turn(3, "What does an empty truck day cost you?"))
        .await
        .unwrap();

    assert_eq!(
        response.response,
        "That's exactly our problem. How would you help with that?"
    );
    assert!(response.got_pull);
    assert_eq!(response.warmth, Warmth::Hot);
    assert!(response.evaluation.uncovered_pain);
    assert!(response.evaluation.created_urgency);
    assert!(!response.evaluation.established_credibility);
    assert_eq!(response.evaluation.feedback, vec!["Nice", "Add a case study"]);
}

#[tokio::test]
async fn test_reply_failure_skips_evaluation() {
    let gateway = Arc::new(FakeGateway::failing(GatewayError::MissingApiKey));
    let err = orchestrator(gateway.clone())
        .respond(&turn(1, "Hi, I sell websites"))
        .await
        .unwrap_err();

    assert_eq!(err, GatewayError::MissingApiKey);
    assert_eq!(gateway.call_count(), 1);
}

#[tokio::test]
async fn test_evaluation_failure_keeps_reply() {
    let gateway = Arc::new(
        FakeGatewayBuilder::new()
            .reply("Not interested.")
            .fail(GatewayError::Provider {
                status: 503,
                body: "over capacity".to_string(),
            })
            .build(),
    );
    let response = orchestrator(gateway)
        .respond(&turn(1, "Hi, I sell websites"))
        .await
        .unwrap();

    assert_eq!(response.response, "Not interested.");
    assert!(!response.got_pull);
    assert_eq!(response.warmth, Warmth::Cold);
    assert_eq!(
        response.evaluation.feedback[0],
        "Error evaluating conversation: Model provider returned error 503: over capacity"
    );
}

#[tokio::test]
async fn test_each_turn_is_independent() {
    let gateway = Arc::new(FakeGateway::always(r#"{"warmth": "WARM"}"#));
    let orchestrator = orchestrator(gateway.clone());

    let first = orchestrator.respond(&turn(1, "one")).await.unwrap();
    let second = orchestrator.respond(&turn(1, "one")).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(gateway.call_count(), 4);
    let requests = gateway.requests();
    assert_eq!(requests[0], requests[2]);
    assert_eq!(requests[1], requests[3]);
}
