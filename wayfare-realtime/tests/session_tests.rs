//! Tests for single-active-agent dispatch and handoffs.

mod common;

use common::{RecordingBackend, Script, ScriptedAgent, handoff_script, new_log};
use std::sync::Arc;
use std::sync::atomic::Ordering;
use wayfare_core::{AgentPhase, ChatItem, Role, ToolCall, VoiceAgent, WayfareError};
use wayfare_realtime::{AgentRecord, VoiceSession};

fn session(backend: Arc<RecordingBackend>) -> Arc<VoiceSession> {
    Arc::new(VoiceSession::builder().backend(backend).session_id("test-session").build().unwrap())
}

fn call(id: &str, name: &str) -> ToolCall {
    ToolCall::new(id, name, serde_json::json!({}))
}

#[tokio::test]
async fn test_start_runs_on_enter_once() {
    let backend = RecordingBackend::new();
    let session = session(backend.clone());
    let log = new_log();

    let agent = ScriptedAgent::new("flight", session.chat_context().clone(), log.clone(), Script::default());
    session.start(Arc::new(agent)).await.unwrap();

    assert_eq!(*log.lock(), vec!["flight:enter"]);
    assert_eq!(session.active_agent_name().as_deref(), Some("flight"));
    assert_eq!(backend.replies(), vec!["greet from flight"]);
    assert_eq!(backend.last_instruction().as_deref(), Some("You are a scripted test agent."));
}

#[tokio::test]
async fn test_start_rejects_foreign_history() {
    let session = session(RecordingBackend::new());
    let agent = ScriptedAgent::new("flight", Default::default(), new_log(), Script::default());

    let err = session.start(Arc::new(agent)).await.err().unwrap();
    assert!(matches!(err, WayfareError::Config(_)));
    assert_eq!(session.active_agent_name(), None);
}

#[tokio::test]
async fn test_dispatch_before_start() {
    let session = session(RecordingBackend::new());
    let err = session.dispatch(call("c1", "echo")).await.err().unwrap();
    assert!(matches!(err, WayfareError::NoActiveAgent));
}

#[tokio::test]
async fn test_handoff_order_and_phases() {
    let backend = RecordingBackend::new();
    let session = session(backend.clone());
    let log = new_log();

    let agent = ScriptedAgent::new(
        "flight",
        session.chat_context().clone(),
        log.clone(),
        handoff_script("hotel", Script::default()),
    );
    session.start(Arc::new(agent)).await.unwrap();

    let output = session.dispatch(call("c1", "transfer")).await.unwrap();
    assert_eq!(output, serde_json::json!({"status": "transferred", "agent": "hotel"}));

    assert_eq!(
        *log.lock(),
        vec!["flight:enter", "flight:tool transfer", "flight:exit", "hotel:enter"]
    );
    assert_eq!(
        session.agents(),
        vec![
            AgentRecord { name: "flight".into(), phase: AgentPhase::Retired },
            AgentRecord { name: "hotel".into(), phase: AgentPhase::Active },
        ]
    );

    // Subsequent calls go to the new agent only.
    session.dispatch(call("c2", "echo")).await.unwrap();
    assert_eq!(log.lock().last().map(String::as_str), Some("hotel:tool echo"));
}

#[tokio::test]
async fn test_handoff_shares_history() {
    let backend = RecordingBackend::new();
    let session = session(backend);
    let history = session.chat_context().clone();

    history.add_message(Role::Assistant, "The user's name is Ada.");
    let agent =
        ScriptedAgent::new("flight", history.clone(), new_log(), handoff_script("hotel", Script::default()));
    session.start(Arc::new(agent)).await.unwrap();

    session.record_message(Role::User, "Book a flight to Paris tomorrow");
    let before = history.items();

    session.dispatch(call("c1", "transfer")).await.unwrap();

    let after = history.items();
    assert!(after.len() >= before.len());
    assert_eq!(&after[..before.len()], &before[..]);
    assert!(matches!(after.last(), Some(ChatItem::FunctionOutput { name, .. }) if name == "transfer"));
}

#[tokio::test]
async fn test_failed_exit_still_hands_off() {
    let backend = RecordingBackend::new();
    let session = session(backend);
    let log = new_log();

    let mut script = handoff_script("hotel", Script::default());
    script.fail_exit = true;
    let agent = ScriptedAgent::new("flight", session.chat_context().clone(), log.clone(), script);
    session.start(Arc::new(agent)).await.unwrap();

    session.dispatch(call("c1", "transfer")).await.unwrap();

    assert_eq!(session.active_agent_name().as_deref(), Some("hotel"));
    assert!(log.lock().contains(&"hotel:enter".to_string()));
}

#[tokio::test]
async fn test_failed_enter_leaves_no_active_agent() {
    let backend = RecordingBackend::new();
    let session = session(backend);
    let log = new_log();

    let agent = ScriptedAgent::new(
        "flight",
        session.chat_context().clone(),
        log.clone(),
        handoff_script("hotel", Script { fail_enter: true, ..Default::default() }),
    );
    session.start(Arc::new(agent)).await.unwrap();

    let err = session.dispatch(call("c1", "transfer")).await.err().unwrap();
    assert!(matches!(err, WayfareError::ActivationFailed { ref agent, .. } if agent == "hotel"));
    assert!(err.is_fatal());

    assert_eq!(session.active_agent_name(), None);
    assert!(session.agents().iter().all(|record| record.phase == AgentPhase::Retired));

    // The retired agent does not come back.
    let err = session.dispatch(call("c2", "echo")).await.err().unwrap();
    assert!(matches!(err, WayfareError::NoActiveAgent));
    assert_eq!(log.lock().iter().filter(|e| e.as_str() == "flight:enter").count(), 1);
}

#[tokio::test]
async fn test_backend_failure_during_greeting_is_activation_failure() {
    let backend = RecordingBackend::new();
    backend.fail_replies.store(true, Ordering::SeqCst);
    let session = session(backend);

    let agent = ScriptedAgent::new("flight", session.chat_context().clone(), new_log(), Script::default());
    let err = session.start(Arc::new(agent)).await.err().unwrap();

    assert!(matches!(err, WayfareError::ActivationFailed { .. }));
    assert_eq!(session.active_agent_name(), None);
}

#[tokio::test]
async fn test_tool_errors_are_recorded_and_returned() {
    let session = session(RecordingBackend::new());
    let agent = ScriptedAgent::new("flight", session.chat_context().clone(), new_log(), Script::default());
    session.start(Arc::new(agent)).await.unwrap();

    let err = session.dispatch(call("c1", "teleport")).await.err().unwrap();
    assert!(matches!(err, WayfareError::UnknownTool(_)));
    assert!(!err.is_fatal());

    let items = session.chat_context().items();
    assert!(matches!(
        items.last(),
        Some(ChatItem::FunctionOutput { output, .. }) if output["error"] == "Unknown tool: teleport"
    ));
    // Still usable afterwards.
    assert!(session.dispatch(call("c2", "echo")).await.is_ok());
}

#[tokio::test(start_paused = true)]
async fn test_tool_calls_are_serialized() {
    let session = session(RecordingBackend::new());
    let agent = ScriptedAgent::new("flight", session.chat_context().clone(), new_log(), Script::default());
    let max_in_flight = agent.max_in_flight();
    session.start(Arc::new(agent) as Arc<dyn VoiceAgent>).await.unwrap();

    let (a, b, c) = tokio::join!(
        session.dispatch(call("c1", "slow")),
        session.dispatch(call("c2", "slow")),
        session.dispatch(call("c3", "slow")),
    );
    assert!(a.is_ok() && b.is_ok() && c.is_ok());
    assert_eq!(max_in_flight.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_close() {
    let session = session(RecordingBackend::new());
    let log = new_log();
    let agent = ScriptedAgent::new("flight", session.chat_context().clone(), log.clone(), Script::default());
    session.start(Arc::new(agent)).await.unwrap();

    session.close().await.unwrap();
    session.close().await.unwrap();

    assert_eq!(*log.lock(), vec!["flight:enter", "flight:exit"]);
    assert_eq!(session.active_agent_name(), None);
    assert_eq!(session.agents()[0].phase, AgentPhase::Retired);
    let err = session.dispatch(call("c1", "echo")).await.err().unwrap();
    assert!(matches!(err, WayfareError::SessionClosed));
}

#[tokio::test]
async fn test_close_survives_failed_exit() {
    let session = session(RecordingBackend::new());
    let script = Script { fail_exit: true, ..Default::default() };
    let agent = ScriptedAgent::new("flight", session.chat_context().clone(), new_log(), script);
    session.start(Arc::new(agent)).await.unwrap();

    session.close().await.unwrap();
    assert_eq!(session.active_agent_name(), None);
}
