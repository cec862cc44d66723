//! Tests for the event loop that feeds a session.

mod common;

use async_trait::async_trait;
use common::{RecordingBackend, Script, ScriptedAgent, handoff_script, new_log};
use futures::stream;
use parking_lot::Mutex;
use std::sync::Arc;
use wayfare_core::{Message, Role, WayfareError};
use wayfare_realtime::{EventHandler, RealtimeRunner, ServerEvent, VoiceSession};

async fn started_session(backend: Arc<RecordingBackend>, script: Script) -> Arc<VoiceSession> {
    let session = Arc::new(VoiceSession::builder().backend(backend).build().unwrap());
    let agent = ScriptedAgent::new("flight", session.chat_context().clone(), new_log(), script);
    session.start(Arc::new(agent)).await.unwrap();
    session
}

#[derive(Clone, Default)]
struct CountingHandler {
    errors: Arc<Mutex<Vec<String>>>,
    transcripts: Arc<Mutex<Vec<(Role, String)>>>,
}

#[async_trait]
impl EventHandler for CountingHandler {
    async fn on_transcript(&self, role: Role, text: &str) {
        self.transcripts.lock().push((role, text.to_string()));
    }

    async fn on_error(&self, error: &WayfareError) {
        self.errors.lock().push(error.to_string());
    }
}

#[tokio::test]
async fn test_transcripts_are_recorded() {
    let backend = RecordingBackend::new();
    let session = started_session(backend, Script::default()).await;
    let handler = CountingHandler::default();
    let runner =
        RealtimeRunner::builder().session(session.clone()).event_handler(handler.clone()).build().unwrap();

    let events = stream::iter(vec![
        Ok(ServerEvent::user("I need a flight to Paris")),
        Ok(ServerEvent::assistant("Where are you flying from?")),
        Ok(ServerEvent::ResponseDone),
    ]);
    runner.run(events).await.unwrap();

    assert_eq!(
        session.chat_context().messages(),
        vec![Message::user("I need a flight to Paris"), Message::assistant("Where are you flying from?")]
    );
    assert_eq!(handler.transcripts.lock().len(), 2);
}

#[tokio::test]
async fn test_function_calls_are_answered() {
    let backend = RecordingBackend::new();
    let session = started_session(backend.clone(), Script::default()).await;
    let runner = RealtimeRunner::builder().session(session).build().unwrap();

    let events = stream::iter(vec![
        Ok(ServerEvent::function_call("call_1", "echo", r#"{"city":"Paris"}"#)),
        Ok(ServerEvent::function_call("call_2", "teleport", "{}")),
        Ok(ServerEvent::function_call("call_3", "echo", "not json")),
    ]);
    runner.run(events).await.unwrap();

    let responses = backend.responses();
    assert_eq!(responses.len(), 3);
    assert_eq!(responses[0].call_id, "call_1");
    assert_eq!(responses[0].output, serde_json::json!({"city": "Paris"}));
    assert_eq!(responses[1].output["error"], "Unknown tool: teleport");
    let malformed = responses[2].output["error"].as_str().unwrap();
    assert!(malformed.starts_with("Invalid arguments for echo: "), "{malformed}");
}

#[tokio::test]
async fn test_session_closed_stops_the_loop() {
    let backend = RecordingBackend::new();
    let session = started_session(backend.clone(), Script::default()).await;
    let runner = RealtimeRunner::builder().session(session.clone()).build().unwrap();

    let events = stream::iter(vec![
        Ok(ServerEvent::SessionClosed),
        Ok(ServerEvent::function_call("call_1", "echo", "{}")),
    ]);
    runner.run(events).await.unwrap();

    assert!(backend.responses().is_empty());
    assert_eq!(session.active_agent_name(), None);
}

#[tokio::test]
async fn test_failed_activation_ends_the_run() {
    let backend = RecordingBackend::new();
    let script = handoff_script("hotel", Script { fail_enter: true, ..Default::default() });
    let session = started_session(backend.clone(), script).await;
    let handler = CountingHandler::default();
    let runner = RealtimeRunner::builder().session(session).event_handler(handler.clone()).build().unwrap();

    let events = stream::iter(vec![
        Ok(ServerEvent::function_call("call_1", "transfer", "")),
        Ok(ServerEvent::function_call("call_2", "echo", "{}")),
    ]);
    let err = runner.run(events).await.err().unwrap();

    assert!(matches!(err, WayfareError::ActivationFailed { .. }));
    assert!(backend.responses().is_empty());
    assert_eq!(handler.errors.lock().len(), 1);
}

#[tokio::test]
async fn test_server_errors_are_not_fatal() {
    let backend = RecordingBackend::new();
    let session = started_session(backend.clone(), Script::default()).await;
    let handler = CountingHandler::default();
    let runner = RealtimeRunner::builder().session(session).event_handler(handler.clone()).build().unwrap();

    let events = stream::iter(vec![
        Ok(ServerEvent::Error { code: Some("429".into()), message: "slow down".into() }),
        Ok(ServerEvent::function_call("call_1", "echo", "{}")),
    ]);
    runner.run(events).await.unwrap();

    assert_eq!(*handler.errors.lock(), vec!["Backend error: 429 - slow down".to_string()]);
    assert_eq!(backend.responses().len(), 1);
}

#[tokio::test]
async fn test_stream_error_is_returned() {
    let session = started_session(RecordingBackend::new(), Script::default()).await;
    let runner = RealtimeRunner::builder().session(session).build().unwrap();

    let events = stream::iter(vec![Err(WayfareError::backend("socket closed"))]);
    let err = runner.run(events).await.err().unwrap();
    assert!(matches!(err, WayfareError::Backend(_)));
}

#[test]
fn test_builder_requires_session() {
    assert!(RealtimeRunner::builder().build().is_err());
}
