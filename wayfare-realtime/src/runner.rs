//! RealtimeRunner for feeding a voice session from backend events.
//!
//! The runner is the bridge between a provider's event stream and a
//! [`VoiceSession`]: transcripts are appended to the shared history, function
//! calls are dispatched to the active agent one at a time, and tool results are
//! sent back through the backend.

use crate::events::ServerEvent;
use crate::session::VoiceSession;
use async_trait::async_trait;
use futures::{Stream, StreamExt};
use serde_json::Value;
use std::ops::ControlFlow;
use std::sync::Arc;
use tracing::{debug, warn};
use wayfare_core::{Result, Role, ToolCall, ToolResponse, WayfareError};

/// Event handler for observing what the runner does.
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Called when a transcript line is recorded.
    async fn on_transcript(&self, _role: Role, _text: &str) {}

    /// Called after a tool call has produced its output.
    async fn on_tool_result(&self, _call: &ToolCall, _output: &Value) {}

    /// Called when a response completes.
    async fn on_response_done(&self) {}

    /// Called on any error, fatal or not.
    async fn on_error(&self, _error: &WayfareError) {}
}

/// Default no-op event handler.
#[derive(Debug, Clone, Default)]
pub struct NoOpEventHandler;

#[async_trait]
impl EventHandler for NoOpEventHandler {}

/// Configuration for the RealtimeRunner.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Whether to automatically send tool responses to the backend.
    pub auto_respond_tools: bool,
    /// Whether to append transcripts to the shared history.
    pub record_transcripts: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self { auto_respond_tools: true, record_transcripts: true }
    }
}

/// Builder for RealtimeRunner.
#[derive(Default)]
pub struct RealtimeRunnerBuilder {
    session: Option<Arc<VoiceSession>>,
    runner_config: RunnerConfig,
    event_handler: Option<Arc<dyn EventHandler>>,
}

impl RealtimeRunnerBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the session to drive.
    pub fn session(mut self, session: Arc<VoiceSession>) -> Self {
        self.session = Some(session);
        self
    }

    /// Set the runner configuration.
    pub fn runner_config(mut self, config: RunnerConfig) -> Self {
        self.runner_config = config;
        self
    }

    /// Set the event handler.
    pub fn event_handler(mut self, handler: impl EventHandler + 'static) -> Self {
        self.event_handler = Some(Arc::new(handler));
        self
    }

    /// Build the runner.
    pub fn build(self) -> Result<RealtimeRunner> {
        let session = self.session.ok_or_else(|| WayfareError::config("Session is required"))?;
        Ok(RealtimeRunner {
            session,
            runner_config: self.runner_config,
            event_handler: self.event_handler.unwrap_or_else(|| Arc::new(NoOpEventHandler)),
        })
    }
}

/// A runner that routes backend events into a [`VoiceSession`].
///
/// # Example
///
/// ```rust,ignore
/// let session = Arc::new(VoiceSession::builder().backend(backend).build()?);
/// session.start(Arc::new(FlightBookingAgent::new(session.chat_context().clone()))).await?;
///
/// let runner = RealtimeRunner::builder().session(session).build()?;
/// runner.run(provider_events).await?;
/// ```
pub struct RealtimeRunner {
    session: Arc<VoiceSession>,
    runner_config: RunnerConfig,
    event_handler: Arc<dyn EventHandler>,
}

impl RealtimeRunner {
    /// Create a new builder.
    pub fn builder() -> RealtimeRunnerBuilder {
        RealtimeRunnerBuilder::new()
    }

    /// The driven session.
    pub fn session(&self) -> &Arc<VoiceSession> {
        &self.session
    }

    /// Run the event loop until the stream ends, the server closes the
    /// session, or a fatal error occurs.
    pub async fn run<S>(&self, events: S) -> Result<()>
    where
        S: Stream<Item = Result<ServerEvent>> + Send,
    {
        futures::pin_mut!(events);
        while let Some(event) = events.next().await {
            match event {
                Ok(event) => {
                    if self.handle_event(event).await?.is_break() {
                        break;
                    }
                }
                Err(e) => {
                    self.event_handler.on_error(&e).await;
                    return Err(e);
                }
            }
        }
        Ok(())
    }

    /// Process a single event.
    pub async fn handle_event(&self, event: ServerEvent) -> Result<ControlFlow<()>> {
        match event {
            ServerEvent::InputTranscript { text } => self.record(Role::User, &text).await,
            ServerEvent::OutputTranscript { text } => self.record(Role::Assistant, &text).await,
            ServerEvent::FunctionCallDone { call_id, name, arguments } => {
                self.execute_tool_call(&call_id, &name, &arguments).await?;
            }
            ServerEvent::ResponseDone => {
                self.event_handler.on_response_done().await;
            }
            ServerEvent::Error { code, message } => {
                let err = WayfareError::backend(match code {
                    Some(code) => format!("{code} - {message}"),
                    None => message,
                });
                warn!(error = %err, "Server reported an error");
                self.event_handler.on_error(&err).await;
            }
            ServerEvent::SessionClosed => {
                self.session.close().await?;
                return Ok(ControlFlow::Break(()));
            }
        }
        Ok(ControlFlow::Continue(()))
    }

    async fn record(&self, role: Role, text: &str) {
        if self.runner_config.record_transcripts {
            self.session.record_message(role, text);
        }
        self.event_handler.on_transcript(role, text).await;
    }

    /// Execute a tool call and optionally send the response.
    async fn execute_tool_call(&self, call_id: &str, name: &str, arguments: &str) -> Result<()> {
        let parsed = if arguments.trim().is_empty() {
            Ok(Value::Object(Default::default()))
        } else {
            serde_json::from_str(arguments).map_err(|e| {
                debug!(tool.name = name, error = %e, "Unparseable tool arguments");
                WayfareError::invalid_arguments(name, e.to_string())
            })
        };
        let call = ToolCall::new(call_id, name, parsed.as_ref().cloned().unwrap_or(Value::Null));

        let result = match parsed {
            Ok(_) => self.session.dispatch(call.clone()).await,
            Err(e) => Err(e),
        };
        let output = match result {
            Ok(value) => value,
            Err(e) if e.is_fatal() => {
                self.event_handler.on_error(&e).await;
                return Err(e);
            }
            Err(e) => {
                self.event_handler.on_error(&e).await;
                ToolResponse::error(call_id, &e).output
            }
        };
        self.event_handler.on_tool_result(&call, &output).await;

        if self.runner_config.auto_respond_tools {
            self.session.backend().send_tool_response(ToolResponse::new(call_id, output)).await?;
        }
        Ok(())
    }
}
