//! The conversational agent role.

use crate::backend::SharedBackend;
use crate::chat::ChatContext;
use crate::error::Result;
use crate::tool::{ToolCall, ToolDefinition, ToolOutcome};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Handle given to agents for the duration of a hook or tool call.
#[derive(Clone)]
pub struct AgentContext {
    session_id: String,
    backend: SharedBackend,
}

impl AgentContext {
    /// Create a context bound to a session and its backend.
    pub fn new(session_id: impl Into<String>, backend: SharedBackend) -> Self {
        Self { session_id: session_id.into(), backend }
    }

    /// Identifier of the owning session.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// The speech backend of the owning session.
    pub fn backend(&self) -> &SharedBackend {
        &self.backend
    }

    /// Ask the backend to speak a reply guided by `instructions`.
    pub async fn generate_reply(&self, instructions: &str) -> Result<()> {
        debug!(session.id = %self.session_id, chars = instructions.len(), "Requesting reply");
        self.backend.generate_reply(instructions).await
    }
}

impl fmt::Debug for AgentContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentContext").field("session_id", &self.session_id).finish()
    }
}

/// Lifecycle phase of an agent instance within a session.
///
/// Phases only move forward: `Pending -> Active -> Retired`. A retired
/// instance is never reactivated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentPhase {
    /// Built but not yet accepting tool calls.
    Pending,
    /// The one agent accepting tool calls.
    Active,
    /// Replaced by another agent, or its activation failed.
    Retired,
}

/// A participant in a voice session.
///
/// An agent carries instructions, a set of tools, and a handle to the shared
/// conversation history. The session calls [`on_enter`](VoiceAgent::on_enter)
/// once before routing any tool call to the agent, and
/// [`on_exit`](VoiceAgent::on_exit) once when the agent is being replaced.
#[async_trait]
pub trait VoiceAgent: Send + Sync {
    /// Agent name, used in logs and handoff results.
    fn name(&self) -> &str;

    /// System instructions for the model while this agent is active.
    fn instructions(&self) -> &str;

    /// The conversation history this agent reads and the session appends to.
    fn chat_context(&self) -> &ChatContext;

    /// Tools the model may call while this agent is active.
    fn tools(&self) -> Vec<ToolDefinition>;

    /// Called once when the agent becomes active.
    async fn on_enter(&self, _ctx: &AgentContext) -> Result<()> {
        Ok(())
    }

    /// Called once when the agent is being replaced by another.
    async fn on_exit(&self, _ctx: &AgentContext) -> Result<()> {
        Ok(())
    }

    /// Run the named tool from this agent's tool set.
    async fn invoke_tool(&self, ctx: &AgentContext, call: &ToolCall) -> Result<ToolOutcome>;
}
