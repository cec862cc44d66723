//! A voice session with exactly one active agent.
//!
//! [`VoiceSession`] owns the shared [`ChatContext`] and a single active-agent
//! slot. Tool calls are dispatched one at a time to the active agent. When a
//! tool answers with [`ToolOutcome::Handoff`], the session:
//!
//! 1. stops routing tool calls to the outgoing agent,
//! 2. runs its `on_exit` hook (a failure is logged and the handoff continues),
//! 3. builds the target agent over the same shared history,
//! 4. pushes the target's instructions and tools to the backend and runs its
//!    `on_enter` hook,
//! 5. routes all further tool calls to the target.
//!
//! If step 4 fails the session is left without a responsive agent. That is
//! reported as [`WayfareError::ActivationFailed`] and logged at error level;
//! it is never retried.
//!
//! Closing the session also runs the active agent's `on_exit`.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fmt;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{Instrument, debug, error, info, warn};
use wayfare_core::{
    AgentContext, AgentPhase, ChatContext, ChatItem, HandoffTarget, RealtimeConfig, Result, Role,
    SharedBackend, ToolCall, ToolOutcome, VoiceAgent, WayfareError,
};
use wayfare_telemetry::{agent_activation_span, handoff_span, tool_execute_span};

/// One agent instance seen by the session, in activation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentRecord {
    /// Agent name.
    pub name: String,
    /// Current lifecycle phase.
    pub phase: AgentPhase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlotState {
    /// No agent has been started yet.
    Idle,
    /// An agent is accepting tool calls, or a handoff is in progress.
    Running,
    /// The last activation failed; nobody is accepting tool calls.
    Stalled,
    /// The session was closed.
    Closed,
}

struct AgentSlot {
    state: SlotState,
    active: Option<Arc<dyn VoiceAgent>>,
}

/// Builder for [`VoiceSession`].
#[derive(Default)]
pub struct VoiceSessionBuilder {
    backend: Option<SharedBackend>,
    chat_ctx: Option<ChatContext>,
    config: RealtimeConfig,
    session_id: Option<String>,
}

impl VoiceSessionBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the speech backend.
    pub fn backend(mut self, backend: SharedBackend) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Start from an existing history instead of an empty one.
    pub fn chat_context(mut self, chat_ctx: ChatContext) -> Self {
        self.chat_ctx = Some(chat_ctx);
        self
    }

    /// Base configuration (model, voice). Instructions and tools are filled in
    /// from whichever agent is active.
    pub fn config(mut self, config: RealtimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a fixed session ID instead of a generated one.
    pub fn session_id(mut self, id: impl Into<String>) -> Self {
        self.session_id = Some(id.into());
        self
    }

    /// Build the session (no agent is active yet).
    pub fn build(self) -> Result<VoiceSession> {
        let backend = self.backend.ok_or_else(|| WayfareError::config("Backend is required"))?;
        let id = self.session_id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        Ok(VoiceSession {
            ctx: AgentContext::new(id.clone(), backend.clone()),
            id,
            backend,
            chat_ctx: self.chat_ctx.unwrap_or_default(),
            config: self.config,
            slot: Mutex::new(AgentSlot { state: SlotState::Idle, active: None }),
            roster: RwLock::new(Vec::new()),
        })
    }
}

/// A conversation bound to one speech backend and one active agent at a time.
pub struct VoiceSession {
    id: String,
    backend: SharedBackend,
    ctx: AgentContext,
    chat_ctx: ChatContext,
    config: RealtimeConfig,
    slot: Mutex<AgentSlot>,
    roster: RwLock<Vec<AgentRecord>>,
}

impl fmt::Debug for VoiceSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VoiceSession")
            .field("id", &self.id)
            .field("history_len", &self.chat_ctx.len())
            .field("active_agent", &self.active_agent_name())
            .finish()
    }
}

impl VoiceSession {
    /// Create a new builder.
    pub fn builder() -> VoiceSessionBuilder {
        VoiceSessionBuilder::new()
    }

    /// Session ID.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The speech backend.
    pub fn backend(&self) -> &SharedBackend {
        &self.backend
    }

    /// Handle to the shared history.
    pub fn chat_context(&self) -> &ChatContext {
        &self.chat_ctx
    }

    /// Append a transcript line to the shared history.
    pub fn record_message(&self, role: Role, content: impl Into<String>) {
        self.chat_ctx.add_message(role, content);
    }

    /// Name of the agent currently accepting tool calls.
    pub fn active_agent_name(&self) -> Option<String> {
        self.roster
            .read()
            .iter()
            .find(|record| record.phase == AgentPhase::Active)
            .map(|record| record.name.clone())
    }

    /// Every agent instance the session has seen, oldest first.
    pub fn agents(&self) -> Vec<AgentRecord> {
        self.roster.read().clone()
    }

    /// Activate the first agent.
    ///
    /// The agent must have been built over this session's history.
    pub async fn start(&self, agent: Arc<dyn VoiceAgent>) -> Result<()> {
        let mut slot = self.slot.lock().await;
        match slot.state {
            SlotState::Idle => {}
            SlotState::Closed => return Err(WayfareError::SessionClosed),
            SlotState::Running | SlotState::Stalled => {
                return Err(WayfareError::config("Session already started"));
            }
        }
        if !agent.chat_context().same_history(&self.chat_ctx) {
            return Err(WayfareError::config(format!(
                "Agent {} does not share the session history",
                agent.name()
            )));
        }

        info!(session.id = %self.id, agent.name = agent.name(), "Starting voice session");
        slot.state = SlotState::Running;
        self.activate(&mut slot, agent).await
    }

    /// Dispatch a tool call to the active agent.
    ///
    /// Returns the value to send back to the model. A handoff answers with
    /// `{"status": "transferred", "agent": <name>}` once the target agent is
    /// active.
    pub async fn dispatch(&self, call: ToolCall) -> Result<Value> {
        let mut slot = self.slot.lock().await;
        let agent = match (slot.state, slot.active.clone()) {
            (SlotState::Closed, _) => return Err(WayfareError::SessionClosed),
            (_, Some(agent)) => agent,
            (_, None) => return Err(WayfareError::NoActiveAgent),
        };

        self.chat_ctx.push(ChatItem::FunctionCall {
            call_id: call.call_id.clone(),
            name: call.name.clone(),
            arguments: call.arguments.clone(),
        });

        let outcome = agent
            .invoke_tool(&self.ctx, &call)
            .instrument(tool_execute_span(&call.name, &call.call_id))
            .await;

        match outcome {
            Ok(ToolOutcome::Value(value)) => {
                self.record_output(&call, value.clone());
                Ok(value)
            }
            Ok(ToolOutcome::Handoff(target)) => {
                let value = json!({ "status": "transferred", "agent": target.name() });
                self.record_output(&call, value.clone());
                self.hand_off(&mut slot, agent, target).await?;
                Ok(value)
            }
            Err(e) => {
                debug!(tool.name = %call.name, error = %e, "Tool call failed");
                self.record_output(&call, json!({ "error": e.to_string() }));
                Err(e)
            }
        }
    }

    /// Close the session.
    ///
    /// The active agent gets its `on_exit` hook (a failure is logged) and is
    /// retired. Closing twice is a no-op.
    pub async fn close(&self) -> Result<()> {
        let mut slot = self.slot.lock().await;
        if slot.state == SlotState::Closed {
            return Ok(());
        }
        slot.state = SlotState::Closed;
        if let Some(agent) = slot.active.take() {
            if let Err(e) = agent.on_exit(&self.ctx).await {
                warn!(agent.name = agent.name(), error = %e, "on_exit failed while closing");
            }
            self.set_phase(agent.name(), AgentPhase::Retired);
        }
        info!(session.id = %self.id, "Voice session closed");
        Ok(())
    }

    async fn hand_off(
        &self,
        slot: &mut AgentSlot,
        outgoing: Arc<dyn VoiceAgent>,
        target: HandoffTarget,
    ) -> Result<()> {
        let span = handoff_span(outgoing.name(), target.name());
        async move {
            info!("Handing off");
            // Nobody accepts tool calls until the target is active.
            slot.active = None;

            if let Err(e) = outgoing.on_exit(&self.ctx).await {
                warn!(agent.name = outgoing.name(), error = %e, "on_exit failed; continuing handoff");
            }
            self.set_phase(outgoing.name(), AgentPhase::Retired);

            let incoming = target.build(self.chat_ctx.clone());
            self.activate(slot, incoming).await
        }
        .instrument(span)
        .await
    }

    async fn activate(&self, slot: &mut AgentSlot, agent: Arc<dyn VoiceAgent>) -> Result<()> {
        let name = agent.name().to_string();
        self.roster.write().push(AgentRecord { name: name.clone(), phase: AgentPhase::Pending });

        let config = self.config_for(agent.as_ref());
        let result = async {
            self.backend.update_session(&config).await?;
            agent.on_enter(&self.ctx).await
        }
        .instrument(agent_activation_span(&name, &self.id))
        .await;

        match result {
            Ok(()) => {
                self.set_phase(&name, AgentPhase::Active);
                slot.active = Some(agent);
                info!(agent.name = %name, "Agent active");
                Ok(())
            }
            Err(e) => {
                self.set_phase(&name, AgentPhase::Retired);
                slot.state = SlotState::Stalled;
                error!(
                    session.id = %self.id,
                    agent.name = %name,
                    error = %e,
                    "Agent failed to activate; session has no responsive agent"
                );
                Err(WayfareError::ActivationFailed { agent: name, message: e.to_string() })
            }
        }
    }

    fn config_for(&self, agent: &dyn VoiceAgent) -> RealtimeConfig {
        self.config.for_agent(agent.instructions(), agent.tools())
    }

    // Names are not unique across handoffs, so only the newest non-retired
    // record with this name is updated.
    fn set_phase(&self, name: &str, phase: AgentPhase) {
        let mut roster = self.roster.write();
        if let Some(record) = roster
            .iter_mut()
            .rev()
            .find(|record| record.name == name && record.phase != AgentPhase::Retired)
        {
            record.phase = phase;
        }
    }

    fn record_output(&self, call: &ToolCall, output: Value) {
        self.chat_ctx.push(ChatItem::FunctionOutput {
            call_id: call.call_id.clone(),
            name: call.name.clone(),
            output,
        });
    }
}
