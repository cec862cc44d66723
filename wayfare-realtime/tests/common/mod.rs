//! Shared test doubles for session and runner tests.

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use wayfare_core::{
    AgentContext, ChatContext, HandoffTarget, RealtimeConfig, Result, SpeechBackend, ToolCall,
    ToolDefinition, ToolOutcome, ToolResponse, VoiceAgent, WayfareError,
};

/// Backend that records every request and can be told to fail replies.
#[derive(Default)]
pub struct RecordingBackend {
    pub replies: Mutex<Vec<String>>,
    pub configs: Mutex<Vec<RealtimeConfig>>,
    pub responses: Mutex<Vec<ToolResponse>>,
    pub fail_replies: AtomicBool,
}

impl RecordingBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn replies(&self) -> Vec<String> {
        self.replies.lock().clone()
    }

    pub fn responses(&self) -> Vec<ToolResponse> {
        self.responses.lock().clone()
    }

    pub fn last_instruction(&self) -> Option<String> {
        self.configs.lock().last().and_then(|c| c.instruction.clone())
    }
}

#[async_trait]
impl SpeechBackend for RecordingBackend {
    async fn update_session(&self, config: &RealtimeConfig) -> Result<()> {
        self.configs.lock().push(config.clone());
        Ok(())
    }

    async fn generate_reply(&self, instructions: &str) -> Result<()> {
        if self.fail_replies.load(Ordering::SeqCst) {
            return Err(WayfareError::backend("speech backend unavailable"));
        }
        self.replies.lock().push(instructions.to_string());
        Ok(())
    }

    async fn send_tool_response(&self, response: ToolResponse) -> Result<()> {
        self.responses.lock().push(response);
        Ok(())
    }
}

/// Lifecycle log shared by every agent built in a test.
pub type EventLog = Arc<Mutex<Vec<String>>>;

/// How a scripted agent behaves.
#[derive(Clone, Default)]
pub struct Script {
    pub fail_enter: bool,
    pub fail_exit: bool,
    /// Name and script of the agent the `transfer` tool hands off to.
    pub next: Option<(String, Box<Script>)>,
}

/// Agent whose behaviour is driven by a [`Script`].
pub struct ScriptedAgent {
    name: String,
    chat_ctx: ChatContext,
    log: EventLog,
    script: Script,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

impl ScriptedAgent {
    pub fn new(name: &str, chat_ctx: ChatContext, log: EventLog, script: Script) -> Self {
        Self {
            name: name.to_string(),
            chat_ctx,
            log,
            script,
            in_flight: Arc::new(AtomicUsize::new(0)),
            max_in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn max_in_flight(&self) -> Arc<AtomicUsize> {
        self.max_in_flight.clone()
    }

    fn note(&self, event: &str) {
        self.log.lock().push(format!("{}:{}", self.name, event));
    }
}

#[async_trait]
impl VoiceAgent for ScriptedAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn instructions(&self) -> &str {
        "You are a scripted test agent."
    }

    fn chat_context(&self) -> &ChatContext {
        &self.chat_ctx
    }

    fn tools(&self) -> Vec<ToolDefinition> {
        vec![ToolDefinition::new("echo"), ToolDefinition::new("slow"), ToolDefinition::new("transfer")]
    }

    async fn on_enter(&self, ctx: &AgentContext) -> Result<()> {
        self.note("enter");
        if self.script.fail_enter {
            return Err(WayfareError::hook(&self.name, "on_enter", "greeting failed"));
        }
        ctx.generate_reply(&format!("greet from {}", self.name)).await
    }

    async fn on_exit(&self, _ctx: &AgentContext) -> Result<()> {
        self.note("exit");
        if self.script.fail_exit {
            return Err(WayfareError::hook(&self.name, "on_exit", "goodbye failed"));
        }
        Ok(())
    }

    async fn invoke_tool(&self, _ctx: &AgentContext, call: &ToolCall) -> Result<ToolOutcome> {
        self.note(&format!("tool {}", call.name));
        match call.name.as_str() {
            "echo" => Ok(ToolOutcome::Value(call.arguments.clone())),
            "slow" => {
                let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                self.max_in_flight.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(100)).await;
                self.in_flight.fetch_sub(1, Ordering::SeqCst);
                Ok(ToolOutcome::Value(serde_json::json!({ "slow": true })))
            }
            "transfer" => {
                let (name, script) = self
                    .script
                    .next
                    .clone()
                    .ok_or_else(|| WayfareError::tool("transfer", "no handoff target"))?;
                let log = self.log.clone();
                let target = name.clone();
                Ok(ToolOutcome::Handoff(HandoffTarget::new(name, move |chat_ctx| {
                    Arc::new(ScriptedAgent::new(&target, chat_ctx, log, *script))
                        as Arc<dyn VoiceAgent>
                })))
            }
            other => Err(WayfareError::UnknownTool(other.to_string())),
        }
    }
}

pub fn new_log() -> EventLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn handoff_script(next: &str, next_script: Script) -> Script {
    Script { next: Some((next.to_string(), Box::new(next_script))), ..Default::default() }
}
