//! Boundary to the realtime speech/LLM service.

use crate::config::RealtimeConfig;
use crate::error::Result;
use crate::tool::ToolResponse;
use async_trait::async_trait;
use std::sync::Arc;

/// The realtime speech/LLM service a session talks to.
///
/// Implementations wrap a provider connection (Gemini Live, OpenAI Realtime, a
/// telephony bridge, or a console for local runs). Every method suspends the
/// caller until the backend has accepted the request. A failure means the
/// backend is unavailable and is fatal to the current turn; the core never
/// retries.
#[async_trait]
pub trait SpeechBackend: Send + Sync {
    /// Replace the session configuration (instructions, tools, voice).
    async fn update_session(&self, config: &RealtimeConfig) -> Result<()>;

    /// Ask the model to speak a reply guided by `instructions`.
    async fn generate_reply(&self, instructions: &str) -> Result<()>;

    /// Return a tool result to the model.
    async fn send_tool_response(&self, response: ToolResponse) -> Result<()>;
}

/// A shared backend type for dynamic dispatch.
pub type SharedBackend = Arc<dyn SpeechBackend>;
