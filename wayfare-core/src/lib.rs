//! # wayfare-core
//!
//! Core traits and types for Wayfare voice agents.
//!
//! ## Overview
//!
//! - [`VoiceAgent`] - A participant with instructions, tools, and lifecycle hooks
//! - [`ChatContext`] - Shared, append-only conversation history
//! - [`ToolCall`] / [`ToolOutcome`] - Tool invocations and their results, including handoffs
//! - [`SpeechBackend`] - The realtime speech/LLM service boundary
//! - [`WayfareError`] / [`Result`] - Unified error handling
//!
//! ## Handoff
//!
//! A tool returns [`ToolOutcome::Handoff`] to move the session to another
//! agent. The target is described by a [`HandoffTarget`], which the session
//! builds over the shared history once the outgoing agent has exited:
//!
//! ```rust,ignore
//! Ok(ToolOutcome::Handoff(HandoffTarget::new("hotel_booking", |chat_ctx| {
//!     Arc::new(HotelBookingAgent::new(chat_ctx)) as Arc<dyn VoiceAgent>
//! })))
//! ```

pub mod agent;
pub mod backend;
pub mod chat;
pub mod config;
pub mod error;
pub mod tool;

pub use agent::{AgentContext, AgentPhase, VoiceAgent};
pub use backend::{SharedBackend, SpeechBackend};
pub use chat::{ChatContext, ChatItem, Message, Role};
pub use config::{Modality, RealtimeConfig};
pub use error::{Result, WayfareError};
pub use tool::{HandoffTarget, ToolCall, ToolDefinition, ToolOutcome, ToolResponse};
