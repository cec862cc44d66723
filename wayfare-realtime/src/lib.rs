//! # wayfare-realtime
//!
//! Session runtime for voice agents built on `wayfare-core`.
//!
//! ## Architecture
//!
//! ```text
//!   provider events ──► RealtimeRunner ──► VoiceSession ──► active VoiceAgent
//!                           │                  │                 │
//!                           │                  │ handoff         │ slow tool
//!                           ▼                  ▼                 ▼
//!                     SpeechBackend      next VoiceAgent   SlowOperationNotifier
//! ```
//!
//! - [`VoiceSession`] keeps exactly one agent accepting tool calls and performs
//!   handoffs (`on_exit`, then build + `on_enter` over the shared history).
//! - [`RealtimeRunner`] turns backend events into history entries and tool
//!   dispatches.
//! - [`SlowOperationNotifier`] speaks a progress update when a tool takes too
//!   long, and never after the tool has returned.

pub mod events;
pub mod notify;
pub mod runner;
pub mod session;

pub use events::ServerEvent;
pub use notify::SlowOperationNotifier;
pub use runner::{EventHandler, NoOpEventHandler, RealtimeRunner, RealtimeRunnerBuilder, RunnerConfig};
pub use session::{AgentRecord, VoiceSession, VoiceSessionBuilder};
