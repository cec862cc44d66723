//! Error types shared by every Wayfare crate.

use thiserror::Error;

/// Result type for Wayfare operations.
pub type Result<T> = std::result::Result<T, WayfareError>;

/// Errors that can occur while running a voice session.
#[derive(Error, Debug)]
pub enum WayfareError {
    /// The speech backend could not be reached or rejected a request.
    #[error("Backend error: {0}")]
    Backend(String),

    /// A tool ran but failed.
    #[error("Tool error ({tool}): {message}")]
    Tool {
        /// Name of the failing tool.
        tool: String,
        /// Failure description.
        message: String,
    },

    /// The active agent has no tool with this name.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Tool arguments did not match the tool's schema.
    #[error("Invalid arguments for {tool}: {message}")]
    InvalidArguments {
        /// Name of the tool.
        tool: String,
        /// What was wrong with the arguments.
        message: String,
    },

    /// A lifecycle hook (`on_enter` / `on_exit`) failed.
    #[error("Hook {hook} failed for agent {agent}: {message}")]
    Hook {
        /// Agent whose hook failed.
        agent: String,
        /// Hook name.
        hook: &'static str,
        /// Failure description.
        message: String,
    },

    /// An agent could not be activated. The session has no responsive agent.
    #[error("Agent {agent} failed to activate: {message}")]
    ActivationFailed {
        /// Agent that failed to activate.
        agent: String,
        /// Failure description.
        message: String,
    },

    /// No agent is currently accepting tool calls.
    #[error("No active agent")]
    NoActiveAgent,

    /// The session was already closed.
    #[error("Session already closed")]
    SessionClosed,

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl WayfareError {
    /// Create a new backend error.
    pub fn backend<S: Into<String>>(msg: S) -> Self {
        Self::Backend(msg.into())
    }

    /// Create a new tool error.
    pub fn tool<T: Into<String>, M: Into<String>>(tool: T, message: M) -> Self {
        Self::Tool { tool: tool.into(), message: message.into() }
    }

    /// Create a new invalid-arguments error.
    pub fn invalid_arguments<T: Into<String>, M: Into<String>>(tool: T, message: M) -> Self {
        Self::InvalidArguments { tool: tool.into(), message: message.into() }
    }

    /// Create a new hook error.
    pub fn hook<A: Into<String>, M: Into<String>>(agent: A, hook: &'static str, message: M) -> Self {
        Self::Hook { agent: agent.into(), hook, message: message.into() }
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Whether this error leaves the session unable to continue.
    ///
    /// Per-call failures (bad arguments, a failing tool) are reported back to the
    /// model; everything else ends the current run.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Backend(_) | Self::ActivationFailed { .. } | Self::NoActiveAgent | Self::SessionClosed
        )
    }
}
