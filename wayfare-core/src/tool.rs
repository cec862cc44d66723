//! Tool definitions, invocations, and results.

use crate::agent::VoiceAgent;
use crate::chat::ChatContext;
use crate::error::{Result, WayfareError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Tool/function definition advertised to the speech backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool name.
    pub name: String,
    /// Tool description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// JSON Schema for parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Value>,
}

impl ToolDefinition {
    /// Create a new tool definition.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), description: None, parameters: None }
    }

    /// Set the tool description.
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Set the parameters schema.
    pub fn with_parameters(mut self, schema: Value) -> Self {
        self.parameters = Some(schema);
        self
    }
}

/// A tool call requested by the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Unique call ID (used for responses).
    pub call_id: String,
    /// Tool/function name.
    pub name: String,
    /// Arguments as JSON.
    pub arguments: Value,
}

impl ToolCall {
    /// Create a new tool call.
    pub fn new(call_id: impl Into<String>, name: impl Into<String>, arguments: Value) -> Self {
        Self { call_id: call_id.into(), name: name.into(), arguments }
    }

    /// Deserialize the arguments into a typed parameter struct.
    pub fn parse_args<T: DeserializeOwned>(&self) -> Result<T> {
        // Tools without parameters are often called with `null` instead of `{}`.
        let arguments = match &self.arguments {
            Value::Null => Value::Object(Default::default()),
            other => other.clone(),
        };
        serde_json::from_value(arguments)
            .map_err(|e| WayfareError::invalid_arguments(&self.name, e.to_string()))
    }
}

/// A tool response to send back to the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResponse {
    /// The call ID being responded to.
    pub call_id: String,
    /// The result/output of the tool execution.
    pub output: Value,
}

impl ToolResponse {
    /// Create a new tool response.
    pub fn new(call_id: impl Into<String>, output: Value) -> Self {
        Self { call_id: call_id.into(), output }
    }

    /// Create an error response the model can read.
    pub fn error(call_id: impl Into<String>, error: &WayfareError) -> Self {
        Self { call_id: call_id.into(), output: serde_json::json!({ "error": error.to_string() }) }
    }
}

type AgentBuilder = Box<dyn FnOnce(ChatContext) -> Arc<dyn VoiceAgent> + Send>;

/// Request to move the session to another agent.
///
/// The target agent is built by the session, which hands it the shared
/// [`ChatContext`], so the incoming agent always observes the same history the
/// outgoing agent produced.
pub struct HandoffTarget {
    name: String,
    build: AgentBuilder,
}

impl HandoffTarget {
    /// Create a handoff to the agent produced by `build`.
    pub fn new<F>(name: impl Into<String>, build: F) -> Self
    where
        F: FnOnce(ChatContext) -> Arc<dyn VoiceAgent> + Send + 'static,
    {
        Self { name: name.into(), build: Box::new(build) }
    }

    /// Name of the agent that will be activated.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Build the target agent over the given history.
    pub fn build(self, chat_ctx: ChatContext) -> Arc<dyn VoiceAgent> {
        (self.build)(chat_ctx)
    }
}

impl fmt::Debug for HandoffTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandoffTarget").field("name", &self.name).finish()
    }
}

/// Result of a tool invocation.
#[derive(Debug)]
pub enum ToolOutcome {
    /// A value serialized back to the model.
    Value(Value),
    /// Transfer the session to another agent.
    Handoff(HandoffTarget),
}

impl ToolOutcome {
    /// Serialize any value into a [`ToolOutcome::Value`].
    pub fn value(value: impl Serialize) -> Result<Self> {
        Ok(Self::Value(serde_json::to_value(value)?))
    }

    /// Whether this outcome requests a handoff.
    pub fn is_handoff(&self) -> bool {
        matches!(self, Self::Handoff(_))
    }
}
