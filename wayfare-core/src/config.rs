//! What the speech backend is told about the active agent.

use crate::tool::ToolDefinition;
use serde::{Deserialize, Serialize};

/// Output channel requested from the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Audio,
    Text,
}

/// Session settings pushed to the backend.
///
/// The session sends a fresh copy every time an agent becomes active, with
/// that agent's instruction and tools filled in over the base model and voice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RealtimeConfig {
    /// Model identifier, e.g. "gemini-2.5-flash-native-audio-preview-09-2025".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Output voice name, e.g. "Aoede".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,

    /// Instructions of the active agent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instruction: Option<String>,

    /// Empty means the backend default.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modalities: Vec<Modality>,

    /// Tools of the active agent.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ToolDefinition>,

    /// Sampling temperature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl RealtimeConfig {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the voice.
    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = Some(voice.into());
        self
    }

    /// Set the system instruction.
    pub fn with_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = Some(instruction.into());
        self
    }

    /// Speak only; no text channel.
    pub fn audio_only(mut self) -> Self {
        self.modalities = vec![Modality::Audio];
        self
    }

    /// Replace the tool list.
    pub fn with_tools(mut self, tools: Vec<ToolDefinition>) -> Self {
        self.tools = tools;
        self
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Base settings specialised for one agent.
    pub fn for_agent(&self, instruction: &str, tools: Vec<ToolDefinition>) -> Self {
        self.clone().with_instruction(instruction).with_tools(tools)
    }

    /// Tool names in declaration order.
    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(|tool| tool.name.as_str()).collect()
    }
}
