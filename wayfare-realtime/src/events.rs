//! Events received from the speech backend.
//!
//! A provider adapter translates its wire events into [`ServerEvent`]s and
//! feeds them to a [`RealtimeRunner`](crate::runner::RealtimeRunner).

use serde::{Deserialize, Serialize};

/// Events received from the realtime server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerEvent {
    /// Final transcript of something the user said.
    #[serde(rename = "input_transcript")]
    InputTranscript {
        /// Transcribed text.
        text: String,
    },

    /// Final transcript of something the assistant said.
    #[serde(rename = "output_transcript")]
    OutputTranscript {
        /// Transcribed text.
        text: String,
    },

    /// The model finished emitting a function call.
    #[serde(rename = "response.function_call_arguments.done")]
    FunctionCallDone {
        /// Call ID to respond to.
        call_id: String,
        /// Function name.
        name: String,
        /// Complete arguments (JSON string).
        arguments: String,
    },

    /// A response turn completed.
    #[serde(rename = "response.done")]
    ResponseDone,

    /// Error reported by the server.
    #[serde(rename = "error")]
    Error {
        /// Error code, if the provider sends one.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        code: Option<String>,
        /// Error message.
        message: String,
    },

    /// The server ended the session.
    #[serde(rename = "session.closed")]
    SessionClosed,
}

impl ServerEvent {
    /// Shorthand for a user transcript event.
    pub fn user(text: impl Into<String>) -> Self {
        Self::InputTranscript { text: text.into() }
    }

    /// Shorthand for an assistant transcript event.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::OutputTranscript { text: text.into() }
    }

    /// Shorthand for a function call event.
    pub fn function_call(
        call_id: impl Into<String>,
        name: impl Into<String>,
        arguments: impl Into<String>,
    ) -> Self {
        Self::FunctionCallDone {
            call_id: call_id.into(),
            name: name.into(),
            arguments: arguments.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_call_deserialization() {
        let json = r#"{
            "type": "response.function_call_arguments.done",
            "call_id": "call_abc",
            "name": "book_flight",
            "arguments": "{\"source\":\"NYC\"}"
        }"#;

        let event: ServerEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event, ServerEvent::function_call("call_abc", "book_flight", r#"{"source":"NYC"}"#));
    }

    #[test]
    fn test_error_without_code() {
        let event: ServerEvent =
            serde_json::from_str(r#"{"type": "error", "message": "rate limited"}"#).unwrap();
        assert_eq!(event, ServerEvent::Error { code: None, message: "rate limited".into() });
    }

    #[test]
    fn test_unit_variants() {
        let json = serde_json::to_string(&ServerEvent::ResponseDone).unwrap();
        assert_eq!(json, r#"{"type":"response.done"}"#);
    }
}
