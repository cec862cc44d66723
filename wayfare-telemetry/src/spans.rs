//! Span helpers for voice session operations
//!
//! Provides pre-configured spans for instrumenting agent activation, handoffs,
//! tool execution, and spoken status updates.

use tracing::Span;

/// Create a span for activating an agent (session update + `on_enter`)
///
/// # Example
/// ```
/// use wayfare_telemetry::agent_activation_span;
/// let span = agent_activation_span("flight_booking", "session-123");
/// let _enter = span.enter();
/// ```
pub fn agent_activation_span(agent_name: &str, session_id: &str) -> Span {
    tracing::info_span!("agent.activate", agent.name = agent_name, session.id = session_id)
}

/// Create a span covering a handoff between two agents
pub fn handoff_span(from_agent: &str, to_agent: &str) -> Span {
    tracing::info_span!("agent.handoff", handoff.from = from_agent, handoff.to = to_agent)
}

/// Create a span for tool execution
///
/// # Example
/// ```
/// use wayfare_telemetry::tool_execute_span;
/// let span = tool_execute_span("book_flight", "call_1");
/// let _enter = span.enter();
/// ```
pub fn tool_execute_span(tool_name: &str, call_id: &str) -> Span {
    tracing::info_span!("tool.execute", tool.name = tool_name, call_id = call_id)
}

/// Create a span for a spoken progress update during a slow operation
pub fn status_update_span(operation: &str) -> Span {
    tracing::info_span!("status.update", operation = operation)
}
