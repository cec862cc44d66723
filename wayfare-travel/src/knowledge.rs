//! Mock travel knowledge base.

use std::time::Duration;
use tracing::debug;

/// Policy summary returned for every query.
pub const FLIGHT_POLICY: &str = "Flight Policy Info: Changes are allowed up to 24 hours before departure with a fee. \
Baggage allowance: 1 checked bag (23kg) and 1 cabin bag per passenger. \
For international flights, please arrive 2 hours before your scheduled departure.";

/// Answers policy questions after a simulated lookup delay.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    latency: Duration,
}

impl KnowledgeBase {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    pub async fn search(&self, query: &str) -> String {
        debug!(query = %query, latency_ms = self.latency.as_millis() as u64, "Searching knowledge base");
        tokio::time::sleep(self.latency).await;
        format!("Searching the knowledge base for \"{query}\"...\n\n{FLIGHT_POLICY}")
    }
}

/// Instructions for the spoken update while a search is still running.
pub fn status_update_instructions(query: &str) -> String {
    format!(
        "You are searching the knowledge base for \"{query}\" but it is taking a little while.\n\
         Update the user on your progress, but be very brief."
    )
}
