//! The hotel booking agent, reached by handoff from the flight agent.

use crate::booking::HotelRequest;
use crate::extract::{ContextExtractor, FactSet};
use crate::services::TravelServices;
use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info};
use wayfare_core::{
    AgentContext, ChatContext, Result, ToolCall, ToolDefinition, ToolOutcome, VoiceAgent, WayfareError,
};

pub const HOTEL_AGENT_NAME: &str = "hotel_booking";

const INSTRUCTIONS: &str = "You are a helpful hotel booking AI assistant. You can help users book hotels for their travel.

When a user wants to book a hotel, ask them for:
1. City/location where they need the hotel
2. Check-in date
3. Check-out date
4. Number of guests
5. Room preferences (optional)

Then use the book_hotel tool to complete their booking. Be friendly, professional, and helpful.";

const GOODBYE: &str = "Say a friendly goodbye and thank the user for their hotel booking.";

/// Books hotels, using whatever the flight conversation already established.
pub struct HotelBookingAgent {
    chat_ctx: ChatContext,
    services: TravelServices,
}

impl HotelBookingAgent {
    pub fn new(chat_ctx: ChatContext, services: TravelServices) -> Self {
        Self { chat_ctx, services }
    }

    /// Flight facts visible in the shared history right now.
    pub fn flight_context(&self) -> FactSet {
        ContextExtractor::extract(&self.chat_ctx.messages())
    }

    fn greeting(facts: &FactSet) -> String {
        format!(
            "Greet the user and ask for their hotel booking details which are not provided in the context:\n\n\
             {}\n\n\
             Be friendly and helpful in collecting this information. If the user has already booked a flight, \
             use that information to make relevant suggestions.",
            facts.briefing().unwrap_or_default()
        )
    }
}

#[async_trait]
impl VoiceAgent for HotelBookingAgent {
    fn name(&self) -> &str {
        HOTEL_AGENT_NAME
    }

    fn instructions(&self) -> &str {
        INSTRUCTIONS
    }

    fn chat_context(&self) -> &ChatContext {
        &self.chat_ctx
    }

    fn tools(&self) -> Vec<ToolDefinition> {
        vec![
            ToolDefinition::new("book_hotel")
                .with_description("Book a hotel in a specific city for the given dates.")
                .with_parameters(json!({
                    "type": "object",
                    "properties": {
                        "city": {
                            "type": "string",
                            "description": "City where the hotel is located"
                        },
                        "check_in_date": {
                            "type": "string",
                            "description": "Check-in date (e.g., 'January 15, 2025', '2025-01-15', 'tomorrow')"
                        },
                        "check_out_date": {
                            "type": "string",
                            "description": "Check-out date (e.g., 'January 18, 2025', '2025-01-18', '3 days later')"
                        },
                        "guests": {
                            "type": "integer",
                            "minimum": 1,
                            "description": "Number of guests"
                        },
                        "room_type": {
                            "type": "string",
                            "default": "standard",
                            "description": "Type of room (standard, deluxe, suite, etc.)"
                        }
                    },
                    "required": ["city", "check_in_date", "check_out_date", "guests"]
                })),
        ]
    }

    async fn on_enter(&self, ctx: &AgentContext) -> Result<()> {
        let facts = self.flight_context();
        info!(
            history_len = self.chat_ctx.len(),
            destination = ?facts.destination,
            date = ?facts.date,
            confirmed = facts.confirmed,
            "Hotel booking agent activated"
        );
        if let Some(briefing) = facts.briefing() {
            debug!(briefing = %briefing, "Flight context for hotel booking");
        }
        ctx.generate_reply(&Self::greeting(&facts)).await
    }

    async fn on_exit(&self, ctx: &AgentContext) -> Result<()> {
        ctx.generate_reply(GOODBYE).await
    }

    async fn invoke_tool(&self, _ctx: &AgentContext, call: &ToolCall) -> Result<ToolOutcome> {
        match call.name.as_str() {
            "book_hotel" => {
                let request: HotelRequest = call.parse_args()?;
                ToolOutcome::value(self.services.desk.book_hotel(&request))
            }
            other => Err(WayfareError::UnknownTool(other.to_string())),
        }
    }
}
