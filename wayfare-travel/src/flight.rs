//! The flight booking agent, first in every travel session.

use crate::booking::FlightRequest;
use crate::hotel::{HOTEL_AGENT_NAME, HotelBookingAgent};
use crate::knowledge::status_update_instructions;
use crate::services::TravelServices;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use wayfare_core::{
    AgentContext, ChatContext, HandoffTarget, Result, ToolCall, ToolDefinition, ToolOutcome, VoiceAgent,
    WayfareError,
};
use wayfare_realtime::SlowOperationNotifier;

pub const FLIGHT_AGENT_NAME: &str = "flight_booking";

const INSTRUCTIONS: &str = "You are a helpful flight booking AI assistant. You can help users book flights and also transfer them to hotel booking if needed.

If a user asks a question about flights, airlines, airports, travel policies, or need general information, use the search_knowledge_base tool to search the knowledge base and provide the information.

When a user wants to book a flight, ask them for:
1. Departure city/airport (source)
2. Destination city/airport (destination)
3. Travel date

Then use the book_flight tool to complete their booking. If they also need hotel booking, use the transfer_to_hotel_booking tool. Be friendly, professional, and helpful.";

const GREETING: &str =
    "Greet the user and ask for their flight booking details which are not provided in the context.";

#[derive(Debug, Deserialize)]
struct SearchArgs {
    query: String,
}

/// Books flights, answers policy questions, and hands over to hotel booking.
pub struct FlightBookingAgent {
    chat_ctx: ChatContext,
    services: TravelServices,
}

impl FlightBookingAgent {
    pub fn new(chat_ctx: ChatContext, services: TravelServices) -> Self {
        Self { chat_ctx, services }
    }

    async fn search_knowledge_base(&self, ctx: &AgentContext, query: String) -> String {
        let instructions = status_update_instructions(&query);
        SlowOperationNotifier::new(self.services.status_update_delay)
            .with_label("search_knowledge_base")
            .run(self.services.knowledge.search(&query), move || async move {
                ctx.generate_reply(&instructions).await
            })
            .await
    }

    fn transfer_to_hotel_booking(&self) -> HandoffTarget {
        let services = self.services.clone();
        HandoffTarget::new(HOTEL_AGENT_NAME, move |chat_ctx| {
            Arc::new(HotelBookingAgent::new(chat_ctx, services)) as Arc<dyn VoiceAgent>
        })
    }
}

#[async_trait]
impl VoiceAgent for FlightBookingAgent {
    fn name(&self) -> &str {
        FLIGHT_AGENT_NAME
    }

    fn instructions(&self) -> &str {
        INSTRUCTIONS
    }

    fn chat_context(&self) -> &ChatContext {
        &self.chat_ctx
    }

    fn tools(&self) -> Vec<ToolDefinition> {
        vec![
            ToolDefinition::new("search_knowledge_base")
                .with_description("Search the knowledge base for relevant information.")
                .with_parameters(json!({
                    "type": "object",
                    "properties": {
                        "query": {
                            "type": "string",
                            "description": "The query to search the knowledge base for"
                        }
                    },
                    "required": ["query"]
                })),
            ToolDefinition::new("book_flight")
                .with_description("Book a flight from source to destination on a specific date.")
                .with_parameters(json!({
                    "type": "object",
                    "properties": {
                        "source": {
                            "type": "string",
                            "description": "Departure city/airport (e.g., 'New York', 'LAX', 'London')"
                        },
                        "destination": {
                            "type": "string",
                            "description": "Arrival city/airport (e.g., 'Los Angeles', 'JFK', 'Paris')"
                        },
                        "date": {
                            "type": "string",
                            "description": "Travel date (e.g., 'January 15, 2025', '2025-01-15', 'tomorrow')"
                        }
                    },
                    "required": ["source", "destination", "date"]
                })),
            ToolDefinition::new("transfer_to_hotel_booking")
                .with_description("Transfer the user to a hotel booking specialist for hotel reservations.")
                .with_parameters(json!({ "type": "object", "properties": {} })),
        ]
    }

    async fn on_enter(&self, ctx: &AgentContext) -> Result<()> {
        ctx.generate_reply(GREETING).await
    }

    async fn invoke_tool(&self, ctx: &AgentContext, call: &ToolCall) -> Result<ToolOutcome> {
        match call.name.as_str() {
            "search_knowledge_base" => {
                let args: SearchArgs = call.parse_args()?;
                Ok(ToolOutcome::Value(self.search_knowledge_base(ctx, args.query).await.into()))
            }
            "book_flight" => {
                let request: FlightRequest = call.parse_args()?;
                ToolOutcome::value(self.services.desk.book_flight(&request))
            }
            "transfer_to_hotel_booking" => Ok(ToolOutcome::Handoff(self.transfer_to_hotel_booking())),
            other => Err(WayfareError::UnknownTool(other.to_string())),
        }
    }
}
