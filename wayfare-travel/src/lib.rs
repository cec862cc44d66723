//! # wayfare-travel
//!
//! Travel booking agents for Wayfare voice sessions.
//!
//! A session starts with the [`FlightBookingAgent`]. It books flights, answers
//! policy questions from a mock [`KnowledgeBase`] (speaking a short status
//! update when the lookup is slow), and hands the conversation to the
//! [`HotelBookingAgent`] on request. The hotel agent reads the shared history
//! with the [`ContextExtractor`] so it can suggest a hotel at the flight's
//! destination.
//!
//! ## Example
//!
//! ```rust,ignore
//! use wayfare_travel::{TravelConfig, start_travel_session};
//!
//! let config = TravelConfig::from_env()?.with_user_name("Ada");
//! let session = start_travel_session(backend, &config).await?;
//! let booking = session
//!     .dispatch(ToolCall::new("call_1", "book_flight", json!({
//!         "source": "NYC", "destination": "LAX", "date": "tomorrow"
//!     })))
//!     .await?;
//! ```

pub mod booking;
pub mod config;
pub mod dates;
pub mod extract;
pub mod flight;
pub mod hotel;
pub mod knowledge;
mod launch;
mod services;
pub mod text;

pub use booking::{BookingDesk, BookingStatus, FlightBooking, FlightRequest, HotelBooking, HotelRequest};
pub use config::TravelConfig;
pub use dates::{parse_travel_date, resolve_travel_date};
pub use extract::{ContextExtractor, FactSet};
pub use flight::{FLIGHT_AGENT_NAME, FlightBookingAgent};
pub use hotel::{HOTEL_AGENT_NAME, HotelBookingAgent};
pub use knowledge::KnowledgeBase;
pub use launch::{initial_context, start_travel_session, start_with_services};
pub use services::TravelServices;
