//! Session startup for the travel agents.

use crate::config::TravelConfig;
use crate::flight::FlightBookingAgent;
use crate::services::TravelServices;
use std::sync::Arc;
use tracing::info;
use wayfare_core::{ChatContext, Result, Role, SharedBackend};
use wayfare_realtime::VoiceSession;

/// Initial history for a travel session.
pub fn initial_context(config: &TravelConfig) -> ChatContext {
    let chat_ctx = ChatContext::new();
    if let Some(name) = &config.user_name {
        chat_ctx.add_message(Role::Assistant, format!("The user's name is {name}."));
    }
    chat_ctx
}

/// Build a session over `backend` and activate the flight booking agent.
pub async fn start_travel_session(backend: SharedBackend, config: &TravelConfig) -> Result<Arc<VoiceSession>> {
    start_with_services(backend, config, TravelServices::from_config(config)).await
}

/// Like [`start_travel_session`] with caller-supplied services.
pub async fn start_with_services(
    backend: SharedBackend,
    config: &TravelConfig,
    services: TravelServices,
) -> Result<Arc<VoiceSession>> {
    config.validate()?;

    let chat_ctx = initial_context(config);
    let session = Arc::new(
        VoiceSession::builder()
            .backend(backend)
            .chat_context(chat_ctx.clone())
            .config(config.realtime_config())
            .build()?,
    );
    info!(session_id = %session.id(), model = %config.model, voice = %config.voice, "Starting travel session");

    session.start(Arc::new(FlightBookingAgent::new(chat_ctx, services))).await?;
    Ok(session)
}
