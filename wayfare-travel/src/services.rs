//! Shared collaborators handed from one travel agent to the next.

use crate::booking::BookingDesk;
use crate::config::TravelConfig;
use crate::knowledge::KnowledgeBase;
use std::sync::Arc;
use std::time::Duration;

/// Collaborators shared by every travel agent in a session.
#[derive(Debug, Clone)]
pub struct TravelServices {
    /// Mock booking desk, shared so both agents draw from one generator.
    pub desk: Arc<BookingDesk>,
    pub knowledge: KnowledgeBase,
    /// How long a knowledge base search may run before a status update is spoken.
    pub status_update_delay: Duration,
}

impl TravelServices {
    pub fn new(desk: BookingDesk, knowledge: KnowledgeBase, status_update_delay: Duration) -> Self {
        Self { desk: Arc::new(desk), knowledge, status_update_delay }
    }

    /// Seeded desk when the config carries a seed, entropy otherwise.
    pub fn from_config(config: &TravelConfig) -> Self {
        let desk = match config.seed {
            Some(seed) => BookingDesk::seeded(seed),
            None => BookingDesk::new(),
        };
        Self::new(desk, KnowledgeBase::new(config.knowledge_base_latency()), config.status_update_delay())
    }
}
