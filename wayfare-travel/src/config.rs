//! Configuration for the travel agents.
//!
//! Use [`TravelConfig::from_env`] to load and validate configuration from
//! environment variables, or start from [`TravelConfig::default`] and adjust
//! with the `with_*` methods.
//!
//! | Variable | Field |
//! |---|---|
//! | `WAYFARE_MODEL` | `model` |
//! | `WAYFARE_VOICE` | `voice` |
//! | `WAYFARE_STATUS_UPDATE_MS` | `status_update_delay_ms` |
//! | `WAYFARE_SEARCH_LATENCY_MS` | `knowledge_base_latency_ms` |
//! | `WAYFARE_USER_NAME` | `user_name` |
//! | `WAYFARE_SEED` | `seed` |

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use wayfare_core::{RealtimeConfig, Result, WayfareError};

/// Default realtime model.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-native-audio-preview-09-2025";

/// Default output voice.
pub const DEFAULT_VOICE: &str = "Aoede";

/// Default delay before a slow knowledge base search triggers a status update.
pub const DEFAULT_STATUS_UPDATE_MS: u64 = 2_000;

/// Default simulated knowledge base latency.
pub const DEFAULT_SEARCH_LATENCY_MS: u64 = 2_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TravelConfig {
    pub model: String,
    pub voice: String,
    pub status_update_delay_ms: u64,
    pub knowledge_base_latency_ms: u64,
    /// Seeded into the history as "The user's name is <name>."
    pub user_name: Option<String>,
    /// Seed for the booking desk's random generator.
    pub seed: Option<u64>,
}

impl Default for TravelConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            voice: DEFAULT_VOICE.to_string(),
            status_update_delay_ms: DEFAULT_STATUS_UPDATE_MS,
            knowledge_base_latency_ms: DEFAULT_SEARCH_LATENCY_MS,
            user_name: None,
            seed: None,
        }
    }
}

impl TravelConfig {
    /// Load from `WAYFARE_*` environment variables and validate.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load from an arbitrary key lookup and validate.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(model) = lookup("WAYFARE_MODEL") {
            config.model = model;
        }
        if let Some(voice) = lookup("WAYFARE_VOICE") {
            config.voice = voice;
        }
        if let Some(ms) = lookup("WAYFARE_STATUS_UPDATE_MS") {
            config.status_update_delay_ms = parse_number("WAYFARE_STATUS_UPDATE_MS", &ms)?;
        }
        if let Some(ms) = lookup("WAYFARE_SEARCH_LATENCY_MS") {
            config.knowledge_base_latency_ms = parse_number("WAYFARE_SEARCH_LATENCY_MS", &ms)?;
        }
        if let Some(name) = lookup("WAYFARE_USER_NAME") {
            let name = name.trim();
            if !name.is_empty() {
                config.user_name = Some(name.to_string());
            }
        }
        if let Some(seed) = lookup("WAYFARE_SEED") {
            config.seed = Some(parse_number("WAYFARE_SEED", &seed)?);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(WayfareError::config("Model cannot be empty"));
        }
        if self.voice.trim().is_empty() {
            return Err(WayfareError::config("Voice cannot be empty"));
        }
        Ok(())
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = voice.into();
        self
    }

    pub fn with_user_name(mut self, name: impl Into<String>) -> Self {
        self.user_name = Some(name.into());
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_status_update_delay(mut self, delay: Duration) -> Self {
        self.status_update_delay_ms = delay.as_millis() as u64;
        self
    }

    pub fn with_knowledge_base_latency(mut self, latency: Duration) -> Self {
        self.knowledge_base_latency_ms = latency.as_millis() as u64;
        self
    }

    pub fn status_update_delay(&self) -> Duration {
        Duration::from_millis(self.status_update_delay_ms)
    }

    pub fn knowledge_base_latency(&self) -> Duration {
        Duration::from_millis(self.knowledge_base_latency_ms)
    }

    /// Base session configuration; each agent adds its own instructions and tools.
    pub fn realtime_config(&self) -> RealtimeConfig {
        RealtimeConfig::new().with_model(&self.model).with_voice(&self.voice).audio_only()
    }
}

fn parse_number(key: &str, value: &str) -> Result<u64> {
    value
        .trim()
        .parse()
        .map_err(|_| WayfareError::config(format!("{key} must be a non-negative integer, got '{value}'")))
}
