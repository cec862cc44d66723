//! Telemetry initialization and configuration

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::sync::Once;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Name of the service for trace identification.
    pub service_name: String,
    /// Filter used when `RUST_LOG` is not set (e.g. `info`, `wayfare_realtime=debug`).
    pub log_level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl TelemetryConfig {
    /// Console logging at `info` for the given service.
    pub fn new(service_name: impl Into<String>) -> Self {
        Self { service_name: service_name.into(), log_level: "info".to_string(), json: false }
    }

    /// Set the fallback filter directive.
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Switch to JSON output.
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }
}

/// Initialize basic telemetry with console logging
///
/// # Arguments
/// * `service_name` - Name of the service for trace identification
///
/// # Example
/// ```
/// use wayfare_telemetry::init_telemetry;
/// init_telemetry("wayfare-demo").expect("Failed to initialize telemetry");
/// ```
pub fn init_telemetry(service_name: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
    init_with_config(&TelemetryConfig::new(service_name))
}

/// Initialize telemetry from a [`TelemetryConfig`].
///
/// Only the first call installs a subscriber; later calls are no-ops.
pub fn init_with_config(config: &TelemetryConfig) -> Result<(), Box<dyn Error + Send + Sync>> {
    let mut result = Ok(());
    INIT.call_once(|| {
        result = install(config);
    });
    result
}

fn install(config: &TelemetryConfig) -> Result<(), Box<dyn Error + Send + Sync>> {
    let filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.log_level))?;

    let registry = tracing_subscriber::registry().with(filter);
    if config.json {
        registry.with(tracing_subscriber::fmt::layer().json().with_target(true)).try_init()?;
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true).with_line_number(true))
            .try_init()?;
    }

    tracing::info!(service.name = %config.service_name, json = config.json, "Telemetry initialized");
    Ok(())
}
