//! # Wayfare Telemetry
//!
//! Structured logging for Wayfare voice sessions.
//!
//! ## Usage
//!
//! ```rust
//! use wayfare_telemetry::{init_telemetry, info};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     init_telemetry("wayfare")?;
//!     info!("session starting");
//!     Ok(())
//! }
//! ```

pub mod init;
pub mod spans;

// Re-export tracing macros for convenience
pub use tracing::{Instrument, Span, debug, error, info, instrument, trace, warn};

pub use init::{TelemetryConfig, init_telemetry, init_with_config};
pub use spans::*;
