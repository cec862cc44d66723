use clap::Parser;
use std::path::PathBuf;
use wayfare_travel::TravelConfig;

#[derive(Parser, Debug)]
#[command(name = "wayfare")]
#[command(about = "Operator console for the Wayfare travel agents", long_about = None)]
pub struct Cli {
    /// Read console lines from a file instead of the terminal
    #[arg(short, long)]
    pub script: Option<PathBuf>,

    /// Name of the caller, seeded into the conversation
    #[arg(short, long)]
    pub user_name: Option<String>,

    /// Realtime model identifier
    #[arg(long)]
    pub model: Option<String>,

    /// Output voice
    #[arg(long)]
    pub voice: Option<String>,

    /// Seed for mock booking details
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Apply command-line overrides on top of the environment configuration.
    pub fn apply(&self, mut config: TravelConfig) -> TravelConfig {
        if let Some(model) = &self.model {
            config = config.with_model(model);
        }
        if let Some(voice) = &self.voice {
            config = config.with_voice(voice);
        }
        if let Some(name) = &self.user_name {
            config = config.with_user_name(name);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        config
    }
}
