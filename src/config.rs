//! Configuration and CLI argument handling

use std::time::Duration;

use clap::Parser;

use crate::state::ScrumStore;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "scrum-timer")]
#[command(about = "A state-managed HTTP server that runs daily scrum meetings")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Meeting timer tick interval in milliseconds
    #[arg(long, default_value = "1000", value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: u64,

    /// Start with an empty scrum list instead of the demo scrums
    #[arg(long)]
    pub no_samples: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Initial scrum catalogue
    pub fn scrum_store(&self) -> ScrumStore {
        if self.no_samples {
            ScrumStore::new()
        } else {
            ScrumStore::with_samples()
        }
    }
}
