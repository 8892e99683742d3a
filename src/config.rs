//! Configuration and CLI argument handling

use clap::Parser;

/// CLI argument parsing structure
#[derive(Parser)]
#[command(name = "jackpot-kiosk")]
#[command(about = "A state-managed kiosk server driving an unattended promotional offer display")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "8750")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Display tick period in milliseconds. 1000 is right for TV screens;
    /// go below only when sub-second countdown precision is worth the CPU
    #[arg(long, default_value = "1000")]
    pub tick_millis: u64,

    /// Hard-refresh interval in minutes when no theme configures one
    #[arg(long, default_value = "20")]
    pub reload_minutes: u64,

    /// OpenAI-compatible chat completions endpoint for the course advisor
    #[arg(long, default_value = "http://127.0.0.1:11434/v1/chat/completions")]
    pub chat_endpoint: String,

    /// Model name passed to the chat endpoint
    #[arg(long, default_value = "llama3.2")]
    pub chat_model: String,

    /// Bearer token guarding the /admin routes; unauthenticated when unset
    #[arg(long)]
    pub admin_token: Option<String>,

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
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}
