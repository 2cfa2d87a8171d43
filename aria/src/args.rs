use std::path::PathBuf;

use clap::Parser;

/// Aria TTS proxy
#[derive(Debug, Parser)]
#[command(name = "aria", about = "OpenAI-compatible proxy for Gemini generative speech")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "aria.toml", env = "ARIA_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "ARIA_LISTEN")]
    pub listen: Option<std::net::SocketAddr>,
}
