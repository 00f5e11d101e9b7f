use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

/// OpenAI-compatible proxy for the NovelGPT chat completion API
#[derive(Debug, Parser)]
#[command(name = "novel-proxy", version, about)]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "novel-proxy.toml", env = "NOVEL_PROXY_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "NOVEL_PROXY_LISTEN")]
    pub listen: Option<SocketAddr>,
}
