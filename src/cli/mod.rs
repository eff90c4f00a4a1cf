//! CLI module for Herald
//!
//! # Commands
//!
//! - `serve` - Start the HTTP server
//! - `compose` - Compose one message and print it as JSON
//! - `templates` - List the template catalog
//! - `config` - Configuration utilities (init)
//!
//! # Example
//!
//! ```bash
//! # Start server with default config
//! herald serve
//!
//! # One-off message, template fallback when no API key is set
//! herald compose "announce new feature" --user Ada
//! ```

pub mod compose;
pub mod config;
pub mod output;
pub mod serve;
pub mod templates;

pub use compose::handle_compose;
pub use config::handle_config_init;
pub use templates::handle_templates;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Herald - tiered email content generation
#[derive(Parser, Debug)]
#[command(
    name = "herald",
    version,
    about = "Email content generation with ordered AI backends and template fallback"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the Herald server
    Serve(ServeArgs),
    /// Compose a single message
    Compose(ComposeArgs),
    /// List message templates
    Templates(TemplatesArgs),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "herald.toml")]
    pub config: PathBuf,

    /// Override server port
    #[arg(short, long, env = "HERALD_PORT")]
    pub port: Option<u16>,

    /// Override server host
    #[arg(short = 'H', long, env = "HERALD_HOST")]
    pub host: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "HERALD_LOG_LEVEL")]
    pub log_level: Option<String>,
}

#[derive(Args, Debug)]
pub struct ComposeArgs {
    /// Free-text description of the message to write
    pub prompt: String,

    /// Recipient name for {user}
    #[arg(short, long)]
    pub user: Option<String>,

    /// Product name for {appName}
    #[arg(short, long)]
    pub app_name: Option<String>,

    /// Link for {ctaLink}
    #[arg(long)]
    pub cta_link: Option<String>,

    /// Path to configuration file
    #[arg(short, long, default_value = "herald.toml")]
    pub config: PathBuf,
}

#[derive(Args, Debug)]
pub struct TemplatesArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = "herald.toml")]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}
