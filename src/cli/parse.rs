//! CLI parse: clap types for pax8. No behavior; definitions only.

use crate::api::client::{DEFAULT_API_URL, DEFAULT_TOKEN_URL};
use clap::builder::BoolishValueParser;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

/// pax8 CLI - manage Pax8 API credentials and call the API
#[derive(Parser, Debug)]
#[command(name = "pax8")]
#[command(about = "Manage Pax8 API credential profiles and make authenticated API requests")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path (overrides <config dir>/pax8/config.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug mode (DEBUG accepts 1/0, t/f, true/false, yes/no, on/off)
    #[arg(
        long,
        env = "DEBUG",
        global = true,
        action = ArgAction::SetTrue,
        value_parser = BoolishValueParser::new()
    )]
    pub debug: bool,

    /// Disable logging entirely
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stderr, file)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Base URL of the Pax8 API
    #[arg(long, env = "PAX8_API_URL", default_value = DEFAULT_API_URL, global = true)]
    pub api_url: String,

    /// OAuth token endpoint used for the client-credentials exchange
    #[arg(long, env = "PAX8_TOKEN_URL", default_value = DEFAULT_TOKEN_URL, global = true)]
    pub token_url: String,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Configuration commands
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
    /// API commands
    Api(ApiArgs),
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Activate a configuration
    Activate {
        /// Name of the configuration
        name: String,
    },
    /// Configure a new configuration
    Configure {
        /// Name of the configuration
        name: String,
        /// Client ID for the configuration
        #[arg(long, env = "CLIENT_ID", default_value = "", hide_default_value = true)]
        client_id: String,
        /// Client secret for the configuration
        #[arg(
            long,
            env = "CLIENT_SECRET",
            default_value = "",
            hide_default_value = true,
            hide_env_values = true
        )]
        client_secret: String,
    },
    /// List all configurations
    List,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ApiArgs {
    /// API endpoint to call
    #[arg(long)]
    pub endpoint: String,
    /// HTTP method to use
    #[arg(long, default_value = "GET")]
    pub method: String,
    /// Request body for POST/PUT methods
    #[arg(long)]
    pub body: Option<String>,
}
