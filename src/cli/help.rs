//! CLI command-name contract for logging and routing.

use crate::cli::parse::{Commands, ConfigCommands};

/// Dotted command name used in log records (e.g. "config.activate", "api").
pub fn command_name(command: &Commands) -> String {
    match command {
        Commands::Config { command: Some(command) } => {
            format!("config.{}", config_command_name(command))
        }
        Commands::Config { command: None } => "config".to_string(),
        Commands::Api(_) => "api".to_string(),
    }
}

pub fn config_command_name(command: &ConfigCommands) -> &'static str {
    match command {
        ConfigCommands::Activate { .. } => "activate",
        ConfigCommands::Configure { .. } => "configure",
        ConfigCommands::List => "list",
    }
}
