//! CLI domain: parse, route, help, and output only.
//! No domain logic; a single route table dispatches to the account store and API dispatcher.

mod help;
mod output;
mod parse;
mod route;

pub use help::{command_name, config_command_name};
pub use output::map_error;
pub use parse::{ApiArgs, Cli, Commands, ConfigCommands};
pub use route::RunContext;
