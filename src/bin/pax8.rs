//! pax8 CLI Binary
//!
//! Command-line interface for managing Pax8 credential profiles and calling the API.

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use pax8::api::ClientConfig;
use pax8::cli::{Cli, Commands, RunContext};
use pax8::logging::{init_logging, LoggingConfig};
use std::process;
use tracing::{debug, error};

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => exit_with_parse_error(e),
    };

    let logging_config = build_logging_config(&cli);
    if let Err(e) = init_logging(&logging_config) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    let command = match &cli.command {
        Some(Commands::Config { command: None }) => exit_with_help(Some("config")),
        Some(command) => command,
        None => exit_with_help(None),
    };

    let client_config = ClientConfig {
        api_url: cli.api_url.clone(),
        token_url: cli.token_url.clone(),
    };

    let mut context = match RunContext::new(cli.config.clone(), client_config) {
        Ok(ctx) => {
            debug!(path = %ctx.store_file().path().display(), "CLI context initialized");
            ctx
        }
        Err(e) => {
            error!("Error loading configuration: {}", e);
            eprintln!("{}", pax8::cli::map_error(&e));
            process::exit(1);
        }
    };

    if let Some(warning) = context.load_warning() {
        eprintln!("{}", pax8::cli::map_error(warning));
        if !warning.is_recoverable() {
            process::exit(1);
        }
    }

    match context.execute(command) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => {
            eprintln!("{}", pax8::cli::map_error(&e));
            process::exit(1);
        }
    }
}

/// Report a clap parse failure. Help and version requests exit 0; every other
/// parse error exits 1.
fn exit_with_parse_error(e: clap::Error) -> ! {
    if let Err(print_err) = e.print() {
        eprintln!("error: {}", print_err);
    }
    match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => process::exit(0),
        _ => process::exit(1),
    }
}

/// Print help for the top level or the named subcommand and exit with status 1.
fn exit_with_help(subcommand: Option<&str>) -> ! {
    let mut command = Cli::command();
    let printed = match subcommand.and_then(|name| command.find_subcommand_mut(name)) {
        Some(sub) => sub.print_help(),
        None => command.print_help(),
    };
    if let Err(e) = printed {
        eprintln!("error: {}", e);
    }
    process::exit(1);
}

/// Build logging configuration from CLI args.
/// Precedence: explicit log flags override --debug/--quiet, which override defaults.
fn build_logging_config(cli: &Cli) -> LoggingConfig {
    let mut config = LoggingConfig::default();

    if cli.quiet {
        config.enabled = false;
    }
    if cli.debug {
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        config.file = Some(file.clone());
        if cli.log_output.is_none() {
            config.output = "file".to_string();
        }
    }

    config
}
