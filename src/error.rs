//! Error types for the Pax8 CLI.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the account store, the API dispatcher, and CLI setup
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("error {action} config file {path}: {source}")]
    ConfigIo {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error serializing config file: {0}")]
    ConfigSerialize(#[source] serde_json::Error),

    #[error("error parsing config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("configuration '{0}' does not exist")]
    UnknownAccount(String),

    #[error("no active configuration ({0}). Use `pax8 config activate <name>` to select one")]
    NoActiveAccount(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("error making API request: {0}")]
    Transport(String),

    #[error("error formatting JSON response: {0}")]
    ResponseFormat(#[source] serde_json::Error),

    #[error("setup error: {0}")]
    Setup(String),
}

impl ApiError {
    /// Whether the command may continue after this error was reported.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ApiError::ConfigParse { .. })
    }
}
