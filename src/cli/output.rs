//! CLI output: error mapping from domain errors to the stable CLI surface.

use crate::error::ApiError;

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &ApiError) -> String {
    format!("error: {}", e)
}
