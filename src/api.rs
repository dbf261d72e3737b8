//! API command dispatch
//!
//! Turns an `api` command into one authenticated request against the Pax8 API
//! using the active profile, and renders the JSON response. The HTTP exchange
//! itself sits behind [`ApiTransport`] so the dispatch rules can be exercised
//! without a network.

use crate::account::{Account, ConfigurationStore};
use crate::error::ApiError;
use async_trait::async_trait;

pub mod client;

pub use client::{ClientConfig, Pax8Client};

/// OAuth audience requested for every call made by this tool.
pub const AUDIENCE_PROVISIONING: &str = "api://p8p.client";

pub const DEFAULT_METHOD: &str = "GET";

/// One outbound request, as handed to the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub endpoint: String,
    /// Upper-cased HTTP method
    pub method: String,
    /// Raw request body, sent verbatim
    pub body: Option<String>,
    pub audience: &'static str,
}

impl ApiRequest {
    /// Build a request from CLI input.
    ///
    /// The method defaults to GET and is upper-cased; an empty body counts as
    /// no body. A body never changes the method.
    pub fn new(endpoint: &str, method: Option<&str>, body: Option<&str>) -> Result<Self, ApiError> {
        if endpoint.trim().is_empty() {
            return Err(ApiError::InvalidRequest(
                "endpoint must not be empty".to_string(),
            ));
        }

        let method = method
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_METHOD)
            .to_uppercase();

        Ok(Self {
            endpoint: endpoint.to_string(),
            method,
            body: body.filter(|b| !b.is_empty()).map(str::to_string),
            audience: AUDIENCE_PROVISIONING,
        })
    }
}

/// Performs the authenticated exchange for a request
#[async_trait]
pub trait ApiTransport: Send + Sync {
    /// Send `request` authenticated as `credentials`; returns the raw response body.
    async fn execute(&self, credentials: &Account, request: &ApiRequest)
        -> Result<Vec<u8>, ApiError>;
}

/// Resolve the active profile, send the request, and pretty-print the response.
pub async fn dispatch(
    store: &ConfigurationStore,
    transport: &dyn ApiTransport,
    request: &ApiRequest,
) -> Result<String, ApiError> {
    let (account_name, credentials) = store.active_account()?;
    tracing::debug!(
        account = account_name,
        client_id = %credentials.client_id,
        method = %request.method,
        endpoint = %request.endpoint,
        "Dispatching API request"
    );

    let response = transport.execute(credentials, request).await?;
    tracing::debug!(bytes = response.len(), "Received API response");
    format_response(&response)
}

/// Re-indent a JSON document with two spaces, keeping key order and number text.
///
/// An empty body renders as `null`; anything else that is not JSON is an error.
pub fn format_response(raw: &[u8]) -> Result<String, ApiError> {
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Ok("null".to_string());
    }
    let value: serde_json::Value = serde_json::from_slice(raw).map_err(ApiError::ResponseFormat)?;
    serde_json::to_string_pretty(&value).map_err(ApiError::ResponseFormat)
}

// Transport that records requests and replays a canned response
#[cfg(test)]
pub struct MockTransport {
    response: Result<Vec<u8>, String>,
    calls: std::sync::Mutex<Vec<(Account, ApiRequest)>>,
}

#[cfg(test)]
impl MockTransport {
    pub fn responding(body: &str) -> Self {
        Self {
            response: Ok(body.as_bytes().to_vec()),
            calls: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            response: Err(message.to_string()),
            calls: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(Account, ApiRequest)> {
        self.calls.lock().unwrap().clone()
    }
}

#[cfg(test)]
#[async_trait]
impl ApiTransport for MockTransport {
    async fn execute(
        &self,
        credentials: &Account,
        request: &ApiRequest,
    ) -> Result<Vec<u8>, ApiError> {
        self.calls
            .lock()
            .unwrap()
            .push((credentials.clone(), request.clone()));
        self.response.clone().map_err(ApiError::Transport)
    }
}
