//! Pax8 HTTP client: client-credentials token exchange followed by one API call.
//!
//! No token caching and no retries; each invocation fetches a fresh token.

use super::{ApiRequest, ApiTransport};
use crate::account::Account;
use crate::error::ApiError;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.pax8.com";
pub const DEFAULT_TOKEN_URL: &str = "https://login.pax8.com/oauth/token";

const HTTP_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const HTTP_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Where the client sends token and API requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_url: String,
    pub token_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
        }
    }
}

#[derive(Serialize)]
struct TokenRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    audience: &'a str,
    grant_type: &'static str,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
}

fn map_http_error(error: reqwest::Error) -> ApiError {
    if error.is_timeout() {
        ApiError::Transport(format!("request timeout: {}", error))
    } else if error.is_connect() {
        ApiError::Transport(format!("connection error: {}", error))
    } else {
        ApiError::Transport(format!("HTTP error: {}", error))
    }
}

fn build_http_client() -> Result<Client, ApiError> {
    Client::builder()
        .connect_timeout(HTTP_CONNECT_TIMEOUT)
        .timeout(HTTP_REQUEST_TIMEOUT)
        .build()
        .map_err(|e| ApiError::Setup(format!("failed to create HTTP client: {}", e)))
}

/// Join the base URL and an endpoint path with exactly one slash.
pub fn endpoint_url(api_url: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        api_url.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}

/// Authenticated client for the Pax8 REST API
pub struct Pax8Client {
    client: Client,
    config: ClientConfig,
}

impl Pax8Client {
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        Ok(Self {
            client: build_http_client()?,
            config,
        })
    }

    async fn fetch_token(&self, credentials: &Account, audience: &str) -> Result<String, ApiError> {
        let request = TokenRequest {
            client_id: &credentials.client_id,
            client_secret: &credentials.client_secret,
            audience,
            grant_type: "client_credentials",
        };

        tracing::debug!(url = %self.config.token_url, audience, "Requesting access token");
        let response = self
            .client
            .post(&self.config.token_url)
            .json(&request)
            .send()
            .await
            .map_err(map_http_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ApiError::Transport(format!(
                "authentication failed ({}): {}",
                status, error_text
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Transport(format!("failed to parse token response: {}", e)))?;
        if let Some(token_type) = token.token_type.as_deref() {
            if !token_type.eq_ignore_ascii_case("bearer") {
                tracing::warn!(token_type, "Unexpected token type from token endpoint");
            }
        }
        Ok(token.access_token)
    }
}

#[async_trait]
impl ApiTransport for Pax8Client {
    async fn execute(
        &self,
        credentials: &Account,
        request: &ApiRequest,
    ) -> Result<Vec<u8>, ApiError> {
        let method = Method::from_bytes(request.method.as_bytes()).map_err(|_| {
            ApiError::InvalidRequest(format!("invalid HTTP method: {}", request.method))
        })?;

        let token = self.fetch_token(credentials, request.audience).await?;

        let url = endpoint_url(&self.config.api_url, &request.endpoint);
        tracing::debug!(%method, %url, "Sending API request");

        let mut builder = self
            .client
            .request(method, &url)
            .bearer_auth(token)
            .header(ACCEPT, "application/json");
        if let Some(body) = &request.body {
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .body(body.clone());
        }

        let response = builder.send().await.map_err(map_http_error)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ApiError::Transport(format!(
                "request failed with status {}: {}",
                status, error_text
            )));
        }

        let bytes = response.bytes().await.map_err(map_http_error)?;
        Ok(bytes.to_vec())
    }
}
