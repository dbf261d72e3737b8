//! Shared test utilities for integration tests
//!
//! Provides XDG environment isolation and a recording transport so CLI routes
//! can be exercised without touching the network or the real config directory.

use async_trait::async_trait;
use pax8::account::{Account, AccountStoreFile};
use pax8::api::{ApiRequest, ApiTransport};
use pax8::cli::RunContext;
use pax8::error::ApiError;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Global mutex to serialize XDG environment variable access across all tests
static XDG_ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Environment variable state to restore after test
struct EnvState {
    home: Option<String>,
    xdg_config_home: Option<String>,
}

impl EnvState {
    fn capture() -> Self {
        Self {
            home: std::env::var("HOME").ok(),
            xdg_config_home: std::env::var("XDG_CONFIG_HOME").ok(),
        }
    }

    fn restore(self) {
        if let Some(orig) = self.home {
            std::env::set_var("HOME", orig);
        } else {
            std::env::remove_var("HOME");
        }

        if let Some(orig) = self.xdg_config_home {
            std::env::set_var("XDG_CONFIG_HOME", orig);
        } else {
            std::env::remove_var("XDG_CONFIG_HOME");
        }
    }
}

/// Run `f` with HOME and XDG_CONFIG_HOME pointed into `test_dir`.
///
/// XDG_CONFIG_HOME is `test_dir` itself, so the default store file is
/// `test_dir/pax8/config.json`. The original environment is restored afterwards.
pub fn with_xdg_env<F, R>(test_dir: &TempDir, f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = XDG_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let env_state = EnvState::capture();

    let test_home = test_dir.path().join("home");
    std::fs::create_dir_all(&test_home).unwrap();

    std::env::set_var("HOME", test_home.to_str().unwrap());
    std::env::set_var("XDG_CONFIG_HOME", test_dir.path().to_str().unwrap());

    let result = f();

    env_state.restore();

    result
}

/// Transport that records every request and answers with a canned result
pub struct RecordingTransport {
    response: Result<String, String>,
    calls: Mutex<Vec<(Account, ApiRequest)>>,
}

impl RecordingTransport {
    pub fn responding(body: &str) -> Arc<Self> {
        Arc::new(Self {
            response: Ok(body.to_string()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            response: Err(message.to_string()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<(Account, ApiRequest)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ApiTransport for RecordingTransport {
    async fn execute(
        &self,
        credentials: &Account,
        request: &ApiRequest,
    ) -> Result<Vec<u8>, ApiError> {
        self.calls
            .lock()
            .unwrap()
            .push((credentials.clone(), request.clone()));
        match &self.response {
            Ok(body) => Ok(body.clone().into_bytes()),
            Err(message) => Err(ApiError::Transport(message.clone())),
        }
    }
}

/// Fresh run context over the store file at `path`.
pub fn context_at(path: &Path, transport: Arc<RecordingTransport>) -> RunContext {
    RunContext::with_transport(AccountStoreFile::new(path), transport).unwrap()
}
