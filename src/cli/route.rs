//! CLI route: single route table and run context. Dispatches to the account
//! store and the API dispatcher.

use crate::account::{AccountStoreFile, ConfigurationStore};
use crate::api::{self, ApiRequest, ApiTransport, ClientConfig, Pax8Client};
use crate::cli::command_name;
use crate::cli::parse::{ApiArgs, Commands, ConfigCommands};
use crate::error::ApiError;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// Runtime context for CLI execution: the store file, the store loaded from
/// it, and the transport used by `api`.
pub struct RunContext {
    store_file: AccountStoreFile,
    store: ConfigurationStore,
    load_warning: Option<ApiError>,
    transport: Arc<dyn ApiTransport>,
}

impl RunContext {
    /// Create run context from an optional config path and client settings.
    pub fn new(config_path: Option<PathBuf>, client_config: ClientConfig) -> Result<Self, ApiError> {
        let store_file = AccountStoreFile::resolve(config_path.as_deref())?;
        let transport = Arc::new(Pax8Client::new(client_config)?);
        Self::with_transport(store_file, transport)
    }

    /// Create run context with an explicit transport.
    pub fn with_transport(
        store_file: AccountStoreFile,
        transport: Arc<dyn ApiTransport>,
    ) -> Result<Self, ApiError> {
        let loaded = store_file.load()?;
        Ok(Self {
            store_file,
            store: loaded.store,
            load_warning: loaded.parse_error,
            transport,
        })
    }

    /// Non-fatal problem found while loading the store, if any.
    pub fn load_warning(&self) -> Option<&ApiError> {
        self.load_warning.as_ref()
    }

    pub fn store(&self) -> &ConfigurationStore {
        &self.store
    }

    pub fn store_file(&self) -> &AccountStoreFile {
        &self.store_file
    }

    /// Run one command and return its stdout text (possibly empty).
    pub fn execute(&mut self, command: &Commands) -> Result<String, ApiError> {
        let name = command_name(command);
        let started = Instant::now();
        tracing::info!(command = %name, "Command started");

        let result = match command {
            Commands::Config {
                command: Some(command),
            } => self.handle_config_command(command),
            Commands::Config { command: None } => Err(ApiError::InvalidRequest(
                "a config subcommand is required".to_string(),
            )),
            Commands::Api(args) => self.handle_api_command(args),
        };

        match &result {
            Ok(_) => tracing::info!(
                command = %name,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Command completed"
            ),
            Err(e) => tracing::error!(command = %name, "Command failed: {}", e),
        }
        result
    }

    fn handle_config_command(&mut self, command: &ConfigCommands) -> Result<String, ApiError> {
        match command {
            ConfigCommands::Activate { name } => {
                let mut updated = self.store.clone();
                updated.activate(name)?;
                self.persist(updated)?;
                tracing::info!(account = %name, "Activated configuration");
                Ok(String::new())
            }
            ConfigCommands::Configure {
                name,
                client_id,
                client_secret,
            } => {
                let mut updated = self.store.clone();
                updated.configure(name, client_id.clone(), client_secret.clone());
                self.persist(updated)?;
                tracing::info!(account = %name, "Saved configuration");
                Ok(String::new())
            }
            ConfigCommands::List => Ok(self.store.list().join("\n")),
        }
    }

    fn handle_api_command(&self, args: &ApiArgs) -> Result<String, ApiError> {
        let request = ApiRequest::new(&args.endpoint, Some(&args.method), args.body.as_deref())?;

        let rt = tokio::runtime::Runtime::new()
            .map_err(|e| ApiError::Setup(format!("Failed to create runtime: {}", e)))?;
        rt.block_on(api::dispatch(&self.store, self.transport.as_ref(), &request))
    }

    fn persist(&mut self, updated: ConfigurationStore) -> Result<(), ApiError> {
        self.store_file.save(&updated)?;
        self.store = updated;
        Ok(())
    }
}
