//! Account Store
//!
//! Named Pax8 client-credential profiles plus the name of the active profile.
//! The in-memory [`ConfigurationStore`] carries the mutation rules; [`storage`]
//! handles reading and writing the JSON document under the user config directory.

use crate::error::ApiError;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

pub mod storage;

pub use storage::AccountStoreFile;

/// A client-credential pair, keyed by profile name in the store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    #[serde(rename = "clientId", default, deserialize_with = "null_as_default")]
    pub client_id: String,

    #[serde(rename = "clientSecret", default, deserialize_with = "null_as_default")]
    pub client_secret: String,
}

impl Account {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }
}

/// Persisted profile document.
///
/// `default_account` may be empty, or name a profile that is not in
/// `account_map`; neither is validated at load time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationStore {
    #[serde(rename = "defaultAccount", default, deserialize_with = "null_as_default")]
    pub default_account: String,

    #[serde(rename = "accountMap", default, deserialize_with = "null_as_default")]
    pub account_map: BTreeMap<String, Account>,
}

// A JSON `null` reads the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl ConfigurationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `name` the active profile.
    ///
    /// Fails with [`ApiError::UnknownAccount`] and leaves the store untouched
    /// when no profile of that name exists.
    pub fn activate(&mut self, name: &str) -> Result<(), ApiError> {
        if !self.account_map.contains_key(name) {
            return Err(ApiError::UnknownAccount(name.to_string()));
        }
        self.default_account = name.to_string();
        Ok(())
    }

    /// Insert or fully replace the profile at `name`.
    pub fn configure(&mut self, name: &str, client_id: String, client_secret: String) {
        self.account_map
            .insert(name.to_string(), Account::new(client_id, client_secret));
    }

    /// Configured profile names. Callers must not rely on the order.
    pub fn list(&self) -> Vec<&str> {
        self.account_map.keys().map(String::as_str).collect()
    }

    pub fn get(&self, name: &str) -> Option<&Account> {
        self.account_map.get(name)
    }

    /// The active profile as `(name, account)`.
    ///
    /// Returns [`ApiError::NoActiveAccount`] when no default is set or the
    /// default names a profile that is not configured.
    pub fn active_account(&self) -> Result<(&str, &Account), ApiError> {
        if self.default_account.is_empty() {
            return Err(ApiError::NoActiveAccount(
                "no default account is set".to_string(),
            ));
        }
        self.account_map
            .get_key_value(self.default_account.as_str())
            .map(|(name, account)| (name.as_str(), account))
            .ok_or_else(|| {
                ApiError::NoActiveAccount(format!(
                    "default account '{}' is not configured",
                    self.default_account
                ))
            })
    }
}
