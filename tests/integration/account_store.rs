//! Integration tests for account store persistence

use pax8::account::{Account, AccountStoreFile, ConfigurationStore};
use pax8::error::ApiError;
use tempfile::TempDir;

#[test]
fn test_activate_round_trips_through_disk() {
    let temp = TempDir::new().unwrap();
    let file = AccountStoreFile::new(temp.path().join("config.json"));

    let mut store = file.load().unwrap().store;
    store.configure("acme", "abc".to_string(), "xyz".to_string());
    store.activate("acme").unwrap();
    file.save(&store).unwrap();

    let reloaded = file.load().unwrap().store;
    assert_eq!(reloaded.default_account, "acme");
    assert_eq!(reloaded.get("acme"), Some(&Account::new("abc", "xyz")));
    assert_eq!(reloaded, store);
}

#[test]
fn test_failed_activation_leaves_disk_untouched() {
    let temp = TempDir::new().unwrap();
    let file = AccountStoreFile::new(temp.path().join("config.json"));

    let mut store = ConfigurationStore::new();
    store.configure("acme", "abc".to_string(), "xyz".to_string());
    store.activate("acme").unwrap();
    file.save(&store).unwrap();
    let before = std::fs::read_to_string(file.path()).unwrap();

    let mut loaded = file.load().unwrap().store;
    let err = loaded.activate("globex").unwrap_err();
    assert!(matches!(err, ApiError::UnknownAccount(_)));
    assert_eq!(loaded.default_account, "acme");

    let after = std::fs::read_to_string(file.path()).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_repeated_configure_lists_name_once() {
    let temp = TempDir::new().unwrap();
    let file = AccountStoreFile::new(temp.path().join("config.json"));

    for secret in ["first", "second", "third"] {
        let mut store = file.load().unwrap().store;
        store.configure("acme", "abc".to_string(), secret.to_string());
        file.save(&store).unwrap();
    }

    let store = file.load().unwrap().store;
    assert_eq!(store.list(), vec!["acme"]);
    assert_eq!(store.get("acme").unwrap().client_secret, "third");
}

#[test]
fn test_dangling_default_is_tolerated_on_load() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.json");
    std::fs::write(&path, r#"{"defaultAccount":"ghost","accountMap":{}}"#).unwrap();

    let loaded = AccountStoreFile::new(&path).load().unwrap();
    assert!(loaded.parse_error.is_none());
    assert_eq!(loaded.store.default_account, "ghost");
    assert!(loaded.store.account_map.is_empty());
}

#[test]
fn test_unknown_fields_are_ignored() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.json");
    std::fs::write(
        &path,
        r#"{"defaultAccount":"acme","accountMap":{"acme":{"clientId":"abc","clientSecret":"xyz","region":"us"}},"version":2}"#,
    )
    .unwrap();

    let loaded = AccountStoreFile::new(&path).load().unwrap();
    assert!(loaded.parse_error.is_none());
    assert_eq!(loaded.store.get("acme"), Some(&Account::new("abc", "xyz")));
}
