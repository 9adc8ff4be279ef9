//! Account, settings and intro records persisted through the file backend.

use pretty_assertions::assert_eq;
use std::sync::Arc;
use tempfile::tempdir;
use ticket_resolver_store::{
    AccountError, AccountStore, FileStore, IntroFlag, SettingsRecord, SettingsStore, SharedStore,
};

fn open(root: &std::path::Path) -> SharedStore {
    Arc::new(FileStore::new(root).expect("file store"))
}

/// Records written by one process are visible after reopening the directory.
#[test]
fn records_survive_reopening_the_store() {
    let temp = tempdir().expect("tempdir");

    let store = open(temp.path());
    AccountStore::new(store.clone())
        .register("lin@example.com", "passw0rd", "Lin")
        .expect("register");
    SettingsStore::new(store.clone())
        .save(&SettingsRecord::with_api_key("demo-key"))
        .expect("save settings");
    IntroFlag::new(store).mark_seen().expect("intro");

    let store = open(temp.path());
    let record = AccountStore::new(store.clone())
        .authenticate("lin@example.com", "passw0rd")
        .expect("login after reopen");
    assert_eq!(record.name, "Lin");
    let settings = SettingsStore::new(store.clone())
        .load()
        .expect("load")
        .expect("present");
    assert_eq!(settings.api_key, "demo-key");
    assert!(IntroFlag::new(store).seen().expect("seen"));
}

/// Register then authenticate succeeds once per registration.
#[test]
fn register_then_authenticate() {
    let temp = tempdir().expect("tempdir");
    let accounts = AccountStore::new(open(temp.path()));
    for (email, name) in [("a@example.com", "A"), ("b@example.com", "B")] {
        accounts.register(email, "secret", name).expect("register");
        let record = accounts.authenticate(email, "secret").expect("login");
        assert_eq!(record.name, name);
        let err = accounts.register(email, "secret", name).expect_err("dup");
        assert!(matches!(err, AccountError::DuplicateAccount(_)));
    }
    assert_eq!(accounts.list().expect("list").len(), 2);
}

/// Blobs are stored under the browser storage key names.
#[test]
fn blobs_use_local_storage_key_names() {
    let temp = tempdir().expect("tempdir");
    let store = open(temp.path());
    AccountStore::new(store.clone())
        .register("k@example.com", "secret", "K")
        .expect("register");
    SettingsStore::new(store)
        .save(&SettingsRecord::with_api_key("key"))
        .expect("save");
    assert!(temp.path().join("registeredUsers.json").exists());
    assert!(temp.path().join("ai-ticket-resolver-settings.json").exists());

    let raw = std::fs::read_to_string(temp.path().join("ai-ticket-resolver-settings.json"))
        .expect("read");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("json");
    assert_eq!(value["apiKey"], "key");
    assert_eq!(value["indexName"], "ticket_embeddings");
    assert_eq!(value["maxTokens"], 1024);
}
