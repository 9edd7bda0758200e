//! Durable storage tests
//! Sessions kept in a file must survive the process and degrade to
//! anonymous when the file cannot be written.
//!
//! Run with: cargo test --test storage_tests

use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use storefront::auth::{SessionStore, User, UserUpdate};
use storefront::config::{StorageBackend, StorageConfig};
use storefront::storage::{self, FileStorage, Storage};
use tempfile::TempDir;

fn file_store(path: &std::path::Path) -> SessionStore {
    SessionStore::new(Arc::new(FileStorage::new(path)))
}

#[test]
fn test_session_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");

    {
        let store = file_store(&path);
        store.login("tok123", &User::new("u1", "Jo", "jo@x.com"));
    }

    let reopened = file_store(&path);
    assert_eq!(reopened.get_token().as_deref(), Some("tok123"));
    assert_eq!(reopened.get_user().unwrap().name, "Jo");
    println!("✓ Session persisted to {:?}", path);
}

#[test]
fn test_logout_clears_file_entries() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");
    let store = file_store(&path);

    store.login("tok123", &User::new("u1", "Jo", "jo@x.com"));
    store.logout();

    let content = fs::read_to_string(&path).unwrap();
    let entries: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(entries, serde_json::json!({}));
    assert!(file_store(&path).session().is_none());
}

#[test]
fn test_file_keeps_unrelated_keys() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");
    let storage = FileStorage::new(&path);
    storage.set("theme", "dark").unwrap();

    let store = SessionStore::new(Arc::new(FileStorage::new(&path)));
    store.login("tok", &User::new("u1", "Jo", "jo@x.com"));
    store.logout();

    assert_eq!(storage.get("theme").as_deref(), Some("dark"));
}

#[test]
fn test_corrupt_user_in_file_reads_absent() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");
    fs::write(&path, r#"{"authToken":"tok","user":"{broken"}"#).unwrap();

    let store = file_store(&path);
    assert_eq!(store.get_token().as_deref(), Some("tok"));
    assert!(store.get_user().is_none());
    assert!(store.session().is_none());
}

#[test]
fn test_unwritable_storage_degrades_to_anonymous() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("not-a-directory");
    fs::write(&blocker, "").unwrap();
    let store = file_store(&blocker.join("session.json"));

    let notified = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&notified);
    let _sub = store.subscribe(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    store.login("tok123", &User::new("u1", "Jo", "jo@x.com"));
    store.update_user(&UserUpdate::default());
    store.logout();

    assert!(store.get_token().is_none());
    assert!(store.get_user().is_none());
    assert!(!store.is_authenticated());
    // login and logout still announce themselves; update has no user to merge into
    assert_eq!(notified.load(Ordering::SeqCst), 2);
}

#[test]
fn test_from_config_selects_backend() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");

    let file = storage::from_config(&StorageConfig {
        backend: StorageBackend::File,
        path: path.clone(),
    });
    file.set("k", "v").unwrap();
    assert!(path.exists());

    let memory = storage::from_config(&StorageConfig {
        backend: StorageBackend::Memory,
        path: dir.path().join("unused.json"),
    });
    memory.set("k", "v").unwrap();
    assert_eq!(memory.get("k").as_deref(), Some("v"));
    assert!(!dir.path().join("unused.json").exists());
}

#[test]
fn test_config_relative_session_lands_beside_config() {
    let project = TempDir::new().unwrap();
    let config_path = project.path().join("storefront.toml");
    fs::write(
        &config_path,
        "[storage]\nbackend = \"file\"\npath = \".storefront/session.json\"\n",
    )
    .unwrap();

    let config = storefront::config::loader::load_config_from_path(&config_path).unwrap();
    let store = SessionStore::new(storage::from_config(&config.storage));
    store.login("tok", &User::new("u1", "Jo", "jo@x.com"));

    let session_file = project.path().join(".storefront").join("session.json");
    assert!(session_file.exists());
    assert_eq!(file_store(&session_file).get_token().as_deref(), Some("tok"));
}
