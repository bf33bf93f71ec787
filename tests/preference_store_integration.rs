//! Integration tests for the preference store over real file storage.
//!
//! These tests verify:
//! 1. Saved context survives a restart (new store, same directory)
//! 2. A corrupt record is removed and defaults are used
//! 3. Debounced writes collapse a burst of edits into one write
//! 4. Legacy records without the setup flag infer it

use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;

use reply_coach::adapters::{FileMemoryStorage, InMemoryMemoryStorage};
use reply_coach::application::{PreferenceStore, StoreNotice, DEFAULT_DEBOUNCE};
use reply_coach::domain::memory::{PreferencePatch, PreferenceSnapshot, SetupForm};
use reply_coach::domain::personality::PersonalityCode;
use reply_coach::ports::MemoryStorage;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn file_store(dir: &TempDir) -> (PreferenceStore, FileMemoryStorage) {
    let storage = FileMemoryStorage::new(dir.path());
    (PreferenceStore::new(Arc::new(storage.clone())), storage)
}

async fn past_debounce() {
    tokio::time::sleep(DEFAULT_DEBOUNCE + Duration::from_millis(250)).await;
}

// =============================================================================
// Persistence
// =============================================================================

#[tokio::test]
async fn flushed_changes_survive_restart() {
    let dir = TempDir::new().unwrap();

    let (store, _) = file_store(&dir);
    store.hydrate().await;
    store
        .complete_setup(SetupForm {
            my_name: "Ana".into(),
            my_type: PersonalityCode::Istp,
            partner_name: "Leo".into(),
            partner_type: PersonalityCode::Enfp,
            relationship_tag: "partner".into(),
        })
        .unwrap();
    store.update(PreferencePatch::new().with_conversation_notes("texts late at night"));
    store.flush().await;
    let expected = store.get();

    let (restarted, _) = file_store(&dir);
    restarted.hydrate().await;

    assert_eq!(restarted.get(), expected);
    assert!(restarted.get().is_setup_complete);
    assert_eq!(restarted.notice(), None);
}

#[tokio::test]
async fn debounced_write_lands_without_flush() {
    let dir = TempDir::new().unwrap();

    let (store, storage) = file_store(&dir);
    store.hydrate().await;
    store.update(PreferencePatch::new().with_my_name("Ana"));
    assert_eq!(storage.load().await.unwrap(), None);

    past_debounce().await;

    let (restarted, _) = file_store(&dir);
    restarted.hydrate().await;
    assert_eq!(restarted.get().my_name, "Ana");
}

#[tokio::test]
async fn record_uses_camel_case_field_names() {
    let dir = TempDir::new().unwrap();

    let (store, storage) = file_store(&dir);
    store.hydrate().await;
    store.update(PreferencePatch::new().with_partner_type(PersonalityCode::Estj));
    store.flush().await;

    let raw = std::fs::read_to_string(storage.record_path()).unwrap();
    let record: serde_json::Value = serde_json::from_str(&raw).unwrap();
    for key in [
        "myName",
        "myMbti",
        "partnerName",
        "partnerMbti",
        "relationshipTag",
        "conversationNotes",
        "isSetupComplete",
    ] {
        assert!(record.get(key).is_some(), "missing {key}");
    }
    assert_eq!(record["partnerMbti"], "ESTJ");
}

// =============================================================================
// Recovery
// =============================================================================

#[tokio::test]
async fn corrupt_file_is_removed_and_defaults_used() {
    let dir = TempDir::new().unwrap();
    let (store, storage) = file_store(&dir);
    std::fs::write(storage.record_path(), "{ this is not json").unwrap();

    store.hydrate().await;

    assert!(store.is_hydrated());
    assert_eq!(store.get(), PreferenceSnapshot::default());
    assert_eq!(store.notice(), Some(StoreNotice::CorruptRecordReset));
    assert!(!storage.record_path().exists());
}

#[tokio::test]
async fn non_utf8_file_is_removed_and_defaults_used() {
    let dir = TempDir::new().unwrap();
    let (store, storage) = file_store(&dir);
    std::fs::write(storage.record_path(), [0xff, 0xfe, 0x7b]).unwrap();

    store.hydrate().await;

    assert!(store.is_hydrated());
    assert_eq!(store.get(), PreferenceSnapshot::default());
    assert_eq!(store.notice(), Some(StoreNotice::CorruptRecordReset));
    assert!(!storage.record_path().exists());
}

#[tokio::test]
async fn legacy_record_infers_setup_flag() {
    let storage = InMemoryMemoryStorage::with_record(r#"{"partnerName":"Leo","partnerMbti":"xxxx"}"#);
    let store = PreferenceStore::new(Arc::new(storage));

    store.hydrate().await;

    let snapshot = store.get();
    assert!(snapshot.is_setup_complete);
    assert_eq!(snapshot.partner_name, "Leo");
    assert_eq!(snapshot.partner_type, PersonalityCode::Entp);
}

#[tokio::test]
async fn legacy_record_with_only_notes_is_not_set_up() {
    let storage = InMemoryMemoryStorage::with_record(r#"{"conversationNotes":"hello"}"#);
    let store = PreferenceStore::new(Arc::new(storage));

    store.hydrate().await;

    assert!(!store.get().is_setup_complete);
    assert_eq!(store.get().conversation_notes, "hello");
}

// =============================================================================
// Debounce
// =============================================================================

#[tokio::test]
async fn two_quick_updates_produce_one_merged_write() {
    let storage = InMemoryMemoryStorage::new();
    let store = PreferenceStore::new(Arc::new(storage.clone()));
    store.hydrate().await;

    store.update(PreferencePatch::new().with_my_name("Ana"));
    tokio::time::sleep(Duration::from_millis(100)).await;
    store.update(PreferencePatch::new().with_relationship_tag("best friend"));

    past_debounce().await;

    assert_eq!(storage.save_count(), 1);
    let record: serde_json::Value =
        serde_json::from_str(&storage.record().await.unwrap()).unwrap();
    assert_eq!(record["myName"], "Ana");
    assert_eq!(record["relationshipTag"], "best friend");
}

#[tokio::test]
async fn updates_spread_beyond_debounce_write_separately() {
    let storage = InMemoryMemoryStorage::new();
    let store = PreferenceStore::new(Arc::new(storage.clone()));
    store.hydrate().await;

    store.update(PreferencePatch::new().with_my_name("Ana"));
    past_debounce().await;
    store.update(PreferencePatch::new().with_my_name("Ana B."));
    past_debounce().await;

    assert_eq!(storage.save_count(), 2);
}
