//! Tests for the store façade
//!
//! These tests verify:
//! - Create/lookup round-trip and id assignment
//! - Tombstone masking across all read paths
//! - Last-write-wins versioning
//! - Index reconstruction equivalence
//! - Idempotent deletes
//! - Predicate-per-version listing semantics
//! - Bulk initialization

use std::fs;

use chrono::{Datelike, TimeZone, Utc};
use newslog::log::SENTINEL;
use newslog::{Article, Config, NewslogError, OffsetIndex, Store};
use tempfile::TempDir;
use uuid::Uuid;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_store() -> (TempDir, Store<Article>) {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::builder()
        .log_path(temp_dir.path().join("articles.db"))
        .build();
    let store = Store::open(config).unwrap();
    (temp_dir, store)
}

fn article(title: &str, year: i32) -> Article {
    Article::new(
        title,
        "body",
        Utc.with_ymd_and_hms(year, 6, 1, 12, 0, 0).unwrap(),
    )
}

// =============================================================================
// Create / Lookup Tests
// =============================================================================

#[test]
fn test_create_then_get_round_trip() {
    let (_temp, store) = setup_store();

    let draft = article("round trip", 2023);
    let id = store.create(draft.clone()).unwrap();
    assert!(!id.is_nil());

    let fetched = store.get_by_id(id).unwrap().unwrap();
    assert_eq!(fetched.id, id);
    assert_eq!(fetched.title, draft.title);
    assert_eq!(fetched.body, draft.body);
    assert_eq!(fetched.date, draft.date);
    assert!(!fetched.is_deleted);
}

#[test]
fn test_create_rejects_preassigned_id() {
    let (_temp, store) = setup_store();

    let mut draft = article("already has an id", 2023);
    draft.id = Uuid::new_v4();

    let err = store.create(draft).unwrap_err();
    assert!(matches!(err, NewslogError::InvalidArgument(_)));
}

#[test]
fn test_get_unknown_id_is_none() {
    let (_temp, store) = setup_store();
    assert!(store.get_by_id(Uuid::new_v4()).unwrap().is_none());
}

#[test]
fn test_get_by_id_detects_mismatched_record() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("articles.db");

    // Meta line and payload id disagree: the log is corrupt
    let meta_id = Uuid::new_v4();
    let mut payload = article("corrupt", 2023);
    payload.id = Uuid::new_v4();
    let json = serde_json::to_string(&payload).unwrap();
    fs::write(&path, format!("{SENTINEL}\n{meta_id}\n{json}\n")).unwrap();

    let config = Config::builder().log_path(&path).build();
    let store: Store<Article> = Store::open(config).unwrap();

    let err = store.get_by_id(meta_id).unwrap_err();
    assert!(matches!(err, NewslogError::DataIntegrity(_)));
}

// =============================================================================
// Tombstone Tests
// =============================================================================

#[test]
fn test_tombstone_masks_all_read_paths() {
    let (_temp, store) = setup_store();

    let id = store.create(article("doomed", 2022)).unwrap();
    store.delete_by_id(id).unwrap();

    assert!(store.get_by_id(id).unwrap().is_none());
    assert!(store.get_all().unwrap().is_empty());
    assert!(store.list_distinct_years().unwrap().is_empty());
}

#[test]
fn test_delete_is_idempotent_and_appends_tombstones() {
    let (_temp, store) = setup_store();

    let id = Uuid::new_v4();
    store.delete_by_id(id).unwrap();
    let len_after_first = fs::metadata(store.log_path()).unwrap().len();

    store.delete_by_id(id).unwrap();
    let len_after_second = fs::metadata(store.log_path()).unwrap().len();

    // Log grows monotonically: two tombstone records
    assert!(len_after_second > len_after_first);
    assert!(store.get_by_id(id).unwrap().is_none());
    assert_eq!(store.indexed_ids(), 1);
}

// =============================================================================
// Versioning Tests
// =============================================================================

#[test]
fn test_last_write_wins_for_same_id() {
    let (_temp, store) = setup_store();

    let id = Uuid::new_v4();
    let mut v1 = article("first version", 2020);
    v1.id = id;
    let mut v2 = article("second version", 2021);
    v2.id = id;
    store.initialize(vec![v1, v2]).unwrap();

    let fetched = store.get_by_id(id).unwrap().unwrap();
    assert_eq!(fetched.title, "second version");

    let all = store.get_all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].title, "second version");
}

#[test]
fn test_index_reconstruction_equivalence() {
    let (_temp, store) = setup_store();

    let a = store.create(article("a", 2020)).unwrap();
    let b = store.create(article("b", 2021)).unwrap();
    let c = store.create(article("c", 2022)).unwrap();
    store.delete_by_id(b).unwrap();
    store.delete_by_id(Uuid::new_v4()).unwrap();

    let rebuilt = OffsetIndex::build(store.log_path()).unwrap();
    assert_eq!(rebuilt.len(), store.indexed_ids());
    for id in [a, b, c] {
        assert_eq!(rebuilt.offset(&id), store.indexed_offset(id));
    }
    for (id, offset) in rebuilt.iter() {
        assert_eq!(store.indexed_offset(*id), Some(*offset));
    }
}

#[test]
fn test_reopen_rebuilds_index_from_log() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("articles.db");

    let id = {
        let config = Config::builder().log_path(&path).build();
        let store: Store<Article> = Store::open(config).unwrap();
        let id = store.create(article("survives reopen", 2023)).unwrap();
        store.delete_by_id(store.create(article("deleted", 2023)).unwrap()).unwrap();
        id
    };

    let config = Config::builder().log_path(&path).build();
    let store: Store<Article> = Store::open(config).unwrap();

    let fetched = store.get_by_id(id).unwrap().unwrap();
    assert_eq!(fetched.title, "survives reopen");
    assert_eq!(store.get_all().unwrap().len(), 1);
}

// =============================================================================
// Listing / Aggregation Tests
// =============================================================================

#[test]
fn test_get_all_sorted_by_date_descending() {
    let (_temp, store) = setup_store();

    store.create(article("old", 2019)).unwrap();
    store.create(article("newest", 2024)).unwrap();
    store.create(article("middle", 2021)).unwrap();

    let titles: Vec<String> = store
        .get_all()
        .unwrap()
        .into_iter()
        .map(|a| a.title)
        .collect();
    assert_eq!(titles, vec!["newest", "middle", "old"]);
}

#[test]
fn test_find_filters_live_entities() {
    let (_temp, store) = setup_store();

    store.create(article("keep 2021", 2021)).unwrap();
    store.create(article("drop 2019", 2019)).unwrap();

    let matches = store.find(|a| a.date.year() > 2020).unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].title, "keep 2021");
}

#[test]
fn test_find_predicate_sees_every_version_last_accepted_wins() {
    let (_temp, store) = setup_store();

    // Three versions of one id: accepted, rejected, rejected.
    // The rejected versions must not dislodge the accepted one.
    let id = Uuid::new_v4();
    let mut v1 = article("accepted", 2020);
    v1.id = id;
    let mut v2 = article("rejected", 2021);
    v2.id = id;
    let mut v3 = article("rejected again", 2022);
    v3.id = id;
    store.initialize(vec![v1, v2, v3]).unwrap();

    let mut seen = Vec::new();
    let matches = store
        .find(|a| {
            seen.push(a.title.clone());
            a.title == "accepted"
        })
        .unwrap();

    // The predicate was consulted for every historical version
    assert_eq!(seen, vec!["accepted", "rejected", "rejected again"]);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].title, "accepted");
}

#[test]
fn test_find_tombstone_overwrites_accepted_version() {
    let (_temp, store) = setup_store();

    let id = store.create(article("accepted then deleted", 2020)).unwrap();
    store.delete_by_id(id).unwrap();

    // Even a predicate that rejects tombstones cannot resurrect the entity
    let matches = store.find(|a| !a.is_deleted).unwrap();
    assert!(matches.is_empty());
}

#[test]
fn test_list_distinct_years_dedups_and_sorts_descending() {
    let (_temp, store) = setup_store();

    store.create(article("a", 2020)).unwrap();
    store.create(article("b", 2020)).unwrap();
    store.create(article("c", 2023)).unwrap();
    store.create(article("d", 2021)).unwrap();

    assert_eq!(store.list_distinct_years().unwrap(), vec![2023, 2021, 2020]);
}

// =============================================================================
// Initialization Tests
// =============================================================================

#[test]
fn test_initialize_assigns_missing_ids_and_replaces_log() {
    let (_temp, store) = setup_store();

    // Pre-existing content must be wiped
    store.create(article("stale", 2018)).unwrap();

    let mut with_id = article("kept id", 2021);
    with_id.id = Uuid::new_v4();
    let kept_id = with_id.id;

    store
        .initialize(vec![article("fresh id", 2020), with_id])
        .unwrap();

    let all = store.get_all().unwrap();
    assert_eq!(all.len(), 2);
    assert!(all.iter().all(|a| !a.id.is_nil()));
    assert_eq!(store.get_by_id(kept_id).unwrap().unwrap().title, "kept id");
    assert!(all.iter().all(|a| a.title != "stale"));
}

#[test]
fn test_scenario_initialize_delete_list() {
    let (_temp, store) = setup_store();

    store
        .initialize(vec![article("article a", 2020), article("article b", 2021)])
        .unwrap();
    assert_eq!(store.list_distinct_years().unwrap(), vec![2021, 2020]);

    let a = store
        .get_all()
        .unwrap()
        .into_iter()
        .find(|x| x.title == "article a")
        .unwrap();
    store.delete_by_id(a.id).unwrap();

    let remaining = store.get_all().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].title, "article b");
    assert_eq!(store.list_distinct_years().unwrap(), vec![2021]);
}
