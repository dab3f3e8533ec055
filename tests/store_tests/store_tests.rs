//! Tests for Store
//!
//! These tests verify:
//! - Domain creation and replacement
//! - String get/set/increment/decrement and their failures
//! - Index insert/search/delete/range/rank and their failures
//! - Command routing through `execute`
//! - Domain isolation and concurrent access

use std::sync::Arc;
use std::thread;

use domainkv::error::KvError;
use domainkv::protocol::Command;
use domainkv::Store;

// =============================================================================
// Helper Functions
// =============================================================================

fn store_with_domain(name: &str) -> Store {
    let store = Store::new();
    store.create_domain(name);
    store
}

// =============================================================================
// Domain Tests
// =============================================================================

#[test]
fn test_unknown_domain_fails_everywhere() {
    let store = Store::new();

    assert!(matches!(store.set_string("nope", "k", "v"), Err(KvError::DomainNotFound)));
    assert!(matches!(store.get_string("nope", "k"), Err(KvError::DomainNotFound)));
    assert!(matches!(store.increment("nope", "k"), Err(KvError::DomainNotFound)));
    assert!(matches!(store.decrement("nope", "k"), Err(KvError::DomainNotFound)));
    assert!(matches!(
        store.insert_to_index("nope", "idx", "1", "v"),
        Err(KvError::DomainNotFound)
    ));
    assert!(matches!(
        store.search_in_index("nope", "idx", "1"),
        Err(KvError::DomainNotFound)
    ));
    assert!(matches!(
        store.rank_in_index("nope", "idx", "1"),
        Err(KvError::DomainNotFound)
    ));
}

#[test]
fn test_create_domain_overwrites_previous() {
    let store = store_with_domain("d");
    store.set_string("d", "k", "v").unwrap();

    store.create_domain("d");

    assert_eq!(store.domain_count(), 1);
    assert!(matches!(store.get_string("d", "k"), Err(KvError::KeyNotFound)));
}

#[test]
fn test_domain_isolation() {
    let store = Store::new();
    store.create_domain("a");
    store.create_domain("b");

    store.set_string("a", "shared", "from-a").unwrap();
    store.set_string("b", "shared", "from-b").unwrap();
    assert_eq!(store.get_string("a", "shared").unwrap(), "from-a");
    assert_eq!(store.get_string("b", "shared").unwrap(), "from-b");

    store.insert_to_index("a", "idx", "1", "a1").unwrap();
    store.insert_to_index("b", "idx", "1", "b1").unwrap();
    store.delete_from_index("a", "idx", "1").unwrap();

    assert!(matches!(store.search_in_index("a", "idx", "1"), Err(KvError::KeyNotFound)));
    assert_eq!(store.search_in_index("b", "idx", "1").unwrap(), "b1");

    // Resetting one domain wipes only its own strings
    store.create_domain("a");
    assert!(matches!(store.get_string("a", "shared"), Err(KvError::KeyNotFound)));
    assert_eq!(store.get_string("b", "shared").unwrap(), "from-b");
    assert_eq!(store.search_in_index("b", "idx", "1").unwrap(), "b1");
}

// =============================================================================
// String Tests
// =============================================================================

#[test]
fn test_set_get_increment_scenario() {
    let store = store_with_domain("d");

    store.set_string("d", "k", "5").unwrap();
    assert_eq!(store.increment("d", "k").unwrap(), 6);
    assert_eq!(store.get_string("d", "k").unwrap(), "6");

    assert!(matches!(store.get_string("d", "missing"), Err(KvError::KeyNotFound)));
}

#[test]
fn test_decrement_goes_negative() {
    let store = store_with_domain("d");

    store.set_string("d", "n", "0").unwrap();
    store.decrement("d", "n").unwrap();
    store.decrement("d", "n").unwrap();

    assert_eq!(store.get_string("d", "n").unwrap(), "-2");
}

#[test]
fn test_set_overwrites() {
    let store = store_with_domain("d");

    store.set_string("d", "k", "one").unwrap();
    store.set_string("d", "k", "two").unwrap();

    assert_eq!(store.get_string("d", "k").unwrap(), "two");
}

#[test]
fn test_increment_non_integer_fails() {
    let store = store_with_domain("d");
    store.set_string("d", "k", "abc").unwrap();

    let err = store.increment("d", "k").unwrap_err();
    assert!(matches!(err, KvError::NotAnInteger));
    assert_eq!(err.to_string(), "value is not an integer");

    // Value is left untouched
    assert_eq!(store.get_string("d", "k").unwrap(), "abc");
}

#[test]
fn test_increment_missing_key_is_not_an_integer() {
    let store = store_with_domain("d");

    assert!(matches!(store.increment("d", "absent"), Err(KvError::NotAnInteger)));
    assert!(matches!(store.decrement("d", "absent"), Err(KvError::NotAnInteger)));
    assert!(matches!(store.get_string("d", "absent"), Err(KvError::KeyNotFound)));
}

#[test]
fn test_increment_overflow_fails() {
    let store = store_with_domain("d");
    store.set_string("d", "k", &i64::MAX.to_string()).unwrap();

    assert!(matches!(store.increment("d", "k"), Err(KvError::NotAnInteger)));
}

// =============================================================================
// Index Tests
// =============================================================================

#[test]
fn test_index_insert_search_scenario() {
    let store = store_with_domain("d");

    store.insert_to_index("d", "idx", "3", "three").unwrap();

    assert_eq!(store.search_in_index("d", "idx", "3").unwrap(), "three");
    assert!(matches!(store.search_in_index("d", "idx", "9"), Err(KvError::KeyNotFound)));
}

#[test]
fn test_index_invalid_key() {
    let store = store_with_domain("d");

    let err = store.insert_to_index("d", "idx", "abc", "v").unwrap_err();
    assert!(matches!(err, KvError::InvalidKey("key")));
    assert_eq!(err.to_string(), "key must be integer");

    // Key is validated before the domain is resolved
    assert!(matches!(
        store.search_in_index("nope", "idx", "x"),
        Err(KvError::InvalidKey("key"))
    ));

    store.insert_to_index("d", "idx", "1", "v").unwrap();
    assert!(matches!(
        store.delete_range_from_index("d", "idx", "a", "5"),
        Err(KvError::InvalidKey("minKey"))
    ));
    assert!(matches!(
        store.delete_range_from_index("d", "idx", "1", ""),
        Err(KvError::InvalidKey("maxKey"))
    ));
}

#[test]
fn test_index_not_found() {
    let store = store_with_domain("d");

    let err = store.delete_from_index("d", "never", "1").unwrap_err();
    assert!(matches!(err, KvError::IndexNotFound));
    assert_eq!(err.to_string(), "skip list not found");

    assert!(matches!(
        store.delete_range_from_index("d", "never", "1", "2"),
        Err(KvError::IndexNotFound)
    ));
    assert!(matches!(store.search_in_index("d", "never", "1"), Err(KvError::IndexNotFound)));
    assert!(matches!(store.rank_in_index("d", "never", "1"), Err(KvError::IndexNotFound)));
}

#[test]
fn test_index_delete_missing_key_is_ok() {
    let store = store_with_domain("d");
    store.insert_to_index("d", "idx", "1", "one").unwrap();

    store.delete_from_index("d", "idx", "42").unwrap();

    assert_eq!(store.search_in_index("d", "idx", "1").unwrap(), "one");
}

#[test]
fn test_index_delete_range_and_rank() {
    let store = store_with_domain("d");
    for i in 1..=9 {
        store
            .insert_to_index("d", "idx", &i.to_string(), &format!("value{i}"))
            .unwrap();
    }

    assert_eq!(store.delete_range_from_index("d", "idx", "3", "7").unwrap(), 5);

    for key in ["1", "2", "8", "9"] {
        assert!(store.search_in_index("d", "idx", key).is_ok());
    }
    for key in ["3", "4", "5", "6", "7"] {
        assert!(matches!(store.search_in_index("d", "idx", key), Err(KvError::KeyNotFound)));
    }

    assert_eq!(store.rank_in_index("d", "idx", "8").unwrap(), "2");
    assert_eq!(store.rank_in_index("d", "idx", "5").unwrap(), "2");
    assert_eq!(store.rank_in_index("d", "idx", "100").unwrap(), "4");
    assert_eq!(store.domain("d").unwrap().index_len("idx").unwrap(), 4);
}

#[test]
fn test_indexes_are_independent() {
    let store = store_with_domain("d");

    store.insert_to_index("d", "a", "1", "in-a").unwrap();
    store.insert_to_index("d", "b", "1", "in-b").unwrap();

    assert_eq!(store.search_in_index("d", "a", "1").unwrap(), "in-a");
    assert_eq!(store.search_in_index("d", "b", "1").unwrap(), "in-b");
}

// =============================================================================
// Command Execution Tests
// =============================================================================

#[test]
fn test_execute_routes_commands() {
    let store = Store::new();

    let run = |cmd: Command| store.execute(cmd);

    assert_eq!(run(Command::CreateDomain { domain: "d".into() }).unwrap(), None);
    assert_eq!(
        run(Command::SetString { domain: "d".into(), key: "k".into(), value: "1".into() }).unwrap(),
        None
    );
    assert_eq!(
        run(Command::Increment { domain: "d".into(), key: "k".into() }).unwrap(),
        Some("2".to_string())
    );
    assert_eq!(
        run(Command::GetString { domain: "d".into(), key: "k".into() }).unwrap(),
        Some("2".to_string())
    );
    assert_eq!(
        run(Command::InsertIndex {
            domain: "d".into(),
            index: "idx".into(),
            key: "10".into(),
            value: "ten".into(),
        })
        .unwrap(),
        None
    );
    assert_eq!(
        run(Command::RankIndex { domain: "d".into(), index: "idx".into(), key: "11".into() })
            .unwrap(),
        Some("1".to_string())
    );
    assert_eq!(
        run(Command::DeleteRangeIndex {
            domain: "d".into(),
            index: "idx".into(),
            min_key: "0".into(),
            max_key: "100".into(),
        })
        .unwrap(),
        Some("1".to_string())
    );
    assert!(matches!(
        run(Command::SearchIndex { domain: "d".into(), index: "idx".into(), key: "10".into() }),
        Err(KvError::KeyNotFound)
    ));
}

// =============================================================================
// Concurrency Tests
// =============================================================================

#[test]
fn test_concurrent_increments_are_serialized() {
    let store = Arc::new(store_with_domain("d"));
    store.set_string("d", "counter", "0").unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for _ in 0..250 {
                    store.increment("d", "counter").unwrap();
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(store.get_string("d", "counter").unwrap(), "2000");
}

#[test]
fn test_concurrent_index_writers_and_readers() {
    let store = Arc::new(store_with_domain("d"));

    let writers: Vec<_> = (0..4i64)
        .map(|t| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..200i64 {
                    let key = (i * 4 + t).to_string();
                    store.insert_to_index("d", "idx", &key, &key).unwrap();
                }
            })
        })
        .collect();

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for _ in 0..200 {
                    match store.rank_in_index("d", "idx", "400") {
                        Ok(rank) => assert!(rank.parse::<usize>().unwrap() <= 400),
                        Err(KvError::IndexNotFound) => {}
                        Err(e) => panic!("unexpected error: {e}"),
                    }
                }
            })
        })
        .collect();

    for h in writers.into_iter().chain(readers) {
        h.join().unwrap();
    }

    assert_eq!(store.rank_in_index("d", "idx", "800").unwrap(), "800");
    assert_eq!(store.search_in_index("d", "idx", "799").unwrap(), "799");
}

#[test]
fn test_concurrent_domain_creation() {
    let store = Arc::new(Store::new());

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..50 {
                    let name = format!("domain-{t}-{i}");
                    store.create_domain(&name);
                    store.set_string(&name, "k", "v").unwrap();
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(store.domain_count(), 400);
    assert_eq!(store.get_string("domain-7-49", "k").unwrap(), "v");
}
