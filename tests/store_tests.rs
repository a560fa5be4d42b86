// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use spendclip::db::SqliteStore;
use spendclip::error::EngineError;
use spendclip::models::Expense;
use spendclip::store::{EXPENSES_KEY, MemoryStore, RecordStore, read_json};
use tempfile::tempdir;

#[test]
fn sqlite_round_trip_overwrite_remove() {
    let dir = tempdir().unwrap();
    let store = SqliteStore::open(&dir.path().join("t.sqlite")).unwrap();

    assert!(store.read("k").unwrap().is_none());
    store.write("k", "v1").unwrap();
    assert_eq!(store.read("k").unwrap().as_deref(), Some("v1"));
    store.write("k", "v2").unwrap();
    assert_eq!(store.read("k").unwrap().as_deref(), Some("v2"));
    store.remove("k").unwrap();
    assert!(store.read("k").unwrap().is_none());
}

#[test]
fn sqlite_persists_across_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("t.sqlite");
    {
        let store = SqliteStore::open(&path).unwrap();
        store.write("k", "v").unwrap();
    }
    let store = SqliteStore::open(&path).unwrap();
    assert_eq!(store.read("k").unwrap().as_deref(), Some("v"));
}

#[test]
fn corrupt_blob_reads_as_absent() {
    let store = MemoryStore::new();
    store.write(EXPENSES_KEY, "{definitely not json").unwrap();
    let decoded: Option<Vec<Expense>> = read_json(&store, EXPENSES_KEY).unwrap();
    assert!(decoded.is_none());
}

#[test]
fn memory_store_write_budget() {
    let store = MemoryStore::new();
    store.write("a", "1").unwrap();

    store.fail_after(1);
    store.write("b", "2").unwrap();
    let err = store.write("c", "3").unwrap_err();
    assert!(matches!(err, EngineError::StorageUnavailable(_)));

    // The failed write left nothing behind; reads still work.
    assert!(store.read("c").unwrap().is_none());
    assert_eq!(store.read("b").unwrap().as_deref(), Some("2"));
}
