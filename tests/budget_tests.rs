// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use spendclip::engine::budgets;
use spendclip::error::EngineError;
use spendclip::store::{BUDGETS_KEY, MemoryStore, RecordStore};

#[test]
fn list_is_empty_until_something_is_set() {
    let store = MemoryStore::new();
    assert!(budgets::list(&store).unwrap().is_empty());
    // Unlike the ledger, budgets seed nothing.
    assert!(store.read(BUDGETS_KEY).unwrap().is_none());
}

#[test]
fn upsert_inserts_then_replaces() {
    let store = MemoryStore::new();
    let after_insert = budgets::upsert(&store, "Groceries", Decimal::new(30000, 2)).unwrap();
    assert_eq!(after_insert.len(), 1);
    assert_eq!(after_insert[0].amount, Decimal::new(30000, 2));

    let after_replace = budgets::upsert(&store, "Groceries", Decimal::new(40000, 2)).unwrap();
    assert_eq!(after_replace.len(), 1);
    assert_eq!(after_replace[0].amount, Decimal::new(40000, 2));

    let reloaded = budgets::list(&store).unwrap();
    assert_eq!(reloaded.len(), 1);
    assert_eq!(reloaded[0].category, "Groceries");
}

#[test]
fn upsert_keeps_one_entry_per_category() {
    let store = MemoryStore::new();
    budgets::upsert(&store, "Groceries", Decimal::new(30000, 2)).unwrap();
    budgets::upsert(&store, "Transport", Decimal::new(8000, 2)).unwrap();
    budgets::upsert(&store, "Groceries", Decimal::new(32000, 2)).unwrap();

    let all = budgets::list(&store).unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].category, "Groceries");
    assert_eq!(all[1].category, "Transport");
}

#[test]
fn negative_budget_is_rejected() {
    let store = MemoryStore::new();
    let err = budgets::upsert(&store, "Groceries", Decimal::new(-100, 2)).unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));
    assert!(budgets::list(&store).unwrap().is_empty());
}

#[test]
fn rename_rekeys_matching_entries() {
    let store = MemoryStore::new();
    budgets::upsert(&store, "Transport", Decimal::new(8000, 2)).unwrap();
    budgets::upsert(&store, "Other", Decimal::new(2000, 2)).unwrap();

    let changed = budgets::rename_category(&store, "Transport", "Mobility").unwrap();
    assert_eq!(changed, 1);
    let all = budgets::list(&store).unwrap();
    assert_eq!(all[0].category, "Mobility");
    assert_eq!(all[0].amount, Decimal::new(8000, 2));
    assert_eq!(all[1].category, "Other");
}
