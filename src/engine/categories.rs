// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::{budgets, ledger};
use crate::error::EngineError;
use crate::models::SubscriptionStatus;
use crate::store::{CATEGORIES_KEY, RecordStore, read_json, write_json};

pub const DEFAULT_CATEGORIES: [&str; 9] = [
    "Food & Drink",
    "Groceries",
    "Transport",
    "Shopping",
    "Entertainment",
    "Bills & Utilities",
    "Health",
    "Travel",
    "Other",
];

/// Free tier may add this many custom categories beyond the defaults.
pub const FREE_EXTRA_CATEGORIES: usize = 2;
pub const FREE_CATEGORY_LIMIT: usize = DEFAULT_CATEGORIES.len() + FREE_EXTRA_CATEGORIES;

/// What a rename touched, for reporting back to the caller.
#[derive(Debug)]
pub struct RenameReport {
    pub renamed: bool,
    pub expenses_updated: usize,
    pub budgets_updated: usize,
}

/// Ordered category names. Never empty: an absent or undecodable blob
/// seeds the built-in defaults and persists them.
pub fn list(store: &dyn RecordStore) -> Result<Vec<String>, EngineError> {
    match read_json::<Vec<String>>(store, CATEGORIES_KEY)? {
        Some(categories) => Ok(categories),
        None => {
            let defaults: Vec<String> = DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect();
            save(store, &defaults)?;
            Ok(defaults)
        }
    }
}

pub fn can_add(store: &dyn RecordStore, tier: SubscriptionStatus) -> Result<bool, EngineError> {
    match tier {
        SubscriptionStatus::Trial | SubscriptionStatus::Premium => Ok(true),
        SubscriptionStatus::Free => Ok(list(store)?.len() < FREE_CATEGORY_LIMIT),
    }
}

/// Append `name`, preserving insertion order. A name already present is a
/// silent no-op. Returns the updated list.
pub fn add(
    store: &dyn RecordStore,
    tier: SubscriptionStatus,
    name: &str,
) -> Result<Vec<String>, EngineError> {
    if !can_add(store, tier)? {
        return Err(EngineError::CategoryLimitReached {
            tier,
            limit: FREE_CATEGORY_LIMIT,
        });
    }
    let mut categories = list(store)?;
    if categories.iter().any(|c| c == name) {
        return Ok(categories);
    }
    categories.push(name.to_string());
    save(store, &categories)?;
    Ok(categories)
}

/// Replace `old` with `new` in place, position preserved; no-op when `old`
/// is absent. Cascades into the ledger and then the budget registry.
///
/// Cascade order: categories, expenses, budgets. A failure on the first
/// write is a plain `StorageUnavailable` (nothing committed); a failure
/// after that surfaces `PartialCascadeFailure` naming what did commit, so
/// the caller knows the stores need reconciliation rather than a retry.
pub fn rename(store: &dyn RecordStore, old: &str, new: &str) -> Result<RenameReport, EngineError> {
    let mut categories = list(store)?;
    let Some(pos) = categories.iter().position(|c| c == old) else {
        return Ok(RenameReport {
            renamed: false,
            expenses_updated: 0,
            budgets_updated: 0,
        });
    };
    categories[pos] = new.to_string();
    save(store, &categories)?;

    let expenses_updated = ledger::rename_category_references(store, old, new).map_err(|e| {
        EngineError::PartialCascadeFailure {
            completed: "categories",
            source: Box::new(e),
        }
    })?;
    let budgets_updated = budgets::rename_category(store, old, new).map_err(|e| {
        EngineError::PartialCascadeFailure {
            completed: "categories and expenses",
            source: Box::new(e),
        }
    })?;
    Ok(RenameReport {
        renamed: true,
        expenses_updated,
        budgets_updated,
    })
}

fn save(store: &dyn RecordStore, categories: &[String]) -> Result<(), EngineError> {
    write_json(store, CATEGORIES_KEY, &categories)
}
