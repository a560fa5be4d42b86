// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::EngineError;
use crate::models::Budget;
use crate::store::{BUDGETS_KEY, RecordStore, read_json, write_json};
use rust_decimal::Decimal;

/// Monthly ceilings, one entry per category at most. Empty when unset.
pub fn list(store: &dyn RecordStore) -> Result<Vec<Budget>, EngineError> {
    Ok(read_json::<Vec<Budget>>(store, BUDGETS_KEY)?.unwrap_or_default())
}

/// Replace the amount for an existing category entry or append a new one.
/// Category existence in the registry is deliberately not checked; budgets
/// may outlive the category they were keyed to.
pub fn upsert(
    store: &dyn RecordStore,
    category: &str,
    amount: Decimal,
) -> Result<Vec<Budget>, EngineError> {
    if amount < Decimal::ZERO {
        return Err(EngineError::InvalidAmount(format!(
            "budget amount {} is negative",
            amount
        )));
    }
    let mut budgets = list(store)?;
    match budgets.iter_mut().find(|b| b.category == category) {
        Some(entry) => entry.amount = amount,
        None => budgets.push(Budget {
            category: category.to_string(),
            amount,
        }),
    }
    save(store, &budgets)?;
    Ok(budgets)
}

/// Re-key entries from `old` to `new` in one persisted write. Cascade step
/// for category renames. A budget already keyed `new` is left alone, which
/// can produce duplicate keys; `doctor` reports those.
pub fn rename_category(store: &dyn RecordStore, old: &str, new: &str) -> Result<usize, EngineError> {
    let mut budgets = list(store)?;
    let mut changed = 0;
    for b in budgets.iter_mut() {
        if b.category == old {
            b.category = new.to_string();
            changed += 1;
        }
    }
    save(store, &budgets)?;
    Ok(changed)
}

fn save(store: &dyn RecordStore, budgets: &[Budget]) -> Result<(), EngineError> {
    write_json(store, BUDGETS_KEY, &budgets)
}
