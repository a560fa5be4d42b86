// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::EngineError;
use crate::models::{Expense, LineItem, NewExpense};
use crate::store::{EXPENSES_KEY, RecordStore, read_json, write_json};
use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

/// All expenses, most recently created first. First access with nothing
/// stored (or an undecodable blob) seeds a small starter set and persists
/// it, so the ledger is never empty on a fresh profile.
pub fn list(store: &dyn RecordStore) -> Result<Vec<Expense>, EngineError> {
    match read_json::<Vec<Expense>>(store, EXPENSES_KEY)? {
        Some(expenses) => Ok(expenses),
        None => {
            let seeded = starter_expenses();
            save(store, &seeded)?;
            Ok(seeded)
        }
    }
}

/// Validate, assign id and creation time, prepend, persist. The stored
/// record is returned. Nothing is written when validation fails.
pub fn create(store: &dyn RecordStore, new: NewExpense) -> Result<Expense, EngineError> {
    validate_amounts(&new.amount, &new.line_items)?;
    let expense = Expense {
        id: Uuid::new_v4().to_string(),
        user_id: new.user_id,
        created_at: Utc::now(),
        merchant_name: new.merchant_name,
        amount: new.amount,
        currency: new.currency,
        category: new.category,
        date: new.date,
        line_items: new.line_items,
        is_recurring: new.is_recurring,
        // Frequency only means something on a recurring record.
        recurrence_frequency: if new.is_recurring {
            new.recurrence_frequency
        } else {
            None
        },
        recurrence_end_date: if new.is_recurring {
            new.recurrence_end_date
        } else {
            None
        },
        parent_id: None,
        note: new.note,
    };
    let mut all = list(store)?;
    all.insert(0, expense.clone());
    save(store, &all)?;
    Ok(expense)
}

/// Replace the record matching `expense.id`. An unmatched id prepends the
/// record as given (upsert-by-id).
pub fn update(store: &dyn RecordStore, expense: Expense) -> Result<Expense, EngineError> {
    validate_amounts(&expense.amount, &expense.line_items)?;
    let mut all = list(store)?;
    match all.iter_mut().find(|e| e.id == expense.id) {
        Some(slot) => *slot = expense.clone(),
        None => all.insert(0, expense.clone()),
    }
    save(store, &all)?;
    Ok(expense)
}

/// Rewrite the category field on every matching record in one persisted
/// write. Returns how many records changed. Cascade step for category
/// renames; the registry owns the ordering.
pub fn rename_category_references(
    store: &dyn RecordStore,
    old: &str,
    new: &str,
) -> Result<usize, EngineError> {
    let mut all = list(store)?;
    let mut changed = 0;
    for e in all.iter_mut() {
        if e.category == old {
            e.category = new.to_string();
            changed += 1;
        }
    }
    save(store, &all)?;
    Ok(changed)
}

pub(crate) fn save(store: &dyn RecordStore, expenses: &[Expense]) -> Result<(), EngineError> {
    write_json(store, EXPENSES_KEY, &expenses)
}

pub(crate) fn validate_amounts(
    amount: &Decimal,
    line_items: &Option<Vec<LineItem>>,
) -> Result<(), EngineError> {
    if *amount < Decimal::ZERO {
        return Err(EngineError::InvalidAmount(format!(
            "amount {} is negative",
            amount
        )));
    }
    if let Some(items) = line_items {
        for item in items {
            if item.price < Decimal::ZERO {
                return Err(EngineError::InvalidAmount(format!(
                    "line item '{}' has negative price {}",
                    item.label, item.price
                )));
            }
        }
    }
    Ok(())
}

fn starter_expenses() -> Vec<Expense> {
    let now = Utc::now();
    let today = now.date_naive();
    let sample = |merchant: &str, amount: Decimal, category: &str, days_ago: i64| Expense {
        id: Uuid::new_v4().to_string(),
        user_id: "local".to_string(),
        created_at: now,
        merchant_name: merchant.to_string(),
        amount,
        currency: "USD".to_string(),
        category: category.to_string(),
        date: today - Duration::days(days_ago),
        line_items: None,
        is_recurring: false,
        recurrence_frequency: None,
        recurrence_end_date: None,
        parent_id: None,
        note: None,
    };
    vec![
        sample("Blue Bottle Coffee", Decimal::new(450, 2), "Food & Drink", 1),
        sample("Whole Foods Market", Decimal::new(6235, 2), "Groceries", 3),
        sample("Cinema City", Decimal::new(1599, 2), "Entertainment", 6),
    ]
}
