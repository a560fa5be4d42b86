// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::{budgets, categories, ledger};
use crate::store::RecordStore;
use crate::utils::pretty_table;
use anyhow::Result;
use std::collections::HashSet;

pub fn handle(store: &dyn RecordStore) -> Result<()> {
    let mut rows = Vec::new();

    let cats = categories::list(store)?;
    let budget_entries = budgets::list(store)?;
    let expenses = ledger::list(store)?;

    // 1) Budgets keyed to a category the registry no longer has
    for b in &budget_entries {
        if !cats.contains(&b.category) {
            rows.push(vec!["orphaned_budget".into(), b.category.clone()]);
        }
    }

    // 2) Duplicate budget keys (possible after a rename collision)
    let mut seen_budgets: HashSet<&str> = HashSet::new();
    for b in &budget_entries {
        if !seen_budgets.insert(b.category.as_str()) {
            rows.push(vec!["duplicate_budget".into(), b.category.clone()]);
        }
    }

    // 3) Duplicate category names
    let mut seen_cats: HashSet<&str> = HashSet::new();
    for c in &cats {
        if !seen_cats.insert(c.as_str()) {
            rows.push(vec!["duplicate_category".into(), c.clone()]);
        }
    }

    // 4) A record cannot be both a template and an occurrence
    for e in &expenses {
        if e.is_recurring && e.parent_id.is_some() {
            rows.push(vec![
                "recurring_occurrence".into(),
                format!("{} ({})", e.merchant_name, e.date),
            ]);
        }
    }

    // 5) Occurrences whose template is gone
    let ids: HashSet<&str> = expenses.iter().map(|e| e.id.as_str()).collect();
    for e in &expenses {
        if let Some(pid) = &e.parent_id {
            if !ids.contains(pid.as_str()) {
                rows.push(vec![
                    "missing_template".into(),
                    format!("{} ({})", e.merchant_name, e.date),
                ]);
            }
        }
    }

    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
