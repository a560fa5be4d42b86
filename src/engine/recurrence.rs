// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::ledger;
use crate::error::EngineError;
use crate::models::{Expense, RecurrenceFrequency};
use crate::store::RecordStore;
use chrono::{Datelike, NaiveDate, Utc};
use uuid::Uuid;

/// Annotation stamped on every materialized occurrence.
pub const GENERATED_NOTE: &str = "Auto-generated from recurring transaction";

/// Materialize each recurring template's due occurrence for `today`, at
/// most once per distinct due date. Runs once per session; running it
/// again on the same day writes nothing. Existing records are never
/// mutated or deleted, only appended to, and a run's materializations go
/// out in a single write.
///
/// Returns the newly created occurrences.
pub fn materialize_due(
    store: &dyn RecordStore,
    today: NaiveDate,
) -> Result<Vec<Expense>, EngineError> {
    let expenses = ledger::list(store)?;
    let mut generated: Vec<Expense> = Vec::new();

    for template in expenses.iter().filter(|e| e.is_template()) {
        let Some(candidate) = next_due_date(template, today) else {
            continue;
        };
        if let Some(end) = template.recurrence_end_date {
            if candidate > end {
                continue;
            }
        }
        // The template's own origin date never becomes an occurrence.
        if candidate == template.date {
            continue;
        }
        if has_occurrence(&expenses, &template.id, candidate) {
            continue;
        }
        generated.push(occurrence_of(template, candidate));
    }

    if generated.is_empty() {
        return Ok(generated);
    }
    let mut all = generated.clone();
    all.extend(expenses);
    ledger::save(store, &all)?;
    Ok(generated)
}

/// Candidate due date for `today`, by template frequency. `None` means no
/// occurrence is due this run. Weekly templates are never materialized;
/// the intended semantics are unresolved and the skip is deliberate.
fn next_due_date(template: &Expense, today: NaiveDate) -> Option<NaiveDate> {
    match template.recurrence_frequency? {
        RecurrenceFrequency::Monthly => {
            let day = template.date.day();
            if today.day() >= day {
                NaiveDate::from_ymd_opt(today.year(), today.month(), day)
            } else {
                None
            }
        }
        RecurrenceFrequency::Yearly => {
            // Checked construction skips Feb 29 templates in non-leap years.
            let candidate =
                NaiveDate::from_ymd_opt(today.year(), template.date.month(), template.date.day())?;
            if today >= candidate { Some(candidate) } else { None }
        }
        RecurrenceFrequency::Weekly => None,
    }
}

fn has_occurrence(expenses: &[Expense], template_id: &str, date: NaiveDate) -> bool {
    expenses
        .iter()
        .any(|e| e.parent_id.as_deref() == Some(template_id) && e.date == date)
}

fn occurrence_of(template: &Expense, date: NaiveDate) -> Expense {
    Expense {
        id: Uuid::new_v4().to_string(),
        user_id: template.user_id.clone(),
        created_at: Utc::now(),
        merchant_name: template.merchant_name.clone(),
        amount: template.amount,
        currency: template.currency.clone(),
        category: template.category.clone(),
        date,
        line_items: template.line_items.clone(),
        is_recurring: false,
        recurrence_frequency: None,
        recurrence_end_date: None,
        parent_id: Some(template.id.clone()),
        note: Some(GENERATED_NOTE.to_string()),
    }
}
