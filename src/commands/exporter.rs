// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::{budgets, ledger};
use crate::store::RecordStore;
use anyhow::Result;
use serde_json::json;

pub fn handle(store: &dyn RecordStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("expenses", sub)) => export_expenses(store, sub),
        Some(("budgets", sub)) => export_budgets(store, sub),
        _ => Ok(()),
    }
}

fn export_expenses(store: &dyn RecordStore, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();
    let expenses = ledger::list(store)?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "id", "date", "merchant", "amount", "currency", "category", "recurring", "note",
            ])?;
            for e in &expenses {
                wtr.write_record([
                    e.id.clone(),
                    e.date.to_string(),
                    e.merchant_name.clone(),
                    e.amount.to_string(),
                    e.currency.clone(),
                    e.category.clone(),
                    e.recurrence_frequency
                        .map(|f| f.to_string())
                        .unwrap_or_default(),
                    e.note.clone().unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(&expenses)?)?;
        }
        _ => anyhow::bail!("Unknown format: {} (use csv|json)", fmt),
    }
    println!("Exported {} expenses to {}", expenses.len(), out);
    Ok(())
}

fn export_budgets(store: &dyn RecordStore, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();
    let entries = budgets::list(store)?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["category", "amount"])?;
            for b in &entries {
                wtr.write_record([b.category.clone(), b.amount.to_string()])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let items: Vec<serde_json::Value> = entries
                .iter()
                .map(|b| json!({ "category": b.category, "amount": b.amount.to_string() }))
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => anyhow::bail!("Unknown format: {} (use csv|json)", fmt),
    }
    println!("Exported {} budgets to {}", entries.len(), out);
    Ok(())
}
