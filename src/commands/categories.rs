// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::{categories, subscription};
use crate::models::SubscriptionStatus;
use crate::store::RecordStore;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle(store: &dyn RecordStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(store, sub)?,
        Some(("add", sub)) => add(store, sub)?,
        Some(("rename", sub)) => rename(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn list(store: &dyn RecordStore, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let cats = categories::list(store)?;
    if !maybe_print_json(json_flag, jsonl_flag, &cats)? {
        let rows: Vec<Vec<String>> = cats
            .iter()
            .enumerate()
            .map(|(i, c)| vec![(i + 1).to_string(), c.clone()])
            .collect();
        println!("{}", pretty_table(&["#", "Category"], rows));
    }
    Ok(())
}

fn add(store: &dyn RecordStore, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let existing = categories::list(store)?;
    if existing.iter().any(|c| c == name) {
        println!("Category '{}' already exists", name);
        return Ok(());
    }
    let cats = categories::add(store, current_tier(store)?, name)?;
    println!("Added category '{}' ({} total)", name, cats.len());
    Ok(())
}

fn rename(store: &dyn RecordStore, sub: &clap::ArgMatches) -> Result<()> {
    let old = sub.get_one::<String>("old").unwrap();
    let new = sub.get_one::<String>("new").unwrap();
    let report = categories::rename(store, old, new)?;
    if !report.renamed {
        println!("No category named '{}'", old);
        return Ok(());
    }
    println!(
        "Renamed '{}' -> '{}' ({} expenses, {} budgets updated)",
        old, new, report.expenses_updated, report.budgets_updated
    );
    Ok(())
}

// A missing profile gets the most restrictive tier.
fn current_tier(store: &dyn RecordStore) -> Result<SubscriptionStatus> {
    Ok(subscription::load_profile(store)?
        .map(|p| p.subscription_status)
        .unwrap_or_default())
}
