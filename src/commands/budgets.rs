// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::{budgets, categories, ledger};
use crate::store::RecordStore;
use crate::utils::{maybe_print_json, month_of, parse_decimal, parse_month, pretty_table};
use anyhow::Result;
use chrono::Utc;
use rust_decimal::Decimal;

pub fn handle(store: &dyn RecordStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("report", sub)) => report(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn set(store: &dyn RecordStore, sub: &clap::ArgMatches) -> Result<()> {
    let cat = sub.get_one::<String>("category").unwrap();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    budgets::upsert(store, cat, amount)?;
    println!("Budget set: {} = {}/month", cat, amount.round_dp(2));
    Ok(())
}

fn list(store: &dyn RecordStore, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = budgets::list(store)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|b| vec![b.category.clone(), b.amount.round_dp(2).to_string()])
            .collect();
        println!("{}", pretty_table(&["Category", "Budget"], rows));
    }
    Ok(())
}

fn report(store: &dyn RecordStore, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let month = match sub.get_one::<String>("month") {
        Some(s) => parse_month(s)?,
        None => month_of(Utc::now().date_naive()),
    };

    let cats = categories::list(store)?;
    let budget_entries = budgets::list(store)?;
    let expenses = ledger::list(store)?;

    // For each category compare the ceiling with what the month spent.
    // Templates are obligations, not transactions, and are not counted.
    let mut data = Vec::new();
    for cat in &cats {
        let budget = budget_entries
            .iter()
            .find(|b| &b.category == cat)
            .map(|b| b.amount)
            .unwrap_or(Decimal::ZERO);
        let spent: Decimal = expenses
            .iter()
            .filter(|e| !e.is_template() && &e.category == cat && month_of(e.date) == month)
            .map(|e| e.amount)
            .sum();
        let remaining = budget - spent;
        data.push(vec![
            cat.clone(),
            budget.round_dp(2).to_string(),
            spent.round_dp(2).to_string(),
            remaining.round_dp(2).to_string(),
        ]);
    }

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!("Budget report for {}", month);
        println!(
            "{}",
            pretty_table(&["Category", "Budget", "Spent", "Remaining"], data)
        );
    }
    Ok(())
}
