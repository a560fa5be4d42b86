// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::{ledger, subscription};
use crate::models::{Expense, NewExpense};
use crate::store::RecordStore;
use crate::utils::{
    fmt_money, maybe_print_json, month_of, parse_date, parse_decimal, parse_frequency,
    parse_month, pretty_table,
};
use anyhow::Result;
use chrono::Utc;
use serde::Serialize;

pub fn handle(store: &dyn RecordStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("edit", sub)) => edit(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &dyn RecordStore, sub: &clap::ArgMatches) -> Result<()> {
    let merchant = sub.get_one::<String>("merchant").unwrap();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let category = sub.get_one::<String>("category").unwrap();
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => Utc::now().date_naive(),
    };
    let currency = sub
        .get_one::<String>("currency")
        .map(|s| s.to_uppercase())
        .unwrap_or_else(|| "USD".to_string());
    let note = sub.get_one::<String>("note").map(|s| s.to_string());
    let frequency = sub
        .get_one::<String>("recurring")
        .map(|s| parse_frequency(s))
        .transpose()?;
    let until = sub
        .get_one::<String>("until")
        .map(|s| parse_date(s))
        .transpose()?;

    let user_id = subscription::load_profile(store)?
        .map(|p| p.id)
        .unwrap_or_else(|| "local".to_string());
    let expense = ledger::create(
        store,
        NewExpense {
            user_id,
            merchant_name: merchant.to_string(),
            amount,
            currency,
            category: category.to_string(),
            date,
            line_items: None,
            is_recurring: frequency.is_some(),
            recurrence_frequency: frequency,
            recurrence_end_date: until,
            note,
        },
    )?;
    println!(
        "Recorded {} at '{}' on {} ({})",
        fmt_money(&expense.amount, &expense.currency),
        expense.merchant_name,
        expense.date,
        expense.category
    );
    if let Some(freq) = expense.recurrence_frequency {
        match expense.recurrence_end_date {
            Some(end) => println!("Recurs {} until {}", freq, end),
            None => println!("Recurs {}", freq),
        }
    }
    Ok(())
}

fn list(store: &dyn RecordStore, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(store, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    short(&r.id),
                    r.date.clone(),
                    r.merchant.clone(),
                    r.amount.clone(),
                    r.currency.clone(),
                    r.category.clone(),
                    r.recurring.clone(),
                    r.note.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Merchant", "Amount", "CCY", "Category", "Recurs", "Note"],
                rows,
            )
        );
    }
    Ok(())
}

fn edit(store: &dyn RecordStore, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    let all = ledger::list(store)?;
    let found: Vec<&Expense> = all.iter().filter(|e| e.id.starts_with(id.as_str())).collect();
    let mut expense = match found.len() {
        0 => anyhow::bail!("No expense with id '{}'", id),
        1 => found[0].clone(),
        n => anyhow::bail!("Id prefix '{}' is ambiguous ({} matches)", id, n),
    };
    if let Some(m) = sub.get_one::<String>("merchant") {
        expense.merchant_name = m.to_string();
    }
    if let Some(a) = sub.get_one::<String>("amount") {
        expense.amount = parse_decimal(a)?;
    }
    if let Some(c) = sub.get_one::<String>("category") {
        expense.category = c.to_string();
    }
    if let Some(d) = sub.get_one::<String>("date") {
        expense.date = parse_date(d)?;
    }
    if let Some(ccy) = sub.get_one::<String>("currency") {
        expense.currency = ccy.to_uppercase();
    }
    if let Some(n) = sub.get_one::<String>("note") {
        expense.note = Some(n.to_string());
    }
    let updated = ledger::update(store, expense)?;
    println!(
        "Updated {} at '{}' on {} ({})",
        fmt_money(&updated.amount, &updated.currency),
        updated.merchant_name,
        updated.date,
        updated.category
    );
    Ok(())
}

#[derive(Serialize)]
pub struct ExpenseRow {
    pub id: String,
    pub date: String,
    pub merchant: String,
    pub amount: String,
    pub currency: String,
    pub category: String,
    pub recurring: String,
    pub note: String,
}

pub fn query_rows(store: &dyn RecordStore, sub: &clap::ArgMatches) -> Result<Vec<ExpenseRow>> {
    let mut expenses = ledger::list(store)?;
    if let Some(month) = sub.get_one::<String>("month") {
        let month = parse_month(month)?;
        expenses.retain(|e| month_of(e.date) == month);
    }
    if let Some(cat) = sub.get_one::<String>("category") {
        expenses.retain(|e| &e.category == cat);
    }
    if let Some(limit) = sub.get_one::<usize>("limit") {
        expenses.truncate(*limit);
    }
    Ok(expenses
        .iter()
        .map(|e| ExpenseRow {
            id: e.id.clone(),
            date: e.date.to_string(),
            merchant: e.merchant_name.clone(),
            amount: e.amount.round_dp(2).to_string(),
            currency: e.currency.clone(),
            category: e.category.clone(),
            recurring: e
                .recurrence_frequency
                .map(|f| f.to_string())
                .unwrap_or_default(),
            note: e.note.clone().unwrap_or_default(),
        })
        .collect())
}

// Ids are uuids in practice but older data may carry shorter ones.
fn short(id: &str) -> String {
    id.chars().take(8).collect()
}
