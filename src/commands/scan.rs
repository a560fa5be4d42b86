// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::assistant::{self, HttpReceiptParser, ReceiptParser};
use crate::engine::subscription::{self, FREE_AI_LIMIT};
use crate::engine::{categories, ledger};
use crate::store::RecordStore;
use crate::utils::fmt_money;
use anyhow::{Context, Result};
use chrono::Utc;

pub fn handle(store: &dyn RecordStore, m: &clap::ArgMatches) -> Result<()> {
    let image_path = m.get_one::<String>("image").unwrap();
    let endpoint = m
        .get_one::<String>("endpoint")
        .map(|s| s.to_string())
        .unwrap_or_else(|| assistant::DEFAULT_ENDPOINT.to_string());

    let Some(profile) = subscription::load_profile(store)? else {
        anyhow::bail!("Not logged in (run 'spendclip profile login' first)");
    };

    // Quota gate before any work. Denial is an answer, not an error.
    let (profile, allowed) = subscription::try_consume_ai_interaction(store, profile)?;
    if !allowed {
        println!(
            "Free plan limit reached: {} AI scans used. Start a trial with 'spendclip plan trial' or upgrade with 'spendclip plan subscribe'.",
            FREE_AI_LIMIT
        );
        return Ok(());
    }

    let image = std::fs::read(image_path)
        .with_context(|| format!("Read receipt image '{}'", image_path))?;
    let permitted = categories::list(store)?;

    let parser = HttpReceiptParser::new(endpoint);
    let draft = parser.parse_receipt(&image, &permitted)?;
    let mut new_expense =
        assistant::draft_to_new_expense(draft, &permitted, &profile.id, Utc::now().date_naive())?;
    if let Some(ccy) = m.get_one::<String>("currency") {
        new_expense.currency = ccy.to_uppercase();
    }

    let expense = ledger::create(store, new_expense)?;
    println!(
        "Captured {} at '{}' on {} ({})",
        fmt_money(&expense.amount, &expense.currency),
        expense.merchant_name,
        expense.date,
        expense.category
    );
    if let Some(items) = &expense.line_items {
        println!("{} line items", items.len());
    }
    Ok(())
}
