// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::Utc;

use spendclip::engine::{recurrence, subscription};
use spendclip::{cli, commands, db};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let store = db::open_or_init()?;

    // Session pass: materialize due recurring expenses, then expire a
    // stale trial before any command checks quota.
    let generated = recurrence::materialize_due(&store, Utc::now().date_naive())?;
    if !generated.is_empty() {
        println!("Materialized {} recurring expense(s)", generated.len());
    }
    if let Some(profile) = subscription::load_profile(&store)? {
        subscription::check_trial_expiry(&store, profile, Utc::now())?;
    }

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(("expense", sub)) => commands::expenses::handle(&store, sub)?,
        Some(("category", sub)) => commands::categories::handle(&store, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&store, sub)?,
        Some(("profile", sub)) => commands::profile::handle(&store, sub)?,
        Some(("plan", sub)) => commands::plan::handle(&store, sub)?,
        Some(("scan", sub)) => commands::scan::handle(&store, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&store, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&store)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
