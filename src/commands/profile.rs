// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::subscription;
use crate::store::RecordStore;
use crate::utils::maybe_print_json;
use anyhow::Result;

pub fn handle(store: &dyn RecordStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("login", sub)) => login(store, sub)?,
        Some(("show", sub)) => show(store, sub)?,
        Some(("logout", _)) => logout(store)?,
        Some(("onboard", _)) => onboard(store)?,
        _ => {}
    }
    Ok(())
}

fn login(store: &dyn RecordStore, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let email = sub.get_one::<String>("email").unwrap();
    let profile = subscription::login(store, name, email)?;
    println!("Logged in as {} <{}>", profile.name, profile.email);
    Ok(())
}

fn show(store: &dyn RecordStore, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let Some(profile) = subscription::load_profile(store)? else {
        println!("Not logged in");
        return Ok(());
    };
    if maybe_print_json(json_flag, false, &profile)? {
        return Ok(());
    }
    println!("Name:            {}", profile.name);
    println!("Email:           {}", profile.email);
    println!("Plan:            {}", profile.subscription_status);
    println!(
        "Onboarded:       {}",
        if profile.onboarding_completed { "yes" } else { "no" }
    );
    println!("AI interactions: {}", profile.ai_interaction_count);
    if let Some(start) = profile.trial_start_date {
        println!("Trial started:   {}", start.date_naive());
    }
    Ok(())
}

fn logout(store: &dyn RecordStore) -> Result<()> {
    subscription::logout(store)?;
    println!("Logged out; local profile removed");
    Ok(())
}

fn onboard(store: &dyn RecordStore) -> Result<()> {
    let Some(profile) = subscription::load_profile(store)? else {
        anyhow::bail!("Not logged in (run 'spendclip profile login' first)");
    };
    subscription::complete_onboarding(store, profile)?;
    println!("Onboarding completed");
    Ok(())
}
