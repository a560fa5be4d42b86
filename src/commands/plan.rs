// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::subscription::{self, FREE_AI_LIMIT, TRIAL_DAYS};
use crate::models::{SubscriptionStatus, UserProfile};
use crate::store::RecordStore;
use anyhow::Result;
use chrono::Utc;

pub fn handle(store: &dyn RecordStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("status", _)) => status(store)?,
        Some(("trial", _)) => trial(store)?,
        Some(("subscribe", _)) => subscribe(store)?,
        _ => {}
    }
    Ok(())
}

fn status(store: &dyn RecordStore) -> Result<()> {
    let Some(profile) = subscription::load_profile(store)? else {
        println!("Not logged in");
        return Ok(());
    };
    println!("Plan: {}", profile.subscription_status);
    match profile.subscription_status {
        SubscriptionStatus::Trial => {
            if let Some(start) = profile.trial_start_date {
                let left = TRIAL_DAYS - (Utc::now() - start).num_days();
                println!("Trial days left: {}", left.max(0));
            }
            println!("AI scans: unlimited ({} used)", profile.ai_interaction_count);
        }
        SubscriptionStatus::Premium => {
            println!("AI scans: unlimited ({} used)", profile.ai_interaction_count);
        }
        SubscriptionStatus::Free => {
            let left = FREE_AI_LIMIT.saturating_sub(profile.ai_interaction_count);
            println!("AI scans: {} of {} left", left, FREE_AI_LIMIT);
        }
    }
    Ok(())
}

fn trial(store: &dyn RecordStore) -> Result<()> {
    let profile = require_login(store)?;
    subscription::start_trial(store, profile, Utc::now())?;
    println!("Trial started: {} days of premium features", TRIAL_DAYS);
    Ok(())
}

fn subscribe(store: &dyn RecordStore) -> Result<()> {
    let profile = require_login(store)?;
    subscription::subscribe(store, profile)?;
    println!("Subscribed: premium features unlocked");
    Ok(())
}

fn require_login(store: &dyn RecordStore) -> Result<UserProfile> {
    subscription::load_profile(store)?
        .ok_or_else(|| anyhow::anyhow!("Not logged in (run 'spendclip profile login' first)"))
}
