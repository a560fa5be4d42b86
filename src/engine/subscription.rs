// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::EngineError;
use crate::models::{SubscriptionStatus, UserProfile};
use crate::store::{RecordStore, USER_PROFILE_KEY, read_json, write_json};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Whole days a trial lasts before expiring back to free.
pub const TRIAL_DAYS: i64 = 3;
/// AI interactions a free-tier profile may consume in total.
pub const FREE_AI_LIMIT: u32 = 5;

/// `None` means logged out.
pub fn load_profile(store: &dyn RecordStore) -> Result<Option<UserProfile>, EngineError> {
    read_json(store, USER_PROFILE_KEY)
}

pub fn save_profile(store: &dyn RecordStore, profile: &UserProfile) -> Result<(), EngineError> {
    write_json(store, USER_PROFILE_KEY, profile)
}

/// Create and persist a fresh free-tier profile.
pub fn login(
    store: &dyn RecordStore,
    name: &str,
    email: &str,
) -> Result<UserProfile, EngineError> {
    let profile = UserProfile {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        email: email.to_string(),
        onboarding_completed: false,
        subscription_status: SubscriptionStatus::Free,
        trial_start_date: None,
        ai_interaction_count: 0,
    };
    save_profile(store, &profile)?;
    Ok(profile)
}

/// Full removal of the stored profile, not a soft delete.
pub fn logout(store: &dyn RecordStore) -> Result<(), EngineError> {
    store.remove(USER_PROFILE_KEY)
}

pub fn complete_onboarding(
    store: &dyn RecordStore,
    mut profile: UserProfile,
) -> Result<UserProfile, EngineError> {
    profile.onboarding_completed = true;
    save_profile(store, &profile)?;
    Ok(profile)
}

/// Expire a trial older than `TRIAL_DAYS` whole days back to free. The
/// trial start date is kept for history. Call once per session before any
/// quota check. A profile not on trial comes back unchanged without a
/// write, as does a trial with no recorded start date.
pub fn check_trial_expiry(
    store: &dyn RecordStore,
    mut profile: UserProfile,
    now: DateTime<Utc>,
) -> Result<UserProfile, EngineError> {
    if profile.subscription_status != SubscriptionStatus::Trial {
        return Ok(profile);
    }
    let Some(start) = profile.trial_start_date else {
        return Ok(profile);
    };
    if (now - start).num_days() > TRIAL_DAYS {
        profile.subscription_status = SubscriptionStatus::Free;
        save_profile(store, &profile)?;
    }
    Ok(profile)
}

/// Enter trial from any prior state. No check that a trial was already
/// consumed; restarting one is allowed.
pub fn start_trial(
    store: &dyn RecordStore,
    mut profile: UserProfile,
    now: DateTime<Utc>,
) -> Result<UserProfile, EngineError> {
    profile.subscription_status = SubscriptionStatus::Trial;
    profile.trial_start_date = Some(now);
    save_profile(store, &profile)?;
    Ok(profile)
}

pub fn subscribe(
    store: &dyn RecordStore,
    mut profile: UserProfile,
) -> Result<UserProfile, EngineError> {
    profile.subscription_status = SubscriptionStatus::Premium;
    save_profile(store, &profile)?;
    Ok(profile)
}

/// Quota gate for the AI collaborator. Premium and trial always pass, with
/// the counter kept for telemetry. Free passes while the counter is under
/// `FREE_AI_LIMIT`; a denial changes nothing and is an outcome, not an
/// error.
pub fn try_consume_ai_interaction(
    store: &dyn RecordStore,
    mut profile: UserProfile,
) -> Result<(UserProfile, bool), EngineError> {
    let allowed = match profile.subscription_status {
        SubscriptionStatus::Premium | SubscriptionStatus::Trial => true,
        SubscriptionStatus::Free => profile.ai_interaction_count < FREE_AI_LIMIT,
    };
    if allowed {
        profile.ai_interaction_count += 1;
        save_profile(store, &profile)?;
    }
    Ok((profile, allowed))
}
