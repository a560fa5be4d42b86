// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Duration, Utc};
use spendclip::engine::subscription::{self, FREE_AI_LIMIT, TRIAL_DAYS};
use spendclip::models::SubscriptionStatus;
use spendclip::store::{MemoryStore, RecordStore, USER_PROFILE_KEY};

#[test]
fn login_creates_a_free_profile() {
    let store = MemoryStore::new();
    let profile = subscription::login(&store, "Ada", "ada@example.com").unwrap();
    assert!(!profile.id.is_empty());
    assert_eq!(profile.subscription_status, SubscriptionStatus::Free);
    assert_eq!(profile.ai_interaction_count, 0);
    assert!(!profile.onboarding_completed);
    assert!(profile.trial_start_date.is_none());

    let loaded = subscription::load_profile(&store).unwrap().unwrap();
    assert_eq!(loaded.id, profile.id);
}

#[test]
fn logout_removes_the_profile_entirely() {
    let store = MemoryStore::new();
    subscription::login(&store, "Ada", "ada@example.com").unwrap();
    subscription::logout(&store).unwrap();
    assert!(subscription::load_profile(&store).unwrap().is_none());
    assert!(store.read(USER_PROFILE_KEY).unwrap().is_none());
}

#[test]
fn onboarding_flag_persists() {
    let store = MemoryStore::new();
    let profile = subscription::login(&store, "Ada", "ada@example.com").unwrap();
    subscription::complete_onboarding(&store, profile).unwrap();
    let loaded = subscription::load_profile(&store).unwrap().unwrap();
    assert!(loaded.onboarding_completed);
}

#[test]
fn trial_of_exactly_three_days_is_still_alive() {
    let store = MemoryStore::new();
    let profile = subscription::login(&store, "Ada", "ada@example.com").unwrap();
    let now = Utc::now();
    let mut profile = subscription::start_trial(&store, profile, now).unwrap();
    profile.trial_start_date = Some(now - Duration::days(TRIAL_DAYS));
    subscription::save_profile(&store, &profile).unwrap();

    let checked = subscription::check_trial_expiry(&store, profile, now).unwrap();
    assert_eq!(checked.subscription_status, SubscriptionStatus::Trial);
}

#[test]
fn trial_older_than_three_days_expires_to_free() {
    let store = MemoryStore::new();
    let profile = subscription::login(&store, "Ada", "ada@example.com").unwrap();
    let now = Utc::now();
    let mut profile = subscription::start_trial(&store, profile, now).unwrap();
    let started = now - Duration::days(TRIAL_DAYS + 1);
    profile.trial_start_date = Some(started);
    subscription::save_profile(&store, &profile).unwrap();

    let checked = subscription::check_trial_expiry(&store, profile, now).unwrap();
    assert_eq!(checked.subscription_status, SubscriptionStatus::Free);
    // Start date is history, not state: expiry keeps it.
    assert_eq!(checked.trial_start_date, Some(started));

    let loaded = subscription::load_profile(&store).unwrap().unwrap();
    assert_eq!(loaded.subscription_status, SubscriptionStatus::Free);
}

#[test]
fn expiry_check_leaves_other_tiers_alone() {
    let store = MemoryStore::new();
    let profile = subscription::login(&store, "Ada", "ada@example.com").unwrap();
    let profile = subscription::subscribe(&store, profile).unwrap();
    let checked = subscription::check_trial_expiry(&store, profile, Utc::now()).unwrap();
    assert_eq!(checked.subscription_status, SubscriptionStatus::Premium);
}

#[test]
fn trial_without_start_date_is_left_untouched() {
    let store = MemoryStore::new();
    let mut profile = subscription::login(&store, "Ada", "ada@example.com").unwrap();
    profile.subscription_status = SubscriptionStatus::Trial;
    profile.trial_start_date = None;
    subscription::save_profile(&store, &profile).unwrap();

    let checked = subscription::check_trial_expiry(&store, profile, Utc::now()).unwrap();
    assert_eq!(checked.subscription_status, SubscriptionStatus::Trial);
}

#[test]
fn trial_can_be_restarted_from_any_state() {
    let store = MemoryStore::new();
    let profile = subscription::login(&store, "Ada", "ada@example.com").unwrap();
    let now = Utc::now();
    let profile = subscription::start_trial(&store, profile, now).unwrap();
    assert_eq!(profile.subscription_status, SubscriptionStatus::Trial);
    assert_eq!(profile.trial_start_date, Some(now));

    // Expired once already; nothing stops a second trial.
    let later = now + Duration::days(30);
    let profile = subscription::check_trial_expiry(&store, profile, later).unwrap();
    assert_eq!(profile.subscription_status, SubscriptionStatus::Free);
    let profile = subscription::start_trial(&store, profile, later).unwrap();
    assert_eq!(profile.subscription_status, SubscriptionStatus::Trial);
    assert_eq!(profile.trial_start_date, Some(later));
}

#[test]
fn free_quota_allows_five_then_denies() {
    let store = MemoryStore::new();
    let mut profile = subscription::login(&store, "Ada", "ada@example.com").unwrap();
    for expected in 1..=FREE_AI_LIMIT {
        let (updated, allowed) = subscription::try_consume_ai_interaction(&store, profile).unwrap();
        assert!(allowed);
        assert_eq!(updated.ai_interaction_count, expected);
        profile = updated;
    }

    let (after_denial, allowed) = subscription::try_consume_ai_interaction(&store, profile).unwrap();
    assert!(!allowed);
    assert_eq!(after_denial.ai_interaction_count, FREE_AI_LIMIT);

    // The denial persisted nothing new.
    let loaded = subscription::load_profile(&store).unwrap().unwrap();
    assert_eq!(loaded.ai_interaction_count, FREE_AI_LIMIT);
}

#[test]
fn premium_and_trial_count_for_telemetry_only() {
    let store = MemoryStore::new();
    let profile = subscription::login(&store, "Ada", "ada@example.com").unwrap();
    let mut profile = subscription::subscribe(&store, profile).unwrap();
    for _ in 0..FREE_AI_LIMIT + 3 {
        let (updated, allowed) = subscription::try_consume_ai_interaction(&store, profile).unwrap();
        assert!(allowed);
        profile = updated;
    }
    assert_eq!(profile.ai_interaction_count, FREE_AI_LIMIT + 3);

    let store = MemoryStore::new();
    let profile = subscription::login(&store, "Ada", "ada@example.com").unwrap();
    let mut profile = subscription::start_trial(&store, profile, Utc::now()).unwrap();
    for _ in 0..FREE_AI_LIMIT + 1 {
        let (updated, allowed) = subscription::try_consume_ai_interaction(&store, profile).unwrap();
        assert!(allowed);
        profile = updated;
    }
    assert_eq!(profile.ai_interaction_count, FREE_AI_LIMIT + 1);
}
