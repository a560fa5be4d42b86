// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::SubscriptionStatus;
use thiserror::Error;

/// Engine custom errors.
///
/// Policy violations (`CategoryLimitReached`, `InvalidAmount`) leave the
/// stores untouched. `StorageUnavailable` means the triggering operation did
/// not apply. `PartialCascadeFailure` means one store changed and a later one
/// did not, so the data needs reconciliation rather than a plain retry.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
    #[error("category limit reached: the {tier} plan allows at most {limit} categories")]
    CategoryLimitReached {
        tier: SubscriptionStatus,
        limit: usize,
    },
    #[error("category rename cascade incomplete: {completed} updated before the failure")]
    PartialCascadeFailure {
        completed: &'static str,
        source: Box<EngineError>,
    },
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
}
