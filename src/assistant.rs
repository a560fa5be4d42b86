// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::ledger;
use crate::error::EngineError;
use crate::models::{LineItem, NewExpense};
use crate::utils::http_client;
use anyhow::{Context, Result};
use base64::prelude::*;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DEFAULT_ENDPOINT: &str = "https://api.spendclip.app/v1/receipts/parse";

/// Best-effort structured draft returned by the receipt service. Every
/// field is an untrusted suggestion; `draft_to_new_expense` is the only
/// path from here into the ledger.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReceiptDraft {
    pub merchant_name: String,
    pub date: Option<String>,
    pub amount: rust_decimal::Decimal,
    pub currency: String,
    pub category: String,
    pub line_items: Option<Vec<LineItem>>,
    pub note: Option<String>,
}

pub trait ReceiptParser {
    fn parse_receipt(&self, image: &[u8], permitted: &[String]) -> Result<ReceiptDraft>;
}

/// Receipt extraction over HTTP: posts the image and the permitted
/// category names, gets a draft back.
pub struct HttpReceiptParser {
    endpoint: String,
}

impl HttpReceiptParser {
    pub fn new(endpoint: impl Into<String>) -> Self {
        HttpReceiptParser {
            endpoint: endpoint.into(),
        }
    }
}

impl ReceiptParser for HttpReceiptParser {
    fn parse_receipt(&self, image: &[u8], permitted: &[String]) -> Result<ReceiptDraft> {
        let client = http_client()?;
        let body = serde_json::json!({
            "image": BASE64_STANDARD.encode(image),
            "categories": permitted,
        });
        let resp = client
            .post(&self.endpoint)
            .json(&body)
            .send()?
            .error_for_status()?;
        let draft: ReceiptDraft = resp
            .json()
            .context("Receipt service returned an unreadable draft")?;
        Ok(draft)
    }
}

/// Turn an untrusted draft into ledger input, with the same validation as
/// user entry plus conservative fallbacks: a category outside the
/// permitted set becomes "Other" (or the first permitted name), a missing
/// or unparseable date becomes `today`, a blank merchant or currency gets
/// a placeholder. Negative amounts are rejected outright.
pub fn draft_to_new_expense(
    draft: ReceiptDraft,
    permitted: &[String],
    user_id: &str,
    today: NaiveDate,
) -> Result<NewExpense, EngineError> {
    ledger::validate_amounts(&draft.amount, &draft.line_items)?;

    let category = if permitted.iter().any(|c| *c == draft.category) {
        draft.category
    } else if permitted.iter().any(|c| c == "Other") {
        "Other".to_string()
    } else {
        permitted.first().cloned().unwrap_or(draft.category)
    };
    let date = draft
        .date
        .as_deref()
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
        .unwrap_or(today);
    let merchant = draft.merchant_name.trim();
    let merchant_name = if merchant.is_empty() {
        "Unknown merchant".to_string()
    } else {
        merchant.to_string()
    };
    let currency = draft.currency.trim().to_uppercase();
    let currency = if currency.is_empty() {
        "USD".to_string()
    } else {
        currency
    };

    Ok(NewExpense {
        user_id: user_id.to_string(),
        merchant_name,
        amount: draft.amount,
        currency,
        category,
        date,
        line_items: draft.line_items,
        is_recurring: false,
        recurrence_frequency: None,
        recurrence_end_date: None,
        note: draft.note,
    })
}
