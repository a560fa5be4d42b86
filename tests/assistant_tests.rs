// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use spendclip::assistant::{ReceiptDraft, draft_to_new_expense};
use spendclip::error::EngineError;
use spendclip::models::LineItem;

fn permitted() -> Vec<String> {
    ["Groceries", "Transport", "Other"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

fn draft() -> ReceiptDraft {
    ReceiptDraft {
        merchant_name: "Corner Shop".to_string(),
        date: Some("2025-05-28".to_string()),
        amount: Decimal::new(1299, 2),
        currency: "usd".to_string(),
        category: "Groceries".to_string(),
        line_items: None,
        note: Some("2 items".to_string()),
    }
}

#[test]
fn well_formed_draft_passes_through() {
    let new = draft_to_new_expense(draft(), &permitted(), "u1", today()).unwrap();
    assert_eq!(new.merchant_name, "Corner Shop");
    assert_eq!(new.date, NaiveDate::from_ymd_opt(2025, 5, 28).unwrap());
    assert_eq!(new.currency, "USD");
    assert_eq!(new.category, "Groceries");
    assert_eq!(new.user_id, "u1");
    assert!(!new.is_recurring);
    assert_eq!(new.note.as_deref(), Some("2 items"));
}

#[test]
fn unknown_category_falls_back_to_other() {
    let mut d = draft();
    d.category = "Cryptids".to_string();
    let new = draft_to_new_expense(d, &permitted(), "u1", today()).unwrap();
    assert_eq!(new.category, "Other");
}

#[test]
fn unknown_category_falls_back_to_first_when_other_is_missing() {
    let mut d = draft();
    d.category = "Cryptids".to_string();
    let names = vec!["Groceries".to_string(), "Transport".to_string()];
    let new = draft_to_new_expense(d, &names, "u1", today()).unwrap();
    assert_eq!(new.category, "Groceries");
}

#[test]
fn missing_or_garbled_date_falls_back_to_today() {
    let mut d = draft();
    d.date = None;
    let new = draft_to_new_expense(d, &permitted(), "u1", today()).unwrap();
    assert_eq!(new.date, today());

    let mut d = draft();
    d.date = Some("sometime in May".to_string());
    let new = draft_to_new_expense(d, &permitted(), "u1", today()).unwrap();
    assert_eq!(new.date, today());
}

#[test]
fn blank_merchant_and_currency_get_placeholders() {
    let mut d = draft();
    d.merchant_name = "   ".to_string();
    d.currency = "".to_string();
    let new = draft_to_new_expense(d, &permitted(), "u1", today()).unwrap();
    assert_eq!(new.merchant_name, "Unknown merchant");
    assert_eq!(new.currency, "USD");
}

#[test]
fn negative_amount_is_rejected() {
    let mut d = draft();
    d.amount = Decimal::new(-1299, 2);
    let err = draft_to_new_expense(d, &permitted(), "u1", today()).unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));
}

#[test]
fn negative_line_item_price_is_rejected() {
    let mut d = draft();
    d.line_items = Some(vec![LineItem {
        label: "mystery discount".to_string(),
        price: Decimal::new(-500, 2),
        quantity: 1,
    }]);
    let err = draft_to_new_expense(d, &permitted(), "u1", today()).unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));
}

#[test]
fn sparse_service_response_decodes_with_defaults() {
    let draft: ReceiptDraft = serde_json::from_str("{}").unwrap();
    assert_eq!(draft.merchant_name, "");
    assert_eq!(draft.amount, Decimal::ZERO);
    assert!(draft.date.is_none());
    assert!(draft.line_items.is_none());

    let draft: ReceiptDraft = serde_json::from_str(
        r#"{"merchantName":"Cafe Luna","amount":"7.80","lineItems":[{"label":"espresso","price":"2.60"}]}"#,
    )
    .unwrap();
    assert_eq!(draft.merchant_name, "Cafe Luna");
    assert_eq!(draft.amount, Decimal::new(780, 2));
    let items = draft.line_items.unwrap();
    assert_eq!(items[0].quantity, 1); // defaulted
}
