//! Validators for method-specific auxiliary data (`additional_item`).
//!
//! Each validator takes the optional key/value mapping sent with a request and either
//! returns the normalized mapping to persist or a [`FieldError`] naming the offending key.
//! Keys a validator does not know about are ignored.

use serde_json::Value;
use std::collections::BTreeMap;

pub type AdditionalItem = BTreeMap<String, Value>;

/// Signature shared by every auxiliary-data validator in the rule table.
pub type AdditionalValidator = fn(Option<&AdditionalItem>) -> Result<AdditionalItem, FieldError>;

pub const COURIERS: [&str; 2] = ["YAMATO", "SAGAWA"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Methods without requirements keep whatever the caller sent.
pub fn no_requirements(item: Option<&AdditionalItem>) -> Result<AdditionalItem, FieldError> {
    Ok(item.cloned().unwrap_or_default())
}

pub fn courier(item: Option<&AdditionalItem>) -> Result<AdditionalItem, FieldError> {
    let courier = exact_text(item, "courier")?;
    if !COURIERS.contains(&courier.as_str()) {
        return Err(FieldError::new(
            "courier",
            format!(
                "Invalid courier service '{}'. Valid options are: {}",
                courier,
                COURIERS.join(", ")
            ),
        ));
    }
    Ok(normalized([("courier", courier)]))
}

/// `last4` must be exactly four ASCII digits as sent; surrounding spaces are not stripped.
pub fn card_last4(item: Option<&AdditionalItem>) -> Result<AdditionalItem, FieldError> {
    let last4 = exact_text(item, "last4")?;
    if last4.len() != 4 || !last4.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FieldError::new(
            "last4",
            format!("Invalid card last4 '{}'. Must be exactly 4 digits", last4),
        ));
    }
    Ok(normalized([("last4", last4)]))
}

pub fn bank_account(item: Option<&AdditionalItem>) -> Result<AdditionalItem, FieldError> {
    let bank = required_text(item, "bank")?;
    let account_number = required_text(item, "account_number")?;
    Ok(normalized([("bank", bank), ("account_number", account_number)]))
}

pub fn bank_cheque(item: Option<&AdditionalItem>) -> Result<AdditionalItem, FieldError> {
    let bank = required_text(item, "bank")?;
    let cheque_number = required_text(item, "cheque_number")?;
    Ok(normalized([("bank", bank), ("cheque_number", cheque_number)]))
}

/// Fetches a required key as trimmed, non-empty text.
fn required_text(item: Option<&AdditionalItem>, key: &'static str) -> Result<String, FieldError> {
    non_empty(key, exact_text(item, key)?.trim().to_string())
}

/// Fetches a required key as text, untouched. Numbers are accepted as their literal
/// text so `{"last4": 1234}` behaves like `{"last4": "1234"}`.
fn exact_text(item: Option<&AdditionalItem>, key: &'static str) -> Result<String, FieldError> {
    let value = item
        .and_then(|item| item.get(key))
        .ok_or_else(|| FieldError::new(key, format!("Missing required field '{}'", key)))?;

    let text = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Null => String::new(),
        _ => {
            return Err(FieldError::new(
                key,
                format!("Field '{}' must be a string", key),
            ));
        }
    };
    non_empty(key, text)
}

fn non_empty(key: &'static str, text: String) -> Result<String, FieldError> {
    if text.is_empty() {
        return Err(FieldError::new(
            key,
            format!("Field '{}' must not be empty", key),
        ));
    }
    Ok(text)
}

fn normalized<const N: usize>(pairs: [(&str, String); N]) -> AdditionalItem {
    pairs
        .into_iter()
        .map(|(key, value)| (key.to_string(), Value::String(value)))
        .collect()
}
