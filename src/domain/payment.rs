use super::additional::AdditionalItem;
use super::method::PaymentMethod;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An incoming payment as received from the caller, before any validation.
///
/// Monetary fields stay as decimal text so that malformed input becomes a typed
/// rejection in the evaluator rather than a decoding failure.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct PaymentRequest {
    pub customer_id: String,
    pub price: String,
    pub price_modifier: String,
    pub payment_method: String,
    /// Business time of the sale, as supplied by the caller.
    pub datetime: DateTime<Utc>,
    #[serde(default)]
    pub additional_item: Option<AdditionalItem>,
}

/// A payment that passed every rule of its method, priced and ready to persist.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Payment {
    pub customer_id: String,
    pub price: Decimal,
    pub price_modifier: Decimal,
    pub final_price: Decimal,
    pub points: u64,
    pub payment_method: PaymentMethod,
    pub additional_item: AdditionalItem,
    pub datetime: DateTime<Utc>,
}

/// A stored payment. Created once on acceptance and never updated.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct PaymentRecord {
    pub id: u64,
    pub payment: Payment,
}
