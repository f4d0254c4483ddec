use super::payment::{Payment, PaymentRecord};
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Durable home for accepted payments.
///
/// Records are written once and never updated. Reads are by business time.
#[async_trait]
pub trait PaymentStore: Send + Sync {
    /// Persists an accepted payment, assigning it the next record id.
    async fn insert(&self, payment: Payment) -> Result<PaymentRecord>;
    /// Every record with `start <= datetime < end`, ascending by datetime.
    async fn range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<PaymentRecord>>;
    async fn count(&self) -> Result<usize>;
}

pub type PaymentStoreBox = Box<dyn PaymentStore>;
pub type PaymentStoreFactory = Box<dyn Fn() -> PaymentStoreBox + Send + Sync>;
