use crate::domain::payment::{Payment, PaymentRecord};
use crate::domain::ports::PaymentStore;
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory store for payment records.
///
/// Records are kept in a `BTreeMap` keyed by `(datetime, id)` so range reads walk
/// them in business-time order. Clones share the same underlying map.
#[derive(Default, Clone)]
pub struct InMemoryPaymentStore {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Default)]
struct Inner {
    next_id: u64,
    records: BTreeMap<(DateTime<Utc>, u64), PaymentRecord>,
}

impl InMemoryPaymentStore {
    /// Creates a new, empty in-memory payment store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PaymentStore for InMemoryPaymentStore {
    async fn insert(&self, payment: Payment) -> Result<PaymentRecord> {
        let mut inner = self.inner.write().await;
        inner.next_id += 1;
        let record = PaymentRecord {
            id: inner.next_id,
            payment,
        };
        inner
            .records
            .insert((record.payment.datetime, record.id), record.clone());
        Ok(record)
    }

    async fn range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<PaymentRecord>> {
        if start >= end {
            return Ok(Vec::new());
        }
        let inner = self.inner.read().await;
        Ok(inner
            .records
            .range((start, 0)..(end, 0))
            .map(|(_, record)| record.clone())
            .collect())
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.inner.read().await.records.len())
    }
}
