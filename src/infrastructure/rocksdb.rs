use crate::domain::payment::{Payment, PaymentRecord};
use crate::domain::ports::PaymentStore;
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DB, Direction, IteratorMode, Options, WriteBatch};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Column Family for payment records, keyed by business time then id.
pub const CF_PAYMENTS: &str = "payments";
/// Column Family for store bookkeeping (the id sequence).
pub const CF_META: &str = "meta";

const NEXT_ID_KEY: &[u8] = b"next_id";

/// A persistent payment store backed by RocksDB.
///
/// Payment keys are `sortable(timestamp_micros) ++ id`, both big-endian, so a forward
/// scan from a start key yields records in business-time order and a range query is a
/// single seek. Values are JSON-encoded [`PaymentRecord`]s.
///
/// `Clone` shares the underlying `Arc<DB>`.
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
    write_lock: Arc<Mutex<()>>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that the required column families ("payments" and "meta") exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_payments = ColumnFamilyDescriptor::new(CF_PAYMENTS, Options::default());
        let cf_meta = ColumnFamilyDescriptor::new(CF_META, Options::default());

        let db = DB::open_cf_descriptors(&opts, path, vec![cf_payments, cf_meta])?;

        Ok(Self {
            db: Arc::new(db),
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    fn cf(&self, name: &'static str) -> Result<&ColumnFamily> {
        self.db.cf_handle(name).ok_or_else(|| {
            PaymentError::InternalError(Box::new(std::io::Error::other(format!(
                "{} column family not found",
                name
            ))))
        })
    }

    fn next_id(&self) -> Result<u64> {
        let last = match self.db.get_cf(self.cf(CF_META)?, NEXT_ID_KEY)? {
            Some(bytes) => {
                let raw: [u8; 8] = bytes.as_slice().try_into().map_err(|_| {
                    PaymentError::InternalError(Box::new(std::io::Error::other(
                        "Corrupt id sequence",
                    )))
                })?;
                u64::from_be_bytes(raw)
            }
            None => 0,
        };
        Ok(last + 1)
    }
}

/// Orders signed timestamps correctly under byte-wise comparison.
fn time_key(at: DateTime<Utc>) -> [u8; 8] {
    ((at.timestamp_micros() as u64) ^ (1 << 63)).to_be_bytes()
}

fn record_key(at: DateTime<Utc>, id: u64) -> [u8; 16] {
    let mut key = [0u8; 16];
    key[..8].copy_from_slice(&time_key(at));
    key[8..].copy_from_slice(&id.to_be_bytes());
    key
}

#[async_trait]
impl PaymentStore for RocksDBStore {
    async fn insert(&self, payment: Payment) -> Result<PaymentRecord> {
        // Single writer for the id sequence.
        let _guard = self.write_lock.lock().await;

        let record = PaymentRecord {
            id: self.next_id()?,
            payment,
        };
        let value = serde_json::to_vec(&record)?;

        let mut batch = WriteBatch::default();
        batch.put_cf(
            self.cf(CF_PAYMENTS)?,
            record_key(record.payment.datetime, record.id),
            value,
        );
        batch.put_cf(self.cf(CF_META)?, NEXT_ID_KEY, record.id.to_be_bytes());
        self.db.write(batch)?;

        Ok(record)
    }

    async fn range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<PaymentRecord>> {
        if start >= end {
            return Ok(Vec::new());
        }

        let from = record_key(start, 0);
        let until = time_key(end);
        let iter = self
            .db
            .iterator_cf(self.cf(CF_PAYMENTS)?, IteratorMode::From(&from, Direction::Forward));

        let mut records = Vec::new();
        for item in iter {
            let (key, value) = item?;
            if key[..8] >= until[..] {
                break;
            }
            records.push(serde_json::from_slice(&value)?);
        }
        Ok(records)
    }

    async fn count(&self) -> Result<usize> {
        let mut count = 0;
        for item in self.db.iterator_cf(self.cf(CF_PAYMENTS)?, IteratorMode::Start) {
            item?;
            count += 1;
        }
        Ok(count)
    }
}
