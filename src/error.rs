use crate::domain::rejection::Rejection;
use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error(transparent)]
    Rejected(#[from] Rejection),
    #[error("Invalid report range: start {start} is after end {end}")]
    InvalidRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    #[error("Sales total for the hour starting {hour} exceeds the representable range")]
    ReportOverflow { hour: DateTime<Utc> },
    #[error("Method registry misconfigured: {0}")]
    Registry(String),
    #[error("Internal error: {0}")]
    InternalError(Box<dyn std::error::Error + Send + Sync>),
    #[cfg(feature = "storage-rocksdb")]
    #[error("RocksDB error: {0}")]
    RocksDbError(#[from] rocksdb::Error),
}

pub type Result<T> = std::result::Result<T, PaymentError>;
