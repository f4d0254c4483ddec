use crate::domain::ports::PaymentStoreBox;
use crate::error::Result;
use crate::infrastructure::in_memory::InMemoryPaymentStore;
use clap::Args;
use std::path::PathBuf;
use tracing::info;

/// Process-wide settings, taken from flags or the environment.
#[derive(Args, Debug, Clone, PartialEq)]
pub struct Settings {
    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long, env = "POS_DB_PATH", global = true)]
    pub db_path: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set.
    #[arg(long, env = "POS_LOG_LEVEL", default_value = "info", global = true)]
    pub log_level: String,
}

impl Settings {
    /// Opens the payment store these settings select.
    pub fn open_store(&self) -> Result<PaymentStoreBox> {
        match &self.db_path {
            Some(path) => open_persistent(path),
            None => {
                info!("using in-memory payment store");
                Ok(Box::new(InMemoryPaymentStore::new()))
            }
        }
    }
}

#[cfg(feature = "storage-rocksdb")]
fn open_persistent(path: &std::path::Path) -> Result<PaymentStoreBox> {
    info!(path = %path.display(), "opening RocksDB payment store");
    Ok(Box::new(crate::infrastructure::rocksdb::RocksDBStore::open(path)?))
}

#[cfg(not(feature = "storage-rocksdb"))]
fn open_persistent(path: &std::path::Path) -> Result<PaymentStoreBox> {
    tracing::warn!(
        path = %path.display(),
        "Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
    );
    Ok(Box::new(InMemoryPaymentStore::new()))
}
