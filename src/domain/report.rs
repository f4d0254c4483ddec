use super::payment::PaymentRecord;
use crate::error::{PaymentError, Result};
use chrono::{DateTime, DurationRound, TimeDelta, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// Sales and points accumulated over one hour.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct SalesBucket {
    /// Start of the hour, inclusive.
    #[serde(rename = "datetime")]
    pub bucket_start: DateTime<Utc>,
    #[serde(rename = "sales")]
    pub total_sales: Decimal,
    #[serde(rename = "points")]
    pub total_points: u64,
}

/// Buckets records into hourly totals.
///
/// `records` is expected to be exactly the records with `start <= datetime < end`;
/// no filtering happens here. Only hours that saw at least one sale are emitted,
/// ascending by hour.
pub fn aggregate<'a>(
    records: impl IntoIterator<Item = &'a PaymentRecord>,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<Vec<SalesBucket>> {
    if start > end {
        return Err(PaymentError::InvalidRange { start, end });
    }
    if start == end {
        return Ok(Vec::new());
    }

    let mut hours: BTreeMap<DateTime<Utc>, (Decimal, u64)> = BTreeMap::new();
    for record in records {
        let hour = truncate_to_hour(record.payment.datetime)?;
        let (sales, points) = hours.entry(hour).or_default();
        *sales = sales
            .checked_add(record.payment.final_price)
            .ok_or(PaymentError::ReportOverflow { hour })?;
        *points = points
            .checked_add(record.payment.points)
            .ok_or(PaymentError::ReportOverflow { hour })?;
    }

    Ok(hours
        .into_iter()
        .map(|(bucket_start, (total_sales, total_points))| SalesBucket {
            bucket_start,
            total_sales,
            total_points,
        })
        .collect())
}

fn truncate_to_hour(at: DateTime<Utc>) -> Result<DateTime<Utc>> {
    at.duration_trunc(TimeDelta::hours(1))
        .map_err(|e| PaymentError::InternalError(Box::new(e)))
}
