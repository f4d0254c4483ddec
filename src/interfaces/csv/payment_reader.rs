use crate::domain::additional::AdditionalItem;
use crate::domain::payment::PaymentRequest;
use crate::error::{PaymentError, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::io::Read;

/// One CSV row. `additional_item` holds a JSON object, e.g. `{"last4":"1234"}`.
#[derive(Debug, Deserialize)]
struct PaymentRow {
    customer_id: String,
    price: String,
    price_modifier: String,
    payment_method: String,
    datetime: DateTime<Utc>,
    #[serde(default)]
    additional_item: Option<String>,
}

impl TryFrom<PaymentRow> for PaymentRequest {
    type Error = PaymentError;

    fn try_from(row: PaymentRow) -> Result<Self> {
        let additional_item = match row.additional_item.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(json) => Some(serde_json::from_str::<AdditionalItem>(json)?),
        };
        Ok(PaymentRequest {
            customer_id: row.customer_id,
            price: row.price,
            price_modifier: row.price_modifier,
            payment_method: row.payment_method,
            datetime: row.datetime,
            additional_item,
        })
    }
}

/// Reads payment requests from a CSV source.
///
/// This reader wraps `csv::Reader` and provides an iterator over `Result<PaymentRequest>`.
/// It handles whitespace trimming and flexible record lengths automatically.
pub struct PaymentReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> PaymentReader<R> {
    /// Creates a new `PaymentReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and decodes payment requests.
    ///
    /// Decoding errors are yielded per row, so one bad line does not stop the stream.
    pub fn payments(self) -> impl Iterator<Item = Result<PaymentRequest>> {
        self.reader.into_deserialize::<PaymentRow>().map(|result| {
            result
                .map_err(PaymentError::from)
                .and_then(PaymentRequest::try_from)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    const HEADER: &str = "customer_id,price,price_modifier,payment_method,datetime,additional_item";

    #[test]
    fn test_reader_valid_stream() {
        let data = format!(
            "{}\n{}\n{}",
            HEADER,
            r#"12345,100.00,0.95,VISA,2022-09-01T00:00:00Z,"{""last4"":""1234""}""#,
            "777, 50, 1, CASH, 2022-09-01T09:30:00+09:00,"
        );
        let reader = PaymentReader::new(data.as_bytes());
        let results: Vec<Result<PaymentRequest>> = reader.payments().collect();

        assert_eq!(results.len(), 2);
        let visa = results[0].as_ref().unwrap();
        assert_eq!(visa.customer_id, "12345");
        assert_eq!(visa.price, "100.00");
        assert_eq!(visa.payment_method, "VISA");
        assert_eq!(visa.additional_item.as_ref().unwrap()["last4"], json!("1234"));

        let cash = results[1].as_ref().unwrap();
        assert_eq!(cash.additional_item, None);
        assert_eq!(cash.datetime, Utc.with_ymd_and_hms(2022, 9, 1, 0, 30, 0).unwrap());
    }

    #[test]
    fn test_unknown_method_and_bad_price_still_decode() {
        let data = format!("{}\nc,abc,x,BITCOIN,2022-09-01T00:00:00Z,", HEADER);
        let results: Vec<_> = PaymentReader::new(data.as_bytes()).payments().collect();
        let request = results[0].as_ref().unwrap();
        assert_eq!(request.payment_method, "BITCOIN");
        assert_eq!(request.price, "abc");
    }

    #[test]
    fn test_reader_malformed_rows() {
        let data = format!(
            "{}\n{}\n{}\n{}",
            HEADER,
            "c,1,1,CASH,yesterday,",
            r#"c,1,1,VISA,2022-09-01T00:00:00Z,"{not json}""#,
            "c,1,1,CASH,2022-09-01T00:00:00Z,"
        );
        let results: Vec<_> = PaymentReader::new(data.as_bytes()).payments().collect();

        assert!(matches!(results[0], Err(PaymentError::CsvError(_))));
        assert!(matches!(results[1], Err(PaymentError::JsonError(_))));
        assert!(results[2].is_ok());
    }
}
