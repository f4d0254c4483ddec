use crate::domain::payment::PaymentRecord;
use crate::domain::rejection::{Rejection, RejectionKind};
use crate::domain::report::SalesBucket;
use crate::domain::rules::MethodRule;
use crate::error::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    Accepted,
    Rejected,
}

/// One output line per processed request.
#[derive(Debug, Serialize)]
struct OutcomeRow<'a> {
    row: usize,
    status: OutcomeStatus,
    customer_id: &'a str,
    payment_method: &'a str,
    final_price: Option<Decimal>,
    points: Option<u64>,
    error: Option<RejectionKind>,
    field: Option<&'a str>,
    message: Option<&'a str>,
}

/// Writes evaluation outcomes as CSV.
pub struct OutcomeWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> OutcomeWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn accepted(&mut self, row: usize, record: &PaymentRecord) -> Result<()> {
        self.writer.serialize(OutcomeRow {
            row,
            status: OutcomeStatus::Accepted,
            customer_id: record.payment.customer_id.as_str(),
            payment_method: record.payment.payment_method.as_str(),
            final_price: Some(record.payment.final_price),
            points: Some(record.payment.points),
            error: None,
            field: None,
            message: None,
        })?;
        Ok(())
    }

    pub fn rejected(
        &mut self,
        row: usize,
        customer_id: &str,
        payment_method: &str,
        rejection: &Rejection,
    ) -> Result<()> {
        self.writer.serialize(OutcomeRow {
            row,
            status: OutcomeStatus::Rejected,
            customer_id,
            payment_method,
            final_price: None,
            points: None,
            error: Some(rejection.kind),
            field: rejection.field.as_deref(),
            message: Some(rejection.message.as_str()),
        })?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Writes hourly sales buckets as `datetime,sales,points`.
pub struct ReportWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_buckets(&mut self, buckets: &[SalesBucket]) -> Result<()> {
        if buckets.is_empty() {
            self.writer.write_record(["datetime", "sales", "points"])?;
        }
        for bucket in buckets {
            self.writer.serialize(bucket)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct MethodRow {
    method: &'static str,
    min_modifier: Decimal,
    max_modifier: Decimal,
    points_rate: Decimal,
}

/// Writes the supported payment methods with their pricing bounds.
pub struct MethodWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> MethodWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_methods<'a>(&mut self, rules: impl IntoIterator<Item = &'a MethodRule>) -> Result<()> {
        for rule in rules {
            self.writer.serialize(MethodRow {
                method: rule.method.as_str(),
                min_modifier: rule.min_modifier,
                max_modifier: rule.max_modifier,
                points_rate: rule.points_rate,
            })?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::method::PaymentMethod;
    use crate::domain::payment::Payment;
    use crate::domain::rules::MethodRegistry;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn record() -> PaymentRecord {
        PaymentRecord {
            id: 1,
            payment: Payment {
                customer_id: "12345".to_string(),
                price: dec!(100.00),
                price_modifier: dec!(0.95),
                final_price: dec!(95.00),
                points: 2,
                payment_method: PaymentMethod::Visa,
                additional_item: Default::default(),
                datetime: Utc.with_ymd_and_hms(2022, 9, 1, 0, 0, 0).unwrap(),
            },
        }
    }

    #[test]
    fn test_outcome_rows() {
        let mut out = Vec::new();
        {
            let mut writer = OutcomeWriter::new(&mut out);
            writer.accepted(1, &record()).unwrap();
            let rejection = Rejection::new(RejectionKind::InvalidAuxiliaryData, "bad courier")
                .on_field("courier");
            writer.rejected(2, "999", "CASH_ON_DELIVERY", &rejection).unwrap();
            writer.flush().unwrap();
        }
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(
            lines[0],
            "row,status,customer_id,payment_method,final_price,points,error,field,message"
        );
        assert_eq!(lines[1], "1,accepted,12345,VISA,95.00,2,,,");
        assert_eq!(
            lines[2],
            "2,rejected,999,CASH_ON_DELIVERY,,,INVALID_AUXILIARY_DATA,courier,bad courier"
        );
    }

    #[test]
    fn test_report_rows() {
        let mut out = Vec::new();
        ReportWriter::new(&mut out)
            .write_buckets(&[SalesBucket {
                bucket_start: Utc.with_ymd_and_hms(2022, 9, 1, 1, 0, 0).unwrap(),
                total_sales: dec!(2000.00),
                total_points: 100,
            }])
            .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "datetime,sales,points\n2022-09-01T01:00:00Z,2000.00,100\n"
        );
    }

    #[test]
    fn test_empty_report_keeps_header() {
        let mut out = Vec::new();
        ReportWriter::new(&mut out).write_buckets(&[]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "datetime,sales,points\n");
    }

    #[test]
    fn test_method_rows_follow_registry_order() {
        let registry = MethodRegistry::standard().unwrap();
        let mut out = Vec::new();
        MethodWriter::new(&mut out).write_methods(registry.rules()).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "method,min_modifier,max_modifier,points_rate");
        assert_eq!(lines[1], "CASH,0.90,1.00,0.05");
        assert_eq!(lines[12], "CHEQUE,0.90,1.00,0.00");
    }
}
