use crate::domain::evaluator::PaymentEvaluator;
use crate::domain::method::PaymentMethod;
use crate::domain::payment::{PaymentRecord, PaymentRequest};
use crate::domain::ports::PaymentStoreBox;
use crate::domain::report::{self, SalesBucket};
use crate::error::{PaymentError, Result};
use chrono::{DateTime, Utc};
use tracing::{debug, info};

/// Front door for payment processing and sales reporting.
///
/// `PaymentService` owns the evaluator and the storage backend. Evaluation itself is
/// pure; the only side effect is the single insert performed for an accepted payment.
pub struct PaymentService {
    evaluator: PaymentEvaluator,
    store: PaymentStoreBox,
}

impl PaymentService {
    /// Creates a new `PaymentService` instance.
    ///
    /// # Arguments
    ///
    /// * `evaluator` - Validates and prices incoming requests.
    /// * `store` - Where accepted payments are recorded.
    pub fn new(evaluator: PaymentEvaluator, store: PaymentStoreBox) -> Self {
        Self { evaluator, store }
    }

    /// Evaluates a request and records it if accepted.
    ///
    /// Rejections come back as [`PaymentError::Rejected`] and leave the store untouched.
    pub async fn process_payment(&self, request: &PaymentRequest) -> Result<PaymentRecord> {
        let payment = self.evaluator.evaluate(request)?;
        let record = self.store.insert(payment).await?;
        debug!(
            id = record.id,
            method = %record.payment.payment_method,
            final_price = %record.payment.final_price,
            points = record.payment.points,
            "payment recorded"
        );
        Ok(record)
    }

    /// Hourly sales between `start` (inclusive) and `end` (exclusive).
    pub async fn sales_report(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<SalesBucket>> {
        if start > end {
            return Err(PaymentError::InvalidRange { start, end });
        }
        let records = self.store.range(start, end).await?;
        let buckets = report::aggregate(&records, start, end)?;
        info!(
            %start,
            %end,
            records = records.len(),
            buckets = buckets.len(),
            "sales report built"
        );
        Ok(buckets)
    }

    pub fn supported_methods(&self) -> Vec<PaymentMethod> {
        self.evaluator.registry().supported_methods()
    }

    pub fn evaluator(&self) -> &PaymentEvaluator {
        &self.evaluator
    }
}
