use super::payment::{Payment, PaymentRequest};
use super::rejection::{Rejection, RejectionKind};
use super::rules::{MethodRegistry, MethodRule};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places kept on the final charged price.
pub const PRICE_SCALE: u32 = 2;

/// Outcome of evaluating one request: the priced payment, or why it was refused.
pub type Evaluation = Result<Payment, Rejection>;

/// Validates and prices payment requests against a [`MethodRegistry`].
///
/// Evaluation is a pure function of the request and the registry: no state is kept
/// between calls, so a single evaluator can be shared across tasks freely.
#[derive(Debug, Clone)]
pub struct PaymentEvaluator {
    registry: MethodRegistry,
}

impl PaymentEvaluator {
    pub fn new(registry: MethodRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &MethodRegistry {
        &self.registry
    }

    /// Checks a request in a fixed order and prices it.
    ///
    /// The first failing check decides the rejection:
    /// 1. payment method is known
    /// 2. price parses and is strictly positive
    /// 3. modifier parses and lies within the method's inclusive bounds
    /// 4. additional item satisfies the method's validator
    /// 5. customer id is non-blank
    pub fn evaluate(&self, request: &PaymentRequest) -> Evaluation {
        let rule = self.registry.resolve(request.payment_method.trim())?;
        let price = parse_price(&request.price)?;
        let price_modifier = parse_modifier(rule, &request.price_modifier)?;

        let additional_item = (rule.validator)(request.additional_item.as_ref()).map_err(|e| {
            Rejection::new(RejectionKind::InvalidAuxiliaryData, e.message).on_field(e.field)
        })?;

        let customer_id = request.customer_id.trim();
        if customer_id.is_empty() {
            return Err(
                Rejection::new(RejectionKind::MissingCustomer, "Customer ID is required")
                    .on_field("customerId"),
            );
        }

        let final_price = final_price(price, price_modifier)?;
        let points = points(final_price, rule.points_rate)?;

        Ok(Payment {
            customer_id: customer_id.to_string(),
            price,
            price_modifier,
            final_price,
            points,
            payment_method: rule.method,
            additional_item,
            datetime: request.datetime,
        })
    }
}

/// `price × modifier`, rounded half-up to two places and always carrying two places.
pub fn final_price(price: Decimal, modifier: Decimal) -> Result<Decimal, Rejection> {
    let mut amount = price
        .checked_mul(modifier)
        .ok_or_else(|| out_of_range(price))?
        .round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero);
    amount.rescale(PRICE_SCALE);
    // rescale leaves a smaller scale when the mantissa has no room left
    if amount.scale() != PRICE_SCALE {
        return Err(out_of_range(price));
    }
    Ok(amount)
}

/// Loyalty points: `floor(final_price × rate)`. Truncates, never rounds up.
pub fn points(final_price: Decimal, rate: Decimal) -> Result<u64, Rejection> {
    final_price
        .checked_mul(rate)
        .and_then(|raw| raw.floor().to_u64())
        .ok_or_else(|| out_of_range(final_price))
}

fn parse_price(raw: &str) -> Result<Decimal, Rejection> {
    let price = parse_exact(raw).ok_or_else(|| {
        Rejection::new(
            RejectionKind::InvalidPrice,
            format!("Invalid price format: {}. Must be a valid decimal number", raw),
        )
        .on_field("price")
    })?;
    if price <= Decimal::ZERO {
        return Err(
            Rejection::new(RejectionKind::InvalidPrice, "Price must be greater than zero")
                .on_field("price"),
        );
    }
    Ok(price)
}

fn parse_modifier(rule: &MethodRule, raw: &str) -> Result<Decimal, Rejection> {
    let modifier = parse_exact(raw).ok_or_else(|| {
        Rejection::new(
            RejectionKind::ModifierOutOfRange,
            format!("Invalid price modifier: {}", raw),
        )
        .on_field("priceModifier")
    })?;
    if !rule.allows_modifier(modifier) {
        return Err(Rejection::new(
            RejectionKind::ModifierOutOfRange,
            format!(
                "Price modifier must be between {} and {} for {}. Got: {}",
                rule.min_modifier, rule.max_modifier, rule.method, modifier
            ),
        )
        .on_field("priceModifier"));
    }
    Ok(modifier)
}

/// Parses decimal text that fits without rounding. Digit separators are refused.
fn parse_exact(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    if raw.contains('_') {
        return None;
    }
    Decimal::from_str_exact(raw).ok()
}

fn out_of_range(amount: Decimal) -> Rejection {
    Rejection::new(
        RejectionKind::InvalidPrice,
        format!("Price {} is too large to process", amount),
    )
    .on_field("price")
}
