use super::additional::{self, AdditionalValidator};
use super::method::PaymentMethod;
use super::rejection::{Rejection, RejectionKind};
use crate::error::{PaymentError, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::BTreeMap;

/// Pricing and validation rules for a single payment method.
#[derive(Debug, Clone, Copy)]
pub struct MethodRule {
    pub method: PaymentMethod,
    /// Lowest accepted price modifier, inclusive.
    pub min_modifier: Decimal,
    /// Highest accepted price modifier, inclusive.
    pub max_modifier: Decimal,
    /// Fraction of the final price converted to loyalty points.
    pub points_rate: Decimal,
    pub validator: AdditionalValidator,
}

impl MethodRule {
    const fn new(
        method: PaymentMethod,
        min_modifier: Decimal,
        max_modifier: Decimal,
        points_rate: Decimal,
        validator: AdditionalValidator,
    ) -> Self {
        Self {
            method,
            min_modifier,
            max_modifier,
            points_rate,
            validator,
        }
    }

    pub fn allows_modifier(&self, modifier: Decimal) -> bool {
        modifier >= self.min_modifier && modifier <= self.max_modifier
    }
}

#[rustfmt::skip]
const STANDARD_RULES: [MethodRule; 12] = [
    MethodRule::new(PaymentMethod::Cash, dec!(0.90), dec!(1.00), dec!(0.05), additional::no_requirements),
    MethodRule::new(PaymentMethod::CashOnDelivery, dec!(1.00), dec!(1.02), dec!(0.05), additional::courier),
    MethodRule::new(PaymentMethod::Visa, dec!(0.95), dec!(1.00), dec!(0.03), additional::card_last4),
    MethodRule::new(PaymentMethod::Mastercard, dec!(0.95), dec!(1.00), dec!(0.03), additional::card_last4),
    MethodRule::new(PaymentMethod::Amex, dec!(0.98), dec!(1.01), dec!(0.02), additional::card_last4),
    MethodRule::new(PaymentMethod::Jcb, dec!(0.95), dec!(1.00), dec!(0.05), additional::card_last4),
    MethodRule::new(PaymentMethod::LinePay, dec!(1.00), dec!(1.00), dec!(0.01), additional::no_requirements),
    MethodRule::new(PaymentMethod::PayPay, dec!(1.00), dec!(1.00), dec!(0.01), additional::no_requirements),
    MethodRule::new(PaymentMethod::Points, dec!(1.00), dec!(1.00), dec!(0.00), additional::no_requirements),
    MethodRule::new(PaymentMethod::GrabPay, dec!(1.00), dec!(1.00), dec!(0.01), additional::no_requirements),
    MethodRule::new(PaymentMethod::BankTransfer, dec!(1.00), dec!(1.00), dec!(0.00), additional::bank_account),
    MethodRule::new(PaymentMethod::Cheque, dec!(0.90), dec!(1.00), dec!(0.00), additional::bank_cheque),
];

/// Read-only table mapping every [`PaymentMethod`] to its [`MethodRule`].
///
/// Construction checks that the table is total over the enumerated methods, so a
/// built registry never fails a lookup for a known method.
#[derive(Debug, Clone)]
pub struct MethodRegistry {
    rules: BTreeMap<PaymentMethod, MethodRule>,
}

impl MethodRegistry {
    /// Builds the registry with the standard point-of-sale rule set.
    pub fn standard() -> Result<Self> {
        Self::from_rules(STANDARD_RULES)
    }

    pub fn from_rules(rules: impl IntoIterator<Item = MethodRule>) -> Result<Self> {
        let mut table = BTreeMap::new();
        for rule in rules {
            if rule.min_modifier > rule.max_modifier {
                return Err(PaymentError::Registry(format!(
                    "{} has min modifier {} above max modifier {}",
                    rule.method, rule.min_modifier, rule.max_modifier
                )));
            }
            if rule.points_rate < Decimal::ZERO || rule.points_rate >= Decimal::ONE {
                return Err(PaymentError::Registry(format!(
                    "{} has points rate {} outside [0, 1)",
                    rule.method, rule.points_rate
                )));
            }
            if table.insert(rule.method, rule).is_some() {
                return Err(PaymentError::Registry(format!(
                    "{} has more than one rule",
                    rule.method
                )));
            }
        }

        if let Some(missing) = PaymentMethod::ALL
            .into_iter()
            .find(|method| !table.contains_key(method))
        {
            return Err(PaymentError::Registry(format!("{} has no rule", missing)));
        }

        Ok(Self { rules: table })
    }

    /// Returns the rule for a method. Total once the registry is built.
    pub fn lookup(&self, method: PaymentMethod) -> &MethodRule {
        // `from_rules` refuses to build a registry with a gap.
        &self.rules[&method]
    }

    /// Resolves a wire method name to its rule.
    pub fn resolve(&self, name: &str) -> std::result::Result<&MethodRule, Rejection> {
        let method = name.parse::<PaymentMethod>().map_err(|_| {
            Rejection::new(
                RejectionKind::UnknownMethod,
                format!(
                    "Invalid payment method: {}. Valid methods are: {}",
                    name,
                    self.supported_methods()
                        .iter()
                        .map(PaymentMethod::as_str)
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            )
            .on_field("paymentMethod")
        })?;
        Ok(self.lookup(method))
    }

    /// Supported methods in listing order.
    pub fn supported_methods(&self) -> Vec<PaymentMethod> {
        PaymentMethod::ALL.to_vec()
    }

    pub fn rules(&self) -> impl Iterator<Item = &MethodRule> {
        PaymentMethod::ALL
            .into_iter()
            .map(move |method| self.lookup(method))
    }
}
