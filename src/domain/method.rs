use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of payment methods accepted at the point of sale.
///
/// Wire names are the upper snake case identifiers (`CASH_ON_DELIVERY`, `GRAB_PAY`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Cash,
    CashOnDelivery,
    Visa,
    Mastercard,
    Amex,
    Jcb,
    LinePay,
    #[serde(rename = "PAYPAY")]
    PayPay,
    Points,
    GrabPay,
    BankTransfer,
    Cheque,
}

impl PaymentMethod {
    /// Every method, in the order they are listed to clients.
    pub const ALL: [PaymentMethod; 12] = [
        PaymentMethod::Cash,
        PaymentMethod::CashOnDelivery,
        PaymentMethod::Visa,
        PaymentMethod::Mastercard,
        PaymentMethod::Amex,
        PaymentMethod::Jcb,
        PaymentMethod::LinePay,
        PaymentMethod::PayPay,
        PaymentMethod::Points,
        PaymentMethod::GrabPay,
        PaymentMethod::BankTransfer,
        PaymentMethod::Cheque,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "CASH",
            PaymentMethod::CashOnDelivery => "CASH_ON_DELIVERY",
            PaymentMethod::Visa => "VISA",
            PaymentMethod::Mastercard => "MASTERCARD",
            PaymentMethod::Amex => "AMEX",
            PaymentMethod::Jcb => "JCB",
            PaymentMethod::LinePay => "LINE_PAY",
            PaymentMethod::PayPay => "PAYPAY",
            PaymentMethod::Points => "POINTS",
            PaymentMethod::GrabPay => "GRAB_PAY",
            PaymentMethod::BankTransfer => "BANK_TRANSFER",
            PaymentMethod::Cheque => "CHEQUE",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMethod(pub String);

impl FromStr for PaymentMethod {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaymentMethod::ALL
            .into_iter()
            .find(|method| method.as_str() == s)
            .ok_or_else(|| UnknownMethod(s.to_string()))
    }
}
