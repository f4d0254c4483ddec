use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Why a payment request was turned down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectionKind {
    UnknownMethod,
    InvalidPrice,
    ModifierOutOfRange,
    InvalidAuxiliaryData,
    MissingCustomer,
}

impl RejectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectionKind::UnknownMethod => "UNKNOWN_METHOD",
            RejectionKind::InvalidPrice => "INVALID_PRICE",
            RejectionKind::ModifierOutOfRange => "MODIFIER_OUT_OF_RANGE",
            RejectionKind::InvalidAuxiliaryData => "INVALID_AUXILIARY_DATA",
            RejectionKind::MissingCustomer => "MISSING_CUSTOMER",
        }
    }
}

impl fmt::Display for RejectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A deterministic, single-cause refusal of a payment request.
///
/// Carries the offending request field (e.g. `priceModifier`, `last4`) so callers can
/// render a user-facing error without re-deriving the cause.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}: {message}")]
pub struct Rejection {
    pub kind: RejectionKind,
    pub message: String,
    pub field: Option<String>,
}

impl Rejection {
    pub fn new(kind: RejectionKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            field: None,
        }
    }

    pub fn on_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }
}
