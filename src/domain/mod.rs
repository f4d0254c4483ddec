//! Domain layer: payment methods, their pricing rules, and sales reporting.
//!
//! Nothing in here performs I/O. Persistence is reached only through the
//! [`ports::PaymentStore`] trait.

pub mod additional;
pub mod evaluator;
pub mod method;
pub mod payment;
pub mod ports;
pub mod rejection;
pub mod report;
pub mod rules;
