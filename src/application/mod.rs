//! Application layer containing the payment orchestration.
//!
//! This module defines the `PaymentService`, the entry point used by the CLI: it runs
//! requests through the evaluator, persists what is accepted, and builds sales reports
//! from what the store returns.

pub mod service;
