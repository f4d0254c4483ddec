//! CSV adapters for the command line: payment requests in, outcomes and reports out.

pub mod payment_reader;
pub mod writers;
