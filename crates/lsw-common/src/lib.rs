//! Logsweep common types and errors.
//!
//! This crate provides foundational types shared across the logsweep crates:
//! - The unified error type with stable numeric codes
//! - Output format selection (CSV / JSON)

pub mod error;
pub mod output;

pub use error::{Error, Result};
pub use output::OutputFormat;
