//! improb common types and errors.
//!
//! This crate provides foundational types shared across the workspace:
//! - The error taxonomy raised by credal-set evaluation
//! - Structured (machine-readable) error reports
//! - Output format specifications

pub mod error;
pub mod output;

pub use error::{
    format_error_human, DistributionCheck, Error, ErrorCategory, Result, StructuredError,
};
pub use output::OutputFormat;

/// Schema version stamped on every serialized report.
pub const SCHEMA_VERSION: &str = "1.0.0";
