//! Error types for improb.
//!
//! This module provides structured error handling with:
//! - Stable error codes for machine parsing
//! - Category classification for error grouping
//! - Recoverability hints for automation
//! - Remediation suggestions for humans
//!
//! # Human-Facing Output
//!
//! ```text
//! ✗ Malformed Distribution
//!   Reason: malformed distribution at pmf 2: entries sum to 1.1 (tolerance 1e-7)
//!   Fix: Every pmf must be non-negative and sum to 1. Check the listed entry.
//! ```
//!
//! # Agent-Facing Output
//!
//! ```json
//! {
//!   "code": 20,
//!   "category": "input",
//!   "message": "malformed distribution at pmf 2: entries sum to 1.1 (tolerance 1e-7)",
//!   "recoverable": true,
//!   "suggested_action": "fix_input",
//!   "context": { "pmf": 2, "check": { "kind": "normalization", "sum": 1.1, "tolerance": 1e-7 } }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Result type alias for improb operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Settings and problem file errors.
    Config,
    /// Invalid credal sets, acts or parameters.
    Input,
    /// File I/O and serialization errors.
    Io,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Config => write!(f, "config"),
            ErrorCategory::Input => write!(f, "input"),
            ErrorCategory::Io => write!(f, "io"),
        }
    }
}

/// Suggested actions for agents to take in response to errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestedAction {
    /// Correct the numeric input and resubmit.
    FixInput,
    /// Reset configuration to defaults.
    ResetConfig,
    /// Run the validation command.
    RunCheck,
    /// Retry the operation.
    Retry,
    /// Manual intervention required.
    ManualIntervention,
}

impl std::fmt::Display for SuggestedAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SuggestedAction::FixInput => write!(f, "fix_input"),
            SuggestedAction::ResetConfig => write!(f, "reset_config"),
            SuggestedAction::RunCheck => write!(f, "run_check"),
            SuggestedAction::Retry => write!(f, "retry"),
            SuggestedAction::ManualIntervention => write!(f, "manual_intervention"),
        }
    }
}

/// Which validation check rejected a probability mass function.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DistributionCheck {
    /// An entry is NaN or infinite.
    NonFinite { outcome: usize },
    /// An entry is below zero.
    Negative { outcome: usize, value: f64 },
    /// The entries do not sum to one within tolerance.
    Normalization { sum: f64, tolerance: f64 },
}

impl std::fmt::Display for DistributionCheck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DistributionCheck::NonFinite { outcome } => {
                write!(f, "entry {} is not finite", outcome)
            }
            DistributionCheck::Negative { outcome, value } => {
                write!(f, "entry {} is negative ({})", outcome, value)
            }
            DistributionCheck::Normalization { sum, tolerance } => {
                write!(f, "entries sum to {} (tolerance {:e})", sum, tolerance)
            }
        }
    }
}

/// Unified error type for improb.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors (10-19)
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid problem file: {0}")]
    InvalidProblem(String),

    // Input errors (20-29)
    #[error("malformed distribution at pmf {pmf}: {check}")]
    MalformedDistribution { pmf: usize, check: DistributionCheck },

    #[error("empty credal set: at least one pmf is required")]
    EmptyCredalSet,

    #[error("dimension mismatch in {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        context: String,
        expected: usize,
        actual: usize,
    },

    #[error("invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        name: String,
        value: f64,
        reason: String,
    },

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Shorthand for [`Error::DimensionMismatch`].
    pub fn dimension_mismatch(context: impl Into<String>, expected: usize, actual: usize) -> Self {
        Error::DimensionMismatch {
            context: context.into(),
            expected,
            actual,
        }
    }

    /// Shorthand for [`Error::InvalidParameter`].
    pub fn invalid_parameter(
        name: impl Into<String>,
        value: f64,
        reason: impl Into<String>,
    ) -> Self {
        Error::InvalidParameter {
            name: name.into(),
            value,
            reason: reason.into(),
        }
    }

    /// Returns the error code for this error type.
    ///
    /// Error codes are stable and grouped by category:
    /// - 10-19: Configuration errors
    /// - 20-29: Input errors
    /// - 60-69: I/O errors
    pub fn code(&self) -> u32 {
        match self {
            Error::Config(_) => 10,
            Error::InvalidProblem(_) => 11,
            Error::MalformedDistribution { .. } => 20,
            Error::EmptyCredalSet => 21,
            Error::DimensionMismatch { .. } => 22,
            Error::InvalidParameter { .. } => 23,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
        }
    }

    /// Returns the error category for grouping and filtering.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Config(_) | Error::InvalidProblem(_) => ErrorCategory::Config,

            Error::MalformedDistribution { .. }
            | Error::EmptyCredalSet
            | Error::DimensionMismatch { .. }
            | Error::InvalidParameter { .. } => ErrorCategory::Input,

            Error::Io(_) | Error::Json(_) => ErrorCategory::Io,
        }
    }

    /// Returns whether this error is potentially recoverable.
    ///
    /// Nothing is retried internally; recoverable means the caller can fix
    /// the input or the environment and call again.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Error::Config(_) | Error::InvalidProblem(_) => true,
            Error::MalformedDistribution { .. }
            | Error::EmptyCredalSet
            | Error::DimensionMismatch { .. }
            | Error::InvalidParameter { .. } => true,
            Error::Io(_) => true,
            Error::Json(_) => false,
        }
    }

    /// Returns the suggested action for agents.
    pub fn suggested_action(&self) -> SuggestedAction {
        match self {
            Error::Config(_) => SuggestedAction::ResetConfig,
            Error::InvalidProblem(_) => SuggestedAction::RunCheck,
            Error::MalformedDistribution { .. }
            | Error::EmptyCredalSet
            | Error::DimensionMismatch { .. }
            | Error::InvalidParameter { .. } => SuggestedAction::FixInput,
            Error::Io(_) => SuggestedAction::Retry,
            Error::Json(_) => SuggestedAction::ManualIntervention,
        }
    }

    /// Returns a human-readable remediation hint.
    pub fn remediation(&self) -> &'static str {
        match self {
            Error::Config(_) => {
                "Run 'improb config show' to inspect the resolved settings, or pick a --preset."
            }
            Error::InvalidProblem(_) => {
                "The problem file needs 'pmfs' and 'acts' arrays. Run 'improb check <file>' for details."
            }
            Error::MalformedDistribution { .. } => {
                "Every pmf must be non-negative and sum to 1. Check the listed entry."
            }
            Error::EmptyCredalSet => "Supply at least one probability mass function.",
            Error::DimensionMismatch { .. } => {
                "Every pmf and every act must have one entry per outcome."
            }
            Error::InvalidParameter { .. } => {
                "Tolerances must be finite and non-negative; the Hurwicz optimism must lie in [0, 1]."
            }
            Error::Io(_) => "Check that the file exists and is readable, then retry.",
            Error::Json(_) => "Invalid JSON. Check syntax with 'jq . <file>'.",
        }
    }

    /// Returns a short headline for human-readable output.
    pub fn headline(&self) -> &'static str {
        match self {
            Error::Config(_) => "Configuration Error",
            Error::InvalidProblem(_) => "Invalid Problem File",
            Error::MalformedDistribution { .. } => "Malformed Distribution",
            Error::EmptyCredalSet => "Empty Credal Set",
            Error::DimensionMismatch { .. } => "Dimension Mismatch",
            Error::InvalidParameter { .. } => "Invalid Parameter",
            Error::Io(_) => "I/O Error",
            Error::Json(_) => "JSON Parse Error",
        }
    }
}

/// Structured error response for JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// Stable error code.
    pub code: u32,

    /// Error category for grouping.
    pub category: ErrorCategory,

    /// Human-readable error message.
    pub message: String,

    /// Whether the error is potentially recoverable.
    pub recoverable: bool,

    /// Suggested action for agents.
    pub suggested_action: SuggestedAction,

    /// Additional structured context (pmf index, parameter name, ...).
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub context: HashMap<String, serde_json::Value>,
}

impl From<&Error> for StructuredError {
    fn from(err: &Error) -> Self {
        let mut context = HashMap::new();

        match err {
            Error::MalformedDistribution { pmf, check } => {
                context.insert("pmf".to_string(), serde_json::json!(pmf));
                if let Ok(v) = serde_json::to_value(check) {
                    context.insert("check".to_string(), v);
                }
            }
            Error::DimensionMismatch {
                context: what,
                expected,
                actual,
            } => {
                context.insert("context".to_string(), serde_json::json!(what));
                context.insert("expected".to_string(), serde_json::json!(expected));
                context.insert("actual".to_string(), serde_json::json!(actual));
            }
            Error::InvalidParameter { name, value, .. } => {
                context.insert("parameter".to_string(), serde_json::json!(name));
                // NaN/inf have no JSON representation; keep the text form.
                let v = if value.is_finite() {
                    serde_json::json!(value)
                } else {
                    serde_json::json!(value.to_string())
                };
                context.insert("value".to_string(), v);
            }
            _ => {}
        }

        StructuredError {
            code: err.code(),
            category: err.category(),
            message: err.to_string(),
            recoverable: err.is_recoverable(),
            suggested_action: err.suggested_action(),
            context,
        }
    }
}

impl StructuredError {
    /// Add additional context to the error.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        if let Ok(v) = serde_json::to_value(value) {
            self.context.insert(key.into(), v);
        }
        self
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(r#"{{"code":{},"error":"serialization_failed"}}"#, self.code)
        })
    }

    /// Serialize to pretty JSON string.
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| self.to_json())
    }
}

/// Format an error for human-readable stderr output.
///
/// Output format:
/// ```text
/// ✗ [Headline]
///   Reason: [Error message]
///   Fix: [Remediation hint]
/// ```
pub fn format_error_human(err: &Error, use_color: bool) -> String {
    let (red, cyan, reset) = if use_color {
        ("\x1b[31m", "\x1b[36m", "\x1b[0m")
    } else {
        ("", "", "")
    };

    format!(
        "{red}✗{reset} {headline}\n  Reason: {message}\n  {cyan}Fix:{reset} {remediation}",
        red = red,
        cyan = cyan,
        reset = reset,
        headline = err.headline(),
        message = err,
        remediation = err.remediation(),
    )
}
