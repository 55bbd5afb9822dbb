//! Configuration validation errors and semantic validation.

use crate::settings::{Settings, Tolerances};
use thiserror::Error;

/// Validation result type.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Configuration validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Semantic validation failed: {0}")]
    SemanticError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Version mismatch: expected {expected}, got {actual}")]
    VersionMismatch { expected: String, actual: String },
}

impl ValidationError {
    /// Error code for structured error reporting.
    pub fn code(&self) -> u32 {
        match self {
            ValidationError::IoError(_) => 60,
            ValidationError::ParseError(_) => 61,
            ValidationError::SemanticError(_) => 63,
            ValidationError::InvalidValue { .. } => 65,
            ValidationError::VersionMismatch { .. } => 66,
        }
    }
}

/// Validate settings semantically.
pub fn validate_settings(settings: &Settings) -> ValidationResult<()> {
    if settings.schema_version != crate::CONFIG_SCHEMA_VERSION {
        return Err(ValidationError::VersionMismatch {
            expected: crate::CONFIG_SCHEMA_VERSION.to_string(),
            actual: settings.schema_version.clone(),
        });
    }

    validate_tolerances(&settings.tolerances)?;

    let optimism = settings.hurwicz.optimism;
    if !(0.0..=1.0).contains(&optimism) {
        return Err(ValidationError::InvalidValue {
            field: "hurwicz.optimism".to_string(),
            message: format!("Must be in [0, 1], got {}", optimism),
        });
    }

    Ok(())
}

/// Validate every tolerance: finite and non-negative.
pub fn validate_tolerances(tolerances: &Tolerances) -> ValidationResult<()> {
    for (name, value) in [
        ("normalization", tolerances.normalization),
        ("optimality", tolerances.optimality),
        ("dominance", tolerances.dominance),
        ("robust_bayes", tolerances.robust_bayes),
    ] {
        validate_tolerance(&format!("tolerances.{}", name), value)?;
    }

    // A slack of 1 or more would accept [0, 0, ...] as a distribution.
    if tolerances.normalization >= 1.0 {
        return Err(ValidationError::SemanticError(format!(
            "tolerances.normalization must be below 1, got {}",
            tolerances.normalization
        )));
    }

    Ok(())
}

fn validate_tolerance(field: &str, value: f64) -> ValidationResult<()> {
    if !value.is_finite() {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            message: format!("Must be finite, got {}", value),
        });
    }
    if value < 0.0 {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            message: format!("Must be non-negative, got {}", value),
        });
    }
    Ok(())
}
