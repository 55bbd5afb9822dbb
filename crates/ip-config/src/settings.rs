//! Typed settings for credal-set evaluation.
//!
//! Settings files may be JSON or TOML; the format is picked from the file
//! extension (`.toml` → TOML, anything else → JSON). Every field has a
//! default, so an empty object is a valid settings file.

use crate::validate::ValidationError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Numeric tolerances used by the evaluation engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerances {
    /// Absolute slack on `|Σ pmf − 1|` when validating a credal set.
    pub normalization: f64,

    /// Slack below the maximum prevision still counted as optimal.
    pub optimality: f64,

    /// Margin by which one act must beat another to dominate it.
    pub dominance: f64,

    /// Slack below a column maximum still counted as a maximizer.
    pub robust_bayes: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            normalization: 1e-7,
            optimality: 1e-10,
            dominance: 1e-10,
            robust_bayes: 1e-10,
        }
    }
}

/// Defaults for the Hurwicz criterion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HurwiczDefaults {
    /// Optimism coefficient α ∈ [0, 1]: weight on the upper prevision.
    pub optimism: f64,
}

impl Default for HurwiczDefaults {
    fn default() -> Self {
        Self { optimism: 0.5 }
    }
}

/// Top-level settings document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub schema_version: String,

    pub description: Option<String>,

    pub tolerances: Tolerances,

    pub hurwicz: HurwiczDefaults,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: crate::CONFIG_SCHEMA_VERSION.to_string(),
            description: None,
            tolerances: Tolerances::default(),
            hurwicz: HurwiczDefaults::default(),
        }
    }
}

impl Settings {
    /// Load settings from a JSON or TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ValidationError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ValidationError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let is_toml = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("toml"))
            .unwrap_or(false);

        if is_toml {
            Self::parse_toml(&content)
        } else {
            Self::parse_json(&content)
        }
    }

    /// Parse settings from a JSON string.
    pub fn parse_json(json: &str) -> Result<Self, ValidationError> {
        serde_json::from_str(json)
            .map_err(|e| ValidationError::ParseError(format!("Invalid JSON: {}", e)))
    }

    /// Parse settings from a TOML string.
    pub fn parse_toml(text: &str) -> Result<Self, ValidationError> {
        toml::from_str(text)
            .map_err(|e| ValidationError::ParseError(format!("Invalid TOML: {}", e)))
    }

    /// Override the Hurwicz optimism coefficient.
    pub fn with_optimism(mut self, optimism: f64) -> Self {
        self.hurwicz.optimism = optimism;
        self
    }
}
