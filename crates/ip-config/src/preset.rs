//! Named tolerance presets.
//!
//! - Default: 1e-7 normalization slack, 1e-10 comparison slack
//! - Strict: exact comparisons, normalization checked to 1e-12
//! - Lenient: loose slack for hand-entered or rounded data

use crate::settings::{HurwiczDefaults, Settings, Tolerances};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Available configuration presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresetName {
    /// Built-in defaults
    Default,
    /// Exact comparisons, tight normalization check
    Strict,
    /// Generous slack for rounded inputs
    Lenient,
}

impl PresetName {
    /// All available preset names.
    pub const ALL: &'static [PresetName] =
        &[PresetName::Default, PresetName::Strict, PresetName::Lenient];

    /// Get preset name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            PresetName::Default => "default",
            PresetName::Strict => "strict",
            PresetName::Lenient => "lenient",
        }
    }

    /// Parse preset name from string.
    pub fn parse(s: &str) -> Option<PresetName> {
        match s.to_lowercase().as_str() {
            "default" | "standard" => Some(PresetName::Default),
            "strict" | "exact" => Some(PresetName::Strict),
            "lenient" | "loose" | "rounded" => Some(PresetName::Lenient),
            _ => None,
        }
    }

    /// Get a description of the preset.
    pub fn description(&self) -> &'static str {
        match self {
            PresetName::Default => "Normalization slack 1e-7, comparison slack 1e-10",
            PresetName::Strict => "Normalization slack 1e-12, exact comparisons",
            PresetName::Lenient => {
                "Normalization slack 1e-3, comparison slack 1e-6, for rounded inputs"
            }
        }
    }
}

impl fmt::Display for PresetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PresetName {
    type Err = PresetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PresetName::parse(s).ok_or_else(|| PresetError::UnknownPreset(s.to_string()))
    }
}

/// Errors related to preset operations.
#[derive(Debug, Clone)]
pub enum PresetError {
    /// Unknown preset name.
    UnknownPreset(String),
}

impl fmt::Display for PresetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PresetError::UnknownPreset(name) => {
                write!(
                    f,
                    "Unknown preset '{}'. Available: {}",
                    name,
                    PresetName::ALL
                        .iter()
                        .map(|p| p.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            }
        }
    }
}

impl std::error::Error for PresetError {}

/// Build the settings for a preset.
pub fn get_preset(name: PresetName) -> Settings {
    let tolerances = match name {
        PresetName::Default => Tolerances::default(),
        PresetName::Strict => Tolerances {
            normalization: 1e-12,
            optimality: 0.0,
            dominance: 0.0,
            robust_bayes: 0.0,
        },
        PresetName::Lenient => Tolerances {
            normalization: 1e-3,
            optimality: 1e-6,
            dominance: 1e-6,
            robust_bayes: 1e-6,
        },
    };

    Settings {
        schema_version: crate::CONFIG_SCHEMA_VERSION.to_string(),
        description: Some(format!("preset:{}", name.as_str())),
        tolerances,
        hurwicz: HurwiczDefaults::default(),
    }
}

/// Summary of a preset for listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresetInfo {
    pub name: String,
    pub description: String,
    pub tolerances: Tolerances,
}

impl PresetInfo {
    /// Create info from a preset.
    pub fn from_preset(name: PresetName) -> Self {
        Self {
            name: name.as_str().to_string(),
            description: name.description().to_string(),
            tolerances: get_preset(name).tolerances,
        }
    }
}

/// List all available presets.
pub fn list_presets() -> Vec<PresetInfo> {
    PresetName::ALL
        .iter()
        .map(|&name| PresetInfo::from_preset(name))
        .collect()
}
