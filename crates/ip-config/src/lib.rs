//! improb configuration loading and validation.
//!
//! This crate provides:
//! - Typed settings (numeric tolerances, Hurwicz defaults)
//! - Config resolution (CLI → env → XDG → system → defaults)
//! - Semantic validation
//! - Named tolerance presets

pub mod preset;
pub mod resolve;
pub mod settings;
pub mod validate;

pub use preset::{get_preset, PresetName};
pub use resolve::{resolve_config, ConfigPaths, ConfigSource};
pub use settings::{HurwiczDefaults, Settings, Tolerances};
pub use validate::{validate_settings, ValidationError, ValidationResult};

/// Schema version for settings files.
pub const CONFIG_SCHEMA_VERSION: &str = "1.0.0";
