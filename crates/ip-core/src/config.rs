//! Settings loading for the CLI: resolution, presets and validation.

pub use ip_config::preset::{get_preset, list_presets, PresetError, PresetInfo, PresetName};
pub use ip_config::{ConfigSource, Settings, ValidationError};

use ip_config::{resolve_config, validate_settings};
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while loading settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("settings file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("invalid settings{}: {source}", location(.path))]
    Invalid {
        path: Option<PathBuf>,
        #[source]
        source: ValidationError,
    },
}

impl From<ConfigError> for ip_common::Error {
    fn from(err: ConfigError) -> Self {
        ip_common::Error::Config(err.to_string())
    }
}

fn location(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" in {}", p.display()))
        .unwrap_or_default()
}

/// Where to look for settings.
#[derive(Debug, Default, Clone)]
pub struct ConfigOptions {
    /// Explicit settings file (must exist).
    pub settings_path: Option<PathBuf>,
    /// Named preset; replaces file lookup entirely.
    pub preset: Option<PresetName>,
}

/// Loaded settings with provenance.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub settings: Settings,
    pub settings_path: Option<PathBuf>,
    pub source: ConfigSource,
    pub preset: Option<PresetName>,
}

/// Serializable provenance, embedded in CLI output.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigSnapshot {
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preset: Option<PresetName>,
    pub schema_version: String,
}

impl ResolvedConfig {
    pub fn snapshot(&self) -> ConfigSnapshot {
        ConfigSnapshot {
            source: match self.preset {
                Some(name) => format!("preset {}", name),
                None => self.source.to_string(),
            },
            settings_path: self.settings_path.clone(),
            preset: self.preset,
            schema_version: self.settings.schema_version.clone(),
        }
    }
}

/// Load settings.
///
/// Order: preset, explicit path, then the standard lookup (environment,
/// XDG, system, built-in defaults). The result is always validated.
pub fn load_config(options: &ConfigOptions) -> Result<ResolvedConfig, ConfigError> {
    if let Some(name) = options.preset {
        let settings = get_preset(name);
        validate_settings(&settings).map_err(|source| ConfigError::Invalid { path: None, source })?;
        return Ok(ResolvedConfig {
            settings,
            settings_path: None,
            source: ConfigSource::BuiltinDefault,
            preset: Some(name),
        });
    }

    if let Some(path) = &options.settings_path {
        if !path.is_file() {
            return Err(ConfigError::NotFound { path: path.clone() });
        }
    }

    let paths = resolve_config(options.settings_path.as_deref());
    let settings = match &paths.settings {
        Some(path) => Settings::from_file(path).map_err(|source| ConfigError::Invalid {
            path: Some(path.clone()),
            source,
        })?,
        None => Settings::default(),
    };
    validate_settings(&settings).map_err(|source| ConfigError::Invalid {
        path: paths.settings.clone(),
        source,
    })?;

    debug!(
        source = %paths.settings_source,
        path = ?paths.settings,
        "settings resolved"
    );

    Ok(ResolvedConfig {
        settings,
        settings_path: paths.settings,
        source: paths.settings_source,
        preset: None,
    })
}
