//! Configuration resolution and path discovery.
//!
//! Resolution order: CLI argument → environment variables → XDG paths →
//! system config → built-in defaults.

use std::path::{Path, PathBuf};

/// Discovered configuration file paths.
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    /// Path to the settings file (or None if not found).
    pub settings: Option<PathBuf>,

    /// Source of the settings file (for diagnostics).
    pub settings_source: ConfigSource,
}

/// Where a configuration file was found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly provided via CLI argument.
    CliArgument,

    /// Set via environment variable.
    Environment,

    /// Found in XDG config directory.
    XdgConfig,

    /// Found in /etc/improb/.
    SystemConfig,

    /// Using built-in defaults.
    #[default]
    BuiltinDefault,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::CliArgument => write!(f, "CLI argument"),
            ConfigSource::Environment => write!(f, "environment variable"),
            ConfigSource::XdgConfig => write!(f, "XDG config"),
            ConfigSource::SystemConfig => write!(f, "system config"),
            ConfigSource::BuiltinDefault => write!(f, "builtin default"),
        }
    }
}

/// Environment variable names.
pub const ENV_SETTINGS_PATH: &str = "IMPROB_SETTINGS";
pub const ENV_CONFIG_DIR: &str = "IMPROB_CONFIG_DIR";

/// Standard settings file names, in lookup order.
const SETTINGS_FILENAMES: [&str; 2] = ["settings.json", "settings.toml"];

/// Application name for XDG directories.
const APP_NAME: &str = "improb";

/// Resolve the settings path using the standard resolution order.
///
/// 1. Explicit CLI path (if it exists)
/// 2. IMPROB_SETTINGS environment variable
/// 3. IMPROB_CONFIG_DIR environment variable + filename
/// 4. XDG config directory (~/.config/improb/)
/// 5. System config (/etc/improb/)
/// 6. Built-in defaults (None)
pub fn resolve_config(cli_settings: Option<&Path>) -> ConfigPaths {
    let mut paths = ConfigPaths::default();
    paths.settings = resolve_settings_path(cli_settings, &mut paths.settings_source);
    paths
}

fn resolve_settings_path(cli_path: Option<&Path>, source: &mut ConfigSource) -> Option<PathBuf> {
    // 1. CLI argument
    if let Some(path) = cli_path {
        if path.exists() {
            *source = ConfigSource::CliArgument;
            return Some(path.to_path_buf());
        }
    }

    // 2. Environment variable (direct path)
    if let Ok(env_path) = std::env::var(ENV_SETTINGS_PATH) {
        let path = PathBuf::from(env_path);
        if path.exists() {
            *source = ConfigSource::Environment;
            return Some(path);
        }
    }

    // 3. Environment variable (config dir)
    if let Ok(config_dir) = std::env::var(ENV_CONFIG_DIR) {
        if let Some(path) = find_in_dir(Path::new(&config_dir)) {
            *source = ConfigSource::Environment;
            return Some(path);
        }
    }

    // 4. XDG config directory
    if let Some(dir) = xdg_config_dir() {
        if let Some(path) = find_in_dir(&dir) {
            *source = ConfigSource::XdgConfig;
            return Some(path);
        }
    }

    // 5. System config
    if let Some(path) = find_in_dir(&system_config_dir()) {
        *source = ConfigSource::SystemConfig;
        return Some(path);
    }

    // 6. Built-in default (None)
    *source = ConfigSource::BuiltinDefault;
    None
}

fn find_in_dir(dir: &Path) -> Option<PathBuf> {
    SETTINGS_FILENAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Get the XDG config directory for improb.
pub fn xdg_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_NAME))
}

/// Get the system config directory.
pub fn system_config_dir() -> PathBuf {
    PathBuf::from("/etc").join(APP_NAME)
}
