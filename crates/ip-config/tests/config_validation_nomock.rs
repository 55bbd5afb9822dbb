//! No-mock settings validation + resolution tests.
//!
//! Covers:
//! - Settings files on disk (JSON and TOML) through validation
//! - Resolution order (CLI > env > config dir > XDG)
//! - Preset determinism

use ip_config::preset::{get_preset, list_presets, PresetName};
use ip_config::resolve::{resolve_config, ConfigSource, ENV_CONFIG_DIR, ENV_SETTINGS_PATH};
use ip_config::validate::{validate_settings, ValidationError};
use ip_config::Settings;
use std::env;
use std::fs;
use std::path::Path;
use std::sync::{Mutex, OnceLock};
use tempfile::TempDir;

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const VALID_JSON: &str = r#"{
  "schema_version": "1.0.0",
  "description": "fixture",
  "tolerances": { "normalization": 1e-6, "optimality": 1e-9 },
  "hurwicz": { "optimism": 0.3 }
}"#;

const VALID_TOML: &str = r#"
schema_version = "1.0.0"

[tolerances]
dominance = 0.001
"#;

const BAD_OPTIMISM_JSON: &str = r#"{ "hurwicz": { "optimism": 1.5 } }"#;

const BAD_VERSION_JSON: &str = r#"{ "schema_version": "2.0.0" }"#;

struct EnvGuard {
    keys: Vec<String>,
    saved: Vec<Option<String>>,
}

impl EnvGuard {
    fn new(keys: &[&str]) -> Self {
        let mut saved = Vec::with_capacity(keys.len());
        for key in keys {
            saved.push(env::var(key).ok());
        }
        Self {
            keys: keys.iter().map(|k| k.to_string()).collect(),
            saved,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (idx, key) in self.keys.iter().enumerate() {
            match self.saved.get(idx).and_then(|v| v.as_ref()) {
                Some(val) => env::set_var(key, val),
                None => env::remove_var(key),
            }
        }
    }
}

fn with_env_lock<T>(f: impl FnOnce() -> T) -> T {
    let _guard = ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .expect("env lock poisoned");
    f()
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent");
    }
    fs::write(path, content).expect("write fixture");
}

const ENV_KEYS: [&str; 3] = [ENV_SETTINGS_PATH, ENV_CONFIG_DIR, "XDG_CONFIG_HOME"];

#[test]
fn test_valid_json_settings_pass() {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join("settings.json");
    write_file(&path, VALID_JSON);

    let settings = Settings::from_file(&path).expect("parse settings");
    validate_settings(&settings).expect("valid settings should pass validation");
    assert_eq!(settings.tolerances.normalization, 1e-6);
    assert_eq!(settings.tolerances.dominance, 1e-10);
    assert_eq!(settings.hurwicz.optimism, 0.3);
}

#[test]
fn test_valid_toml_settings_pass() {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join("settings.toml");
    write_file(&path, VALID_TOML);

    let settings = Settings::from_file(&path).expect("parse settings");
    validate_settings(&settings).expect("valid settings should pass validation");
    assert_eq!(settings.tolerances.dominance, 0.001);
}

#[test]
fn test_bad_optimism_rejected() {
    let settings = Settings::parse_json(BAD_OPTIMISM_JSON).expect("parse");
    let err = validate_settings(&settings).expect_err("optimism 1.5 should fail");
    assert!(matches!(err, ValidationError::InvalidValue { .. }));
}

#[test]
fn test_bad_version_rejected() {
    let settings = Settings::parse_json(BAD_VERSION_JSON).expect("parse");
    let err = validate_settings(&settings).expect_err("version 2.0.0 should fail");
    assert!(matches!(err, ValidationError::VersionMismatch { .. }));
}

#[test]
fn test_missing_file_is_io_error() {
    let temp = TempDir::new().expect("temp dir");
    let err = Settings::from_file(&temp.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, ValidationError::IoError(_)));
}

#[test]
fn test_resolve_config_cli_over_env() {
    with_env_lock(|| {
        let _guard = EnvGuard::new(&ENV_KEYS);

        let temp = TempDir::new().expect("temp dir");
        let cli_path = temp.path().join("cli").join("settings.json");
        let env_path = temp.path().join("env").join("settings.json");
        write_file(&cli_path, VALID_JSON);
        write_file(&env_path, VALID_JSON);

        env::set_var(ENV_SETTINGS_PATH, env_path.display().to_string());

        let paths = resolve_config(Some(&cli_path));
        assert_eq!(paths.settings_source, ConfigSource::CliArgument);
        assert_eq!(paths.settings.unwrap(), cli_path);
    });
}

#[test]
fn test_resolve_config_env_over_config_dir() {
    with_env_lock(|| {
        let _guard = EnvGuard::new(&ENV_KEYS);

        let temp = TempDir::new().expect("temp dir");
        let env_path = temp.path().join("env").join("custom.json");
        let config_dir = temp.path().join("config_dir");
        write_file(&env_path, VALID_JSON);
        write_file(&config_dir.join("settings.json"), VALID_JSON);

        env::set_var(ENV_SETTINGS_PATH, env_path.display().to_string());
        env::set_var(ENV_CONFIG_DIR, config_dir.display().to_string());

        let paths = resolve_config(None);
        assert_eq!(paths.settings_source, ConfigSource::Environment);
        assert_eq!(paths.settings.unwrap(), env_path);
    });
}

#[test]
fn test_resolve_config_dir_finds_toml() {
    with_env_lock(|| {
        let _guard = EnvGuard::new(&ENV_KEYS);
        env::remove_var(ENV_SETTINGS_PATH);

        let temp = TempDir::new().expect("temp dir");
        let config_dir = temp.path().join("config_dir");
        write_file(&config_dir.join("settings.toml"), VALID_TOML);
        env::set_var(ENV_CONFIG_DIR, config_dir.display().to_string());

        let paths = resolve_config(None);
        assert_eq!(paths.settings_source, ConfigSource::Environment);
        assert_eq!(paths.settings.unwrap(), config_dir.join("settings.toml"));
    });
}

#[cfg(target_os = "linux")]
#[test]
fn test_resolve_config_xdg_fallback() {
    with_env_lock(|| {
        let _guard = EnvGuard::new(&ENV_KEYS);
        env::remove_var(ENV_SETTINGS_PATH);
        env::remove_var(ENV_CONFIG_DIR);

        let temp = TempDir::new().expect("temp dir");
        let xdg_dir = temp.path().join("xdg");
        let app_dir = xdg_dir.join("improb");
        write_file(&app_dir.join("settings.json"), VALID_JSON);

        env::set_var("XDG_CONFIG_HOME", xdg_dir.display().to_string());

        let paths = resolve_config(None);
        assert_eq!(paths.settings_source, ConfigSource::XdgConfig);
        assert_eq!(paths.settings.unwrap(), app_dir.join("settings.json"));
    });
}

#[test]
fn test_presets_are_deterministic() {
    let first = get_preset(PresetName::Strict);
    let second = get_preset(PresetName::Strict);
    let first_json = serde_json::to_string(&first).expect("serialize preset");
    let second_json = serde_json::to_string(&second).expect("serialize preset");
    assert_eq!(first_json, second_json);

    let presets = list_presets();
    assert!(presets
        .iter()
        .any(|p| p.name == PresetName::Strict.as_str()));
}
