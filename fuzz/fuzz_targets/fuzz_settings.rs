//! Fuzz target for settings parsing and validation.

#![no_main]

use ip_config::{validate_settings, Settings};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(settings) = Settings::parse_json(text) {
        let _ = validate_settings(&settings);
    }
    if let Ok(settings) = Settings::parse_toml(text) {
        let _ = validate_settings(&settings);
    }
});
