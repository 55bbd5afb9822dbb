//! Fuzz target for problem-file parsing and evaluation.
//!
//! Arbitrary bytes go through the JSON and TOML parsers; anything that
//! parses is evaluated with default settings. Nothing may panic.

#![no_main]

use ip_config::Settings;
use ip_core::Problem;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let settings = Settings::default();

    if let Ok(problem) = Problem::parse_json(text) {
        let _ = problem.evaluate(&settings);
    }
    if let Ok(problem) = Problem::parse_toml(text) {
        let _ = problem.evaluate(&settings);
    }
});
