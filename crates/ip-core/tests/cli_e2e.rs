//! End-to-end tests for the improb binary.
//!
//! Each test writes a problem file into a temp dir and checks stdout,
//! stderr and the exit code.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::PathBuf;
use tempfile::TempDir;

const WORKED_PROBLEM: &str = r#"{
    "pmfs": [[0.4, 0.5, 0.1], [0.1, 0.8, 0.1], [0.6, 0.2, 0.2]],
    "acts": [[3, 9, 2], [4, 4, 4], [0, 3, 6], [6, 2, 1]],
    "labels": ["gamble", "safe", "long", "short"]
}"#;

/// Get a Command for the improb binary, isolated from user settings.
fn improb() -> Command {
    let mut cmd = Command::cargo_bin("improb").expect("improb binary should exist");
    cmd.env_remove("IMPROB_SETTINGS")
        .env_remove("IMPROB_CONFIG_DIR")
        .env_remove("IMPROB_LOG")
        .env_remove("IMPROB_LOG_FORMAT")
        .env("XDG_CONFIG_HOME", "/nonexistent/improb-tests");
    cmd
}

fn write_problem(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("write problem file");
    path
}

fn stdout_json(output: &[u8]) -> Value {
    serde_json::from_slice(output).expect("stdout should be JSON")
}

// ============================================================================
// evaluate
// ============================================================================

mod evaluate {
    use super::*;

    #[test]
    fn json_report_for_worked_example() {
        let dir = TempDir::new().unwrap();
        let problem = write_problem(&dir, "worked.json", WORKED_PROBLEM);

        let output = improb()
            .arg("evaluate")
            .arg(&problem)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let json = stdout_json(&output);
        assert!(json["run_id"].as_str().unwrap().starts_with("run-"));
        assert_eq!(json["config"]["source"], "builtin default");
        let report = &json["report"];
        assert_eq!(report["acts"], 4);
        assert_eq!(report["pmfs"], 3);
        assert_eq!(
            report["criteria"]["bayes_maximal"],
            serde_json::json!([true, true, false, true])
        );
        assert_eq!(
            report["criteria"]["e_admissible"],
            serde_json::json!([true, false, false, true])
        );
        assert_eq!(report["witnesses"], serde_json::json!([[0, 1], [], [], [2]]));
    }

    #[test]
    fn toml_problem_is_accepted() {
        let dir = TempDir::new().unwrap();
        let problem = write_problem(
            &dir,
            "coin.toml",
            "pmfs = [[0.5, 0.5], [0.25, 0.75]]\nacts = [[1.0, 0.0], [0.0, 1.0]]\n",
        );

        improb()
            .args(["--format", "summary", "evaluate"])
            .arg(&problem)
            .assert()
            .success()
            .stdout(predicate::str::contains("2 acts x 2 pmfs (2 outcomes)"))
            .stdout(predicate::str::contains("act0 act1"));
    }

    #[test]
    fn single_criterion_selection() {
        let dir = TempDir::new().unwrap();
        let problem = write_problem(&dir, "worked.json", WORKED_PROBLEM);

        let output = improb()
            .args(["evaluate", "--criterion", "gamma-maximin"])
            .arg(&problem)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let json = stdout_json(&output);
        assert_eq!(json["selection"]["criterion"], "gamma-maximin");
        assert_eq!(json["selection"]["indices"], serde_json::json!([0, 1]));
        assert_eq!(json["selection"]["labels"], serde_json::json!(["gamble", "safe"]));
        assert!(json.get("report").is_none());
    }

    #[test]
    fn summary_lists_every_criterion() {
        let dir = TempDir::new().unwrap();
        let problem = write_problem(&dir, "worked.json", WORKED_PROBLEM);

        let assert = improb()
            .args(["-f", "summary", "evaluate"])
            .arg(&problem)
            .assert()
            .success();
        let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
        for name in [
            "gamma-maximin",
            "gamma-maximax",
            "gamma-maxi-hurwicz",
            "interval-maximal",
            "bayes-maximal",
            "e-admissible",
        ] {
            assert!(stdout.contains(name), "missing {name} in:\n{stdout}");
        }
        assert!(stdout.contains("gamble safe short"));
    }

    #[test]
    fn markdown_report() {
        let dir = TempDir::new().unwrap();
        let problem = write_problem(&dir, "worked.json", WORKED_PROBLEM);

        improb()
            .args(["-f", "md", "evaluate"])
            .arg(&problem)
            .assert()
            .success()
            .stdout(predicate::str::contains("|"))
            .stdout(predicate::str::contains("gamble"));
    }

    #[test]
    fn markdown_single_criterion() {
        let dir = TempDir::new().unwrap();
        let problem = write_problem(&dir, "worked.json", WORKED_PROBLEM);

        improb()
            .args(["-f", "md", "evaluate", "--criterion", "e-admissible"])
            .arg(&problem)
            .assert()
            .success()
            .stdout(predicate::str::contains("# e-admissible"))
            .stdout(predicate::str::contains("- short (act 3)"));
    }

    #[test]
    fn optimism_override_changes_hurwicz() {
        let dir = TempDir::new().unwrap();
        let problem = write_problem(&dir, "worked.json", WORKED_PROBLEM);

        let output = improb()
            .args(["evaluate", "--optimism", "0"])
            .arg(&problem)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let json = stdout_json(&output);
        assert_eq!(json["report"]["optimism"], 0.0);
        assert_eq!(
            json["report"]["criteria"]["gamma_maxi_hurwicz"],
            json["report"]["criteria"]["gamma_maximin"]
        );
    }
}

// ============================================================================
// Input errors and exit codes
// ============================================================================

mod errors {
    use super::*;

    #[test]
    fn optimism_out_of_range_is_input_error() {
        let dir = TempDir::new().unwrap();
        let problem = write_problem(&dir, "worked.json", WORKED_PROBLEM);

        improb()
            .args(["evaluate", "--optimism", "1.5"])
            .arg(&problem)
            .assert()
            .code(11)
            .stderr(predicate::str::contains("optimism"))
            .stderr(predicate::str::contains("ERR_INPUT"));
    }

    #[test]
    fn unnormalized_pmf_is_input_error() {
        let dir = TempDir::new().unwrap();
        let problem = write_problem(
            &dir,
            "bad.json",
            r#"{"pmfs": [[0.5, 0.6]], "acts": [[1, 2]]}"#,
        );

        let output = improb()
            .args(["--quiet", "evaluate"])
            .arg(&problem)
            .assert()
            .code(11)
            .get_output()
            .stderr
            .clone();

        let err: Value = serde_json::from_slice(&output).expect("stderr should be JSON");
        assert_eq!(err["code"], 20);
        assert_eq!(err["category"], "input");
        assert_eq!(err["context"]["exit_code"], "ERR_INPUT");
    }

    #[test]
    fn human_errors_for_non_json_formats() {
        let dir = TempDir::new().unwrap();
        let problem = write_problem(&dir, "empty.json", r#"{"pmfs": [], "acts": []}"#);

        improb()
            .args(["-f", "summary", "evaluate"])
            .arg(&problem)
            .assert()
            .code(11)
            .stderr(predicate::str::contains("Fix:"));
    }

    #[test]
    fn act_outcome_mismatch_is_input_error() {
        let dir = TempDir::new().unwrap();
        let problem = write_problem(
            &dir,
            "mismatch.json",
            r#"{"pmfs": [[0.5, 0.5]], "acts": [[1, 2, 3]]}"#,
        );

        improb().arg("check").arg(&problem).assert().code(11);
    }

    #[test]
    fn unknown_problem_field_is_input_error() {
        let dir = TempDir::new().unwrap();
        let problem = write_problem(
            &dir,
            "typo.json",
            r#"{"pmfs": [[1.0]], "actz": [[1]]}"#,
        );

        improb()
            .arg("evaluate")
            .arg(&problem)
            .assert()
            .code(11)
            .stderr(predicate::str::contains("typo.json"));
    }

    #[test]
    fn missing_problem_file_is_io_error() {
        improb()
            .args(["evaluate", "/nonexistent/improb/problem.json"])
            .assert()
            .code(21)
            .stderr(predicate::str::contains("internal_error"))
            .stderr(predicate::str::contains("ERR_IO"));
    }

    #[test]
    fn unknown_command_is_args_error() {
        improb()
            .arg("nonexistent-command")
            .assert()
            .code(10)
            .stderr(predicate::str::contains("error"));
    }

    #[test]
    fn unknown_criterion_is_args_error() {
        improb()
            .args(["evaluate", "p.json", "--criterion", "minimax-regret"])
            .assert()
            .code(10);
    }

    #[test]
    fn config_and_preset_conflict() {
        improb()
            .args(["--config", "a.toml", "--preset", "strict", "config", "show"])
            .assert()
            .code(10);
    }

    #[test]
    fn missing_settings_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let problem = write_problem(&dir, "worked.json", WORKED_PROBLEM);

        improb()
            .args(["--config", "/nonexistent/improb/settings.toml", "evaluate"])
            .arg(&problem)
            .assert()
            .code(12)
            .stderr(predicate::str::contains("settings file not found"));
    }

    #[test]
    fn help_exits_clean() {
        improb()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("evaluate"));
    }
}

// ============================================================================
// check, config, completions
// ============================================================================

mod other_commands {
    use super::*;

    #[test]
    fn check_reports_shape() {
        let dir = TempDir::new().unwrap();
        let problem = write_problem(&dir, "worked.json", WORKED_PROBLEM);

        improb()
            .args(["-f", "summary", "check"])
            .arg(&problem)
            .assert()
            .success()
            .stdout(predicate::str::contains("ok: 3 pmfs, 3 outcomes, 4 acts"));
    }

    #[test]
    fn config_presets_lists_all() {
        let output = improb()
            .args(["config", "presets"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let json = stdout_json(&output);
        let names: Vec<&str> = json["presets"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["default", "strict", "lenient"]);
    }

    #[test]
    fn preset_shows_in_config_snapshot() {
        let output = improb()
            .args(["--preset", "strict", "config", "show"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let json = stdout_json(&output);
        assert_eq!(json["config"]["source"], "preset strict");
        assert_eq!(json["settings"]["tolerances"]["optimality"], 0.0);
    }

    #[test]
    fn settings_file_is_honored() {
        let dir = TempDir::new().unwrap();
        let settings = dir.path().join("settings.toml");
        std::fs::write(&settings, "[hurwicz]\noptimism = 0.25\n").unwrap();

        let output = improb()
            .arg("--config")
            .arg(&settings)
            .args(["config", "show"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let json = stdout_json(&output);
        assert_eq!(json["settings"]["hurwicz"]["optimism"], 0.25);
    }

    #[test]
    fn unknown_preset_is_rejected() {
        improb()
            .args(["--preset", "bogus", "config", "show"])
            .assert()
            .code(10)
            .stderr(predicate::str::contains("strict"));
    }

    #[test]
    fn bash_completions() {
        improb()
            .args(["completions", "bash"])
            .assert()
            .success()
            .stdout(predicate::str::contains("improb"));
    }
}
