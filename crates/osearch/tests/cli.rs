//! CLI integration tests for osearch commands.
//!
//! These tests focus on exit codes and basic behavioral verification,
//! not exact output formatting which may change.

// Integration tests live outside cfg(test) by design
#![allow(clippy::tests_outside_test_module)]

use std::{fs, path::Path};

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper to create a temp directory for tests.
fn temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().unwrap()
}

/// Helper to run `osearch` with HOME isolated to the provided directory.
fn osearch_in(dir: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("osearch").unwrap();
    cmd.env("HOME", dir);
    cmd.env_remove("RUST_LOG");
    cmd.current_dir(dir);
    cmd
}

/// Writes a root config file into `dir`.
fn write_config(dir: &Path, body: &str) {
    fs::write(dir.join(".osearch.toml"), format!("root = true\n{body}")).unwrap();
}

mod parse {
    use super::*;

    #[test]
    fn prints_tree_for_implicit_and() {
        let dir = temp_dir();

        osearch_in(dir.path())
            .args(["parse", "A BC DEF"])
            .assert()
            .success()
            .stdout("And\n  And\n    \"A\"\n    \"BC\"\n  \"DEF\"\n");
    }

    #[test]
    fn json_output_is_valid() {
        let dir = temp_dir();

        let output = osearch_in(dir.path())
            .args(["parse", "--json", "A OR \"b c\""])
            .output()
            .unwrap();
        assert!(output.status.success());

        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        let result = &json["results"][0];
        assert_eq!(result["expression"], "A OR \"b c\"");
        assert_eq!(result["ast"]["type"], "binary_operator");
        assert_eq!(result["ast"]["op"], "Or");
        assert_eq!(result["ast"]["right"]["value"], "b c");
    }

    #[test]
    fn unclosed_group_reports_position() {
        let dir = temp_dir();

        osearch_in(dir.path())
            .args(["parse", "(A BC DEF"])
            .assert()
            .failure()
            .stderr(predicate::str::contains(
                "')' or operator expected at position 9 in '(A BC DEF'.",
            ))
            .stderr(predicate::str::contains("hint:"));
    }

    #[test]
    fn json_reports_errors_inline() {
        let dir = temp_dir();

        let output = osearch_in(dir.path())
            .args(["parse", "--json", "a", "a AND"])
            .output()
            .unwrap();
        assert!(!output.status.success());

        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json["results"][0]["ast"]["value"], "a");
        assert_eq!(json["results"][1]["error"]["kind"], "expression_expected");
        assert_eq!(json["results"][1]["error"]["position"], 5);
    }

    #[test]
    fn multiple_expressions_get_headers() {
        let dir = temp_dir();

        osearch_in(dir.path())
            .args(["parse", "a", "NOT b"])
            .assert()
            .success()
            .stdout(predicate::str::contains("a:\n\"a\"\n"))
            .stdout(predicate::str::contains("NOT b:\nNot\n  \"b\"\n"));
    }

    #[test]
    fn max_depth_flag_limits_nesting() {
        let dir = temp_dir();

        osearch_in(dir.path())
            .args(["parse", "--max-depth", "8", "((a))"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("recursion limit"));
    }

    #[test]
    fn rejects_zero_max_depth() {
        let dir = temp_dir();

        osearch_in(dir.path())
            .args(["parse", "--max-depth", "0", "a"])
            .assert()
            .failure();
    }

    #[test]
    fn rejects_max_depth_above_ceiling() {
        let dir = temp_dir();
        let deep = format!("{}a{}", "(".repeat(20_000), ")".repeat(20_000));

        osearch_in(dir.path())
            .args(["parse", "--max-depth", "100000000", &deep])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("between 1 and 1000"));
    }

    #[test]
    fn deep_nesting_at_ceiling_reports_limit() {
        let dir = temp_dir();
        let deep = format!("{}a{}", "(".repeat(20_000), ")".repeat(20_000));

        osearch_in(dir.path())
            .args(["parse", "--max-depth", "1000", &deep])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("max depth 1000"));
    }

    #[test]
    fn rejects_configured_depth_above_ceiling() {
        let dir = temp_dir();
        write_config(dir.path(), "[parser]\nmax_depth = 100000000\n");

        osearch_in(dir.path())
            .args(["parse", "((a))"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("invalid max_depth 100000000"));
    }

    #[test]
    fn honors_configured_settings() {
        let dir = temp_dir();
        write_config(
            dir.path(),
            "[parser]\nmax_depth = 8\n[output]\nformat = \"json\"\n",
        );

        osearch_in(dir.path())
            .args(["parse", "(a)"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"results\""));

        osearch_in(dir.path())
            .args(["parse", "((a))"])
            .assert()
            .failure();
    }

    #[test]
    fn tree_flag_overrides_configured_format() {
        let dir = temp_dir();
        write_config(dir.path(), "[output]\nformat = \"json\"\n");

        osearch_in(dir.path())
            .args(["parse", "--tree", "a"])
            .assert()
            .success()
            .stdout("\"a\"\n");
    }

    #[test]
    fn fails_on_invalid_config() {
        let dir = temp_dir();
        write_config(dir.path(), "[parser\n");

        osearch_in(dir.path())
            .args(["parse", "a"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("failed to load configuration"));
    }

    #[test]
    fn verbose_logs_go_to_stderr() {
        let dir = temp_dir();

        osearch_in(dir.path())
            .args(["-v", "parse", "a"])
            .assert()
            .success()
            .stdout("\"a\"\n")
            .stderr(predicate::str::contains("parsing"));
    }
}

mod tokens {
    use super::*;

    #[test]
    fn prints_table() {
        let dir = temp_dir();

        osearch_in(dir.path())
            .args(["tokens", "NOT \"a b\""])
            .assert()
            .success()
            .stdout(predicate::str::contains("Kind"))
            .stdout(predicate::str::contains("Not"))
            .stdout(predicate::str::contains("Phrase"))
            .stdout(predicate::str::contains("a b"));
    }

    #[test]
    fn json_lists_tokens() {
        let dir = temp_dir();

        let output = osearch_in(dir.path())
            .args(["tokens", "--json", "(a OR b)"])
            .output()
            .unwrap();
        assert!(output.status.success());

        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        let kinds: Vec<_> = json
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["kind"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(kinds, ["OpenParen", "Word", "Or", "Word", "CloseParen"]);
        assert_eq!(json[3]["offset"], 6);
    }

    #[test]
    fn fails_on_empty_phrase() {
        let dir = temp_dir();

        osearch_in(dir.path())
            .args(["tokens", "A \"\""])
            .assert()
            .failure()
            .stderr(predicate::str::contains("position 2"));
    }
}

mod init {
    use super::*;

    #[test]
    fn creates_config_file() {
        let dir = temp_dir();

        osearch_in(dir.path()).arg("init").assert().success();

        let contents = fs::read_to_string(dir.path().join(".osearch.toml")).unwrap();
        assert!(contents.contains("# [parser]"));
        assert!(contents.contains("# max_depth = 50"));
    }

    #[test]
    fn fails_if_config_exists() {
        let dir = temp_dir();
        fs::write(dir.path().join(".osearch.toml"), "existing").unwrap();

        osearch_in(dir.path())
            .arg("init")
            .assert()
            .failure()
            .stderr(predicate::str::contains("already exists"));
    }

    #[test]
    fn force_overwrites_existing() {
        let dir = temp_dir();
        fs::write(dir.path().join(".osearch.toml"), "not toml [").unwrap();

        osearch_in(dir.path())
            .args(["init", "--force"])
            .assert()
            .success();

        let contents = fs::read_to_string(dir.path().join(".osearch.toml")).unwrap();
        assert!(contents.contains("# [output]"));
    }
}

mod config {
    use super::*;

    #[test]
    fn shows_defaults_without_config() {
        let dir = temp_dir();

        osearch_in(dir.path())
            .arg("config")
            .assert()
            .success()
            .stdout(predicate::str::contains("no configuration files found"))
            .stdout(predicate::str::contains("max_depth = 50"));
    }

    #[test]
    fn lists_discovered_files() {
        let dir = temp_dir();
        write_config(dir.path(), "[parser]\nmax_depth = 17\n");

        osearch_in(dir.path())
            .arg("config")
            .assert()
            .success()
            .stdout(predicate::str::contains(".osearch.toml"))
            .stdout(predicate::str::contains("max_depth = 17"));
    }
}
