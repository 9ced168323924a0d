//! CLI integration tests
//!
//! Tests the command-line interface using assert_cmd

use assert_cmd::Command;
use predicates::prelude::*;

/// Get a command for the deckgen binary
fn deckgen_cmd() -> Command {
    Command::cargo_bin("deckgen").unwrap()
}

// ─────────────────────────────────────────────────────────────────
// Help and Version Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_help_flag() {
    deckgen_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("presentation"))
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("persona"))
        .stdout(predicate::str::contains("status"))
        .stdout(predicate::str::contains("download"))
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("version"));
}

#[test]
fn test_version_command() {
    deckgen_cmd()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("deckgen-client"))
        .stdout(predicate::str::contains("Build Information"))
        .stdout(predicate::str::contains("Git Hash"))
        .stdout(predicate::str::contains("Target"));
}

#[test]
fn test_short_version_flag() {
    deckgen_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("deckgen"));
}

#[test]
fn test_unknown_command_fails() {
    deckgen_cmd()
        .arg("frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

// ─────────────────────────────────────────────────────────────────
// Config Command Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_config_show_default() {
    deckgen_cmd()
        .arg("config")
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("[service]"))
        .stdout(predicate::str::contains("[polling]"))
        .stdout(predicate::str::contains("[storage]"))
        .stdout(predicate::str::contains("[logging]"));
}

#[test]
fn test_config_validate_default() {
    // Default config should always be valid
    deckgen_cmd()
        .arg("config")
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));
}

#[test]
fn test_config_missing_file_errors() {
    deckgen_cmd()
        .arg("config")
        .arg("validate")
        .arg("--config")
        .arg("/nonexistent/deckgen.toml")
        .assert()
        .failure()
        .code(10)
        .stderr(predicate::str::contains("E100"));
}

// ─────────────────────────────────────────────────────────────────
// Persona Command Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_persona_list_default_page() {
    deckgen_cmd()
        .arg("persona")
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("c_suite"))
        .stdout(predicate::str::contains("Chief Technology Officer"))
        .stdout(predicate::str::contains("Page 1 of"));
}

#[test]
fn test_persona_list_show_all() {
    let assert = deckgen_cmd()
        .arg("persona")
        .arg("list")
        .arg("--page-size")
        .arg("all")
        .assert()
        .success()
        // First and last catalog entries are both present
        .stdout(predicate::str::contains("c_suite"))
        .stdout(predicate::str::contains("agile_pm"));

    // Show-all suppresses the pagination footer
    assert.stdout(predicate::str::contains("Page 1 of").not());
}

#[test]
fn test_persona_list_search() {
    deckgen_cmd()
        .arg("persona")
        .arg("list")
        .arg("--query")
        .arg("kinematics")
        .assert()
        .success()
        .stdout(predicate::str::contains("robotics_eng"))
        .stdout(predicate::str::contains("Page").not());
}

#[test]
fn test_persona_list_no_match() {
    deckgen_cmd()
        .arg("persona")
        .arg("list")
        .arg("--query")
        .arg("zzz-no-match")
        .assert()
        .success()
        .stdout(predicate::str::contains("No personas match"));
}

#[test]
fn test_persona_list_rejects_bad_page_size() {
    deckgen_cmd()
        .arg("persona")
        .arg("list")
        .arg("--page-size")
        .arg("12")
        .assert()
        .failure()
        .code(10)
        .stderr(predicate::str::contains("Invalid page size"));
}

#[test]
fn test_persona_list_page_is_clamped() {
    // Far beyond the last page: clamps instead of erroring
    deckgen_cmd()
        .arg("persona")
        .arg("list")
        .arg("--page")
        .arg("9999")
        .assert()
        .success()
        .stdout(predicate::str::contains("agile_pm"));
}
