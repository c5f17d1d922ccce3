//! Integration tests for the scilla-fmt CLI
//!
//! These tests run the built binary end-to-end

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const UNFORMATTED: &str = "transition T ()\naccept\nend";
const FORMATTED: &str = "transition T ()\n  accept\nend\n";

#[allow(deprecated)]
fn cli() -> Command {
    Command::cargo_bin("scilla-fmt").unwrap()
}

/// A command running inside a fresh directory so no stray config is found.
fn cli_in(dir: &TempDir) -> Command {
    let mut cmd = cli();
    cmd.current_dir(dir.path());
    cmd
}

fn project_with(name: &str, contents: &str) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join(name), contents).unwrap();
    temp_dir
}

#[test]
fn test_help_command() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Scilla"))
        .stdout(predicate::str::contains("--check"))
        .stdout(predicate::str::contains("--tokens"));
}

#[test]
fn test_version_command() {
    cli()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(VERSION));
}

#[test]
fn test_formats_stdin_to_stdout() {
    let dir = TempDir::new().unwrap();
    cli_in(&dir)
        .write_stdin(UNFORMATTED)
        .assert()
        .success()
        .stdout(FORMATTED);
}

#[test]
fn test_dash_reads_stdin() {
    let dir = TempDir::new().unwrap();
    cli_in(&dir)
        .arg("-")
        .write_stdin(UNFORMATTED)
        .assert()
        .success()
        .stdout(FORMATTED);
}

#[test]
fn test_formats_file_argument() {
    let dir = project_with("c.scilla", UNFORMATTED);
    cli_in(&dir)
        .arg("c.scilla")
        .assert()
        .success()
        .stdout(FORMATTED);

    // Printing never touches the file
    assert_eq!(fs::read_to_string(dir.path().join("c.scilla")).unwrap(), UNFORMATTED);
}

#[test]
fn test_check_passes_on_formatted_file() {
    let dir = project_with("c.scilla", FORMATTED);
    cli_in(&dir)
        .args(["--check", "c.scilla"])
        .assert()
        .code(0)
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_check_reports_unformatted_file() {
    let dir = project_with("c.scilla", UNFORMATTED);
    cli_in(&dir)
        .args(["--check", "c.scilla"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("c.scilla"));
}

#[test]
fn test_write_rewrites_file() {
    let dir = project_with("c.scilla", UNFORMATTED);
    cli_in(&dir)
        .args(["--write", "c.scilla"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert_eq!(fs::read_to_string(dir.path().join("c.scilla")).unwrap(), FORMATTED);
}

#[test]
fn test_write_requires_file() {
    cli()
        .arg("--write")
        .write_stdin(UNFORMATTED)
        .assert()
        .failure()
        .stderr(predicate::str::contains("<FILE>"));
}

#[test]
fn test_tokens_dump() {
    let dir = TempDir::new().unwrap();
    cli_in(&dir)
        .arg("--tokens")
        .write_stdin(UNFORMATTED)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#"<TRANSITION:"transition">(1:1:0-1:11:10)"#,
        ))
        .stdout(predicate::str::contains(r#"<ACCEPT:"accept">"#))
        .stdout(predicate::str::contains("<EOF:"));
}

#[test]
fn test_tokens_dump_stops_at_lex_error() {
    let dir = TempDir::new().unwrap();
    cli_in(&dir)
        .arg("--tokens")
        .write_stdin("(* abc")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unterminated comment"))
        .stderr(predicate::str::contains("<stdin>:1:7"));
}

#[test]
fn test_lex_error_fails_formatting() {
    let dir = project_with("bad.scilla", "x = \"abc");
    cli_in(&dir)
        .arg("bad.scilla")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("unclosed string literal"))
        .stderr(predicate::str::contains("x = \"abc"));
}

#[test]
fn test_ast_is_unsupported() {
    let dir = TempDir::new().unwrap();
    cli_in(&dir)
        .arg("--ast")
        .write_stdin(UNFORMATTED)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not implemented"));
}

#[test]
fn test_missing_file_is_unavailable() {
    let dir = TempDir::new().unwrap();
    cli_in(&dir)
        .arg("missing.scilla")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("missing.scilla"));
}

#[test]
fn test_non_utf8_input_is_unavailable() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("latin1.scilla"), b"let x = \xe9\n").unwrap();
    cli_in(&dir)
        .arg("latin1.scilla")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("UTF-8"));
}

#[test]
fn test_discovers_config_next_to_file() {
    let dir = project_with("c.scilla", UNFORMATTED);
    fs::write(
        dir.path().join(".scillafmt.toml"),
        "[formatter]\nindentUnit = \"    \"\n",
    )
    .unwrap();
    cli_in(&dir)
        .arg("c.scilla")
        .assert()
        .success()
        .stdout("transition T ()\n    accept\nend\n");
}

#[test]
fn test_explicit_config_path() {
    let dir = project_with("c.scilla", UNFORMATTED);
    fs::write(
        dir.path().join("style.json"),
        r#"{ "formatter": { "indentUnit": "\t" } }"#,
    )
    .unwrap();
    cli_in(&dir)
        .args(["--config", "style.json", "c.scilla"])
        .assert()
        .success()
        .stdout("transition T ()\n\taccept\nend\n");
}

#[test]
fn test_indent_unit_flag_overrides_config() {
    let dir = project_with("c.scilla", UNFORMATTED);
    fs::write(
        dir.path().join(".scillafmt.toml"),
        "[formatter]\nindentUnit = \"    \"\n",
    )
    .unwrap();
    cli_in(&dir)
        .args(["--indent-unit", " ", "c.scilla"])
        .assert()
        .success()
        .stdout("transition T ()\n accept\nend\n");
}

#[test]
fn test_invalid_indent_unit_flag_fails() {
    let dir = TempDir::new().unwrap();
    cli_in(&dir)
        .args(["--indent-unit", "xx"])
        .write_stdin(UNFORMATTED)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("spaces and tabs"));
}

#[test]
fn test_invalid_config_fails() {
    let dir = project_with("c.scilla", UNFORMATTED);
    fs::write(dir.path().join(".scillafmt.toml"), "[formatter\nindentUnit = 4").unwrap();
    cli_in(&dir)
        .arg("c.scilla")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to load config"));
}

#[test]
fn test_no_final_newline() {
    let dir = TempDir::new().unwrap();
    cli_in(&dir)
        .arg("--no-final-newline")
        .write_stdin(UNFORMATTED)
        .assert()
        .success()
        .stdout("transition T ()\n  accept\nend");
}

#[test]
fn test_indent_pattern_alternative_flag() {
    let dir = TempDir::new().unwrap();
    cli_in(&dir)
        .arg("--indent-pattern-alternative")
        .write_stdin("transition T (b : Bool)\nmatch b with\n| True => accept\n| False => throw\nend\nend")
        .assert()
        .success()
        .stdout(
            "transition T (b: Bool)\n  match b with\n    | True => accept\n    | False => throw\n  end\nend\n",
        );
}

#[test]
fn test_print_config_schema() {
    cli()
        .arg("--print-config-schema")
        .assert()
        .success()
        .stdout(predicate::str::contains("indentUnit"))
        .stdout(predicate::str::contains("endWithNewline"));
}

#[test]
fn test_trace_env_does_not_change_output() {
    let dir = TempDir::new().unwrap();
    cli_in(&dir)
        .env("SCILLA_TRACE_RULES", "1")
        .write_stdin(UNFORMATTED)
        .assert()
        .success()
        .stdout(FORMATTED);
}
