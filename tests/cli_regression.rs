// Regression tests for the `tally` binary.
// Requires: assert_cmd, predicates crates in [dev-dependencies]

use std::{env, fs, path::PathBuf, process};

use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};

fn tally() -> Command {
    let mut cmd = Command::cargo_bin("tally").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

fn scratch_file(name: &str, contents: &str) -> PathBuf {
    let path = env::temp_dir().join(format!("tally-{}-{}", process::id(), name));
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn eval_prints_the_value() {
    tally()
        .args(["eval", "(2 + 3) * 4"])
        .assert()
        .success()
        .stdout("20\n");
}

#[test]
fn eval_accepts_negative_first_literal() {
    tally().args(["eval", "-5 + 3"]).assert().success().stdout("-2\n");
}

#[test]
fn eval_reports_miette_diagnostics_on_error() {
    tally()
        .args(["eval", "5 / 0"])
        .assert()
        .failure()
        .code(1)
        .stderr(contains("tally::arithmetic::division_by_zero").and(contains("Division by zero")));
}

#[test]
fn eval_json_output() {
    tally()
        .args(["eval", "--json", "1 2"])
        .assert()
        .failure()
        .stdout(contains(r#""kind":"trailing_input""#).and(contains(r#""offset":2"#)));
}

#[test]
fn max_depth_option_limits_nesting() {
    tally()
        .args(["--max-depth", "2", "eval", "(((1)))"])
        .assert()
        .failure()
        .stderr(contains("nested deeper than 2"));
}

#[test]
fn repl_session_over_stdin() {
    tally()
        .write_stdin("1 + 2\n1 + )\nEXIT\n")
        .assert()
        .success()
        .stdout(
            contains("Enter arithmetic expressions")
                .and(contains("Result: 3"))
                .and(contains("Error: Unexpected character: ')'"))
                .and(contains("Goodbye!")),
        );
}

#[test]
fn run_evaluates_each_line() {
    let file = scratch_file("lines.txt", "8 - 3 - 2\n\n((1+2)*(3-1))\n");
    tally()
        .arg("run")
        .arg(&file)
        .assert()
        .success()
        .stdout("Result: 3\nResult: 6\n");
    let _ = fs::remove_file(file);
}

#[test]
fn run_fails_when_any_line_fails() {
    let file = scratch_file("bad.txt", "1 +\n4 / 2\n");
    tally()
        .arg("run")
        .arg(&file)
        .assert()
        .failure()
        .code(1)
        .stdout("Error: Unexpected end of input\nResult: 2\n");
    let _ = fs::remove_file(file);
}

#[test]
fn run_missing_file() {
    tally()
        .args(["run", "does/not/exist.txt"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("cannot read"));
}
