//! Exit behaviour of a panicking dispatch
//!
//! `run_with_recovery` exits the process, so these tests re-run this
//! test binary as a child that panics and inspect the child's exit.

use assert_cmd::Command;
use cmdkit::cli::{init_logging, run_with_recovery, Verbosity};
use predicates::prelude::*;
use std::env;

const CHILD_ENV: &str = "CMDKIT_PANICKING_CHILD";

/// Body of the child process; does nothing in a normal test run
#[test]
fn test_panicking_child() {
    let Ok(verbosity) = env::var(CHILD_ENV) else {
        return;
    };
    let verbosity = match verbosity.as_str() {
        "silent" => Verbosity::Silent,
        _ => Verbosity::Normal,
    };
    init_logging(verbosity);
    run_with_recovery(|| panic!("kaboom"));
}

fn run_child(verbosity: &str) -> assert_cmd::assert::Assert {
    Command::new(env::current_exe().unwrap())
        .args(["--exact", "test_panicking_child", "--nocapture", "--test-threads=1"])
        .env(CHILD_ENV, verbosity)
        .assert()
}

#[test]
fn test_panic_logs_and_exits_with_one() {
    run_child("normal")
        .failure()
        .code(1)
        .stderr(predicate::str::contains("panic during command dispatch"))
        .stderr(predicate::str::contains("kaboom"))
        .stderr(predicate::str::contains("stack backtrace:"))
        .stderr(predicate::str::contains("Error: command panicked: kaboom"));
}

#[test]
fn test_panic_reported_when_silent() {
    run_child("silent")
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: command panicked: kaboom"))
        .stderr(predicate::str::contains("panic during command dispatch").not());
}

#[test]
fn test_log_output_has_no_color_codes_when_piped() {
    run_child("normal")
        .code(1)
        .stderr(predicate::str::contains("\u{1b}[").not());
}
