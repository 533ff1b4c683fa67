//! E2E tests for the `grantscope` binary.
//!
//! Results go to stdout; logs and errors go to stderr.

mod common;

use common::{context_file, grantscope_cmd};
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

// ─── describe / list ───────────────────────────────────────────────

#[test]
fn describe_local_active() {
    grantscope_cmd()
        .args(["describe", "local+active"])
        .assert()
        .success()
        .stdout("local+active: session must be local and active\n");
}

#[test]
fn describe_rejects_wrong_case() {
    grantscope_cmd()
        .args(["describe", "LOCAL"])
        .assert()
        .failure()
        .stderr(contains("unknown constraint 'LOCAL'"));
}

#[test]
fn describe_json() {
    grantscope_cmd()
        .args(["--json", "describe", "active"])
        .assert()
        .success()
        .stdout(contains(r#""constraint":"active""#))
        .stdout(contains(r#""flags":["ACTIVE"]"#))
        .stdout(contains("satisfied").not());
}

#[test]
fn list_prints_all_four() {
    grantscope_cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(
            "none: no constraint\n\
             local: session must be local\n\
             active: session must be active\n\
             local+active: session must be local and active\n",
        );
}

// ─── check ─────────────────────────────────────────────────────────

#[test]
fn check_satisfied_by_local_active_session() {
    grantscope_cmd()
        .args(["check", "local+active", "--local", "yes", "--active", "yes"])
        .assert()
        .success()
        .stdout("satisfied\n");
}

#[test]
fn check_unknown_activity_is_unsatisfied() {
    grantscope_cmd()
        .args(["check", "active", "--local", "yes"])
        .assert()
        .success()
        .stdout("unsatisfied\n");
}

#[test]
fn check_strict_exits_nonzero_when_unsatisfied() {
    grantscope_cmd()
        .args(["check", "local", "--local", "no", "--strict"])
        .assert()
        .code(1)
        .stdout("unsatisfied\n");
}

#[test]
fn check_sessionless_caller() {
    grantscope_cmd()
        .args(["check", "none", "--no-session", "--strict"])
        .assert()
        .success()
        .stdout("satisfied\n");

    grantscope_cmd()
        .args(["check", "local", "--no-session"])
        .assert()
        .success()
        .stdout("unsatisfied\n");
}

#[test]
fn check_no_session_conflicts_with_properties() {
    grantscope_cmd()
        .args(["check", "none", "--no-session", "--local", "yes"])
        .assert()
        .failure()
        .stderr(contains("cannot be used with"));
}

#[test]
fn check_json() {
    grantscope_cmd()
        .args(["--json", "check", "local", "--local", "yes", "--active", "no"])
        .assert()
        .success()
        .stdout(contains(r#""satisfied":true"#));
}

#[test]
fn check_debug_logs_denial_to_stderr() {
    grantscope_cmd()
        .args(["-d", "check", "local+active", "--local", "yes", "--active", "no"])
        .assert()
        .success()
        .stdout("unsatisfied\n")
        .stderr(contains("session does not satisfy constraint"));
}

// ─── derive ────────────────────────────────────────────────────────

#[test]
fn derive_known_context() {
    grantscope_cmd()
        .args(["derive", "--local", "yes", "--active", "no"])
        .assert()
        .success()
        .stdout("local\n");
}

#[test]
fn derive_unknown_context_is_most_restrictive() {
    grantscope_cmd()
        .arg("derive")
        .assert()
        .success()
        .stdout("local+active\n");
}

#[test]
fn derive_sessionless_caller() {
    grantscope_cmd()
        .args(["derive", "--no-session"])
        .assert()
        .success()
        .stdout("none\n");
}

// ─── context file ──────────────────────────────────────────────────

#[test]
fn derive_from_context_file() {
    let file = context_file(r#"{"session": {"id": "c2", "is_local": false, "is_active": true}}"#);
    grantscope_cmd()
        .arg("derive")
        .arg("--context")
        .arg(file.path())
        .assert()
        .success()
        .stdout("active\n");
}

#[test]
fn context_file_from_environment() {
    let file = context_file(r#"{"session": null}"#);
    grantscope_cmd()
        .env("GRANTSCOPE_CONTEXT", file.path())
        .args(["check", "active"])
        .assert()
        .success()
        .stdout("unsatisfied\n");
}

#[test]
fn arguments_override_environment_context() {
    let file = context_file(r#"{"session": null}"#);
    grantscope_cmd()
        .env("GRANTSCOPE_CONTEXT", file.path())
        .args(["derive", "--local", "yes", "--active", "yes"])
        .assert()
        .success()
        .stdout("local+active\n");
}

#[test]
fn malformed_context_file_fails() {
    let file = context_file(r#"{"session": {"is_local": "maybe"}}"#);
    grantscope_cmd()
        .arg("derive")
        .arg("--context")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(contains("parse context file"));
}
