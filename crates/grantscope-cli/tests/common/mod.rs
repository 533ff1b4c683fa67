//! Shared E2E test helpers for `grantscope` binary tests.

use assert_cmd::cargo::cargo_bin_cmd;
use std::io::Write;
use std::time::Duration;

/// Default timeout for CLI tests.
pub const TIMEOUT_BASIC: Duration = Duration::from_secs(10);

/// Build a Command for the `grantscope` binary with a clean environment.
///
/// `GRANTSCOPE_CONTEXT` and `RUST_LOG` are removed so the developer's
/// shell cannot leak into the tests.
pub fn grantscope_cmd() -> assert_cmd::Command {
    let mut cmd: assert_cmd::Command = cargo_bin_cmd!("grantscope");
    cmd.timeout(TIMEOUT_BASIC);
    cmd.env_remove("GRANTSCOPE_CONTEXT");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Write `json` to a temp file and return it; keep it alive for the test.
pub fn context_file(json: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("create temp context file");
    file.write_all(json.as_bytes()).expect("write context file");
    file
}
