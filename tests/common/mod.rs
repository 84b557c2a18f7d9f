//! Shared helpers for integration tests.


use std::process::Command;

use insta_cmd::get_cargo_bin;

/// The httpstat binary with a clean environment.
///
/// Every `HTTPSTAT_*` variable is removed so tests start from the defaults,
/// and colors are off unless a test turns them back on.
pub fn httpstat_command() -> Command {
    let mut cmd = Command::new(get_cargo_bin("httpstat"));
    for (key, _) in httpstat::config::VARIABLES {
        cmd.env_remove(key);
    }
    cmd.env_remove("RUST_LOG")
        .env_remove("CLICOLOR_FORCE")
        .env("NO_COLOR", "1")
        .env("COLUMNS", "100");
    cmd
}

/// stdout and stderr of a finished command as text.
pub fn output_text(output: &std::process::Output) -> (String, String) {
    (
        String::from_utf8_lossy(&output.stdout).into_owned(),
        String::from_utf8_lossy(&output.stderr).into_owned(),
    )
}

/// Lines with trailing padding removed.
pub fn trimmed_lines(text: &str) -> Vec<&str> {
    text.lines().map(str::trim_end).collect()
}
