//! Help, version, and argument handling.

use crate::common::mock_commands::MockCurl;
use crate::common::{httpstat_command, output_text};

#[test]
fn test_no_args_prints_help() {
    let output = httpstat_command().output().unwrap();
    let (stdout, stderr) = output_text(&output);

    assert!(output.status.success());
    assert!(stdout.contains("Usage: httpstat URL [CURL_OPTIONS]..."));
    assert_eq!(stderr, "");
}

#[test]
fn test_long_help_lists_environment() {
    let output = httpstat_command().arg("--help").output().unwrap();
    let (stdout, _) = output_text(&output);

    assert!(output.status.success());
    for (key, default) in httpstat::config::VARIABLES {
        let line = stdout
            .lines()
            .find(|line| line.trim_start().starts_with(key))
            .unwrap_or_else(|| panic!("{key} missing from help"));
        assert!(line.ends_with(&format!("[default: {default}]")), "{line}");
    }
}

#[test]
fn test_version() {
    let output = httpstat_command().arg("--version").output().unwrap();
    let (stdout, _) = output_text(&output);

    assert!(output.status.success());
    assert_eq!(stdout, format!("httpstat {}\n", env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_url_without_scheme_uses_plain_layout() {
    let mock = MockCurl::new();
    let curl = mock.install();
    let output = httpstat_command()
        .env("HTTPSTAT_CURL_BIN", &curl)
        .env("HTTPSTAT_SAVE_BODY", "false")
        .arg("example.com")
        .output()
        .unwrap();
    let (stdout, _) = output_text(&output);

    assert!(output.status.success());
    assert!(stdout.contains("TCP Connection   Server Processing"));
    assert_eq!(mock.recorded_args().unwrap().last().unwrap(), "example.com");
}

#[test]
fn test_debug_logging_to_stderr() {
    let mock = MockCurl::new();
    let curl = mock.install();
    let output = httpstat_command()
        .env("HTTPSTAT_CURL_BIN", &curl)
        .env("HTTPSTAT_SAVE_BODY", "false")
        .env("HTTPSTAT_DEBUG", "true")
        .arg("https://example.com")
        .output()
        .unwrap();
    let (stdout, stderr) = output_text(&output);

    assert!(output.status.success());
    assert!(stdout.contains("total:12ms"));
    assert!(stderr.contains("HTTPSTAT_DEBUG=true"));
    assert!(stderr.contains("rm header file"));
    assert!(stderr.contains("rm body file"));
    assert!(stderr.contains("DNS Lookup: 1ms"));
}

#[test]
fn test_help_and_version_after_url_reach_curl() {
    let mock = MockCurl::new();
    let curl = mock.install();
    let output = httpstat_command()
        .env("HTTPSTAT_CURL_BIN", &curl)
        .env("HTTPSTAT_SAVE_BODY", "false")
        .args(["https://example.com", "-h", "--version"])
        .output()
        .unwrap();
    let (stdout, _) = output_text(&output);

    assert!(output.status.success());
    assert!(stdout.contains("total:12ms"));
    let args = mock.recorded_args().unwrap();
    assert_eq!(args[args.len() - 3..], ["-h", "--version", "https://example.com"]);
}

#[test]
fn test_short_version_flag() {
    let output = httpstat_command().arg("-V").output().unwrap();
    let (stdout, _) = output_text(&output);

    assert!(output.status.success());
    assert_eq!(stdout, format!("httpstat {}\n", env!("CARGO_PKG_VERSION")));
}
