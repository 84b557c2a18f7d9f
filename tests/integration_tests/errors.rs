//! Failed runs: nothing on stdout, a message on stderr, and the right exit
//! code.

use crate::common::mock_commands::{LEGACY_REPORT, MockCurl};
use crate::common::{httpstat_command, output_text};
use insta::{Settings, assert_snapshot};
use rstest::rstest;

fn run_failing(mock: &MockCurl, args: &[&str]) -> (i32, String) {
    let curl = mock.install();
    let output = httpstat_command()
        .env("HTTPSTAT_CURL_BIN", &curl)
        .arg("https://example.com")
        .args(args)
        .output()
        .unwrap();
    let (stdout, stderr) = output_text(&output);
    assert_eq!(stdout, "", "no partial report on failure");
    (output.status.code().unwrap(), stderr)
}

#[rstest]
#[case::silent_short("-s")]
#[case::silent_long("--silent")]
#[case::write_out("-w")]
#[case::dump_header("--dump-header")]
#[case::output("-o")]
fn test_reserved_flag_rejected_before_spawn(#[case] flag: &str) {
    let mock = MockCurl::new();
    let (code, stderr) = run_failing(&mock, &["-H", "Accept: */*", flag, "value"]);

    assert_eq!(code, 1);
    assert!(stderr.contains(&format!("{flag} is not allowed in extra curl args")));
    assert!(mock.recorded_args().is_none(), "curl must not run");
}

#[test]
fn test_reserved_flag_message() {
    let (_, stderr) = run_failing(&MockCurl::new(), &["-s"]);
    assert_snapshot!(stderr, @r"
    ❌ -s is not allowed in extra curl args
    💡 httpstat already passes -w -D -o -s -S to curl
    ");
}

#[test]
fn test_curl_failure_propagates_exit_code() {
    let mock = MockCurl {
        stdout: String::new(),
        stderr: "curl: (6) Could not resolve host: nope.invalid\n".to_string(),
        exit_code: 6,
        ..MockCurl::new()
    };
    let (code, stderr) = run_failing(&mock, &[]);

    assert_eq!(code, 6);
    let mut settings = Settings::clone_current();
    settings.add_filter(r"(?m)^> \S*curl ", "> [CURL] ");
    settings.bind(|| {
        assert_snapshot!(stderr, @r"
        > [CURL] -w <output-format> -D <tempfile> -o <tempfile> -s -S 'https://example.com'
        ❌ curl exited with code 6
          │ curl: (6) Could not resolve host: nope.invalid
        ");
    });

    // Temp files are cleaned up on failure too
    assert!(!mock.recorded_path("-D").exists());
    assert!(!mock.recorded_path("-o").exists());
}

#[test]
fn test_curl_killed_by_signal() {
    let mock = MockCurl {
        signal: Some(9),
        ..MockCurl::new()
    };
    let (code, stderr) = run_failing(&mock, &[]);

    assert_eq!(code, 128 + 9);
    assert!(stderr.contains("curl exited with code 137"));
}

#[test]
fn test_malformed_report() {
    let mock = MockCurl {
        stdout: "<html>not json</html>".to_string(),
        ..MockCurl::new()
    };
    let (code, stderr) = run_failing(&mock, &[]);

    assert_eq!(code, 1);
    assert_snapshot!(stderr, @r"
    ❌ Could not decode json: expected value at line 1 column 1
    curl result: 0
      │ <html>not json</html>
    ");
}

#[test]
fn test_invalid_metric_type() {
    let mock = MockCurl {
        stdout: LEGACY_REPORT.replace("\"time_total\": 0.012", "\"time_total\": \"fast\""),
        ..MockCurl::new()
    };
    let (code, stderr) = run_failing(&mock, &[]);

    assert_eq!(code, 1);
    assert_eq!(stderr, "❌ time_total value type is invalid: string\n");
}

#[test]
fn test_missing_timing_field() {
    let mock = MockCurl {
        stdout: r#"{"time_namelookup": 0.001}"#.to_string(),
        ..MockCurl::new()
    };
    let (code, stderr) = run_failing(&mock, &[]);

    assert_eq!(code, 1);
    assert_eq!(stderr, "❌ time_connect value type is invalid: missing\n");
}

#[test]
fn test_curl_binary_not_found() {
    let output = httpstat_command()
        .env("HTTPSTAT_CURL_BIN", "/nonexistent/httpstat-curl")
        .arg("https://example.com")
        .output()
        .unwrap();
    let (stdout, stderr) = output_text(&output);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout, "");
    assert!(stderr.starts_with("❌ Failed to run /nonexistent/httpstat-curl: "));
}
