//! Running curl and collecting what it measured.
//!
//! One [`CurlInvocation`] spawns curl exactly once. curl writes the response
//! headers and body to two temp files and prints a JSON timing report on
//! stdout using [`WRITE_OUT_FORMAT`]. The header file is removed as soon as it
//! has been read; the body file is handed to the caller as a [`ResponseBody`],
//! which deletes it on drop unless it is persisted.

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use anyhow::Context;
use serde_json::{Map, Value};
use tempfile::TempPath;

use crate::error::HttpstatError;
use crate::metrics::TimingReport;

/// curl `--write-out` template producing one JSON object.
///
/// Timing and speed variables are left unquoted so their JSON type carries
/// curl's encoding (fractional seconds vs. integral microseconds). Addresses
/// and ports are quoted.
pub const WRITE_OUT_FORMAT: &str = r#"{
"time_namelookup": %{time_namelookup},
"time_connect": %{time_connect},
"time_appconnect": %{time_appconnect},
"time_pretransfer": %{time_pretransfer},
"time_redirect": %{time_redirect},
"time_starttransfer": %{time_starttransfer},
"time_total": %{time_total},
"speed_download": %{speed_download},
"speed_upload": %{speed_upload},
"remote_ip": "%{remote_ip}",
"remote_port": "%{remote_port}",
"local_ip": "%{local_ip}",
"local_port": "%{local_port}"
}"#;

/// Flags httpstat passes to curl itself; passthrough args may not repeat them.
pub const RESERVED_FLAGS: [&str; 8] = [
    "-w",
    "--write-out",
    "-D",
    "--dump-header",
    "-o",
    "--output",
    "-s",
    "--silent",
];

/// Characters of unparseable stdout kept for the error message
const PREVIEW_LIMIT: usize = 512;

/// curl's short flags that take a value. Inside a cluster such as `-XPOST`
/// the rest of the argument is that value.
const SHORT_FLAGS_WITH_VALUE: &str = "AbcCdDeEFHKmoPQrtTuUwxXyYz";

/// Reject passthrough args that collide with [`RESERVED_FLAGS`].
///
/// Long flags match by name, including the `--flag=value` spelling. A
/// single-dash argument is read as a cluster of short flags (`-sS`,
/// `-o/dev/null`), and the argument after a cluster ending in a value flag is
/// skipped as its value. The first offending flag is reported.
pub fn check_passthrough_args(args: &[String]) -> Result<(), HttpstatError> {
    let mut value_follows = false;
    for arg in args {
        if std::mem::take(&mut value_follows) {
            continue;
        }
        let reserved = if let Some(long) = arg.strip_prefix("--") {
            let name = long.split_once('=').map_or(long, |(name, _)| name);
            RESERVED_FLAGS
                .iter()
                .find(|flag| flag.strip_prefix("--") == Some(name))
                .copied()
        } else if let Some(cluster) = arg.strip_prefix('-') {
            let (reserved, pending) = scan_short_cluster(cluster);
            value_follows = pending;
            reserved
        } else {
            None
        };
        if let Some(flag) = reserved {
            return Err(HttpstatError::ArgumentConflict {
                flag: flag.to_string(),
            });
        }
    }
    Ok(())
}

/// The first reserved flag in a short-flag cluster, and whether the cluster
/// ends in a value flag whose value is the next argument.
fn scan_short_cluster(cluster: &str) -> (Option<&'static str>, bool) {
    for (i, letter) in cluster.char_indices() {
        let reserved = RESERVED_FLAGS.iter().find(|flag| {
            flag.strip_prefix('-')
                .is_some_and(|short| short.chars().eq([letter]))
        });
        if let Some(flag) = reserved {
            return (Some(*flag), false);
        }
        if SHORT_FLAGS_WITH_VALUE.contains(letter) {
            let attached = &cluster[i + letter.len_utf8()..];
            return (None, attached.is_empty());
        }
    }
    (None, false)
}

/// A validated curl command line for one URL.
#[derive(Debug, Clone)]
pub struct CurlInvocation {
    curl_bin: String,
    url: String,
    passthrough: Vec<String>,
}

impl CurlInvocation {
    /// Fails with [`HttpstatError::ArgumentConflict`] before anything is
    /// created or spawned.
    pub fn new(
        curl_bin: impl Into<String>,
        url: impl Into<String>,
        passthrough: Vec<String>,
    ) -> Result<Self, HttpstatError> {
        check_passthrough_args(&passthrough)?;
        Ok(Self {
            curl_bin: curl_bin.into(),
            url: url.into(),
            passthrough,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// The curl command writing headers to `header` and the body to `body`.
    pub fn command(&self, header: &Path, body: &Path) -> Command {
        let mut cmd = Command::new(&self.curl_bin);
        cmd.arg("-w")
            .arg(WRITE_OUT_FORMAT)
            .arg("-D")
            .arg(header)
            .arg("-o")
            .arg(body)
            .args(["-s", "-S"])
            .args(&self.passthrough)
            .arg(&self.url)
            // Locale-formatted decimals ("0,012") would break the JSON
            .env("LC_ALL", "C");
        cmd
    }

    /// Shell-quoted command line with the write-out format and temp paths
    /// elided.
    pub fn display_command(&self) -> String {
        let quote = |arg: &str| shell_escape::escape(Cow::Borrowed(arg)).into_owned();

        let mut parts = vec![
            quote(&self.curl_bin),
            "-w <output-format> -D <tempfile> -o <tempfile> -s -S".to_string(),
        ];
        parts.extend(self.passthrough.iter().map(|arg| quote(arg)));
        parts.push(quote(&self.url));
        parts.join(" ")
    }

    /// Run curl once and wait for it.
    ///
    /// stdin is inherited so passthrough args like `--data @-` work. Temp
    /// files are removed on every error path.
    pub fn run(&self) -> anyhow::Result<CurlOutput> {
        let header = temp_path("httpstat-header-")?;
        let body = ResponseBody::new(temp_path("httpstat-body-")?);

        log::debug!("$ {}", self.display_command());
        let output = self
            .command(&header, body.path())
            .stdin(Stdio::inherit())
            .output()
            .with_context(|| format!("Failed to run {}", self.curl_bin))?;

        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        let code = exit_code(output.status);
        log::debug!("curl exited with {code}");
        if code != 0 {
            return Err(HttpstatError::ExternalToolFailure {
                code,
                stderr,
                command: self.display_command(),
            }
            .into());
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        log::debug!("curl stdout: {stdout}");
        let object = parse_report(&stdout, &stderr, code)?;
        let report = TimingReport::decode(&object)?;

        let headers = fs::read(&header)
            .with_context(|| format!("Failed to read {}", header.display()))?;
        let headers = String::from_utf8_lossy(&headers).into_owned();
        log::debug!("rm header file {}", header.display());
        header.close().context("Failed to remove header file")?;

        Ok(CurlOutput {
            report,
            stderr,
            headers,
            body,
        })
    }
}

/// Everything a successful curl run produced.
#[derive(Debug)]
pub struct CurlOutput {
    pub report: TimingReport,
    /// Non-fatal diagnostics curl printed (e.g. with `-v`)
    pub stderr: String,
    /// Raw dumped headers, one block per response when redirects are followed
    pub headers: String,
    pub body: ResponseBody,
}

/// The temp file curl wrote the response body to.
///
/// Deleted on drop unless [`ResponseBody::persist`] is called.
#[derive(Debug)]
pub struct ResponseBody {
    path: TempPath,
}

impl ResponseBody {
    pub fn new(path: TempPath) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Body as text; invalid UTF-8 is replaced.
    pub fn read_text(&self) -> anyhow::Result<String> {
        let bytes = fs::read(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Keep the file after httpstat exits and return its path.
    pub fn persist(self) -> anyhow::Result<PathBuf> {
        self.path.keep().context("Failed to keep body file")
    }

    pub fn discard(self) -> anyhow::Result<()> {
        log::debug!("rm body file {}", self.path.display());
        self.path.close().context("Failed to remove body file")
    }
}

fn temp_path(prefix: &str) -> anyhow::Result<TempPath> {
    let file = tempfile::Builder::new()
        .prefix(prefix)
        .tempfile()
        .context("Failed to create temp file")?;
    Ok(file.into_temp_path())
}

/// curl's exit code, or `128 + signal` when it was killed.
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}

fn parse_report(
    stdout: &str,
    stderr: &str,
    exit_code: i32,
) -> Result<Map<String, Value>, HttpstatError> {
    let malformed = |error: String| HttpstatError::MalformedReport {
        error,
        preview: stdout.chars().take(PREVIEW_LIMIT).collect(),
        stderr: stderr.to_string(),
        exit_code,
    };

    match serde_json::from_str::<Value>(stdout) {
        Ok(Value::Object(object)) => Ok(object),
        Ok(_) => Err(malformed("expected a JSON object".to_string())),
        Err(err) => Err(malformed(err.to_string())),
    }
}
