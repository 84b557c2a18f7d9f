//! httpstat error types and formatting
//!
//! **`HttpstatError`** is a typed enum for the failures a run can end with.
//! Use `.into()` to convert to `anyhow::Error` while preserving the type for
//! pattern matching, styled display and exit codes in main.rs.
//!
//! Every variant is fatal: nothing is retried and no partial report is
//! printed.

use color_print::cformat;

use crate::styling::{error_message, format_quoted, hint_message};

/// Domain errors for a single httpstat run.
///
/// # Usage
///
/// ```ignore
/// // Return a typed error (main.rs handles styled display via downcast)
/// return Err(HttpstatError::ArgumentConflict { flag: "-s".into() }.into());
///
/// // Pattern match on errors
/// if let Some(HttpstatError::ExternalToolFailure { code, .. }) = err.downcast_ref() {
///     println!("curl exited with {code}");
/// }
/// ```
#[derive(Debug, Clone, thiserror::Error)]
pub enum HttpstatError {
    /// A passthrough argument collides with a flag httpstat passes to curl
    #[error("{flag} is not allowed in extra curl args")]
    ArgumentConflict { flag: String },

    /// curl exited non-zero
    #[error("curl error: {}", stderr.trim())]
    ExternalToolFailure {
        code: i32,
        stderr: String,
        /// Command line with the write-out format and temp paths elided
        command: String,
    },

    /// curl succeeded but its stdout is not a JSON object
    #[error("could not decode json: {error}")]
    MalformedReport {
        error: String,
        /// Start of curl's stdout
        preview: String,
        stderr: String,
        exit_code: i32,
    },

    /// A cumulative timing field is absent or not a number
    #[error("{field} value type is invalid: {found}")]
    InvalidMetricType {
        field: &'static str,
        /// JSON type that was found, or "missing"
        found: &'static str,
    },
}

impl HttpstatError {
    /// Returns the styled error message with emoji and colors.
    pub fn styled(&self) -> String {
        match self {
            HttpstatError::ArgumentConflict { flag } => format!(
                "{}\n{}",
                error_message(cformat!("<bold>{flag}</> is not allowed in extra curl args")),
                hint_message("httpstat already passes -w -D -o -s -S to curl")
            ),

            HttpstatError::ExternalToolFailure {
                code,
                stderr,
                command,
            } => {
                let header = format!(
                    "{}\n{}",
                    cformat!("<dim>{}</>", format!("> {command}")),
                    error_message(cformat!("curl exited with code <bold>{code}</>"))
                );
                with_quoted(header, stderr)
            }

            HttpstatError::MalformedReport {
                error,
                preview,
                stderr,
                exit_code,
            } => {
                let header = error_message(format!("Could not decode json: {error}"));
                let mut message = format!("{header}\ncurl result: {exit_code}");
                for block in [preview, stderr] {
                    if !block.trim().is_empty() {
                        message.push('\n');
                        message.push_str(&format_quoted(block.trim()));
                    }
                }
                message
            }

            HttpstatError::InvalidMetricType { field, found } => error_message(cformat!(
                "<bold>{field}</> value type is invalid: {found}"
            )),
        }
    }
}

/// Exit code for an error: curl's own code when curl failed, 1 otherwise.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<HttpstatError>() {
        Some(HttpstatError::ExternalToolFailure { code, .. }) => *code,
        _ => 1,
    }
}

/// Styled message for any error that ends a run.
pub fn format_error(err: &anyhow::Error) -> String {
    match err.downcast_ref::<HttpstatError>() {
        Some(err) => err.styled(),
        None => error_message(format!("{err:#}")),
    }
}

fn with_quoted(header: String, content: &str) -> String {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        header
    } else {
        format!("{header}\n{}", format_quoted(trimmed))
    }
}
