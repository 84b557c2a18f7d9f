//! Style constants and emojis for terminal output
//!
//! # Styling with color-print
//!
//! Use `cformat!` with HTML-like tags for user-facing messages:
//!
//! ```rust,ignore
//! use color_print::cformat;
//!
//! cformat!("<yellow>curl error: <bold>{code}</></>")
//! ```
//!
//! # anstyle constants
//!
//! The report itself is built from `Style` constants so each segment can be
//! rendered with or without escape codes by [`super::colorize`].

use anstyle::{Ansi256Color, AnsiColor, Color, Style};
use color_print::cformat;

// ============================================================================
// Report Style Constants
// ============================================================================

/// Measured values, remote endpoint, header values (cyan)
pub const VALUE: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan)));

/// Protocol name on status lines, "Body" label (green)
pub const STATUS: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green)));

/// Header names and separators (256-color grey 246)
pub const GREY_246: Style = Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(246))));

/// Diagram phase header and curl's non-fatal stderr (256-color grey 248)
pub const GREY_248: Style = Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(248))));

// ============================================================================
// Message Emojis
// ============================================================================

/// Error emoji: `cformat!("{ERROR_EMOJI} <red>message</>")`
pub const ERROR_EMOJI: &str = "❌";

/// Hint emoji: `cformat!("{HINT_EMOJI} <dim>message</>")`
pub const HINT_EMOJI: &str = "💡";

// ============================================================================
// Message Formatting Functions
// ============================================================================

/// Format an error message with emoji and red styling
pub fn error_message(content: impl AsRef<str>) -> String {
    cformat!("{ERROR_EMOJI} <red>{}</>", content.as_ref())
}

/// Format a hint message with emoji and dim styling
pub fn hint_message(content: impl AsRef<str>) -> String {
    cformat!("{HINT_EMOJI} <dim>{}</>", content.as_ref())
}

/// Indent quoted external output (curl's stderr, raw stdout) under a message
pub fn format_quoted(content: &str) -> String {
    content
        .lines()
        .map(|line| cformat!("<dim>  │</> {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}
