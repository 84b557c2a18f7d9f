//! Consolidated styling module for terminal output.
//!
//! This module uses the anstyle ecosystem:
//! - anstream for deciding once whether stdout gets colors
//! - anstyle for composable styling
//! - Semantic style constants for the report's colored segments
//!
//! Rendering never consults global state: every render call takes an explicit
//! `interactive` flag, so plain and colored output differ only by escape codes.

mod constants;

pub use constants::*;

use anstyle::Style;

/// Wrap `text` in the escape codes for `style` when `interactive`.
///
/// The visible width of the result is always the width of `text`.
pub fn colorize(style: Style, text: &str, interactive: bool) -> String {
    if !interactive || text.is_empty() || style == Style::new() {
        return text.to_string();
    }
    format!("{}{}{}", style.render(), text, style.render_reset())
}

/// Whether stdout should receive color escape codes.
///
/// Respects NO_COLOR, CLICOLOR_FORCE, and whether stdout is a terminal.
pub fn stdout_is_interactive() -> bool {
    anstream::AutoStream::choice(&std::io::stdout()) != anstream::ColorChoice::Never
}

/// A piece of text with an optional style
#[derive(Clone, Debug)]
pub struct StyledString {
    pub text: String,
    pub style: Option<Style>,
}

impl StyledString {
    pub fn new(text: impl Into<String>, style: Option<Style>) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn raw(text: impl Into<String>) -> Self {
        Self::new(text, None)
    }

    pub fn styled(text: impl Into<String>, style: Style) -> Self {
        Self::new(text, Some(style))
    }

    pub fn render(&self, interactive: bool) -> String {
        match self.style {
            Some(style) => colorize(style, &self.text, interactive),
            None => self.text.clone(),
        }
    }
}

/// A line composed of multiple styled strings
#[derive(Clone, Debug, Default)]
pub struct StyledLine {
    pub segments: Vec<StyledString>,
}

impl StyledLine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a raw (unstyled) segment
    pub fn push_raw(&mut self, text: impl Into<String>) {
        self.segments.push(StyledString::raw(text));
    }

    /// Add a styled segment
    pub fn push_styled(&mut self, text: impl Into<String>, style: Style) {
        self.segments.push(StyledString::styled(text, style));
    }

    /// Renders the entire line, with escape codes only when `interactive`
    pub fn render(&self, interactive: bool) -> String {
        self.segments.iter().map(|s| s.render(interactive)).collect()
    }
}
