//! Text output for a completed request.
//!
//! The whole report is assembled in memory and printed once, so a failure
//! never leaves half a diagram on the terminal.

mod diagram;
mod response;

pub use diagram::render_diagram;
pub use response::{BODY_LIMIT, render_body, render_endpoint, render_headers, render_speed};

use std::path::Path;

use crate::config::Config;
use crate::metrics::{NormalizedTiming, PhaseIntervals, Scheme};
use crate::styling::{GREY_248, colorize};

/// Everything needed to print the report for one request.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    pub scheme: Scheme,
    pub timing: &'a NormalizedTiming,
    pub intervals: &'a PhaseIntervals,
    /// Non-fatal diagnostics curl printed
    pub curl_stderr: &'a str,
    pub headers: &'a str,
    /// Body text, when it should be shown
    pub body: Option<&'a str>,
    /// Where the body was kept, when it was
    pub body_path: Option<&'a Path>,
}

impl Report<'_> {
    /// The full report, ending with a newline.
    pub fn render(&self, config: &Config, interactive: bool) -> String {
        let mut sections = Vec::new();

        let stderr = self.curl_stderr.trim_end();
        if !stderr.is_empty() {
            sections.push(colorize(GREY_248, stderr, interactive));
        }

        if config.show_ip {
            sections.push(render_endpoint(&self.timing.transfer, interactive));
            sections.push(String::new());
        }

        sections.push(render_headers(self.headers, interactive));
        sections.push(String::new());

        let body = render_body(self.body, self.body_path, interactive);
        if !body.is_empty() {
            sections.push(body);
            sections.push(String::new());
        }

        sections.push(render_diagram(
            self.scheme,
            self.intervals,
            self.timing,
            interactive,
        ));

        if config.show_speed {
            sections.push(String::new());
            sections.push(render_speed(&self.timing.transfer));
        }

        let mut out = sections.join("\n");
        out.push('\n');
        out
    }
}
