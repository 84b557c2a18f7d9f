//! One httpstat run: invoke curl, measure, and build the output text.

use anyhow::Context;

use crate::config::Config;
use crate::curl::CurlInvocation;
use crate::metrics::{MetricsDocument, Phase, PhaseIntervals, Scheme};
use crate::render::Report;

/// Run curl against `url` and return the text to print on stdout.
///
/// Nothing is printed here; on error no output has been produced.
pub fn httpstat(
    url: &str,
    curl_args: Vec<String>,
    config: &Config,
    interactive: bool,
) -> anyhow::Result<String> {
    let invocation = CurlInvocation::new(&config.curl_bin, url, curl_args)?;
    let output = invocation.run()?;

    let timing = output.report.normalize();
    let intervals = PhaseIntervals::derive(&timing.times);
    for phase in Phase::ALL {
        log::debug!("{phase}: {}ms", intervals.get(phase));
    }

    if config.metrics_only {
        output.body.discard()?;
        let mut json = MetricsDocument::new(&timing, &intervals)
            .to_json()
            .context("Failed to serialize metrics")?;
        json.push('\n');
        return Ok(json);
    }

    let body_text = if config.show_body {
        Some(output.body.read_text()?)
    } else {
        None
    };
    let body_path = if config.save_body {
        Some(output.body.persist()?)
    } else {
        output.body.discard()?;
        None
    };

    let report = Report {
        scheme: Scheme::from_url(invocation.url()),
        timing: &timing,
        intervals: &intervals,
        curl_stderr: &output.stderr,
        headers: &output.headers,
        body: body_text.as_deref(),
        body_path: body_path.as_deref(),
    };
    Ok(report.render(config, interactive))
}
