//! Timing metrics: decoding curl's report, unit normalization, and phase
//! derivation.
//!
//! ```text
//! raw JSON ──decode──▶ TimingReport ──normalize──▶ NormalizedTiming ──derive──▶ PhaseIntervals
//! ```

mod intervals;
mod report;

pub use intervals::{Phase, PhaseIntervals, Scheme};
pub use report::{Cumulative, NormalizedTiming, RawTime, TimingReport, TransferInfo};

use serde::Serialize;

/// Everything measured for one request, as printed in metrics-only mode.
///
/// Field order follows curl's report, then the derived `range_*` phases.
#[derive(Debug, Serialize)]
pub struct MetricsDocument<'a> {
    #[serde(flatten)]
    timing: &'a NormalizedTiming,
    range_dns: i64,
    range_connection: i64,
    range_ssl: i64,
    range_server: i64,
    range_transfer: i64,
}

impl<'a> MetricsDocument<'a> {
    pub fn new(timing: &'a NormalizedTiming, intervals: &PhaseIntervals) -> Self {
        Self {
            timing,
            range_dns: intervals.dns,
            range_connection: intervals.connection,
            range_ssl: intervals.tls,
            range_server: intervals.server,
            range_transfer: intervals.transfer,
        }
    }

    /// Two-space indented JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
