//! The timing diagram.
//!
//! Two literal templates, one per [`Scheme`]. `{aNNNN}` placeholders are phase
//! cells and `{bNNNN}` placeholders are cumulative labels; both are exactly as
//! wide as the values that replace them, so the `|` separators stay under the
//! header labels for values up to five digits.

use crate::metrics::{NormalizedTiming, Phase, PhaseIntervals, Scheme};
use crate::styling::{GREY_248, VALUE, colorize};

const SECURE_TEMPLATE: [&str; 8] = [
    "  DNS Lookup   TCP Connection   TLS Handshake   Server Processing   Content Transfer",
    "[   {a0000}  |     {a0001}    |    {a0002}    |      {a0003}      |      {a0004}     ]",
    "             |                |               |                   |                  |",
    "    namelookup:{b0000}        |               |                   |                  |",
    "                        connect:{b0001}       |                   |                  |",
    "                                    pretransfer:{b0002}           |                  |",
    "                                                      starttransfer:{b0003}          |",
    "                                                                                 total:{b0004}",
];

const PLAIN_TEMPLATE: [&str; 7] = [
    "  DNS Lookup   TCP Connection   Server Processing   Content Transfer",
    "[   {a0000}  |     {a0001}    |      {a0003}      |      {a0004}     ]",
    "             |                |                   |                  |",
    "    namelookup:{b0000}        |                   |                  |",
    "                        connect:{b0001}           |                  |",
    "                                      starttransfer:{b0003}          |",
    "                                                                 total:{b0004}",
];

fn template(scheme: Scheme) -> &'static [&'static str] {
    match scheme {
        Scheme::Secure => &SECURE_TEMPLATE,
        Scheme::Plain => &PLAIN_TEMPLATE,
    }
}

fn cell_slot(phase: Phase) -> usize {
    match phase {
        Phase::Dns => 0,
        Phase::Connection => 1,
        Phase::Tls => 2,
        Phase::Server => 3,
        Phase::Transfer => 4,
    }
}

/// `{n}ms` centered in a cell
fn format_cell(ms: i64) -> String {
    format!("{:^7}", format!("{ms}ms"))
}

/// `{n}ms` left-justified after a label
fn format_label(ms: i64) -> String {
    format!("{:<7}", format!("{ms}ms"))
}

/// Render the diagram for `scheme`. No trailing newline.
pub fn render_diagram(
    scheme: Scheme,
    intervals: &PhaseIntervals,
    timing: &NormalizedTiming,
    interactive: bool,
) -> String {
    let mut replacements: Vec<(String, String)> = intervals
        .phases(scheme)
        .into_iter()
        .map(|(phase, ms)| {
            (
                format!("{{a{:04}}}", cell_slot(phase)),
                colorize(VALUE, &format_cell(ms), interactive),
            )
        })
        .collect();

    let times = &timing.times;
    let labels = [
        times.namelookup,
        times.connect,
        times.pretransfer,
        times.starttransfer,
        times.total,
    ];
    replacements.extend(labels.iter().enumerate().map(|(slot, &ms)| {
        (
            format!("{{b{slot:04}}}"),
            colorize(VALUE, &format_label(ms), interactive),
        )
    }));

    template(scheme)
        .iter()
        .enumerate()
        .map(|(i, row)| match i {
            0 => colorize(GREY_248, row, interactive),
            _ => replacements
                .iter()
                .fold(row.to_string(), |line, (placeholder, value)| {
                    line.replace(placeholder, value)
                }),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
