//! Everything printed above and below the diagram.

use std::path::Path;

use crate::metrics::TransferInfo;
use crate::styling::{GREY_246, STATUS, StyledLine, VALUE, colorize};

/// Characters of body shown before truncating
pub const BODY_LIMIT: usize = 1024;

/// `Connected to <remote> from <local>`
pub fn render_endpoint(transfer: &TransferInfo, interactive: bool) -> String {
    let text = |value: &Option<String>| value.clone().unwrap_or_default();

    let mut line = StyledLine::new();
    line.push_raw("Connected to ");
    line.push_styled(text(&transfer.remote_ip), VALUE);
    line.push_raw(":");
    line.push_styled(text(&transfer.remote_port), VALUE);
    line.push_raw(format!(
        " from {}:{}",
        text(&transfer.local_ip),
        text(&transfer.local_port)
    ));
    line.render(interactive)
}

/// Dumped response headers, one styled line per header.
///
/// With `-L` curl dumps one block per response; each block's status line is
/// styled on its own.
pub fn render_headers(headers: &str, interactive: bool) -> String {
    headers
        .trim()
        .replace("\r\n", "\n")
        .lines()
        .map(|line| render_header_line(line, interactive))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_header_line(line: &str, interactive: bool) -> String {
    let mut styled = StyledLine::new();
    if line.starts_with("HTTP/")
        && let Some((protocol, status)) = line.split_once('/')
    {
        styled.push_styled(protocol, STATUS);
        styled.push_styled("/", GREY_246);
        styled.push_styled(status, VALUE);
    } else if let Some(pos) = line.find(':') {
        let (name, value) = line.split_at(pos + 1);
        styled.push_styled(name, GREY_246);
        styled.push_styled(value, VALUE);
    } else {
        styled.push_styled(line, VALUE);
    }
    styled.render(interactive)
}

/// The body section.
///
/// `text` is the body when it should be shown; `stored_in` is where it was
/// kept. Returns an empty string when there is nothing to say.
pub fn render_body(text: Option<&str>, stored_in: Option<&Path>, interactive: bool) -> String {
    let label = colorize(STATUS, "Body", interactive);
    let stored_suffix = |prefix: &str| {
        stored_in
            .map(|path| format!("{prefix}stored in: {}", path.display()))
            .unwrap_or_default()
    };

    match text.map(str::trim) {
        Some(body) => {
            let len = body.chars().count();
            if len <= BODY_LIMIT {
                return body.to_string();
            }
            let shown: String = body.chars().take(BODY_LIMIT).collect();
            format!(
                "{shown}{}\n\n{label} is truncated ({BODY_LIMIT} out of {len}){}",
                colorize(VALUE, "...", interactive),
                stored_suffix(", ")
            )
        }
        None if stored_in.is_some() => format!("{label} {}", stored_suffix("")),
        None => String::new(),
    }
}

/// Transfer speeds in KiB/s
pub fn render_speed(transfer: &TransferInfo) -> String {
    let kib = |bytes_per_sec: Option<f64>| bytes_per_sec.unwrap_or_default() / 1024.0;
    format!(
        "speed_download: {:.1} KiB/s, speed_upload: {:.1} KiB/s",
        kib(transfer.speed_download),
        kib(transfer.speed_upload)
    )
}
