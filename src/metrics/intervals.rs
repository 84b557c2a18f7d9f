//! Phase durations derived from cumulative timestamps.

use strum::Display;

use super::report::Cumulative;

/// One discrete phase of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Phase {
    #[strum(serialize = "DNS Lookup")]
    Dns,
    #[strum(serialize = "TCP Connection")]
    Connection,
    #[strum(serialize = "TLS Handshake")]
    Tls,
    #[strum(serialize = "Server Processing")]
    Server,
    #[strum(serialize = "Content Transfer")]
    Transfer,
}

impl Phase {
    pub const ALL: [Phase; 5] = [
        Phase::Dns,
        Phase::Connection,
        Phase::Tls,
        Phase::Server,
        Phase::Transfer,
    ];
}

/// Transport of the requested URL, chosen by its literal prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Secure,
    Plain,
}

impl Scheme {
    /// `https://` selects the secure layout. Anything else, including a URL
    /// without a scheme (which curl treats as http), is plain.
    pub fn from_url(url: &str) -> Self {
        if url.starts_with("https://") {
            Scheme::Secure
        } else {
            Scheme::Plain
        }
    }
}

/// Durations of the five phases in milliseconds.
///
/// Values are differences of adjacent timestamps and are never clamped: a
/// report whose timestamps go backwards yields a negative phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PhaseIntervals {
    pub dns: i64,
    pub connection: i64,
    pub tls: i64,
    pub server: i64,
    pub transfer: i64,
}

impl PhaseIntervals {
    pub fn derive(times: &Cumulative<i64>) -> Self {
        Self {
            dns: times.namelookup,
            connection: times.connect - times.namelookup,
            tls: times.pretransfer - times.connect,
            server: times.starttransfer - times.pretransfer,
            transfer: times.total - times.starttransfer,
        }
    }

    pub fn get(&self, phase: Phase) -> i64 {
        match phase {
            Phase::Dns => self.dns,
            Phase::Connection => self.connection,
            Phase::Tls => self.tls,
            Phase::Server => self.server,
            Phase::Transfer => self.transfer,
        }
    }

    /// The phases shown for `scheme`, in order.
    ///
    /// The plain layout has no TLS cell; whatever curl measured between
    /// connect and pretransfer is shown as part of the TCP connection so the
    /// active phases still add up to the total.
    pub fn phases(&self, scheme: Scheme) -> Vec<(Phase, i64)> {
        match scheme {
            Scheme::Secure => Phase::ALL.iter().map(|&p| (p, self.get(p))).collect(),
            Scheme::Plain => vec![
                (Phase::Dns, self.dns),
                (Phase::Connection, self.connection + self.tls),
                (Phase::Server, self.server),
                (Phase::Transfer, self.transfer),
            ],
        }
    }
}
