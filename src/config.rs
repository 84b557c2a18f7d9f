//! Environment configuration.
//!
//! Read once at startup into [`Config`] and passed by reference into the
//! pipeline. Nothing else in the crate reads the environment.

/// Environment variables httpstat reads, with their defaults.
pub const VARIABLES: [(&str, &str); 7] = [
    ("HTTPSTAT_SHOW_BODY", "false"),
    ("HTTPSTAT_SHOW_IP", "true"),
    ("HTTPSTAT_SHOW_SPEED", "false"),
    ("HTTPSTAT_SAVE_BODY", "true"),
    ("HTTPSTAT_CURL_BIN", "curl"),
    ("HTTPSTAT_METRICS_ONLY", "false"),
    ("HTTPSTAT_DEBUG", "false"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Print the response body (truncated to 1024 characters)
    pub show_body: bool,
    /// Print the remote and local endpoints
    pub show_ip: bool,
    /// Print download and upload speed
    pub show_speed: bool,
    /// Keep the response body in a temp file and print its path
    pub save_body: bool,
    /// curl executable to run
    pub curl_bin: String,
    /// Print the normalized metrics as JSON instead of the report
    pub metrics_only: bool,
    /// Debug logging
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from `lookup`, which returns the value of an
    /// environment variable if it is set.
    ///
    /// A flag is on when its value contains `true` (case-insensitive); a set
    /// but empty or unrecognized value turns it off.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let flag = |key: &str, default: bool| {
            lookup(key).map_or(default, |value| value.to_lowercase().contains("true"))
        };

        Self {
            show_body: flag("HTTPSTAT_SHOW_BODY", false),
            show_ip: flag("HTTPSTAT_SHOW_IP", true),
            show_speed: flag("HTTPSTAT_SHOW_SPEED", false),
            save_body: flag("HTTPSTAT_SAVE_BODY", true),
            curl_bin: lookup("HTTPSTAT_CURL_BIN")
                .filter(|bin| !bin.trim().is_empty())
                .unwrap_or_else(|| "curl".to_string()),
            metrics_only: flag("HTTPSTAT_METRICS_ONLY", false),
            debug: flag("HTTPSTAT_DEBUG", false),
        }
    }

    /// `KEY=value` line for each variable httpstat reads, for debug logs
    pub fn describe_env(lookup: impl Fn(&str) -> Option<String>) -> String {
        VARIABLES
            .iter()
            .map(|(key, _)| format!("  {key}={}", lookup(key).unwrap_or_default()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
