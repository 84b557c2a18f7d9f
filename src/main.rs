use std::process;

use clap::{CommandFactory, Parser};
use httpstat::config::Config;
use httpstat::error::{exit_code, format_error};
use httpstat::styling::stdout_is_interactive;

const ENV_HELP: &str = "\
Environment:
  HTTPSTAT_SHOW_BODY     Show the first 1024 characters of the body [default: false]
  HTTPSTAT_SHOW_IP       Show the remote and local IP and port [default: true]
  HTTPSTAT_SHOW_SPEED    Show download and upload speed [default: false]
  HTTPSTAT_SAVE_BODY     Keep the response body in a temp file [default: true]
  HTTPSTAT_CURL_BIN      curl executable to run [default: curl]
  HTTPSTAT_METRICS_ONLY  Print metrics as JSON instead of the report [default: false]
  HTTPSTAT_DEBUG         Log debug information to stderr [default: false]

A boolean variable is on when its value contains \"true\".";

#[derive(Parser)]
#[command(name = "httpstat")]
#[command(about = "curl statistics made simple", long_about = None)]
#[command(version, disable_help_flag = true, disable_version_flag = true)]
#[command(override_usage = "httpstat URL [CURL_OPTIONS]...")]
#[command(after_long_help = ENV_HELP)]
struct Cli {
    /// URL to request (curl assumes http:// when the scheme is omitted)
    ///
    /// -h, --help or -V, --version in its place print help or version
    #[arg(value_name = "URL", allow_hyphen_values = true)]
    url: Option<String>,

    /// Options passed through to curl verbatim, except -w, -D, -o and -s
    #[arg(
        trailing_var_arg = true,
        allow_hyphen_values = true,
        value_name = "CURL_OPTIONS"
    )]
    curl_args: Vec<String>,
}

/// Help or version text, when the first argument asks for it instead of a URL.
///
/// Only the first argument is checked; `-h` or `--version` after the URL
/// belongs to curl.
fn usage_text(first: Option<&str>) -> Option<String> {
    let mut cmd = Cli::command();
    match first {
        None | Some("-h") => Some(cmd.render_help().ansi().to_string()),
        Some("--help") => Some(cmd.render_long_help().ansi().to_string()),
        Some("-V" | "--version") => Some(cmd.render_version()),
        Some(_) => None,
    }
}

fn init_logging(debug: bool) {
    let level = if debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    // RUST_LOG still wins when set
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn main() {
    let cli = Cli::parse();

    let url = match (usage_text(cli.url.as_deref()), cli.url) {
        (None, Some(url)) => url,
        (text, _) => {
            anstream::print!("{}", text.unwrap_or_default());
            return;
        }
    };

    let config = Config::from_env();
    init_logging(config.debug);
    log::debug!(
        "environment:\n{}",
        Config::describe_env(|key| std::env::var(key).ok())
    );
    log::debug!("{config:?}");

    let interactive = stdout_is_interactive();
    match httpstat::command::httpstat(&url, cli.curl_args, &config, interactive) {
        Ok(report) => anstream::print!("{report}"),
        Err(e) => {
            anstream::eprintln!("{}", format_error(&e));
            process::exit(exit_code(&e));
        }
    }
}
