//! Visualize where the time of an HTTP request goes.
//!
//! httpstat runs curl once with a JSON `--write-out` template and renders the
//! DNS, TCP, TLS, server and transfer phases as a fixed-width diagram.

pub mod command;
pub mod config;
pub mod curl;
pub mod error;
pub mod metrics;
pub mod render;
pub mod styling;

pub use error::HttpstatError;
