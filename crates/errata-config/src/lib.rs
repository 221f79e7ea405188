#![allow(clippy::must_use_candidate)]

mod env;
pub mod errors;
mod loader;
pub mod telemetry;

use serde::Deserialize;

pub use env::ExpandError;
pub use errors::ErrorsConfig;
pub use telemetry::{LogFormat, TelemetryConfig};

/// Top-level errata configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Error rendering policy
    #[serde(default)]
    pub errors: ErrorsConfig,
    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}
