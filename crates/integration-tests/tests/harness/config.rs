//! Programmatic configuration builder for integration tests

use errata_config::{Config, ErrorsConfig};

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Start from the defaults
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Include the kind discriminant in error bodies
    pub fn exposing_kind(mut self) -> Self {
        self.config.errors.expose_kind = true;
        self
    }

    /// Override the message sent for unclassified errors
    pub fn with_unclassified_message(mut self, message: &str) -> Self {
        self.config.errors = ErrorsConfig {
            unclassified_message: message.to_owned(),
            ..self.config.errors
        };
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
