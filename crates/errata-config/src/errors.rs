use serde::Deserialize;

/// How classified errors are rendered and logged
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ErrorsConfig {
    /// Message sent for errors outside the taxonomy
    #[serde(default = "default_unclassified_message")]
    pub unclassified_message: String,
    /// Include the kind discriminant in response bodies
    #[serde(default)]
    pub expose_kind: bool,
    /// Log `4xx` errors at `warn` instead of `debug`
    #[serde(default = "default_log_client_errors")]
    pub log_client_errors: bool,
}

impl Default for ErrorsConfig {
    fn default() -> Self {
        Self {
            unclassified_message: default_unclassified_message(),
            expose_kind: false,
            log_client_errors: default_log_client_errors(),
        }
    }
}

fn default_unclassified_message() -> String {
    "Internal server error".to_owned()
}

const fn default_log_client_errors() -> bool {
    true
}
