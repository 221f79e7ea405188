use axum::Json;
use axum::response::{IntoResponse, Response};
use errata_config::ErrorsConfig;
use errata_core::{Classification, StatusFamily};
use serde::Serialize;

/// Wire format of an error response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// Numeric HTTP status
    pub status_code: u16,
    /// Message safe to expose to API consumers
    pub message: String,
    /// Kind discriminant, only present when exposure is enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
}

/// Renders and logs classified errors according to [`ErrorsConfig`]
#[derive(Debug, Clone)]
pub struct ErrorRenderer {
    unclassified_message: String,
    expose_kind: bool,
    log_client_errors: bool,
}

impl ErrorRenderer {
    /// Build a renderer from configuration
    pub fn new(config: &ErrorsConfig) -> Self {
        Self {
            unclassified_message: config.unclassified_message.clone(),
            expose_kind: config.expose_kind,
            log_client_errors: config.log_client_errors,
        }
    }

    /// Response body for a classification
    pub fn body(&self, classification: &Classification) -> ErrorBody {
        let message = if classification.classified {
            classification.message.clone()
        } else {
            self.unclassified_message.clone()
        };

        ErrorBody {
            status_code: classification.status_code.as_u16(),
            message,
            kind: self.expose_kind.then_some(classification.kind),
        }
    }

    /// Full JSON response for a classification
    pub fn render(&self, classification: &Classification) -> Response {
        (classification.status_code, Json(self.body(classification))).into_response()
    }

    /// Emit one log record for a rendered error
    ///
    /// Server faults log at `error` with their internal detail; client faults
    /// log at `warn`, or `debug` when client error logging is off. Every record
    /// carries `status`, `kind`, `family` and `detail` fields.
    pub fn log(&self, classification: &Classification) {
        let status = classification.status_code.as_u16();
        let kind = classification.kind;
        let family = StatusFamily::of(classification.status_code);
        let detail = classification.detail.as_deref().unwrap_or_default();

        match family {
            StatusFamily::ServerError => tracing::error!(
                status,
                kind,
                %family,
                classified = classification.classified,
                detail,
                "{}",
                classification.message
            ),
            StatusFamily::ClientError if self.log_client_errors => {
                tracing::warn!(status, kind, %family, detail, "{}", classification.message);
            }
            StatusFamily::ClientError => {
                tracing::debug!(status, kind, %family, detail, "{}", classification.message);
            }
        }
    }
}

impl Default for ErrorRenderer {
    fn default() -> Self {
        Self::new(&ErrorsConfig::default())
    }
}
