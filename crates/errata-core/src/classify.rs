use std::error::Error as StdError;

use http::StatusCode;
use serde::{Serialize, Serializer};

use crate::{ApiError, HttpError, InternalError};

/// Renderable view of any error
///
/// Serializes as `{statusCode, message, kind}`; the diagnostic fields are
/// skipped so they can never end up on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    /// Status code to respond with
    #[serde(serialize_with = "serialize_status")]
    pub status_code: StatusCode,
    /// Message safe to expose to API consumers
    pub message: String,
    /// Discriminant of the kind
    pub kind: &'static str,
    /// Whether the error was a member of the taxonomy
    #[serde(skip)]
    pub classified: bool,
    /// Internal diagnostic text for logs
    #[serde(skip)]
    pub detail: Option<String>,
}

impl Classification {
    /// Classification of a taxonomy member
    pub fn of<E: HttpError + ?Sized>(error: &E) -> Self {
        Self {
            status_code: error.status_code(),
            message: error.message().to_owned(),
            kind: error.kind(),
            classified: true,
            detail: None,
        }
    }

    /// Generic server fault for anything outside the taxonomy
    ///
    /// `detail` is kept for logs only; the client message is always the
    /// [`InternalError`] default.
    pub fn unclassified(detail: Option<String>) -> Self {
        Self {
            status_code: InternalError::STATUS,
            message: InternalError::DEFAULT_MESSAGE.to_owned(),
            kind: InternalError::KIND,
            classified: false,
            detail,
        }
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn serialize_status<S: Serializer>(status: &StatusCode, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u16(status.as_u16())
}

/// Anything that can be turned into a [`Classification`]
///
/// Classification never fails and never mutates the error, so classifying
/// the same value twice gives the same result.
pub trait Classify {
    /// Map this value to a renderable status, message and kind
    fn classify(&self) -> Classification;
}

impl<T: HttpError + ?Sized> Classify for T {
    fn classify(&self) -> Classification {
        Classification::of(self)
    }
}

impl Classify for ApiError {
    fn classify(&self) -> Classification {
        let mut classification = self
            .as_http_error()
            .map_or_else(|| Classification::unclassified(None), Classification::of);
        classification.detail = self.detail();
        classification
    }
}

impl Classify for anyhow::Error {
    fn classify(&self) -> Classification {
        Classification::unclassified(Some(format!("{self:#}")))
    }
}

impl Classify for dyn StdError + 'static {
    fn classify(&self) -> Classification {
        Classification::unclassified(Some(error_chain(self)))
    }
}

impl Classify for dyn StdError + Send + Sync + 'static {
    fn classify(&self) -> Classification {
        Classification::unclassified(Some(error_chain(self)))
    }
}

/// Classify any error value
///
/// Total: taxonomy members keep their status, message and kind; everything
/// else becomes a generic `500` whose message never echoes the original.
pub fn classify<E: Classify + ?Sized>(error: &E) -> Classification {
    error.classify()
}

fn error_chain(error: &(dyn StdError + 'static)) -> String {
    std::iter::successors(Some(error), |&e| e.source())
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(": ")
}
