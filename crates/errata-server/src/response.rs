use axum::response::{IntoResponse, Response};
use errata_core::{ApiError, classify};

use crate::ErrorRenderer;

pub type Result<T, E = ErrorResponse> = std::result::Result<T, E>;

/// Error returned from axum handlers
///
/// Anything that converts into [`ApiError`] converts into this, so handlers
/// can use `?` on taxonomy kinds and foreign errors alike.
#[derive(Debug)]
pub struct ErrorResponse(ApiError);

impl ErrorResponse {
    /// The wrapped error
    pub const fn api_error(&self) -> &ApiError {
        &self.0
    }

    /// Unwrap into the underlying error
    pub fn into_inner(self) -> ApiError {
        self.0
    }
}

impl<E> From<E> for ErrorResponse
where
    E: Into<ApiError>,
{
    fn from(error: E) -> Self {
        Self(error.into())
    }
}

impl IntoResponse for ErrorResponse {
    /// Render with the default policy and attach the classification
    ///
    /// The rendering middleware picks the classification up from the
    /// response extensions to apply the configured policy and log it.
    fn into_response(self) -> Response {
        let classification = classify(&self.0);
        let mut response = ErrorRenderer::default().render(&classification);
        response.extensions_mut().insert(classification);
        response
    }
}

#[cfg(test)]
mod tests {
    use errata_core::{Classification, NotFoundError, ResultExt};
    use http::StatusCode;

    use super::*;

    fn find_user(id: u32) -> Result<&'static str> {
        if id == 1 {
            return Ok("ada");
        }
        Err(NotFoundError::with_message("no such user")).context(format!("user {id}"))?
    }

    #[test]
    fn question_mark_converts_kinds() {
        let err = find_user(2).unwrap_err();
        assert_eq!(err.api_error().status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.api_error().detail().as_deref(), Some("user 2"));
    }

    #[test]
    fn question_mark_converts_foreign_errors() {
        fn parse(raw: &str) -> Result<u32> {
            Ok(raw.parse::<u32>()?)
        }

        let err = parse("forty-two").unwrap_err().into_inner();
        assert!(!err.is_classified());
    }

    #[test]
    fn response_carries_classification() {
        let response = ErrorResponse::from(NotFoundError::new()).into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let classification = response.extensions().get::<Classification>().unwrap();
        assert_eq!(classification.kind, "NotFoundError");
    }
}
