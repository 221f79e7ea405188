use std::fmt;

use http::StatusCode;

use crate::{HttpError, InternalError};

/// Error type returned by request handlers
///
/// Holds either a member of the taxonomy (any [`HttpError`]) or an
/// unclassified foreign error. Both convert in with `?`: kinds through their
/// generated `From` impl, anything implementing [`std::error::Error`] through
/// the blanket impl below.
///
/// Like `anyhow::Error`, this type does not implement
/// [`std::error::Error`] itself; that is what makes the blanket conversion
/// possible.
pub struct ApiError {
    repr: Repr,
}

#[derive(Debug)]
enum Repr {
    Classified {
        error: Box<dyn HttpError>,
        /// Innermost first
        context: Vec<String>,
        source: Option<anyhow::Error>,
    },
    Unclassified(anyhow::Error),
}

impl ApiError {
    /// Wrap a taxonomy member
    pub fn new(error: impl HttpError) -> Self {
        Self {
            repr: Repr::Classified {
                error: Box::new(error),
                context: Vec::new(),
                source: None,
            },
        }
    }

    /// Wrap a foreign error that has no place in the taxonomy
    ///
    /// Use this for values that already are an `anyhow::Error`; plain
    /// [`std::error::Error`] types convert through `From`.
    pub fn unclassified(error: impl Into<anyhow::Error>) -> Self {
        Self {
            repr: Repr::Unclassified(error.into()),
        }
    }

    /// Attach context for diagnostics
    ///
    /// Context only ever reaches logs. Status code, kind and client message
    /// are preserved.
    #[must_use]
    pub fn context<C>(self, context: C) -> Self
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        let repr = match self.repr {
            Repr::Classified {
                error,
                context: mut stack,
                source,
            } => {
                stack.push(context.to_string());
                Repr::Classified {
                    error,
                    context: stack,
                    source,
                }
            }
            Repr::Unclassified(error) => Repr::Unclassified(error.context(context)),
        };
        Self { repr }
    }

    /// Record the internal cause of an error
    ///
    /// Replaces any previously recorded cause on a classified error. An
    /// unclassified error keeps its own cause and gets this one attached as
    /// context.
    #[must_use]
    pub fn with_source(self, cause: impl Into<anyhow::Error>) -> Self {
        let cause = cause.into();
        let repr = match self.repr {
            Repr::Classified { error, context, .. } => Repr::Classified {
                error,
                context,
                source: Some(cause),
            },
            Repr::Unclassified(error) => Repr::Unclassified(error.context(format!("{cause:#}"))),
        };
        Self { repr }
    }

    /// Whether this error is a member of the taxonomy
    pub const fn is_classified(&self) -> bool {
        matches!(self.repr, Repr::Classified { .. })
    }

    /// The taxonomy member, if there is one
    pub fn as_http_error(&self) -> Option<&dyn HttpError> {
        match &self.repr {
            Repr::Classified { error, .. } => Some(error.as_ref()),
            Repr::Unclassified(_) => None,
        }
    }

    /// Status code to respond with
    pub fn status_code(&self) -> StatusCode {
        self.as_http_error()
            .map_or(InternalError::STATUS, HttpError::status_code)
    }

    /// Discriminant of the kind, `InternalError` for unclassified errors
    pub fn kind(&self) -> &'static str {
        self.as_http_error().map_or(InternalError::KIND, HttpError::kind)
    }

    /// Message safe to expose to API consumers
    ///
    /// Unclassified errors never leak their own text here.
    pub fn message(&self) -> &str {
        self.as_http_error()
            .map_or(InternalError::DEFAULT_MESSAGE, HttpError::message)
    }

    /// Internal diagnostic text, never meant for API consumers
    ///
    /// Context is listed outermost first, followed by the recorded cause.
    pub fn detail(&self) -> Option<String> {
        match &self.repr {
            Repr::Classified { context, source, .. } => {
                let parts: Vec<String> = context
                    .iter()
                    .rev()
                    .cloned()
                    .chain(source.iter().map(|s| format!("{s:#}")))
                    .collect();
                (!parts.is_empty()).then(|| parts.join(": "))
            }
            Repr::Unclassified(error) => Some(format!("{error:#}")),
        }
    }
}

impl<E> From<E> for ApiError
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn from(error: E) -> Self {
        Self::unclassified(error)
    }
}

impl fmt::Debug for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.repr.fmt(f)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            Repr::Classified { error, .. } => write!(f, "{} ({}): {error}", error.kind(), error.status_code()),
            Repr::Unclassified(error) => write!(f, "unclassified: {error}"),
        }
    }
}

/// Context helpers for results that convert into [`ApiError`]
pub trait ResultExt<T> {
    /// Convert the error and attach context
    ///
    /// # Errors
    ///
    /// Returns the original error, converted into [`ApiError`] with `context`
    /// attached
    fn context<C>(self, context: C) -> Result<T, ApiError>
    where
        C: fmt::Display + Send + Sync + 'static;

    /// Like [`ResultExt::context`], but only builds the context on failure
    ///
    /// # Errors
    ///
    /// Returns the original error, converted into [`ApiError`] with the
    /// produced context attached
    fn with_context<C, F>(self, f: F) -> Result<T, ApiError>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<ApiError>,
{
    fn context<C>(self, context: C) -> Result<T, ApiError>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| e.into().context(context))
    }

    fn with_context<C, F>(self, f: F) -> Result<T, ApiError>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|e| e.into().context(f()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ConflictError, NotFoundError};

    fn lookup(found: bool) -> Result<u32, NotFoundError> {
        if found { Ok(7) } else { Err(NotFoundError::with_message("no such user")) }
    }

    fn read_missing_file() -> Result<String, ApiError> {
        let text = std::fs::read_to_string("/definitely/not/here/errata.toml")?;
        Ok(text)
    }

    #[test]
    fn classified_accessors() {
        let err = ApiError::from(ConflictError::new());
        assert!(err.is_classified());
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.kind(), "ConflictError");
        assert_eq!(err.message(), "Resource conflict");
        assert!(err.detail().is_none());
    }

    #[test]
    fn foreign_error_is_unclassified() {
        let err = read_missing_file().unwrap_err();
        assert!(!err.is_classified());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.kind(), "InternalError");
        assert_eq!(err.message(), "Internal server error");
        assert!(err.detail().is_some());
    }

    #[test]
    fn context_preserves_status_kind_and_message() {
        let err = lookup(false).context("loading profile").unwrap_err().context("handling GET /me");

        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.kind(), "NotFoundError");
        assert_eq!(err.message(), "no such user");
        assert_eq!(err.detail().as_deref(), Some("handling GET /me: loading profile"));
    }

    #[test]
    fn with_context_is_lazy() {
        let mut called = false;
        let value = lookup(true)
            .with_context(|| {
                called = true;
                "unused"
            })
            .unwrap();
        assert_eq!(value, 7);
        assert!(!called);
    }

    #[test]
    fn source_is_reported_in_detail_only() {
        let err = ApiError::from(crate::InternalError::with_message("db down"))
            .with_source(anyhow::anyhow!("connection refused"))
            .context("saving order");

        assert_eq!(err.message(), "db down");
        assert_eq!(err.detail().as_deref(), Some("saving order: connection refused"));
    }

    #[test]
    fn unclassified_keeps_attached_source() {
        let err = ApiError::unclassified(anyhow::anyhow!("pool exhausted"))
            .with_source(anyhow::anyhow!("upstream replica lagging"));

        assert!(!err.is_classified());
        assert_eq!(err.message(), "Internal server error");
        let detail = err.detail().unwrap();
        assert!(detail.contains("upstream replica lagging"));
        assert!(detail.contains("pool exhausted"));
    }

    #[test]
    fn unclassified_context_stays_internal() {
        let err = ApiError::unclassified(anyhow::anyhow!("secret token abc123")).context("calling billing");

        assert_eq!(err.message(), "Internal server error");
        let detail = err.detail().unwrap();
        assert!(detail.contains("calling billing"));
        assert!(detail.contains("secret token abc123"));
    }

    #[test]
    fn display_names_the_kind() {
        let err = ApiError::from(ConflictError::with_message("email taken"));
        assert_eq!(err.to_string(), "ConflictError (409 Conflict): email taken");
    }
}
