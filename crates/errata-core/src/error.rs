use std::fmt;

use http::StatusCode;

/// Capability shared by every error kind in the taxonomy
///
/// A kind is a plain value carrying a fixed status code, a message safe to
/// show API consumers, and its own type name as a discriminant. The rendering
/// boundary only ever talks to this trait, so new kinds plug in without any
/// central list to update.
///
/// Kinds deliberately do not implement [`std::error::Error`]. That keeps them
/// from silently erasing into a foreign error type where their status would be
/// lost; they convert into [`ApiError`](crate::ApiError) instead.
pub trait HttpError: fmt::Debug + fmt::Display + Send + Sync + 'static {
    /// HTTP status code for this error
    fn status_code(&self) -> StatusCode;

    /// Discriminant naming the concrete kind (e.g. `ConflictError`)
    ///
    /// Metadata for logs and serialization, never for branching.
    fn kind(&self) -> &'static str;

    /// Message safe to expose to API consumers
    fn message(&self) -> &str;

    /// Status family the code belongs to
    fn family(&self) -> StatusFamily {
        StatusFamily::of(self.status_code())
    }
}

/// Status range a kind is allowed to live in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusFamily {
    /// `4xx`: the caller did something wrong
    ClientError,
    /// `5xx`: the service failed
    ServerError,
}

impl StatusFamily {
    /// Whether `status` falls inside this family
    pub const fn contains(self, status: u16) -> bool {
        match self {
            Self::ClientError => matches!(status, 400..=499),
            Self::ServerError => matches!(status, 500..=599),
        }
    }

    /// Family of an arbitrary status code
    ///
    /// Anything below `5xx` counts as a client error, since a successful or
    /// informational code is never a valid fault status.
    pub const fn of(status: StatusCode) -> Self {
        if status.as_u16() >= 500 {
            Self::ServerError
        } else {
            Self::ClientError
        }
    }
}

impl fmt::Display for StatusFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClientError => f.write_str("client_error"),
            Self::ServerError => f.write_str("server_error"),
        }
    }
}
