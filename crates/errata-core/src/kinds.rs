/// Declare one or more error kinds
///
/// Each kind becomes a struct with a fixed status code, a default message,
/// and a discriminant equal to its type name. The status is checked against
/// the declared family at compile time, so a `ClientError` kind cannot carry a
/// `5xx` code.
///
/// ```
/// errata_core::http_error! {
///     /// Payment required before the resource can be served
///     pub struct PaymentRequiredError: ClientError(PAYMENT_REQUIRED) = "Payment required";
/// }
///
/// let err = PaymentRequiredError::new();
/// assert_eq!(PaymentRequiredError::STATUS.as_u16(), 402);
/// assert_eq!(errata_core::classify(&err).kind, "PaymentRequiredError");
/// ```
///
/// ```compile_fail
/// errata_core::http_error! {
///     pub struct MislabelledError: ClientError(BAD_GATEWAY) = "Wrong family";
/// }
/// ```
#[macro_export]
macro_rules! http_error {
    ($(
        $(#[$meta:meta])*
        $vis:vis struct $name:ident: $family:ident($status:ident) = $message:literal;
    )+) => {$(
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        $vis struct $name {
            message: ::std::borrow::Cow<'static, str>,
        }

        impl $name {
            /// Status code every instance of this kind carries
            pub const STATUS: $crate::StatusCode = $crate::StatusCode::$status;
            /// Discriminant for this kind
            pub const KIND: &'static str = ::core::stringify!($name);
            /// Message used when none is supplied
            pub const DEFAULT_MESSAGE: &'static str = $message;

            /// Create an error with the default message
            #[must_use]
            pub const fn new() -> Self {
                Self {
                    message: ::std::borrow::Cow::Borrowed(Self::DEFAULT_MESSAGE),
                }
            }

            /// Create an error with a caller-supplied message
            ///
            /// The message is kept verbatim, even when empty.
            #[must_use]
            pub fn with_message(message: impl ::core::convert::Into<::std::borrow::Cow<'static, str>>) -> Self {
                Self {
                    message: message.into(),
                }
            }
        }

        const _: () = ::core::assert!(
            $crate::StatusFamily::$family.contains($name::STATUS.as_u16()),
            ::core::concat!(::core::stringify!($name), " has a status outside its declared family")
        );

        impl ::core::default::Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.message)
            }
        }

        impl $crate::HttpError for $name {
            fn status_code(&self) -> $crate::StatusCode {
                Self::STATUS
            }

            fn kind(&self) -> &'static str {
                Self::KIND
            }

            fn message(&self) -> &str {
                &self.message
            }
        }

        impl ::core::convert::From<$name> for $crate::ApiError {
            fn from(error: $name) -> Self {
                Self::new(error)
            }
        }
    )+};
}

http_error! {
    /// Request failed validation
    pub struct ValidationError: ClientError(BAD_REQUEST) = "Validation failed";

    /// Caller is not authenticated
    pub struct UnauthorizedError: ClientError(UNAUTHORIZED) = "Unauthorized";

    /// Caller is authenticated but not allowed to do this
    pub struct ForbiddenError: ClientError(FORBIDDEN) = "Forbidden";

    /// Requested resource does not exist
    pub struct NotFoundError: ClientError(NOT_FOUND) = "Resource not found";

    /// Request conflicts with the current state of the resource
    pub struct ConflictError: ClientError(CONFLICT) = "Resource conflict";

    /// Caller exceeded its rate limit
    pub struct RateLimitedError: ClientError(TOO_MANY_REQUESTS) = "Too many requests";

    /// Unexpected fault inside the service
    pub struct InternalError: ServerError(INTERNAL_SERVER_ERROR) = "Internal server error";

    /// Upstream dependency returned an invalid response
    pub struct BadGatewayError: ServerError(BAD_GATEWAY) = "Upstream service error";

    /// Service is temporarily unable to handle requests
    pub struct ServiceUnavailableError: ServerError(SERVICE_UNAVAILABLE) = "Service unavailable";

    /// Work did not finish before its deadline
    pub struct TimeoutError: ServerError(GATEWAY_TIMEOUT) = "Request timed out";
}
