//! In-process application wired through the error rendering layer

use axum::Router;
use axum::body::Body;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use errata_config::Config;
use errata_core::{
    ApiError, BadGatewayError, ConflictError, ForbiddenError, InternalError, NotFoundError, RateLimitedError,
    ResultExt, ServiceUnavailableError, TimeoutError, UnauthorizedError, ValidationError,
};
use errata_server::{ErrorResponse, Result};
use http::{HeaderMap, StatusCode, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

errata_core::http_error! {
    /// Kind declared outside the core crate
    pub struct PaymentRequiredError: ClientError(PAYMENT_REQUIRED) = "Payment required";
}

/// Response captured from a single request
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// Parse the body as JSON
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("response body is JSON")
    }
}

/// Router under test
pub struct TestApp {
    router: Router,
}

impl TestApp {
    /// Build the app with the given configuration
    pub fn start(config: &Config) -> Self {
        Self {
            router: errata_server::with_error_rendering(routes(), &config.errors),
        }
    }

    /// Issue a `GET` request
    pub async fn get(&self, path: &str) -> TestResponse {
        let request = http::Request::get(path).body(Body::empty()).expect("valid request");
        let response = self.router.clone().oneshot(request).await.expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.expect("readable body").to_bytes();

        TestResponse {
            status,
            headers,
            body: String::from_utf8(bytes.to_vec()).expect("utf-8 body"),
        }
    }
}

fn routes() -> Router {
    Router::new()
        .route("/ok", get(|| async { "ok" }))
        .route("/validation", get(|| async { fail(ValidationError::with_message("name is required")) }))
        .route("/unauthorized", get(|| async { fail(UnauthorizedError::new()) }))
        .route("/forbidden", get(|| async { fail(ForbiddenError::new()) }))
        .route("/not-found", get(|| async { fail(NotFoundError::new()) }))
        .route("/conflict", get(|| async { fail(ConflictError::new()) }))
        .route("/rate-limited", get(rate_limited))
        .route("/internal", get(|| async { fail(InternalError::with_message("db down")) }))
        .route("/bad-gateway", get(|| async { fail(BadGatewayError::new()) }))
        .route("/unavailable", get(|| async { fail(ServiceUnavailableError::new()) }))
        .route("/timeout", get(|| async { fail(TimeoutError::new()) }))
        .route("/payment", get(|| async { fail(PaymentRequiredError::new()) }))
        .route("/unclassified", get(unclassified))
        .route("/with-context", get(with_context))
}

fn fail(error: impl Into<ApiError>) -> Result<&'static str> {
    Err(ErrorResponse::from(error))
}

async fn rate_limited() -> Response {
    (
        [(header::RETRY_AFTER, "30")],
        ErrorResponse::from(RateLimitedError::new()),
    )
        .into_response()
}

async fn unclassified() -> Result<String> {
    let raw = std::fs::read_to_string("/nonexistent/secrets/db-password")?;
    Ok(raw)
}

async fn with_context() -> Result<&'static str> {
    let lookup: std::result::Result<&'static str, NotFoundError> = Err(NotFoundError::with_message("order 42 not found"));
    Ok(lookup.context("loading order for invoice")?)
}
