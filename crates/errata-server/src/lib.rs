#![allow(clippy::must_use_candidate)]

//! Axum rendering boundary for the errata taxonomy
//!
//! Handlers return [`ErrorResponse`] (usually through [`Result`]). The
//! middleware installed by [`with_error_rendering`] is the one place where
//! errors are logged and turned into `{statusCode, message}` bodies.

mod middleware;
mod render;
mod response;

use std::sync::Arc;

use axum::Router;
use errata_config::ErrorsConfig;

pub use render::{ErrorBody, ErrorRenderer};
pub use response::{ErrorResponse, Result};

/// Attach the centralised error rendering layer to a router
///
/// Every response produced from an [`ErrorResponse`] is re-rendered with the
/// configured policy and logged once.
pub fn with_error_rendering<S>(router: Router<S>, config: &ErrorsConfig) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let renderer = Arc::new(ErrorRenderer::new(config));

    router.layer(axum::middleware::from_fn(move |req, next| {
        let renderer = Arc::clone(&renderer);
        async move { middleware::render_errors(renderer, req, next).await }
    }))
}
