use std::sync::Arc;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use errata_core::Classification;

use crate::ErrorRenderer;

/// Centralised error rendering middleware
///
/// Looks for the [`Classification`] an [`ErrorResponse`](crate::ErrorResponse)
/// leaves in the response extensions, logs it, and re-renders the body with
/// the configured policy. Headers set by the handler are kept.
pub async fn render_errors(renderer: Arc<ErrorRenderer>, request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();

    let mut response = next.run(request).await;

    let Some(classification) = response.extensions_mut().remove::<Classification>() else {
        return response;
    };

    {
        let _span = tracing::info_span!("error_response", %method, %path).entered();
        renderer.log(&classification);
    }

    let (mut parts, _) = response.into_parts();
    let (rendered, body) = renderer.render(&classification).into_parts();

    parts.status = rendered.status;
    parts.headers.extend(rendered.headers);

    Response::from_parts(parts, body)
}
