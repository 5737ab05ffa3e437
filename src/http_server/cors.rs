//! # Cross-Origin Handling
//!
//! `OPTIONS` is answered on any path before routing, and the three
//! `Access-Control-Allow-*` headers are set on every response, including errors
//! and fallbacks.

use axum::{
    extract::Request,
    http::{header, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    Json, Router,
};
use tower::ServiceBuilder;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::warn;

use super::feedback_routes::MessageResponse;

pub const ALLOWED_METHODS: &str = "GET, POST, DELETE";
pub const ALLOWED_HEADERS: &str = "Content-Type";

/// Short-circuit pre-flight requests with a 200
pub async fn preflight(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        return (
            StatusCode::OK,
            Json(MessageResponse {
                message: "CORS preflight successful".to_string(),
            }),
        )
            .into_response();
    }

    next.run(request).await
}

/// Wrap `router` with the pre-flight handler and the CORS response headers.
///
/// An origin that is not a valid header value falls back to `*`.
pub fn with_cors(router: Router, allow_origin: &str) -> Router {
    let origin = HeaderValue::from_str(allow_origin).unwrap_or_else(|_| {
        warn!("Invalid CORS origin {:?}, allowing any origin", allow_origin);
        HeaderValue::from_static("*")
    });

    router.layer(
        ServiceBuilder::new()
            .layer(SetResponseHeaderLayer::overriding(
                header::ACCESS_CONTROL_ALLOW_ORIGIN,
                origin,
            ))
            .layer(SetResponseHeaderLayer::overriding(
                header::ACCESS_CONTROL_ALLOW_METHODS,
                HeaderValue::from_static(ALLOWED_METHODS),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                header::ACCESS_CONTROL_ALLOW_HEADERS,
                HeaderValue::from_static(ALLOWED_HEADERS),
            ))
            .layer(middleware::from_fn(preflight)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, routing::get};
    use tower::ServiceExt;

    fn app(origin: &str) -> Router {
        with_cors(Router::new().route("/ping", get(|| async { "pong" })), origin)
    }

    async fn origin_header(app: Router, method: Method) -> (StatusCode, String) {
        let request = axum::http::Request::builder()
            .method(method)
            .uri("/ping")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let origin = response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN]
            .to_str()
            .unwrap()
            .to_string();
        (response.status(), origin)
    }

    #[tokio::test]
    async fn test_configured_origin() {
        let (status, origin) = origin_header(app("https://shop.example"), Method::GET).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(origin, "https://shop.example");
    }

    #[tokio::test]
    async fn test_invalid_origin_falls_back_to_wildcard() {
        let (_, origin) = origin_header(app("bad\norigin"), Method::GET).await;
        assert_eq!(origin, "*");
    }

    #[tokio::test]
    async fn test_options_short_circuits() {
        let (status, _) = origin_header(app("*"), Method::OPTIONS).await;
        assert_eq!(status, StatusCode::OK);
    }
}
