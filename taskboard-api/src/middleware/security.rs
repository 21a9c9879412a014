/// Security headers middleware
///
/// Adds response hardening headers following OWASP recommendations. HSTS is
/// only emitted when the server actually sits behind HTTPS (production).

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};

/// Appends security headers to every response
///
/// Used via `axum::middleware::from_fn` in the router builder.
pub async fn security_headers(req: Request, next: Next, enable_hsts: bool) -> Response {
    let mut response = next.run(req).await;

    let headers = response.headers_mut();
    headers.insert(
        "X-Content-Type-Options",
        HeaderValue::from_static("nosniff"),
    );
    headers.insert("X-Frame-Options", HeaderValue::from_static("DENY"));
    headers.insert(
        "Referrer-Policy",
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );

    if enable_hsts {
        headers.insert(
            "Strict-Transport-Security",
            HeaderValue::from_static("max-age=31536000; includeSubDomains"),
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode, response::IntoResponse, routing::get, Router};
    use tower::Service as _;

    async fn handler() -> impl IntoResponse {
        (StatusCode::OK, "ok")
    }

    fn app(enable_hsts: bool) -> Router {
        Router::new()
            .route("/test", get(handler))
            .layer(axum::middleware::from_fn(move |req, next| {
                security_headers(req, next, enable_hsts)
            }))
    }

    #[tokio::test]
    async fn test_security_headers_applied() {
        let mut app = app(false);

        let response = app
            .call(Request::builder().uri("/test").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let headers = response.headers();
        assert_eq!(headers.get("X-Content-Type-Options").unwrap(), "nosniff");
        assert_eq!(headers.get("X-Frame-Options").unwrap(), "DENY");
        assert!(headers.get("Strict-Transport-Security").is_none());
    }

    #[tokio::test]
    async fn test_hsts_enabled_in_production() {
        let mut app = app(true);

        let response = app
            .call(Request::builder().uri("/test").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert!(response.headers().get("Strict-Transport-Security").is_some());
    }
}
