//! # Security Headers Middleware
//!
//! Adds standard security headers to all HTTP responses following
//! OWASP recommended practices.

use axum::{
    extract::Request,
    http::{self, header::HeaderName},
    middleware::Next,
    response::Response,
};

fn insert_header(headers: &mut http::HeaderMap, name: &str, value: &str) {
    if let (Ok(name), Ok(value)) = (name.parse::<HeaderName>(), value.parse::<http::HeaderValue>()) {
        headers.insert(name, value);
    }
    else {
        tracing::warn!("Failed to insert header: {} = {}", name, value);
    }
}

/// Security headers middleware
///
/// Adds the following headers to every response:
/// - Content-Security-Policy: Restricts resource loading origins
/// - X-Frame-Options: Prevents clickjacking
/// - X-Content-Type-Options: Prevents MIME sniffing
/// - Referrer-Policy: Controls referrer information
/// - Strict-Transport-Security: Forces HTTPS (only if TLS is enabled)
/// - Cache-Control: Prevents sensitive data caching for API responses
pub async fn security_headers_middleware(request: Request, next: Next, enable_tls: bool) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    insert_header(
        headers,
        "Content-Security-Policy",
        "default-src 'none'; frame-ancestors 'none'",
    );
    insert_header(headers, "X-Frame-Options", "DENY");
    insert_header(headers, "X-Content-Type-Options", "nosniff");
    insert_header(headers, "Referrer-Policy", "strict-origin-when-cross-origin");

    if enable_tls {
        insert_header(
            headers,
            "Strict-Transport-Security",
            "max-age=31536000; includeSubDomains",
        );
    }

    insert_header(headers, "Cache-Control", "no-store, no-cache, must-revalidate, private");

    response
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::Request, http::StatusCode, middleware::from_fn, routing::get, Router};
    use tower::ServiceExt;

    use super::*;

    async fn dummy_handler() -> &'static str {
        "OK"
    }

    #[tokio::test]
    async fn test_security_headers_present() {
        let app = Router::new()
            .route("/test", get(dummy_handler))
            .layer(from_fn(|req, next| security_headers_middleware(req, next, true)));

        let request = Request::builder().uri("/test").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let headers = response.headers();
        assert!(headers.contains_key("content-security-policy"));
        assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
        assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
        assert!(headers.contains_key("referrer-policy"));
        assert!(headers.contains_key("strict-transport-security"));
        assert!(headers.contains_key("cache-control"));
    }

    #[tokio::test]
    async fn test_hsts_disabled_without_tls() {
        let app = Router::new()
            .route("/test", get(dummy_handler))
            .layer(from_fn(|req, next| security_headers_middleware(req, next, false)));

        let request = Request::builder().uri("/test").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert!(!response.headers().contains_key("strict-transport-security"));
    }
}
