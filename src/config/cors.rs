use axum::http::{header, HeaderValue, Method};
use std::env;
use tower_http::cors::{AllowOrigin, CorsLayer};

const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000";

const PREFLIGHT_MAX_AGE_SECS: u64 = 3600;

/// Build the CORS layer from `CORS_ALLOWED_ORIGINS` (comma-separated).
///
/// The API is consumed by a browser frontend on a different origin, so the
/// layer allows credentials and the usual JSON request headers. With no
/// valid configured origin it falls back to the localhost development origin.
pub fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(allowed_origins())
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
            header::ORIGIN,
        ])
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(PREFLIGHT_MAX_AGE_SECS))
}

fn allowed_origins() -> AllowOrigin {
    let configured =
        env::var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGINS.to_string());

    let mut origins: Vec<HeaderValue> = Vec::new();
    for origin in configured.split(',') {
        let trimmed = origin.trim();
        if trimmed.is_empty() {
            continue;
        }
        match trimmed.parse::<HeaderValue>() {
            Ok(value) => origins.push(value),
            Err(e) => tracing::warn!("CORS: ignoring invalid origin '{}': {}", trimmed, e),
        }
    }

    if origins.is_empty() {
        // allow_credentials(true) is incompatible with a wildcard origin,
        // so fall back to the development default instead.
        tracing::warn!(
            "CORS: no valid origins configured, falling back to {}",
            DEFAULT_ALLOWED_ORIGINS
        );
        AllowOrigin::exact(HeaderValue::from_static(DEFAULT_ALLOWED_ORIGINS))
    } else {
        tracing::info!("CORS: configured with {} allowed origin(s)", origins.len());
        AllowOrigin::list(origins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_cors_layer() {
        let _layer = create_cors_layer();
    }

    #[test]
    fn test_default_origin_is_valid() {
        assert!(DEFAULT_ALLOWED_ORIGINS.parse::<HeaderValue>().is_ok());
    }
}
