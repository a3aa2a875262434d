use axum::http::{header, HeaderName, HeaderValue, Method};
use std::env;
use tower_http::cors::{AllowOrigin, CorsLayer};

const DEFAULT_ALLOWED_ORIGINS: &str = "*";

const PREFLIGHT_MAX_AGE_SECS: u64 = 86400;

pub fn create_cors_layer() -> CorsLayer {
    let origins =
        env::var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGINS.to_string());
    cors_layer_for(&origins)
}

/// Builds the CORS policy for a comma-separated origin list.
///
/// A wildcard allows any origin without credentials; browsers refuse
/// credentialed responses carrying `Access-Control-Allow-Origin: *`.
pub fn cors_layer_for(origins: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::ORIGIN,
            HeaderName::from_static("x-requested-with"),
        ])
        .expose_headers([
            header::CONTENT_LENGTH,
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
        .max_age(std::time::Duration::from_secs(PREFLIGHT_MAX_AGE_SECS));

    match parse_origins(origins) {
        Some(list) => {
            tracing::info!("CORS: Configured with {} allowed origin(s)", list.len());
            layer
                .allow_origin(AllowOrigin::list(list))
                .allow_credentials(true)
        }
        None => {
            tracing::info!("CORS: Allowing any origin");
            layer.allow_origin(AllowOrigin::any())
        }
    }
}

/// `None` means any origin.
fn parse_origins(origins: &str) -> Option<Vec<HeaderValue>> {
    let mut parsed = Vec::new();

    for origin in origins.split(',').map(str::trim).filter(|o| !o.is_empty()) {
        if origin == "*" {
            return None;
        }
        match origin.parse::<HeaderValue>() {
            Ok(value) => {
                tracing::debug!("CORS: Allowing origin: {}", origin);
                parsed.push(value);
            }
            Err(e) => tracing::warn!("CORS: Invalid origin '{}': {}", origin, e),
        }
    }

    if parsed.is_empty() {
        tracing::warn!("CORS: No valid origins configured, allowing any origin");
        None
    } else {
        Some(parsed)
    }
}
