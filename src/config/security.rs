use axum::http::{header, HeaderName, HeaderValue};
use axum::Router;
use std::env;
use tower_http::set_header::SetResponseHeaderLayer;

const NOSNIFF: &str = "nosniff";
const DENY: &str = "DENY";
const HSTS_VALUE: &str = "max-age=31536000; includeSubDomains";
const REFERRER_POLICY_VALUE: &str = "strict-origin-when-cross-origin";

/// Response headers stamped onto every API response.
#[derive(Debug, Clone, Copy)]
pub struct SecurityHeaders {
    include_hsts: bool,
}

impl SecurityHeaders {
    pub fn new(include_hsts: bool) -> Self {
        Self { include_hsts }
    }

    pub fn from_env() -> Self {
        let is_production = env::var("RUST_ENV")
            .map(|v| v.to_lowercase() == "production")
            .unwrap_or(false);

        if is_production {
            tracing::info!("Security: HSTS header enabled (production mode)");
        } else {
            tracing::info!("Security: HSTS header disabled (development mode)");
        }

        Self::new(is_production)
    }

    pub fn headers(&self) -> Vec<(HeaderName, HeaderValue)> {
        let mut headers = vec![
            (
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static(NOSNIFF),
            ),
            (header::X_FRAME_OPTIONS, HeaderValue::from_static(DENY)),
            (
                header::REFERRER_POLICY,
                HeaderValue::from_static(REFERRER_POLICY_VALUE),
            ),
        ];

        // HTTPS deployments only
        if self.include_hsts {
            headers.push((
                header::STRICT_TRANSPORT_SECURITY,
                HeaderValue::from_static(HSTS_VALUE),
            ));
        }

        headers
    }

    pub fn apply<S>(&self, router: Router<S>) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        self.headers()
            .into_iter()
            .fold(router, |router, (name, value)| {
                router.layer(SetResponseHeaderLayer::overriding(name, value))
            })
    }
}
