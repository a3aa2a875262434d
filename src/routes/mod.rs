use axum::http::{HeaderValue, Request};
use axum::{
    routing::{get, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::config::{create_cors_layer, SecurityHeaders};
use crate::handlers::{create_event, delete_event, health_check, list_events, update_event};
use crate::state::AppState;

/// Tags requests that arrive without an `x-request-id`.
#[derive(Clone, Copy, Default)]
struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = HeaderValue::from_str(&Uuid::new_v4().to_string()).ok()?;
        Some(RequestId::new(id))
    }
}

pub fn create_routes(state: AppState) -> Router {
    let router = Router::new()
        .route("/", get(health_check))
        .route("/health", get(health_check))
        .route("/events", get(list_events).post(create_event))
        .route("/events/:id", put(update_event).delete(delete_event))
        .with_state(state);

    SecurityHeaders::from_env()
        .apply(router)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .layer(create_cors_layer())
}
