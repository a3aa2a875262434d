use axum::extract::State;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::error;

use crate::state::AppState;
use crate::utils::response::success;

pub mod events;

pub use events::{create_event, delete_event, list_events, update_event};

#[derive(Serialize)]
struct HealthPayload {
    status: &'static str,
    version: &'static str,
    database: &'static str,
}

/// Liveness plus a best-effort store ping. An unreachable store is
/// reported in the body; the endpoint itself never fails.
pub async fn health_check(State(state): State<AppState>) -> Response {
    let database = match state.store.ping().await {
        Ok(()) => "connected",
        Err(e) => {
            error!(error = %e, "Database connection failed");
            "disconnected"
        }
    };

    let payload = HealthPayload {
        status: "running",
        version: env!("CARGO_PKG_VERSION"),
        database,
    };

    success(payload).into_response()
}
