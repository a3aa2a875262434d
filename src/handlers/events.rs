use axum::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, Path, Request, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::info;

use crate::models::{Event, EventFields, EventPayload};
use crate::state::AppState;
use crate::store::parse_event_id;
use crate::utils::error::AppError;
use crate::utils::response::{created, success};
use crate::validation::validate_event;

/// JSON body that has passed every event rule.
///
/// Unparseable bodies and rule violations both reject with a 422. A body
/// sent without `Content-Type` is still read as JSON.
pub struct ValidatedEvent(pub EventFields);

#[async_trait]
impl<S> FromRequest<S> for ValidatedEvent
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = if req.headers().contains_key(header::CONTENT_TYPE) {
            Json::<EventPayload>::from_request(req, state)
                .await
                .map_err(|rejection| AppError::MalformedBody(rejection.body_text()))?
        } else {
            let bytes = Bytes::from_request(req, state)
                .await
                .map_err(|rejection| AppError::MalformedBody(rejection.body_text()))?;
            Json::<EventPayload>::from_bytes(&bytes)
                .map_err(|rejection| AppError::MalformedBody(rejection.body_text()))?
        };

        Ok(ValidatedEvent(validate_event(payload)?))
    }
}

#[derive(Serialize)]
struct DeleteResponse {
    message: &'static str,
    id: String,
}

pub async fn list_events(State(state): State<AppState>) -> Result<Response, AppError> {
    let documents = state
        .store
        .list()
        .await
        .map_err(AppError::store("Failed to retrieve events"))?;

    let events: Vec<Event> = documents.into_iter().map(Event::from).collect();
    info!(count = events.len(), "Retrieved events");

    Ok(success(events).into_response())
}

pub async fn create_event(
    State(state): State<AppState>,
    ValidatedEvent(fields): ValidatedEvent,
) -> Result<Response, AppError> {
    let document = state
        .store
        .insert(fields)
        .await
        .map_err(AppError::store("Failed to create event"))?;

    let event = Event::from(document);
    info!(id = %event.id, title = %event.title, "Created event");

    Ok(created(event).into_response())
}

/// The body is validated by the extractor before the identifier is parsed,
/// so an invalid body is a 422 even when the id is malformed too.
pub async fn update_event(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    ValidatedEvent(fields): ValidatedEvent,
) -> Result<Response, AppError> {
    let id = parse_event_id(&raw_id)?;

    let document = state
        .store
        .replace(id, fields)
        .await
        .map_err(AppError::store("Failed to update event"))?
        .ok_or(AppError::NotFound(raw_id))?;

    let event = Event::from(document);
    info!(id = %event.id, title = %event.title, "Updated event");

    Ok(success(event).into_response())
}

pub async fn delete_event(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_event_id(&raw_id)?;

    let deleted = state
        .store
        .delete(id)
        .await
        .map_err(AppError::store("Failed to delete event"))?;

    if !deleted {
        return Err(AppError::NotFound(raw_id));
    }

    info!(id = %raw_id, "Deleted event");

    Ok(success(DeleteResponse {
        message: "Event deleted successfully",
        id: raw_id,
    })
    .into_response())
}
