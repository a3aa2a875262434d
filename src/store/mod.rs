//! Persistence for calendar events.
//!
//! Handlers only see [`EventStore`]; the MongoDB and in-memory backends map
//! [`EventDocument`] records to and from their native representation.

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use thiserror::Error;

use crate::models::{EventDocument, EventFields};

pub mod memory;
pub mod mongo;

pub use memory::InMemoryEventStore;
pub use mongo::MongoEventStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// A path identifier that is not a valid store key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid event id '{0}'")]
pub struct InvalidEventId(pub String);

/// Converts the public string form of an identifier to the store key.
pub fn parse_event_id(raw: &str) -> Result<ObjectId, InvalidEventId> {
    ObjectId::parse_str(raw).map_err(|_| InvalidEventId(raw.to_string()))
}

#[async_trait]
pub trait EventStore: Send + Sync {
    /// Every stored event, oldest first.
    async fn list(&self) -> StoreResult<Vec<EventDocument>>;

    /// Stores a new event under a freshly assigned identifier.
    async fn insert(&self, fields: EventFields) -> StoreResult<EventDocument>;

    /// Overwrites the mutable fields of an event. `None` if `id` is unknown.
    async fn replace(
        &self,
        id: ObjectId,
        fields: EventFields,
    ) -> StoreResult<Option<EventDocument>>;

    /// Removes an event. `false` if nothing matched.
    async fn delete(&self, id: ObjectId) -> StoreResult<bool>;

    /// Round-trip to the backend.
    async fn ping(&self) -> StoreResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_object_id() {
        let id = parse_event_id("507f1f77bcf86cd799439011").unwrap();
        assert_eq!(id.to_hex(), "507f1f77bcf86cd799439011");
    }

    #[test]
    fn rejects_malformed_ids() {
        for raw in ["invalid-id", "", "507f1f77bcf86cd79943901", "507f1f77bcf86cd79943901z"] {
            assert_eq!(
                parse_event_id(raw),
                Err(InvalidEventId(raw.to_string())),
                "{:?}",
                raw
            );
        }
    }
}
