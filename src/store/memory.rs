use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use super::{EventStore, StoreError, StoreResult};
use crate::models::{EventDocument, EventFields};

/// Process-local event store with the same semantics as the MongoDB one.
#[derive(Default)]
pub struct InMemoryEventStore {
    events: RwLock<Vec<EventDocument>>,
    offline: AtomicBool,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every call fails as if the backend were unreachable.
    pub fn unavailable() -> Self {
        let store = Self::new();
        store.set_available(false);
        store
    }

    pub fn set_available(&self, available: bool) {
        self.offline.store(!available, Ordering::SeqCst);
    }

    fn check(&self) -> StoreResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(
                "in-memory store is offline".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn list(&self) -> StoreResult<Vec<EventDocument>> {
        self.check()?;
        Ok(self.events.read().await.clone())
    }

    async fn insert(&self, fields: EventFields) -> StoreResult<EventDocument> {
        self.check()?;
        let document = EventDocument::new(ObjectId::new(), fields, Utc::now());
        self.events.write().await.push(document.clone());
        Ok(document)
    }

    async fn replace(
        &self,
        id: ObjectId,
        fields: EventFields,
    ) -> StoreResult<Option<EventDocument>> {
        self.check()?;
        let mut events = self.events.write().await;
        Ok(events.iter_mut().find(|e| e.id == id).map(|document| {
            document.apply(fields, Utc::now());
            document.clone()
        }))
    }

    async fn delete(&self, id: ObjectId) -> StoreResult<bool> {
        self.check()?;
        let mut events = self.events.write().await;
        let before = events.len();
        events.retain(|e| e.id != id);
        Ok(events.len() < before)
    }

    async fn ping(&self) -> StoreResult<()> {
        self.check()
    }
}
