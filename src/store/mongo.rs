use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::bson::{self, doc, oid::ObjectId};
use mongodb::options::{ClientOptions, FindOneAndUpdateOptions, FindOptions, ReturnDocument};
use mongodb::{Client, Collection};
use tracing::info;

use super::{EventStore, StoreResult};
use crate::config::StoreConfig;
use crate::models::{EventDocument, EventFields};

const APP_NAME: &str = "calendar-api";

/// Events collection in MongoDB.
///
/// The driver connects lazily, so construction succeeds even when the
/// server is down; the first operation or [`EventStore::ping`] reports it.
pub struct MongoEventStore {
    client: Client,
    collection: Collection<EventDocument>,
}

impl MongoEventStore {
    pub async fn connect(config: &StoreConfig) -> StoreResult<Self> {
        let mut options = ClientOptions::parse(&config.mongodb_url).await?;
        options.app_name = Some(APP_NAME.to_string());
        options.server_selection_timeout = Some(Duration::from_secs(config.timeout_secs));

        let client = Client::with_options(options)?;
        let collection = client
            .database(&config.database)
            .collection::<EventDocument>(&config.collection);

        info!(
            database = %config.database,
            collection = %config.collection,
            "MongoDB client created"
        );

        Ok(Self { client, collection })
    }

    /// Waits for in-flight operations and closes the connection pool.
    pub async fn shutdown(&self) {
        self.client.clone().shutdown().await;
        info!("MongoDB connection closed");
    }
}

#[async_trait]
impl EventStore for MongoEventStore {
    async fn list(&self) -> StoreResult<Vec<EventDocument>> {
        let options = FindOptions::builder().sort(doc! { "_id": 1 }).build();
        let cursor = self.collection.find(None, options).await?;
        let documents: Vec<EventDocument> = cursor.try_collect().await?;
        Ok(documents)
    }

    async fn insert(&self, fields: EventFields) -> StoreResult<EventDocument> {
        let document = EventDocument::new(ObjectId::new(), fields, Utc::now());
        self.collection.insert_one(&document, None).await?;
        Ok(document)
    }

    async fn replace(
        &self,
        id: ObjectId,
        fields: EventFields,
    ) -> StoreResult<Option<EventDocument>> {
        let update = doc! {
            "$set": {
                "title": fields.title,
                "date": fields.date,
                "startTime": fields.start_time,
                "endTime": fields.end_time,
                "description": fields.description,
                "color": fields.color,
                "updated_at": bson::DateTime::from_chrono(Utc::now()),
            }
        };
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        Ok(self
            .collection
            .find_one_and_update(doc! { "_id": id }, update, options)
            .await?)
    }

    async fn delete(&self, id: ObjectId) -> StoreResult<bool> {
        let result = self.collection.delete_one(doc! { "_id": id }, None).await?;
        Ok(result.deleted_count > 0)
    }

    async fn ping(&self) -> StoreResult<()> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await?;
        Ok(())
    }
}
