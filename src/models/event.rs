use chrono::{DateTime, Utc};
use mongodb::bson::{self, oid::ObjectId};
use serde::{Deserialize, Serialize};

/// Color given to events created without one.
pub const DEFAULT_COLOR: &str = "#3B82F6";

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

/// Body of `POST /events` and `PUT /events/{id}`, before validation.
///
/// An `id` sent by the client is not part of this shape and is dropped
/// during deserialization.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
    pub title: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_color")]
    pub color: String,
}

/// The mutable fields of an event after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventFields {
    pub title: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub description: String,
    pub color: String,
}

/// Record shape of the `events` collection.
///
/// Timestamps are optional so that records written before they were
/// tracked still load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub date: String,
    #[serde(rename = "startTime")]
    pub start_time: String,
    #[serde(rename = "endTime")]
    pub end_time: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<bson::DateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<bson::DateTime>,
}

impl EventDocument {
    /// Builds a fresh record with both timestamps set to `now`.
    pub fn new(id: ObjectId, fields: EventFields, now: DateTime<Utc>) -> Self {
        let stamp = Some(bson::DateTime::from_chrono(now));
        Self {
            id,
            title: fields.title,
            date: fields.date,
            start_time: fields.start_time,
            end_time: fields.end_time,
            description: fields.description,
            color: fields.color,
            created_at: stamp,
            updated_at: stamp,
        }
    }

    /// Replaces every mutable field and refreshes `updated_at`.
    /// `id` and `created_at` are left alone.
    pub fn apply(&mut self, fields: EventFields, now: DateTime<Utc>) {
        self.title = fields.title;
        self.date = fields.date;
        self.start_time = fields.start_time;
        self.end_time = fields.end_time;
        self.description = fields.description;
        self.color = fields.color;
        self.updated_at = Some(bson::DateTime::from_chrono(now));
    }

    pub fn fields(&self) -> EventFields {
        EventFields {
            title: self.title.clone(),
            date: self.date.clone(),
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
            description: self.description.clone(),
            color: self.color.clone(),
        }
    }
}

/// Public shape of an event as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub description: String,
    pub color: String,
}

impl From<EventDocument> for Event {
    fn from(document: EventDocument) -> Self {
        Self {
            id: document.id.to_hex(),
            title: document.title,
            date: document.date,
            start_time: document.start_time,
            end_time: document.end_time,
            description: document.description,
            color: document.color,
        }
    }
}
