//! Entity Model
//!
//! The store persists any serde-serializable entity that can answer three
//! questions: what is your id, are you deleted, and when are you dated.
//! Everything else is opaque payload that round-trips through the log
//! untouched.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Contract between the store and the entities it persists.
///
/// - `Uuid::nil()` is the "no id assigned yet" sentinel; the store assigns
///   real ids on create/initialize and rejects pre-assigned ones on create.
/// - `Default` is used to synthesize tombstone payloads on delete.
pub trait Entity: Serialize + DeserializeOwned + Default {
    /// Current identifier (`Uuid::nil()` if unassigned)
    fn id(&self) -> Uuid;

    /// Assign the identifier
    fn set_id(&mut self, id: Uuid);

    /// Soft-delete tombstone flag
    fn is_deleted(&self) -> bool;

    /// Mark or unmark the entity as deleted
    fn set_deleted(&mut self, deleted: bool);

    /// Timestamp used for ordering and year aggregation
    fn date(&self) -> DateTime<Utc>;
}

/// A news article, the canonical entity this store was built for
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// Identifier assigned by the store (`Uuid::nil()` before creation)
    pub id: Uuid,

    /// Headline
    pub title: String,

    /// Body text
    pub body: String,

    /// Publication date
    pub date: DateTime<Utc>,

    /// Soft-delete flag
    pub is_deleted: bool,
}

impl Article {
    /// Create an unsaved article (id left unassigned)
    pub fn new(title: impl Into<String>, body: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::nil(),
            title: title.into(),
            body: body.into(),
            date,
            is_deleted: false,
        }
    }
}

impl Entity for Article {
    fn id(&self) -> Uuid {
        self.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }

    fn is_deleted(&self) -> bool {
        self.is_deleted
    }

    fn set_deleted(&mut self, deleted: bool) {
        self.is_deleted = deleted;
    }

    fn date(&self) -> DateTime<Utc> {
        self.date
    }
}
