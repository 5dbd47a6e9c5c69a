use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::errors::AppError;

/// A user-authored journal record. Never touched by the reflection pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct JournalEntry {
    pub id: Uuid,
    pub user_id: String,
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of both `POST /entries` and `PUT /entries/:id`.
#[derive(Debug, Clone, Deserialize)]
pub struct EntryRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub tags: Option<Vec<String>>,
    pub mood: Option<String>,
}

impl EntryRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.title.trim().is_empty() || self.content.trim().is_empty() {
            return Err(AppError::Validation(
                "Title and content are required".to_string(),
            ));
        }
        Ok(())
    }
}

/// An entry as handed to the store for insertion; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewEntry {
    pub user_id: String,
    pub title: String,
    pub content: String,
    pub tags: Option<Vec<String>>,
    pub mood: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl NewEntry {
    pub fn into_entry(self, id: Uuid) -> JournalEntry {
        JournalEntry {
            id,
            user_id: self.user_id,
            title: self.title,
            content: self.content,
            tags: self.tags,
            mood: self.mood,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}

/// Fields replaced by an update. Id, owner and `created_at` are never patched.
#[derive(Debug, Clone)]
pub struct EntryPatch {
    pub title: String,
    pub content: String,
    pub tags: Option<Vec<String>>,
    pub mood: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl EntryPatch {
    pub fn apply(&self, entry: &mut JournalEntry) {
        entry.title = self.title.clone();
        entry.content = self.content.clone();
        entry.tags = self.tags.clone();
        entry.mood = self.mood.clone();
        entry.updated_at = self.updated_at;
    }
}
