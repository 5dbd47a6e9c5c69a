//! Document-store seam. Every lookup is scoped by owning user id in addition
//! to any entity id, so one user's documents are invisible to another.
//!
//! `AppState` holds an `Arc<dyn JournalStore>`, chosen at startup:
//! `PgStore` when `DATABASE_URL` is set, `MemoryStore` otherwise.

use async_trait::async_trait;
use chrono::{DateTime, SubsecRound, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::models::entry::{EntryPatch, JournalEntry, NewEntry};
use crate::models::reflection::{NewReflection, Reflection};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Stored document is malformed: {0}")]
    Corrupt(String),
}

/// Current time at the precision the stores keep (microseconds), so a
/// record handed back from a write matches the one read back later.
pub fn timestamp_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

#[async_trait]
pub trait JournalStore: Send + Sync {
    /// Inserts an entry and returns its generated id.
    async fn insert_entry(&self, entry: &NewEntry) -> Result<Uuid, StoreError>;

    /// All of a user's entries, newest first.
    async fn find_entries(&self, user_id: &str) -> Result<Vec<JournalEntry>, StoreError>;

    async fn find_entry(&self, user_id: &str, id: Uuid)
        -> Result<Option<JournalEntry>, StoreError>;

    /// Applies `patch` and returns the document as it is after the update.
    async fn update_entry(
        &self,
        user_id: &str,
        id: Uuid,
        patch: &EntryPatch,
    ) -> Result<Option<JournalEntry>, StoreError>;

    /// Returns the number of deleted documents (0 or 1).
    async fn delete_entry(&self, user_id: &str, id: Uuid) -> Result<u64, StoreError>;

    async fn insert_reflection(&self, reflection: &NewReflection) -> Result<Uuid, StoreError>;

    /// All of a user's reflections, newest first.
    async fn find_reflections(&self, user_id: &str) -> Result<Vec<Reflection>, StoreError>;

    /// A user's reflections derived from one entry, newest first.
    async fn find_reflections_by_entry(
        &self,
        user_id: &str,
        entry_id: Uuid,
    ) -> Result<Vec<Reflection>, StoreError>;
}
