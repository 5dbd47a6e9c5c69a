//! Entry CRUD against the document store.
//!
//! Every operation is scoped to `user_id`; an id owned by someone else is
//! indistinguishable from an id that does not exist.

use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::entry::{EntryPatch, EntryRequest, JournalEntry, NewEntry};
use crate::store::{timestamp_now, JournalStore};

/// Parses a wire identifier. Anything that is not a UUID is `InvalidIdentifier`.
pub fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| AppError::InvalidIdentifier(format!("'{raw}' is not a valid identifier")))
}

fn entry_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Journal entry {id} not found"))
}

pub async fn create_entry(
    store: &dyn JournalStore,
    user_id: &str,
    request: EntryRequest,
) -> Result<JournalEntry, AppError> {
    request.validate()?;

    let draft = NewEntry {
        user_id: user_id.to_string(),
        title: request.title,
        content: request.content,
        tags: request.tags,
        mood: request.mood,
        created_at: timestamp_now(),
    };
    let id = store.insert_entry(&draft).await?;
    info!("Created journal entry {id}");

    Ok(draft.into_entry(id))
}

pub async fn list_entries(
    store: &dyn JournalStore,
    user_id: &str,
) -> Result<Vec<JournalEntry>, AppError> {
    Ok(store.find_entries(user_id).await?)
}

pub async fn get_entry(
    store: &dyn JournalStore,
    user_id: &str,
    entry_id: &str,
) -> Result<JournalEntry, AppError> {
    let id = parse_id(entry_id)?;
    store
        .find_entry(user_id, id)
        .await?
        .ok_or_else(|| entry_not_found(id))
}

/// Replaces title, content, tags and mood. Id, owner and `created_at` are kept.
pub async fn update_entry(
    store: &dyn JournalStore,
    user_id: &str,
    entry_id: &str,
    request: EntryRequest,
) -> Result<JournalEntry, AppError> {
    let id = parse_id(entry_id)?;
    request.validate()?;

    let patch = EntryPatch {
        title: request.title,
        content: request.content,
        tags: request.tags,
        mood: request.mood,
        updated_at: timestamp_now(),
    };
    store
        .update_entry(user_id, id, &patch)
        .await?
        .ok_or_else(|| entry_not_found(id))
}

pub async fn delete_entry(
    store: &dyn JournalStore,
    user_id: &str,
    entry_id: &str,
) -> Result<(), AppError> {
    let id = parse_id(entry_id)?;
    if store.delete_entry(user_id, id).await? == 0 {
        return Err(entry_not_found(id));
    }
    info!("Deleted journal entry {id}");
    Ok(())
}
