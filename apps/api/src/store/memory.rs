use std::cmp::Reverse;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::entry::{EntryPatch, JournalEntry, NewEntry};
use crate::models::reflection::{NewReflection, Reflection};
use crate::store::{JournalStore, StoreError};

/// In-process store with the same per-user scoping as `PgStore`.
/// Used when no `DATABASE_URL` is configured, and throughout the tests.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

#[derive(Default)]
struct Collections {
    entries: Vec<JournalEntry>,
    reflections: Vec<Reflection>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Newest first; on equal timestamps the later insert comes first.
fn newest_first<T: Clone>(
    docs: &[T],
    keep: impl Fn(&T) -> bool,
    created_at: impl Fn(&T) -> DateTime<Utc>,
) -> Vec<T> {
    let mut out: Vec<T> = docs.iter().rev().filter(|d| keep(d)).cloned().collect();
    out.sort_by_key(|d| Reverse(created_at(d)));
    out
}

#[async_trait]
impl JournalStore for MemoryStore {
    async fn insert_entry(&self, entry: &NewEntry) -> Result<Uuid, StoreError> {
        let id = Uuid::new_v4();
        self.inner
            .write()
            .await
            .entries
            .push(entry.clone().into_entry(id));
        Ok(id)
    }

    async fn find_entries(&self, user_id: &str) -> Result<Vec<JournalEntry>, StoreError> {
        let inner = self.inner.read().await;
        Ok(newest_first(
            &inner.entries,
            |e| e.user_id == user_id,
            |e| e.created_at,
        ))
    }

    async fn find_entry(
        &self,
        user_id: &str,
        id: Uuid,
    ) -> Result<Option<JournalEntry>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .entries
            .iter()
            .find(|e| e.id == id && e.user_id == user_id)
            .cloned())
    }

    async fn update_entry(
        &self,
        user_id: &str,
        id: Uuid,
        patch: &EntryPatch,
    ) -> Result<Option<JournalEntry>, StoreError> {
        let mut inner = self.inner.write().await;
        let Some(entry) = inner
            .entries
            .iter_mut()
            .find(|e| e.id == id && e.user_id == user_id)
        else {
            return Ok(None);
        };
        patch.apply(entry);
        Ok(Some(entry.clone()))
    }

    async fn delete_entry(&self, user_id: &str, id: Uuid) -> Result<u64, StoreError> {
        let mut inner = self.inner.write().await;
        let before = inner.entries.len();
        inner
            .entries
            .retain(|e| !(e.id == id && e.user_id == user_id));
        Ok((before - inner.entries.len()) as u64)
    }

    async fn insert_reflection(&self, reflection: &NewReflection) -> Result<Uuid, StoreError> {
        let id = Uuid::new_v4();
        self.inner
            .write()
            .await
            .reflections
            .push(reflection.clone().into_reflection(id));
        Ok(id)
    }

    async fn find_reflections(&self, user_id: &str) -> Result<Vec<Reflection>, StoreError> {
        let inner = self.inner.read().await;
        Ok(newest_first(
            &inner.reflections,
            |r| r.user_id == user_id,
            |r| r.created_at,
        ))
    }

    async fn find_reflections_by_entry(
        &self,
        user_id: &str,
        entry_id: Uuid,
    ) -> Result<Vec<Reflection>, StoreError> {
        let inner = self.inner.read().await;
        Ok(newest_first(
            &inner.reflections,
            |r| r.user_id == user_id && r.entry_id == entry_id,
            |r| r.created_at,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::reflection::{ReflectionKind, Sentiment};
    use chrono::Duration;

    fn new_entry(user_id: &str, title: &str) -> NewEntry {
        NewEntry {
            user_id: user_id.to_string(),
            title: title.to_string(),
            content: "body".to_string(),
            tags: None,
            mood: None,
            created_at: Utc::now(),
        }
    }

    fn new_reflection(user_id: &str, entry_id: Uuid, age_secs: i64) -> NewReflection {
        NewReflection {
            entry_id,
            user_id: user_id.to_string(),
            content: "reflection".to_string(),
            kind: ReflectionKind::Insight,
            keywords: vec![],
            sentiment: Sentiment::Neutral,
            created_at: Utc::now() - Duration::seconds(age_secs),
        }
    }

    #[tokio::test]
    async fn test_entry_lookups_are_scoped_by_user() {
        let store = MemoryStore::new();
        let id = store.insert_entry(&new_entry("alice", "mine")).await.unwrap();

        assert!(store.find_entry("alice", id).await.unwrap().is_some());
        assert!(store.find_entry("bob", id).await.unwrap().is_none());
        assert!(store.find_entries("bob").await.unwrap().is_empty());
        assert_eq!(store.delete_entry("bob", id).await.unwrap(), 0);
        assert_eq!(store.delete_entry("alice", id).await.unwrap(), 1);
        assert!(store.find_entry("alice", id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_returns_document_after_patch() {
        let store = MemoryStore::new();
        let id = store.insert_entry(&new_entry("alice", "old")).await.unwrap();
        let patch = EntryPatch {
            title: "new".to_string(),
            content: "rewritten".to_string(),
            tags: Some(vec!["edit".to_string()]),
            mood: Some("calm".to_string()),
            updated_at: Utc::now() + Duration::seconds(1),
        };

        let updated = store.update_entry("alice", id, &patch).await.unwrap().unwrap();
        assert_eq!(updated.id, id);
        assert_eq!(updated.title, "new");
        assert_eq!(updated.mood.as_deref(), Some("calm"));
        assert!(store.update_entry("bob", id, &patch).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_reflections_are_listed_newest_first() {
        let store = MemoryStore::new();
        let entry_id = Uuid::new_v4();
        let old = store
            .insert_reflection(&new_reflection("alice", entry_id, 60))
            .await
            .unwrap();
        let new = store
            .insert_reflection(&new_reflection("alice", entry_id, 1))
            .await
            .unwrap();
        store
            .insert_reflection(&new_reflection("alice", Uuid::new_v4(), 0))
            .await
            .unwrap();

        let all = store.find_reflections("alice").await.unwrap();
        assert_eq!(all.len(), 3);

        let by_entry = store
            .find_reflections_by_entry("alice", entry_id)
            .await
            .unwrap();
        let ids: Vec<Uuid> = by_entry.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![new, old]);
        assert!(store
            .find_reflections_by_entry("bob", entry_id)
            .await
            .unwrap()
            .is_empty());
    }
}
