use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::models::entry::{EntryPatch, JournalEntry, NewEntry};
use crate::models::reflection::{NewReflection, Reflection};
use crate::store::{JournalStore, StoreError};

const ENTRY_COLUMNS: &str = "id, user_id, title, content, tags, mood, created_at, updated_at";
const REFLECTION_COLUMNS: &str =
    "id, entry_id, user_id, content, kind, keywords, sentiment, created_at";

/// PostgreSQL-backed store. Collections map to the `journal_entries` and
/// `reflections` tables created by the embedded migrations.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Raw reflection row; `kind` and `sentiment` are stored as text labels.
#[derive(Debug, FromRow)]
struct ReflectionRow {
    id: Uuid,
    entry_id: Uuid,
    user_id: String,
    content: String,
    kind: String,
    keywords: Vec<String>,
    sentiment: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<ReflectionRow> for Reflection {
    type Error = StoreError;

    fn try_from(row: ReflectionRow) -> Result<Self, Self::Error> {
        Ok(Reflection {
            id: row.id,
            entry_id: row.entry_id,
            user_id: row.user_id,
            content: row.content,
            kind: row.kind.parse().map_err(StoreError::Corrupt)?,
            keywords: row.keywords,
            sentiment: row.sentiment.parse().map_err(StoreError::Corrupt)?,
            created_at: row.created_at,
        })
    }
}

fn into_reflections(rows: Vec<ReflectionRow>) -> Result<Vec<Reflection>, StoreError> {
    rows.into_iter().map(Reflection::try_from).collect()
}

#[async_trait]
impl JournalStore for PgStore {
    async fn insert_entry(&self, entry: &NewEntry) -> Result<Uuid, StoreError> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO journal_entries
                (user_id, title, content, tags, mood, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            RETURNING id
            "#,
        )
        .bind(&entry.user_id)
        .bind(&entry.title)
        .bind(&entry.content)
        .bind(&entry.tags)
        .bind(&entry.mood)
        .bind(entry.created_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn find_entries(&self, user_id: &str) -> Result<Vec<JournalEntry>, StoreError> {
        let entries = sqlx::query_as::<_, JournalEntry>(&format!(
            "SELECT {ENTRY_COLUMNS} FROM journal_entries WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }

    async fn find_entry(
        &self,
        user_id: &str,
        id: Uuid,
    ) -> Result<Option<JournalEntry>, StoreError> {
        let entry = sqlx::query_as::<_, JournalEntry>(&format!(
            "SELECT {ENTRY_COLUMNS} FROM journal_entries WHERE id = $1 AND user_id = $2"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(entry)
    }

    async fn update_entry(
        &self,
        user_id: &str,
        id: Uuid,
        patch: &EntryPatch,
    ) -> Result<Option<JournalEntry>, StoreError> {
        let entry = sqlx::query_as::<_, JournalEntry>(&format!(
            r#"
            UPDATE journal_entries
            SET title = $3, content = $4, tags = $5, mood = $6, updated_at = $7
            WHERE id = $1 AND user_id = $2
            RETURNING {ENTRY_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(user_id)
        .bind(&patch.title)
        .bind(&patch.content)
        .bind(&patch.tags)
        .bind(&patch.mood)
        .bind(patch.updated_at)
        .fetch_optional(&self.pool)
        .await?;
        Ok(entry)
    }

    async fn delete_entry(&self, user_id: &str, id: Uuid) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM journal_entries WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn insert_reflection(&self, reflection: &NewReflection) -> Result<Uuid, StoreError> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO reflections
                (entry_id, user_id, content, kind, keywords, sentiment, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(reflection.entry_id)
        .bind(&reflection.user_id)
        .bind(&reflection.content)
        .bind(reflection.kind.as_str())
        .bind(&reflection.keywords)
        .bind(reflection.sentiment.as_str())
        .bind(reflection.created_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn find_reflections(&self, user_id: &str) -> Result<Vec<Reflection>, StoreError> {
        let rows = sqlx::query_as::<_, ReflectionRow>(&format!(
            "SELECT {REFLECTION_COLUMNS} FROM reflections WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        into_reflections(rows)
    }

    async fn find_reflections_by_entry(
        &self,
        user_id: &str,
        entry_id: Uuid,
    ) -> Result<Vec<Reflection>, StoreError> {
        let rows = sqlx::query_as::<_, ReflectionRow>(&format!(
            "SELECT {REFLECTION_COLUMNS} FROM reflections \
             WHERE entry_id = $1 AND user_id = $2 ORDER BY created_at DESC"
        ))
        .bind(entry_id)
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        into_reflections(rows)
    }
}
