//! Reflection generation pipeline.
//!
//! Flow: resolve entry (user-scoped) → pick kind → model.generate →
//!       model.extract_keywords (non-fatal) → sentiment → persist.
//!
//! Only the generate step is fatal. No retries at this layer.

use tracing::{info, warn};

use crate::errors::AppError;
use crate::journal::service::{get_entry, parse_id};
use crate::llm_client::ReflectionModel;
use crate::models::reflection::{NewReflection, Reflection, ReflectionKind, ReflectionRequest};
use crate::reflection::sentiment::extract_sentiment;
use crate::store::{timestamp_now, JournalStore};

pub async fn generate_reflection(
    store: &dyn JournalStore,
    model: &dyn ReflectionModel,
    user_id: &str,
    request: ReflectionRequest,
) -> Result<Reflection, AppError> {
    if request.entry_id.trim().is_empty() {
        return Err(AppError::Validation("Entry ID is required".to_string()));
    }

    // Step 1: the entry must belong to this user
    let entry = get_entry(store, user_id, &request.entry_id).await?;

    // Step 2: kind
    let kind = ReflectionKind::from_request(request.kind.as_deref());
    info!("Generating {kind} reflection for entry {}", entry.id);

    // Step 3: generate (fatal)
    let content = model.generate(&entry.content, kind).await?;

    // Step 4: keywords (degrades to empty)
    let keywords = match model.extract_keywords(&entry.content).await {
        Ok(keywords) => keywords,
        Err(e) => {
            warn!("Keyword extraction failed for entry {}: {e}", entry.id);
            Vec::new()
        }
    };

    // Step 5: sentiment of the generated text
    let sentiment = extract_sentiment(&content);

    // Step 6: persist
    let draft = NewReflection {
        entry_id: entry.id,
        user_id: user_id.to_string(),
        content,
        kind,
        keywords,
        sentiment,
        created_at: timestamp_now(),
    };
    let id = store.insert_reflection(&draft).await?;
    info!(
        "Stored reflection {id} (kind={kind}, sentiment={sentiment}, keywords={})",
        draft.keywords.len()
    );

    Ok(draft.into_reflection(id))
}

pub async fn list_reflections(
    store: &dyn JournalStore,
    user_id: &str,
) -> Result<Vec<Reflection>, AppError> {
    Ok(store.find_reflections(user_id).await?)
}

pub async fn list_reflections_by_entry(
    store: &dyn JournalStore,
    user_id: &str,
    entry_id: &str,
) -> Result<Vec<Reflection>, AppError> {
    let entry_id = parse_id(entry_id)?;
    Ok(store.find_reflections_by_entry(user_id, entry_id).await?)
}
