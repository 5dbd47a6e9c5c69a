//! Insights — a pure aggregate over a user's reflections, newest first.

use std::collections::BTreeMap;

use crate::errors::AppError;
use crate::models::reflection::{Insights, Reflection, SentimentTrends};
use crate::store::JournalStore;

/// How many of the most recent reflections feed `recent_themes`.
const THEME_WINDOW: usize = 10;
const MAX_THEMES: usize = 5;

pub async fn get_insights(store: &dyn JournalStore, user_id: &str) -> Result<Insights, AppError> {
    let reflections = store.find_reflections(user_id).await?;
    Ok(compute_insights(&reflections))
}

/// `reflections` must already be ordered newest first.
pub fn compute_insights(reflections: &[Reflection]) -> Insights {
    let mut sentiment_trends = SentimentTrends::default();
    let mut reflection_types = BTreeMap::new();
    for reflection in reflections {
        sentiment_trends.record(reflection.sentiment);
        *reflection_types.entry(reflection.kind).or_insert(0) += 1;
    }

    Insights {
        total_reflections: reflections.len(),
        recent_themes: recent_themes(reflections),
        sentiment_trends,
        reflection_types,
    }
}

/// Distinct keywords in first-seen order across the newest reflections.
fn recent_themes(reflections: &[Reflection]) -> Vec<String> {
    let mut themes: Vec<String> = Vec::with_capacity(MAX_THEMES);
    for keyword in reflections
        .iter()
        .take(THEME_WINDOW)
        .flat_map(|r| r.keywords.iter())
    {
        if themes.len() == MAX_THEMES {
            break;
        }
        if !themes.contains(keyword) {
            themes.push(keyword.clone());
        }
    }
    themes
}
