use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reflection category. Selects the prompt template used for generation.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ReflectionKind {
    #[default]
    Insight,
    Summary,
    Analysis,
}

impl ReflectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReflectionKind::Insight => "insight",
            ReflectionKind::Summary => "summary",
            ReflectionKind::Analysis => "analysis",
        }
    }

    /// Lenient request-side parsing: missing, blank, or unknown labels become `Insight`.
    pub fn from_request(label: Option<&str>) -> Self {
        match label.map(str::trim).filter(|l| !l.is_empty()) {
            None => ReflectionKind::Insight,
            Some(label) => label.parse().unwrap_or_else(|_| {
                tracing::debug!("Unknown reflection type '{label}', falling back to insight");
                ReflectionKind::Insight
            }),
        }
    }
}

impl fmt::Display for ReflectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReflectionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "insight" => Ok(ReflectionKind::Insight),
            "summary" => Ok(ReflectionKind::Summary),
            "analysis" => Ok(ReflectionKind::Analysis),
            other => Err(format!("unknown reflection kind '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "positive" => Ok(Sentiment::Positive),
            "negative" => Ok(Sentiment::Negative),
            "neutral" => Ok(Sentiment::Neutral),
            other => Err(format!("unknown sentiment '{other}'")),
        }
    }
}

/// AI-generated commentary on one entry. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reflection {
    pub id: Uuid,
    pub entry_id: Uuid,
    pub user_id: String,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: ReflectionKind,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub sentiment: Sentiment,
    pub created_at: DateTime<Utc>,
}

/// A reflection awaiting its store-assigned id.
#[derive(Debug, Clone)]
pub struct NewReflection {
    pub entry_id: Uuid,
    pub user_id: String,
    pub content: String,
    pub kind: ReflectionKind,
    pub keywords: Vec<String>,
    pub sentiment: Sentiment,
    pub created_at: DateTime<Utc>,
}

impl NewReflection {
    pub fn into_reflection(self, id: Uuid) -> Reflection {
        Reflection {
            id,
            entry_id: self.entry_id,
            user_id: self.user_id,
            content: self.content,
            kind: self.kind,
            keywords: self.keywords,
            sentiment: self.sentiment,
            created_at: self.created_at,
        }
    }
}

/// Body of `POST /reflect`.
#[derive(Debug, Clone, Deserialize)]
pub struct ReflectionRequest {
    #[serde(default)]
    pub entry_id: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

/// Sentiment counts. All three labels are always reported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentTrends {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

impl SentimentTrends {
    pub fn record(&mut self, sentiment: Sentiment) {
        match sentiment {
            Sentiment::Positive => self.positive += 1,
            Sentiment::Negative => self.negative += 1,
            Sentiment::Neutral => self.neutral += 1,
        }
    }
}

/// On-demand aggregate over a user's reflections. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Insights {
    pub total_reflections: usize,
    pub recent_themes: Vec<String>,
    pub sentiment_trends: SentimentTrends,
    /// Only kinds that actually occur are present.
    pub reflection_types: BTreeMap<ReflectionKind, usize>,
}
