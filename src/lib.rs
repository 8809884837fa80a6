pub mod analysis;
pub mod config;
pub mod discovery;
pub mod fetch;
pub mod ideas;
pub mod orchestrator;
pub mod report;
pub mod scoring;
pub mod telemetry;

use serde::{Deserialize, Serialize};

use crate::scoring::EngagementScorer;

pub use analysis::{analyze_posts, AggregateStats, AnalysisStatus};
pub use ideas::{ContentIdeaStrategy, ContentIdeas, GeneratedIdeas, GenerationError, IdeaSource};
pub use orchestrator::{Orchestrator, RunError, RunOutcome};
pub use telemetry::RunScope;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Twitter,
    Instagram,
}

impl Platform {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "twitter" | "x" | "tweets" => Some(Platform::Twitter),
            "instagram" | "ig" | "reels" => Some(Platform::Instagram),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Platform::Twitter => "twitter",
            Platform::Instagram => "instagram",
        }
    }

    pub fn post_noun(self) -> &'static str {
        match self {
            Platform::Twitter => "tweets",
            Platform::Instagram => "reels",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngagementCounts {
    pub likes: u64,
    #[serde(alias = "retweets", alias = "reposts", alias = "shares")]
    pub reshares: u64,
    #[serde(alias = "comments")]
    pub replies: u64,
    pub quotes: u64,
    pub views: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawPost {
    #[serde(default, alias = "shortcode")]
    pub id: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, alias = "caption")]
    pub text: String,
    #[serde(default, alias = "competitor")]
    pub author: String,
    #[serde(default, alias = "date")]
    pub created_at: String,
    #[serde(default)]
    pub hashtags: Vec<String>,
    #[serde(flatten)]
    pub counts: EngagementCounts,
}

/// A scored post. The engagement score is fixed at construction and only the
/// owning account may be attached afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    pub id: String,
    pub url: Option<String>,
    pub text: String,
    pub author: String,
    pub platform: Platform,
    counts: EngagementCounts,
    engagement_score: f64,
    pub created_at: String,
    pub hashtags: Vec<String>,
}

impl Post {
    pub fn from_raw(raw: RawPost, platform: Platform, scorer: &EngagementScorer) -> Self {
        let engagement_score = scorer.score(&raw.counts);
        let hashtags = raw
            .hashtags
            .iter()
            .map(|tag| tag.trim().trim_start_matches('#').to_lowercase())
            .filter(|tag| !tag.is_empty())
            .collect();

        Self {
            id: raw.id,
            url: raw.url,
            text: raw.text,
            author: raw.author,
            platform,
            counts: raw.counts,
            engagement_score,
            created_at: raw.created_at,
            hashtags,
        }
    }

    pub fn counts(&self) -> &EngagementCounts {
        &self.counts
    }

    pub fn engagement_score(&self) -> f64 {
        self.engagement_score
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let head: String = text.chars().take(max_chars).collect();
    format!("{}...", head)
}

pub fn format_number(value: f64) -> String {
    let rounded = value.round().max(0.0) as i64;
    let digits = rounded.to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);

    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }

    result
}

pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

pub fn format_float(value: f64, digits: usize) -> String {
    format!("{:.1$}", value, digits)
}
