pub mod drivers;
pub mod hashtags;
pub mod hooks;
pub mod length;
pub mod themes;
pub mod timing;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::Post;

pub use drivers::{analyze_drivers, EngagementInsights};
pub use hashtags::{top_hashtags, HashtagCount};
pub use hooks::{analyze_hooks, extract_hook, hook_starter, Hook, HookPatterns, HookStarter};
pub use length::{analyze_lengths, BucketStats, LengthBucket};
pub use themes::{clean_text, topic_themes};
pub use timing::{
    analyze_posting_times, parse_timestamp, DayPerformance, HourPerformance, PostingPatterns,
};

pub const NO_DATA_MESSAGE: &str = "No post data to analyze";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStatus {
    Complete,
    #[default]
    NoData,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateStats {
    pub status: AnalysisStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub total_posts_analyzed: usize,
    pub avg_engagement_score: f64,
    pub top_hashtags: Vec<HashtagCount>,
    pub hook_patterns: HookPatterns,
    pub length_buckets: BTreeMap<LengthBucket, BucketStats>,
    pub posting_patterns: PostingPatterns,
    pub topic_themes: Vec<String>,
    pub engagement_insights: EngagementInsights,
}

impl AggregateStats {
    pub fn no_data() -> Self {
        Self {
            status: AnalysisStatus::NoData,
            error: Some(NO_DATA_MESSAGE.to_string()),
            ..Self::default()
        }
    }

    pub fn has_data(&self) -> bool {
        matches!(self.status, AnalysisStatus::Complete)
    }

    pub fn best_day(&self) -> Option<&DayPerformance> {
        self.posting_patterns.best_days.first()
    }

    pub fn best_length_bucket(&self) -> Option<(LengthBucket, &BucketStats)> {
        self.length_buckets
            .iter()
            .max_by(|a, b| {
                a.1.avg_engagement
                    .partial_cmp(&b.1.avg_engagement)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|(bucket, stats)| (*bucket, stats))
    }
}

pub fn analyze_posts(posts: &[Post]) -> AggregateStats {
    if posts.is_empty() {
        return AggregateStats::no_data();
    }

    let scores: Vec<f64> = posts.iter().map(Post::engagement_score).collect();
    let avg_engagement_score = crate::mean(&scores);

    AggregateStats {
        status: AnalysisStatus::Complete,
        error: None,
        total_posts_analyzed: posts.len(),
        avg_engagement_score,
        top_hashtags: top_hashtags(posts),
        hook_patterns: analyze_hooks(posts),
        length_buckets: analyze_lengths(posts),
        posting_patterns: analyze_posting_times(posts),
        topic_themes: topic_themes(posts),
        engagement_insights: analyze_drivers(posts, avg_engagement_score),
    }
}
