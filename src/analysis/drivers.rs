use serde::{Deserialize, Serialize};

use crate::Post;

pub const QUESTIONS_NOTE: &str = "Questions perform well";
pub const EMOJI_NOTE: &str = "Emojis boost engagement";
pub const THREAD_NOTE: &str = "Threads generate discussion";

const EMOJI_SHARE_THRESHOLD: f64 = 0.3;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngagementInsights {
    pub high_engagement_posts: usize,
    pub avg_likes_to_reshares_ratio: f64,
    pub high_engagement_characteristics: Vec<String>,
}

pub fn analyze_drivers(posts: &[Post], average: f64) -> EngagementInsights {
    let high: Vec<&Post> = posts
        .iter()
        .filter(|post| post.engagement_score() > average)
        .collect();

    let mut insights = EngagementInsights {
        high_engagement_posts: high.len(),
        ..EngagementInsights::default()
    };
    if high.is_empty() {
        return insights;
    }

    let total_likes: u64 = high.iter().map(|post| post.counts().likes).sum();
    let total_reshares: u64 = high.iter().map(|post| post.counts().reshares).sum();
    if total_reshares > 0 {
        insights.avg_likes_to_reshares_ratio = total_likes as f64 / total_reshares as f64;
    }

    if high.iter().any(|post| post.text.contains('?')) {
        insights
            .high_engagement_characteristics
            .push(QUESTIONS_NOTE.to_string());
    }

    let non_ascii = high
        .iter()
        .filter(|post| post.text.chars().any(|ch| !ch.is_ascii()))
        .count();
    if non_ascii as f64 > high.len() as f64 * EMOJI_SHARE_THRESHOLD {
        insights
            .high_engagement_characteristics
            .push(EMOJI_NOTE.to_string());
    }

    if high
        .iter()
        .any(|post| post.text.to_lowercase().contains("thread"))
    {
        insights
            .high_engagement_characteristics
            .push(THREAD_NOTE.to_string());
    }

    insights
}
