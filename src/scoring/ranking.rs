use std::cmp::Ordering;

use crate::Post;

/// Sorts posts by engagement score, highest first, and keeps at most `limit`.
/// Equal scores keep their incoming order.
pub fn rank_posts(posts: &mut Vec<Post>, limit: usize) {
    posts.sort_by(|a, b| compare_scores_desc(a.engagement_score(), b.engagement_score()));
    posts.truncate(limit);
}

pub fn top_posts(posts: &[Post], limit: usize) -> Vec<&Post> {
    let mut ranked: Vec<&Post> = posts.iter().collect();
    ranked.sort_by(|a, b| compare_scores_desc(a.engagement_score(), b.engagement_score()));
    ranked.truncate(limit);
    ranked
}

pub fn compare_scores_desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}
