use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::Post;

pub const TOP_HASHTAGS: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashtagCount {
    pub hashtag: String,
    pub frequency: usize,
}

pub fn top_hashtags(posts: &[Post]) -> Vec<HashtagCount> {
    let counts = count_first_seen(posts.iter().flat_map(|post| post.hashtags.iter()));

    counts
        .into_iter()
        .take(TOP_HASHTAGS)
        .map(|(hashtag, frequency)| HashtagCount { hashtag, frequency })
        .collect()
}

/// Counts tokens and returns them frequency-descending; tokens with equal
/// counts stay in first-seen order.
pub(crate) fn count_first_seen<'a, I>(tokens: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();

    for token in tokens {
        match index.get(token.as_str()) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                index.insert(token.as_str(), counts.len());
                counts.push((token.clone(), 1));
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}
