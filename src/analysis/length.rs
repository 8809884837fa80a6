use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{mean, Post};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LengthBucket {
    #[serde(rename = "0-50 chars")]
    Short,
    #[serde(rename = "51-100 chars")]
    Medium,
    #[serde(rename = "101-200 chars")]
    Long,
    #[serde(rename = "200+ chars")]
    ExtraLong,
}

impl LengthBucket {
    pub const ALL: [LengthBucket; 4] = [
        LengthBucket::Short,
        LengthBucket::Medium,
        LengthBucket::Long,
        LengthBucket::ExtraLong,
    ];

    pub fn for_length(chars: usize) -> Self {
        if chars <= 50 {
            LengthBucket::Short
        } else if chars <= 100 {
            LengthBucket::Medium
        } else if chars <= 200 {
            LengthBucket::Long
        } else {
            LengthBucket::ExtraLong
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LengthBucket::Short => "0-50 chars",
            LengthBucket::Medium => "51-100 chars",
            LengthBucket::Long => "101-200 chars",
            LengthBucket::ExtraLong => "200+ chars",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BucketStats {
    pub count: usize,
    pub avg_engagement: f64,
}

pub fn analyze_lengths(posts: &[Post]) -> BTreeMap<LengthBucket, BucketStats> {
    let mut scores: BTreeMap<LengthBucket, Vec<f64>> = BTreeMap::new();

    for post in posts {
        let bucket = LengthBucket::for_length(post.text.chars().count());
        scores.entry(bucket).or_default().push(post.engagement_score());
    }

    scores
        .into_iter()
        .map(|(bucket, values)| {
            (
                bucket,
                BucketStats {
                    count: values.len(),
                    avg_engagement: mean(&values),
                },
            )
        })
        .collect()
}
