use serde::{Deserialize, Serialize};

use crate::EngagementCounts;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngagementWeights {
    pub likes: f64,
    pub reshares: f64,
    pub replies: f64,
    pub quotes: f64,
    pub views: f64,
    pub multiplier: f64,
}

impl EngagementWeights {
    pub fn twitter() -> Self {
        Self {
            likes: 1.0,
            reshares: 2.0,
            replies: 1.5,
            quotes: 2.0,
            views: 0.0,
            multiplier: 1.0,
        }
    }

    pub fn instagram() -> Self {
        Self {
            likes: 1.0,
            reshares: 1.0,
            replies: 2.0,
            quotes: 0.0,
            views: 0.01,
            multiplier: 1.0,
        }
    }
}

impl Default for EngagementWeights {
    fn default() -> Self {
        Self::twitter()
    }
}

#[derive(Debug, Clone)]
pub struct EngagementScorer {
    weights: EngagementWeights,
}

impl EngagementScorer {
    pub fn new(weights: EngagementWeights) -> Self {
        Self { weights }
    }

    pub fn score(&self, counts: &EngagementCounts) -> f64 {
        let mut score = 0.0;

        score += counts.likes as f64 * non_negative(self.weights.likes);
        score += counts.reshares as f64 * non_negative(self.weights.reshares);
        score += counts.replies as f64 * non_negative(self.weights.replies);
        score += counts.quotes as f64 * non_negative(self.weights.quotes);
        score += counts.views as f64 * non_negative(self.weights.views);

        score *= non_negative(self.weights.multiplier);

        if score.is_finite() {
            score
        } else {
            0.0
        }
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.max(0.0)
}
