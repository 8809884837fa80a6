pub mod ranking;
pub mod weighted;

pub use ranking::{compare_scores_desc, rank_posts, top_posts};
pub use weighted::{EngagementScorer, EngagementWeights};
