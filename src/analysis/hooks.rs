use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::scoring::compare_scores_desc;
use crate::{mean, Post};

pub const MAX_HOOK_CHARS: usize = 100;
pub const TOP_HOOKS: usize = 10;
pub const TOP_STARTERS: usize = 10;
pub const STARTER_WORDS: usize = 3;
pub const STARTER_EXAMPLES: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hook {
    pub hook: String,
    pub engagement_score: f64,
    pub author: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HookStarter {
    pub starter: String,
    pub count: usize,
    pub avg_engagement: f64,
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HookPatterns {
    pub total_hooks_analyzed: usize,
    pub top_performing_hooks: Vec<Hook>,
    pub common_hook_starters: Vec<HookStarter>,
}

pub fn extract_hook(text: &str) -> Option<String> {
    let head = text.split([':', '.']).next().unwrap_or_default();
    let capped: String = head.chars().take(MAX_HOOK_CHARS).collect();
    let hook = capped.trim();
    if hook.is_empty() {
        None
    } else {
        Some(hook.to_string())
    }
}

pub fn hook_starter(hook: &str) -> Option<String> {
    let lowered = hook.to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().take(STARTER_WORDS).collect();
    if words.len() < 2 {
        return None;
    }
    Some(words.join(" "))
}

pub fn analyze_hooks(posts: &[Post]) -> HookPatterns {
    let mut hooks: Vec<Hook> = posts
        .iter()
        .filter(|post| !post.text.is_empty())
        .filter_map(|post| {
            extract_hook(&post.text).map(|hook| Hook {
                hook,
                engagement_score: post.engagement_score(),
                author: post.author.clone(),
            })
        })
        .collect();

    hooks.sort_by(|a, b| compare_scores_desc(a.engagement_score, b.engagement_score));

    let common_hook_starters = common_starters(&hooks);
    let total_hooks_analyzed = hooks.len();
    hooks.truncate(TOP_HOOKS);

    HookPatterns {
        total_hooks_analyzed,
        top_performing_hooks: hooks,
        common_hook_starters,
    }
}

struct StarterGroup {
    starter: String,
    scores: Vec<f64>,
    examples: Vec<String>,
}

fn common_starters(ranked_hooks: &[Hook]) -> Vec<HookStarter> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<StarterGroup> = Vec::new();

    for hook in ranked_hooks {
        let Some(starter) = hook_starter(&hook.hook) else {
            continue;
        };
        let slot = *index.entry(starter.clone()).or_insert_with(|| {
            groups.push(StarterGroup {
                starter,
                scores: Vec::new(),
                examples: Vec::new(),
            });
            groups.len() - 1
        });
        let group = &mut groups[slot];
        group.scores.push(hook.engagement_score);
        if group.examples.len() < STARTER_EXAMPLES {
            group.examples.push(hook.hook.clone());
        }
    }

    let mut starters: Vec<HookStarter> = groups
        .into_iter()
        .filter(|group| group.scores.len() > 1)
        .map(|group| HookStarter {
            count: group.scores.len(),
            avg_engagement: mean(&group.scores),
            starter: group.starter,
            examples: group.examples,
        })
        .collect();

    starters.sort_by(|a, b| compare_scores_desc(a.avg_engagement, b.avg_engagement));
    starters.truncate(TOP_STARTERS);
    starters
}
