use reqwest::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::env;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::config::IdeasConfig;
use crate::ideas::{ContentIdeas, GenerationError};
use crate::scoring::top_posts;
use crate::{truncate_with_ellipsis, AggregateStats, Post, RunScope};

pub const API_KEY_VAR: &str = "OPENROUTER_API_KEY";
pub const API_BASE_VAR: &str = "OPENROUTER_API_BASE";

const SAMPLE_POSTS: usize = 5;
const SAMPLE_TEXT_CHARS: usize = 200;
const MAX_TWEET_IDEAS: usize = 15;
const MAX_HOOK_IDEAS: usize = 20;
const MAX_INSIGHTS: usize = 10;

#[derive(Clone)]
pub struct RemoteIdeaGenerator {
    client: reqwest::Client,
    api_key: String,
    api_base: String,
    model: String,
    max_tokens: u32,
    temperature: f64,
}

impl std::fmt::Debug for RemoteIdeaGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteIdeaGenerator")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl RemoteIdeaGenerator {
    pub fn from_env(config: &IdeasConfig) -> Result<Self, String> {
        let api_key = env::var(API_KEY_VAR)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| format!("{} is not set", API_KEY_VAR))?;
        let mut config = config.clone();
        if let Ok(api_base) = env::var(API_BASE_VAR) {
            if !api_base.trim().is_empty() {
                config.api_base = api_base;
            }
        }
        Self::new(api_key, &config)
    }

    pub fn new(api_key: String, config: &IdeasConfig) -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|err| format!("failed to build text generation client: {}", err))?;
        Ok(Self {
            client,
            api_key,
            api_base: config.api_base.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }

    pub async fn try_generate(
        &self,
        stats: &AggregateStats,
        posts: &[Post],
        scope: &RunScope,
    ) -> Result<ContentIdeas, GenerationError> {
        let url = format!("{}/chat/completions", self.api_base.trim_end_matches('/'));
        let prompt = build_prompt(stats, posts);
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt,
            }],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        info!(parent: scope.span(), model = %self.model, "requesting content ideas");
        let started = Instant::now();

        let response = self
            .client
            .post(url)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(GenerationError::Status {
                status,
                detail: detail.trim().to_string(),
            });
        }

        let body: ChatResponse = response.json().await.map_err(GenerationError::Body)?;
        debug!(
            parent: scope.span(),
            latency_ms = started.elapsed().as_millis() as u64,
            "text generation responded"
        );

        let content = body
            .choices
            .into_iter()
            .next()
            .ok_or(GenerationError::MissingChoices)?
            .message
            .content
            .unwrap_or_default();

        let json = extract_json(&content).ok_or(GenerationError::MissingJson)?;
        let ideas: ContentIdeas = serde_json::from_str(json)?;
        let ideas = normalize(ideas);
        if ideas.is_empty() {
            return Err(GenerationError::EmptyIdeas);
        }
        Ok(ideas)
    }
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f64,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Deserialize)]
struct ChatMessageResponse {
    #[serde(default)]
    content: Option<String>,
}

pub fn build_prompt(stats: &AggregateStats, posts: &[Post]) -> String {
    let hashtags: Vec<&str> = stats
        .top_hashtags
        .iter()
        .take(10)
        .map(|entry| entry.hashtag.as_str())
        .collect();
    let starters: Vec<&str> = stats
        .hook_patterns
        .common_hook_starters
        .iter()
        .take(5)
        .map(|entry| entry.starter.as_str())
        .collect();
    let best_days: Vec<&str> = stats
        .posting_patterns
        .best_days
        .iter()
        .take(3)
        .map(|entry| entry.day.as_str())
        .collect();
    let best_length = stats
        .best_length_bucket()
        .map(|(bucket, _)| bucket.label())
        .unwrap_or("unknown");

    let samples: Vec<serde_json::Value> = top_posts(posts, SAMPLE_POSTS)
        .into_iter()
        .map(|post| {
            json!({
                "author": post.author,
                "text": truncate_with_ellipsis(&post.text, SAMPLE_TEXT_CHARS),
                "engagement_score": post.engagement_score(),
                "likes": post.counts().likes,
                "reshares": post.counts().reshares,
                "hashtags": post.hashtags,
            })
        })
        .collect();
    let samples = serde_json::to_string_pretty(&samples).unwrap_or_else(|_| "[]".to_string());

    format!(
        r#"Based on this competitor post analysis, generate content ideas.

ANALYSIS SUMMARY:
- Total posts analyzed: {total}
- Average engagement score: {avg:.1}
- Top hashtags: {hashtags:?}
- Common topic themes: {themes:?}
- Top performing hook starters: {starters:?}
- Best posting days: {best_days:?}
- Best performing length: {best_length}
- High engagement characteristics: {characteristics:?}

TOP PERFORMING CONTENT EXAMPLES:
{samples}

Please generate:
1. TWEET IDEAS (10 high-engagement post concepts, mixing questions, threads, tips and contrarian takes)
2. HOOK IDEAS (15 hook formulas built on the successful starters, kept fresh)
3. STRATEGY INSIGHTS (5 recommendations covering timing, length, engagement and hashtags)

Respond with a single JSON object with keys "tweet_ideas", "hook_ideas" and "strategy_insights", each an array of strings. Output JSON only."#,
        total = stats.total_posts_analyzed,
        avg = stats.avg_engagement_score,
        hashtags = hashtags,
        themes = stats.topic_themes,
        starters = starters,
        best_days = best_days,
        best_length = best_length,
        characteristics = stats.engagement_insights.high_engagement_characteristics,
        samples = samples,
    )
}

fn normalize(ideas: ContentIdeas) -> ContentIdeas {
    ContentIdeas {
        tweet_ideas: clean_list(ideas.tweet_ideas, MAX_TWEET_IDEAS),
        hook_ideas: clean_list(ideas.hook_ideas, MAX_HOOK_IDEAS),
        strategy_insights: clean_list(ideas.strategy_insights, MAX_INSIGHTS),
    }
}

fn clean_list(values: Vec<String>, limit: usize) -> Vec<String> {
    values
        .into_iter()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .take(limit)
        .collect()
}

fn extract_json(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if start >= end {
        return None;
    }
    Some(&text[start..=end])
}
