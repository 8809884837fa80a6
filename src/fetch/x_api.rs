use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use std::env;
use std::time::Duration;

use crate::scoring::EngagementScorer;
use crate::{EngagementCounts, Platform, Post, RawPost};

pub const BEARER_TOKEN_VAR: &str = "X_API_BEARER_TOKEN";
pub const API_BASE_VAR: &str = "X_API_BASE";

const MIN_PAGE_SIZE: usize = 5;
const MAX_PAGE_SIZE: usize = 100;

#[derive(Clone)]
pub struct XApiClient {
    client: reqwest::Client,
    api_base: String,
    bearer_token: String,
    scorer: EngagementScorer,
}

impl std::fmt::Debug for XApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XApiClient")
            .field("api_base", &self.api_base)
            .finish_non_exhaustive()
    }
}

impl XApiClient {
    pub fn from_env(scorer: EngagementScorer, timeout: Duration) -> Result<Self, String> {
        let bearer_token = env::var(BEARER_TOKEN_VAR)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| format!("{} is not set", BEARER_TOKEN_VAR))?;
        let api_base =
            env::var(API_BASE_VAR).unwrap_or_else(|_| "https://api.twitter.com/2".to_string());
        Self::new(api_base, decode_bearer(bearer_token), scorer, timeout)
    }

    pub fn new(
        api_base: String,
        bearer_token: String,
        scorer: EngagementScorer,
        timeout: Duration,
    ) -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| format!("failed to build X API client: {}", err))?;
        Ok(Self {
            client,
            api_base,
            bearer_token,
            scorer,
        })
    }

    pub async fn fetch_posts(&self, username: &str, count: usize) -> Result<Vec<Post>, String> {
        let user = self.fetch_user_id(username).await?;
        let page_size = (count * 2).clamp(MIN_PAGE_SIZE, MAX_PAGE_SIZE);

        let response = self
            .client
            .get(format!(
                "{}/users/{}/tweets",
                self.api_base.trim_end_matches('/'),
                user
            ))
            .query(&[
                ("max_results", page_size.to_string()),
                ("tweet.fields", "created_at,public_metrics,entities".to_string()),
                ("exclude", "retweets,replies".to_string()),
            ])
            .header(AUTHORIZATION, format!("Bearer {}", self.bearer_token))
            .send()
            .await
            .map_err(|err| format!("X API request failed: {}", err))?;

        let body: XTweetsResponse = parse_response(response).await?;
        Ok(body
            .data
            .unwrap_or_default()
            .into_iter()
            .map(|tweet| Post::from_raw(tweet.into_raw(username), Platform::Twitter, &self.scorer))
            .collect())
    }

    async fn fetch_user_id(&self, username: &str) -> Result<String, String> {
        let response = self
            .client
            .get(format!(
                "{}/users/by/username/{}",
                self.api_base.trim_end_matches('/'),
                username
            ))
            .header(AUTHORIZATION, format!("Bearer {}", self.bearer_token))
            .send()
            .await
            .map_err(|err| format!("X API request failed: {}", err))?;

        let body: XUserResponse = parse_response(response).await?;
        body.data
            .map(|user| user.id)
            .ok_or_else(|| "X API response missing user data".to_string())
    }
}

async fn parse_response<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, String> {
    let status = response.status();
    if !status.is_success() {
        let error_body = response.text().await.unwrap_or_default();
        let detail = error_body.trim();
        if detail.is_empty() {
            return Err(format!("X API error: {}", status));
        }
        return Err(format!("X API error: {} {}", status, detail));
    }

    response
        .json()
        .await
        .map_err(|err| format!("X API response parse failed: {}", err))
}

fn decode_bearer(value: String) -> String {
    if value.contains('%') {
        match urlencoding::decode(&value) {
            Ok(decoded) => decoded.into_owned(),
            Err(_) => value,
        }
    } else {
        value
    }
}

#[derive(Deserialize)]
struct XUserResponse {
    data: Option<XUser>,
}

#[derive(Deserialize)]
struct XUser {
    id: String,
}

#[derive(Deserialize)]
struct XTweetsResponse {
    data: Option<Vec<XTweet>>,
}

#[derive(Deserialize)]
struct XTweet {
    id: String,
    text: String,
    created_at: Option<String>,
    public_metrics: Option<XPublicMetrics>,
    entities: Option<XEntities>,
}

impl XTweet {
    fn into_raw(self, username: &str) -> RawPost {
        let metrics = self.public_metrics.unwrap_or_default();
        let hashtags = self
            .entities
            .and_then(|entities| entities.hashtags)
            .unwrap_or_default()
            .into_iter()
            .map(|hashtag| hashtag.tag)
            .collect();

        RawPost {
            url: Some(format!("https://twitter.com/{}/status/{}", username, self.id)),
            id: self.id,
            text: self.text,
            author: String::new(),
            created_at: self.created_at.unwrap_or_default(),
            hashtags,
            counts: EngagementCounts {
                likes: metrics.like_count,
                reshares: metrics.retweet_count,
                replies: metrics.reply_count,
                quotes: metrics.quote_count,
                views: metrics.impression_count,
            },
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct XPublicMetrics {
    like_count: u64,
    retweet_count: u64,
    reply_count: u64,
    quote_count: u64,
    impression_count: u64,
}

#[derive(Deserialize)]
struct XEntities {
    hashtags: Option<Vec<XHashtag>>,
}

#[derive(Deserialize)]
struct XHashtag {
    tag: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::EngagementWeights;

    #[test]
    fn tweet_maps_public_metrics_into_counts() {
        let tweet: XTweet = serde_json::from_str(
            r#"{
                "id": "42",
                "text": "Why most developers fail at system design: a thread",
                "created_at": "2024-01-15T10:30:00.000Z",
                "public_metrics": {"like_count": 10, "retweet_count": 2, "reply_count": 4},
                "entities": {"hashtags": [{"start": 0, "end": 5, "tag": "Rust"}]}
            }"#,
        )
        .unwrap();

        let scorer = EngagementScorer::new(EngagementWeights::twitter());
        let post = Post::from_raw(tweet.into_raw("someone"), Platform::Twitter, &scorer);

        assert_eq!(post.counts().likes, 10);
        assert_eq!(post.counts().quotes, 0);
        assert_eq!(post.hashtags, vec!["rust".to_string()]);
        assert!((post.engagement_score() - (10.0 + 4.0 + 6.0)).abs() < 1e-6);
        assert_eq!(post.url.as_deref(), Some("https://twitter.com/someone/status/42"));
    }

    #[test]
    fn bearer_tokens_are_url_decoded() {
        assert_eq!(decode_bearer("AAAA%3Dbbb".to_string()), "AAAA=bbb");
        assert_eq!(decode_bearer("plain".to_string()), "plain");
    }
}
