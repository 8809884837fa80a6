pub mod fallback;
pub mod remote;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::config::IdeasConfig;
use crate::{AggregateStats, Post, RunScope};

pub use fallback::fallback_ideas;
pub use remote::{build_prompt, RemoteIdeaGenerator};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentIdeas {
    #[serde(default, alias = "topic_ideas")]
    pub tweet_ideas: Vec<String>,
    #[serde(default)]
    pub hook_ideas: Vec<String>,
    #[serde(default)]
    pub strategy_insights: Vec<String>,
}

impl ContentIdeas {
    pub fn is_empty(&self) -> bool {
        self.tweet_ideas.is_empty()
            && self.hook_ideas.is_empty()
            && self.strategy_insights.is_empty()
    }
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("text generation request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("text generation API error: {status} {detail}")]
    Status {
        status: reqwest::StatusCode,
        detail: String,
    },
    #[error("text generation response body unreadable: {0}")]
    Body(reqwest::Error),
    #[error("text generation response missing choices")]
    MissingChoices,
    #[error("text generation response missing JSON object")]
    MissingJson,
    #[error("text generation JSON parse failed: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("text generation returned no ideas")]
    EmptyIdeas,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdeaSource {
    Remote,
    Fallback,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeneratedIdeas {
    pub ideas: ContentIdeas,
    pub source: IdeaSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl GeneratedIdeas {
    pub fn ai_generated(&self) -> bool {
        matches!(self.source, IdeaSource::Remote)
    }
}

#[derive(Debug, Clone)]
pub enum ContentIdeaStrategy {
    Remote(RemoteIdeaGenerator),
    Fallback,
}

impl ContentIdeaStrategy {
    pub fn from_config(config: &IdeasConfig) -> Result<Self, String> {
        match config.strategy.trim().to_lowercase().as_str() {
            "remote" | "ai" | "llm" => Ok(ContentIdeaStrategy::Remote(
                RemoteIdeaGenerator::from_env(config)?,
            )),
            "fallback" | "template" | "offline" => Ok(ContentIdeaStrategy::Fallback),
            other => Err(format!("unknown idea strategy: {}", other)),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ContentIdeaStrategy::Remote(_) => "remote",
            ContentIdeaStrategy::Fallback => "fallback",
        }
    }

    pub async fn try_generate(
        &self,
        stats: &AggregateStats,
        posts: &[Post],
        scope: &RunScope,
    ) -> Result<ContentIdeas, GenerationError> {
        match self {
            ContentIdeaStrategy::Remote(generator) => {
                generator.try_generate(stats, posts, scope).await
            }
            ContentIdeaStrategy::Fallback => Ok(fallback_ideas(stats)),
        }
    }

    /// Always yields ideas: a failed remote call degrades to the template
    /// ideas and the failure is reported as a warning.
    pub async fn generate(
        &self,
        stats: &AggregateStats,
        posts: &[Post],
        scope: &RunScope,
    ) -> GeneratedIdeas {
        match self {
            ContentIdeaStrategy::Fallback => GeneratedIdeas {
                ideas: fallback_ideas(stats),
                source: IdeaSource::Fallback,
                warning: None,
            },
            ContentIdeaStrategy::Remote(_) => match self.try_generate(stats, posts, scope).await {
                Ok(ideas) => GeneratedIdeas {
                    ideas,
                    source: IdeaSource::Remote,
                    warning: None,
                },
                Err(err) => {
                    warn!(
                        parent: scope.span(),
                        error = %err,
                        "content idea generation failed, using templates"
                    );
                    GeneratedIdeas {
                        ideas: fallback_ideas(stats),
                        source: IdeaSource::Fallback,
                        warning: Some(format!("AI generation failed: {}", err)),
                    }
                }
            },
        }
    }
}
