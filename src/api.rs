use serde::{Deserialize, Serialize};

use engagement_patterns::config::RunConfig;
use engagement_patterns::report::RunReport;
use engagement_patterns::{
    AggregateStats, ContentIdeas, GeneratedIdeas, IdeaSource, Platform, RawPost,
};

#[derive(Debug, Default, Deserialize)]
pub struct ApiAnalyzeRequest {
    pub target_account: Option<String>,
    pub competitors: Option<Vec<String>>,
    pub posts_per_account: Option<usize>,
    pub auto_discover: Option<bool>,
    pub min_competitors: Option<usize>,
    pub persist: Option<bool>,
}

impl ApiAnalyzeRequest {
    pub fn into_run_config(self, base: &RunConfig) -> Result<RunConfig, String> {
        let mut config = base.clone();

        if let Some(target) = self.target_account {
            let target = target.trim().to_string();
            config.target_account = if target.is_empty() { None } else { Some(target) };
        }
        if let Some(competitors) = self.competitors {
            config.competitors = competitors;
        }
        if let Some(value) = self.posts_per_account {
            if value == 0 {
                return Err("posts_per_account must be at least 1".to_string());
            }
            config.posts_per_account = value;
        }
        if let Some(value) = self.auto_discover {
            config.auto_discover = value;
        }
        if let Some(value) = self.min_competitors {
            config.min_competitors = value;
        }

        if config.competitors.is_empty() && config.target_account.is_none() {
            return Err("target_account or competitors is required".to_string());
        }
        Ok(config)
    }
}

#[derive(Debug, Serialize)]
pub struct ApiAnalyzeResponse {
    #[serde(flatten)]
    pub report: RunReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_path: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApiPatternsRequest {
    #[serde(default)]
    pub posts: Vec<RawPost>,
    pub platform: Option<String>,
}

impl ApiPatternsRequest {
    pub fn platform(&self, default: Platform) -> Result<Platform, String> {
        match self.platform.as_deref() {
            Some(value) => {
                Platform::from_str(value).ok_or_else(|| format!("unknown platform: {}", value))
            }
            None => Ok(default),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiPatternsResponse {
    pub run_id: String,
    pub ai_generated: bool,
    pub idea_source: IdeaSource,
    pub patterns_analysis: AggregateStats,
    pub content_ideas: ContentIdeas,
    pub warnings: Vec<String>,
}

impl ApiPatternsResponse {
    pub fn new(run_id: &str, stats: AggregateStats, generated: GeneratedIdeas) -> Self {
        Self {
            run_id: run_id.to_string(),
            ai_generated: generated.ai_generated(),
            idea_source: generated.source,
            patterns_analysis: stats,
            content_ideas: generated.ideas,
            warnings: generated.warning.into_iter().collect(),
        }
    }
}
