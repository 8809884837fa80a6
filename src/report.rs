use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::RunConfig;
use crate::ideas::{ContentIdeas, IdeaSource};
use crate::{mean, truncate_with_ellipsis, AggregateStats, EngagementCounts, Post};

const TOP_POST_TEXT_CHARS: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionSummary {
    pub accounts_analyzed: usize,
    pub accounts_attempted: usize,
    pub total_posts_analyzed: usize,
    pub success_rate: f64,
    pub avg_engagement_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopPost {
    pub text: String,
    pub url: Option<String>,
    pub engagement_score: f64,
    pub counts: EngagementCounts,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSummary {
    pub account: String,
    pub posts_analyzed: usize,
    pub avg_engagement: f64,
    pub top_post: Option<TopPost>,
}

impl AccountSummary {
    pub fn from_ranked(account: &str, posts: &[Post]) -> Self {
        let scores: Vec<f64> = posts.iter().map(Post::engagement_score).collect();
        Self {
            account: account.to_string(),
            posts_analyzed: posts.len(),
            avg_engagement: mean(&scores),
            top_post: posts.first().map(|post| TopPost {
                text: truncate_with_ellipsis(&post.text, TOP_POST_TEXT_CHARS),
                url: post.url.clone(),
                engagement_score: post.engagement_score(),
                counts: post.counts().clone(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: String,
    pub generated_at: DateTime<Utc>,
    pub ai_generated: bool,
    pub idea_source: IdeaSource,
    pub post_source: String,
    pub config: RunConfig,
    pub execution_summary: ExecutionSummary,
    pub patterns_analysis: AggregateStats,
    pub content_ideas: ContentIdeas,
    pub account_performance: Vec<AccountSummary>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl RunReport {
    pub fn file_name(&self) -> String {
        format!(
            "analysis_report_{}.json",
            self.generated_at.format("%Y%m%d_%H%M%S")
        )
    }
}

/// Writes the report under `dir` via a temp file and rename, returning the
/// final path. The final name is reserved with `create_new`, so an existing
/// report with the same timestamp is never overwritten.
pub async fn write_report(report: &RunReport, dir: &Path) -> Result<PathBuf, String> {
    ensure_dir(dir).await?;

    let payload = serde_json::to_string_pretty(report)
        .map_err(|err| format!("failed to serialize report: {}", err))?;
    let path = reserve_report_path(report, dir).await?;
    let tmp_path = dir.join(format!(".{}.tmp", report.run_id));

    let written = async {
        tokio::fs::write(&tmp_path, payload)
            .await
            .map_err(|err| format!("failed to write report: {}", err))?;
        tokio::fs::rename(&tmp_path, &path)
            .await
            .map_err(|err| format!("failed to finalize report: {}", err))
    }
    .await;

    if let Err(err) = written {
        let _ = tokio::fs::remove_file(&tmp_path).await;
        let _ = tokio::fs::remove_file(&path).await;
        return Err(err);
    }
    Ok(path)
}

async fn reserve_report_path(report: &RunReport, dir: &Path) -> Result<PathBuf, String> {
    let stamp = report.generated_at.format("%Y%m%d_%H%M%S");
    let mut path = dir.join(report.file_name());
    let mut suffix = 1usize;
    loop {
        match tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(_) => return Ok(path),
            Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => {
                path = dir.join(format!("analysis_report_{}_{}.json", stamp, suffix));
                suffix += 1;
            }
            Err(err) => return Err(format!("failed to create report file: {}", err)),
        }
    }
}

pub async fn read_report(path: &Path) -> Result<RunReport, String> {
    let data = tokio::fs::read_to_string(path)
        .await
        .map_err(|err| format!("failed to read report: {}", err))?;
    serde_json::from_str(&data).map_err(|err| format!("failed to parse report: {}", err))
}

async fn ensure_dir(path: &Path) -> Result<(), String> {
    if path.as_os_str().is_empty() || path.exists() {
        return Ok(());
    }
    tokio::fs::create_dir_all(path)
        .await
        .map_err(|err| format!("failed to create report dir: {}", err))
}
