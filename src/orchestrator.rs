use chrono::Utc;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::{AnalyzerConfig, FetchConfig, RunConfig};
use crate::discovery::{discover_competitors, normalize_handle};
use crate::fetch::PostSource;
use crate::ideas::{ContentIdeaStrategy, GeneratedIdeas};
use crate::report::{AccountSummary, ExecutionSummary, RunReport};
use crate::scoring::rank_posts;
use crate::{analyze_posts, mean, AggregateStats, Post, RunScope};

pub const MAX_FETCH_DELAY: Duration = Duration::from_secs(300);

#[derive(Debug, Error)]
pub enum RunError {
    #[error("need at least {required} accounts to analyze, found {found}")]
    TooFewAccounts { required: usize, found: usize },
    #[error("no post data could be fetched from any account")]
    NoData,
}

#[derive(Debug, Clone)]
pub struct AccountPosts {
    pub account: String,
    pub posts: Vec<Post>,
}

#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub report: RunReport,
    pub accounts: Vec<AccountPosts>,
}

#[derive(Debug, Clone)]
pub struct Orchestrator {
    source: PostSource,
    strategy: ContentIdeaStrategy,
    delay_base: Duration,
    delay_step: Duration,
}

impl Orchestrator {
    pub fn new(source: PostSource, strategy: ContentIdeaStrategy, fetch: &FetchConfig) -> Self {
        Self {
            source,
            strategy,
            delay_base: Duration::from_millis(fetch.delay_base_ms),
            delay_step: Duration::from_millis(fetch.delay_step_ms),
        }
    }

    pub fn from_config(config: &AnalyzerConfig) -> Result<Self, String> {
        let source = PostSource::from_config(&config.fetch, &config.scoring)?;
        let strategy = ContentIdeaStrategy::from_config(&config.ideas)?;
        Ok(Self::new(source, strategy, &config.fetch))
    }

    pub fn strategy(&self) -> &ContentIdeaStrategy {
        &self.strategy
    }

    pub async fn run(&self, config: &RunConfig, scope: &RunScope) -> Result<RunOutcome, RunError> {
        let accounts = resolve_accounts(config);
        if accounts.len() < config.min_accounts {
            return Err(RunError::TooFewAccounts {
                required: config.min_accounts,
                found: accounts.len(),
            });
        }
        info!(
            parent: scope.span(),
            accounts = accounts.len(),
            source = self.source.label(),
            strategy = self.strategy.label(),
            "starting analysis"
        );

        let collected = self
            .collect_posts(&accounts, config.posts_per_account, scope)
            .await;
        if collected.is_empty() {
            warn!(parent: scope.span(), "no post data could be extracted from any account");
            return Err(RunError::NoData);
        }

        let posts: Vec<Post> = collected
            .iter()
            .flat_map(|entry| entry.posts.iter().cloned())
            .collect();
        let (stats, generated) = analyze_and_generate(&posts, &self.strategy, scope).await;

        let report = build_report(
            scope,
            config,
            self.source.label(),
            accounts.len(),
            &collected,
            stats,
            generated,
        );
        info!(
            parent: scope.span(),
            posts = report.execution_summary.total_posts_analyzed,
            ai_generated = report.ai_generated,
            "analysis complete"
        );

        Ok(RunOutcome {
            report,
            accounts: collected,
        })
    }

    pub async fn collect_posts(
        &self,
        accounts: &[String],
        per_account: usize,
        scope: &RunScope,
    ) -> Vec<AccountPosts> {
        let mut collected = Vec::new();

        for (idx, account) in accounts.iter().enumerate() {
            if let Some(delay) = self.delay_before(idx) {
                info!(
                    parent: scope.span(),
                    delay_ms = delay.as_millis() as u64,
                    "waiting before next request"
                );
                tokio::time::sleep(delay).await;
            }

            match self.fetch_account(account, per_account, scope).await {
                Ok(posts) if posts.is_empty() => {
                    warn!(parent: scope.span(), account = %account, "no posts found");
                }
                Ok(posts) => {
                    let scores: Vec<f64> = posts.iter().map(Post::engagement_score).collect();
                    info!(
                        parent: scope.span(),
                        account = %account,
                        posts = posts.len(),
                        avg_engagement = mean(&scores),
                        "retrieved top performing posts"
                    );
                    collected.push(AccountPosts {
                        account: account.clone(),
                        posts,
                    });
                }
                Err(err) => {
                    warn!(
                        parent: scope.span(),
                        account = %account,
                        error = %err,
                        "fetch failed, skipping account"
                    );
                }
            }
        }

        collected
    }

    pub async fn fetch_account(
        &self,
        account: &str,
        count: usize,
        scope: &RunScope,
    ) -> Result<Vec<Post>, String> {
        let fetched = self.source.fetch_posts(account, count, scope).await?;
        let mut posts: Vec<Post> = fetched
            .into_iter()
            .map(|post| post.with_author(account))
            .collect();
        rank_posts(&mut posts, count);
        Ok(posts)
    }

    fn delay_before(&self, idx: usize) -> Option<Duration> {
        if idx == 0 || !self.source.is_remote() {
            return None;
        }
        let step = u32::try_from(idx)
            .ok()
            .and_then(|n| self.delay_step.checked_mul(n))
            .unwrap_or(MAX_FETCH_DELAY);
        Some(self.delay_base.saturating_add(step).min(MAX_FETCH_DELAY))
    }
}

pub fn resolve_accounts(config: &RunConfig) -> Vec<String> {
    let mut candidates: Vec<String> = config
        .competitors
        .iter()
        .map(|handle| normalize_handle(handle))
        .filter(|handle| !handle.is_empty())
        .collect();

    if config.auto_discover {
        if let Some(target) = config.target_account.as_deref() {
            let target = normalize_handle(target);
            if !target.is_empty() && candidates.len() < config.min_competitors {
                let needed = config.min_competitors - candidates.len();
                candidates.extend(discover_competitors(&target, needed));
            }
        }
    }

    let mut accounts: Vec<String> = Vec::with_capacity(candidates.len());
    for handle in candidates {
        if !accounts.contains(&handle) {
            accounts.push(handle);
        }
    }
    accounts.truncate(config.max_accounts);
    accounts
}

pub async fn analyze_and_generate(
    posts: &[Post],
    strategy: &ContentIdeaStrategy,
    scope: &RunScope,
) -> (AggregateStats, GeneratedIdeas) {
    let stats = analyze_posts(posts);
    let generated = strategy.generate(&stats, posts, scope).await;
    (stats, generated)
}

fn build_report(
    scope: &RunScope,
    config: &RunConfig,
    post_source: &str,
    attempted: usize,
    collected: &[AccountPosts],
    stats: AggregateStats,
    generated: GeneratedIdeas,
) -> RunReport {
    let execution_summary = ExecutionSummary {
        accounts_analyzed: collected.len(),
        accounts_attempted: attempted,
        total_posts_analyzed: stats.total_posts_analyzed,
        success_rate: if attempted == 0 {
            0.0
        } else {
            collected.len() as f64 / attempted as f64
        },
        avg_engagement_score: stats.avg_engagement_score,
    };
    let account_performance = collected
        .iter()
        .map(|entry| AccountSummary::from_ranked(&entry.account, &entry.posts))
        .collect();

    RunReport {
        run_id: scope.run_id().to_string(),
        generated_at: Utc::now(),
        ai_generated: generated.ai_generated(),
        idea_source: generated.source,
        post_source: post_source.to_string(),
        config: config.clone(),
        execution_summary,
        patterns_analysis: stats,
        content_ideas: generated.ideas,
        account_performance,
        warnings: generated.warning.into_iter().collect(),
    }
}
