use axum::{
    http::{StatusCode, Uri},
    response::IntoResponse,
    Json, Router,
};
use chrono::{TimeZone, Utc};
use serde_json::json;
use std::time::Duration;

use engagement_patterns::config::{FetchConfig, RunConfig};
use engagement_patterns::discovery::{discover_competitors, normalize_handle};
use engagement_patterns::fetch::{PostSource, SampleSource, XApiClient};
use engagement_patterns::orchestrator::resolve_accounts;
use engagement_patterns::scoring::{EngagementScorer, EngagementWeights};
use engagement_patterns::{
    ContentIdeaStrategy, IdeaSource, Orchestrator, Platform, RunError, RunScope,
};

fn sample_orchestrator() -> Orchestrator {
    let source = PostSource::Sample(SampleSource::new(
        Platform::Twitter,
        EngagementScorer::new(EngagementWeights::twitter()),
    ));
    Orchestrator::new(source, ContentIdeaStrategy::Fallback, &FetchConfig::default())
}

fn run_config(competitors: &[&str]) -> RunConfig {
    RunConfig {
        competitors: competitors.iter().map(|handle| handle.to_string()).collect(),
        auto_discover: false,
        posts_per_account: 5,
        ..RunConfig::default()
    }
}

async fn x_api_mock(uri: Uri) -> impl IntoResponse {
    let path = uri.path();
    if let Some(name) = path.strip_prefix("/users/by/username/") {
        if name == "ghost" {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({"title": "Not Found Error"})),
            );
        }
        return (StatusCode::OK, Json(json!({"data": {"id": format!("id-{}", name)}})));
    }
    if path.starts_with("/users/") && path.ends_with("/tweets") {
        return (
            StatusCode::OK,
            Json(json!({
                "data": [
                    {
                        "id": "1",
                        "text": "Hot take: tests are documentation",
                        "created_at": "2024-01-15T10:30:00.000Z",
                        "public_metrics": {"like_count": 5, "retweet_count": 1, "reply_count": 0, "quote_count": 0}
                    },
                    {
                        "id": "2",
                        "text": "Why most rewrites fail: a thread",
                        "created_at": "2024-01-16T14:00:00.000Z",
                        "public_metrics": {"like_count": 50, "retweet_count": 10, "reply_count": 4, "quote_count": 1}
                    },
                    {
                        "id": "3",
                        "text": "Hot take: naming is the whole job",
                        "created_at": "2024-01-17T09:00:00.000Z",
                        "public_metrics": {"like_count": 20, "retweet_count": 2, "reply_count": 2, "quote_count": 0}
                    }
                ]
            })),
        );
    }
    (StatusCode::NOT_FOUND, Json(json!({})))
}

async fn spawn_x_api() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Router::new().fallback(x_api_mock);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn x_api_orchestrator(api_base: String) -> Orchestrator {
    let client = XApiClient::new(
        api_base,
        "token".to_string(),
        EngagementScorer::new(EngagementWeights::twitter()),
        Duration::from_secs(2),
    )
    .unwrap();
    let fetch = FetchConfig {
        delay_base_ms: 0,
        delay_step_ms: 0,
        ..FetchConfig::default()
    };
    Orchestrator::new(PostSource::XApi(client), ContentIdeaStrategy::Fallback, &fetch)
}

#[test]
fn handles_are_normalized_and_deduplicated() {
    let config = run_config(&["@Alice", "alice", "bob", " carol ", ""]);
    assert_eq!(resolve_accounts(&config), vec!["alice", "bob", "carol"]);
    assert_eq!(normalize_handle("  @SomeOne "), "someone");
}

#[test]
fn discovery_tops_up_short_competitor_lists() {
    let config = RunConfig {
        target_account: Some("@100xEngineers".to_string()),
        competitors: vec!["dhh".to_string()],
        min_competitors: 5,
        ..RunConfig::default()
    };

    let accounts = resolve_accounts(&config);

    assert_eq!(accounts[0], "dhh");
    assert_eq!(accounts.len(), 8);
    assert_eq!(accounts.iter().filter(|handle| *handle == "dhh").count(), 1);
    assert!(!accounts.contains(&"100xengineers".to_string()));
}

#[test]
fn discovery_is_capped_at_twice_the_shortfall() {
    assert_eq!(discover_competitors("someone", 2).len(), 4);
    assert_eq!(discover_competitors("someone", 50).len(), 10);
    assert!(!discover_competitors("naval", 5).contains(&"naval".to_string()));
}

#[test]
fn accounts_are_capped() {
    let handles: Vec<String> = (0..20).map(|idx| format!("acct{}", idx)).collect();
    let refs: Vec<&str> = handles.iter().map(String::as_str).collect();
    let config = RunConfig {
        max_accounts: 15,
        ..run_config(&refs)
    };
    assert_eq!(resolve_accounts(&config).len(), 15);
}

#[tokio::test]
async fn sample_run_produces_a_full_report() {
    let orchestrator = sample_orchestrator();
    let config = run_config(&["alpha", "beta", "gamma"]);
    let scope = RunScope::new();

    let outcome = orchestrator.run(&config, &scope).await.unwrap();
    let report = &outcome.report;

    assert_eq!(report.run_id, scope.run_id());
    assert_eq!(report.post_source, "sample");
    assert_eq!(report.idea_source, IdeaSource::Fallback);
    assert!(!report.ai_generated);
    assert!(report.warnings.is_empty());
    assert_eq!(report.execution_summary.accounts_analyzed, 3);
    assert_eq!(report.execution_summary.total_posts_analyzed, 15);
    assert!((report.execution_summary.success_rate - 1.0).abs() < 1e-6);
    assert!(report.patterns_analysis.has_data());
    assert!(!report.content_ideas.tweet_ideas.is_empty());

    for entry in &outcome.accounts {
        assert_eq!(entry.posts.len(), 5);
        assert!(entry.posts.iter().all(|post| post.author == entry.account));
        assert!(entry
            .posts
            .windows(2)
            .all(|pair| pair[0].engagement_score() >= pair[1].engagement_score()));
    }
    assert_eq!(report.account_performance.len(), 3);
    assert!(report.account_performance.iter().all(|summary| summary.top_post.is_some()));
}

#[test]
fn anchored_samples_are_reproducible() {
    let anchor = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
    let make = || {
        SampleSource::new(
            Platform::Twitter,
            EngagementScorer::new(EngagementWeights::twitter()),
        )
        .with_anchor(anchor)
    };

    let first = make().generate("alpha", 6);
    let second = make().generate("alpha", 6);

    assert_eq!(first.len(), 6);
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.id, b.id);
        assert_eq!(a.text, b.text);
        assert_eq!(a.created_at, b.created_at);
        assert_eq!(a.counts(), b.counts());
        assert!((a.engagement_score() - b.engagement_score()).abs() < 1e-6);
    }
    assert!(first.iter().all(|post| post.created_at.starts_with("2024-01")));
}

#[tokio::test]
async fn sample_runs_are_not_throttled() {
    let source = PostSource::Sample(SampleSource::new(
        Platform::Twitter,
        EngagementScorer::new(EngagementWeights::twitter()),
    ));
    let fetch = FetchConfig {
        delay_base_ms: 60_000,
        delay_step_ms: 60_000,
        ..FetchConfig::default()
    };
    let orchestrator = Orchestrator::new(source, ContentIdeaStrategy::Fallback, &fetch);

    let result = tokio::time::timeout(
        Duration::from_secs(10),
        orchestrator.run(&run_config(&["a1", "b2", "c3", "d4"]), &RunScope::detached()),
    )
    .await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn too_few_accounts_is_an_error() {
    let err = sample_orchestrator()
        .run(&run_config(&["alpha", "@Alpha", "beta"]), &RunScope::detached())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        RunError::TooFewAccounts {
            required: 3,
            found: 2
        }
    ));
}

#[tokio::test]
async fn empty_fetches_mean_no_data() {
    let config = RunConfig {
        posts_per_account: 0,
        ..run_config(&["alpha", "beta", "gamma"])
    };

    let err = sample_orchestrator()
        .run(&config, &RunScope::detached())
        .await
        .unwrap_err();
    assert!(matches!(err, RunError::NoData));
}

#[tokio::test]
async fn failed_accounts_are_skipped() {
    let orchestrator = x_api_orchestrator(spawn_x_api().await);
    let config = RunConfig {
        posts_per_account: 2,
        ..run_config(&["alpha", "ghost", "beta"])
    };

    let outcome = orchestrator.run(&config, &RunScope::new()).await.unwrap();
    let summary = &outcome.report.execution_summary;

    assert_eq!(outcome.report.post_source, "x_api");
    assert_eq!(summary.accounts_attempted, 3);
    assert_eq!(summary.accounts_analyzed, 2);
    assert_eq!(summary.total_posts_analyzed, 4);
    assert!((summary.success_rate - 2.0 / 3.0).abs() < 1e-6);

    let alpha = &outcome.accounts[0];
    assert_eq!(alpha.account, "alpha");
    assert_eq!(alpha.posts[0].id, "2");
    assert_eq!(alpha.posts[1].id, "3");
    assert_eq!(
        alpha.posts[0].url.as_deref(),
        Some("https://twitter.com/alpha/status/2")
    );
}

#[tokio::test]
async fn unreachable_source_yields_no_data() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let orchestrator = x_api_orchestrator(format!("http://{}", addr));
    let err = orchestrator
        .run(&run_config(&["alpha", "beta", "gamma"]), &RunScope::detached())
        .await
        .unwrap_err();
    assert!(matches!(err, RunError::NoData));
}
