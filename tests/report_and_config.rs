use engagement_patterns::config::{AnalyzerConfig, FetchConfig, RunConfig};
use engagement_patterns::fetch::{PostSource, SampleSource};
use engagement_patterns::report::{read_report, write_report, RunReport};
use engagement_patterns::scoring::{EngagementScorer, EngagementWeights};
use engagement_patterns::{ContentIdeaStrategy, Orchestrator, Platform, RunScope};

async fn sample_report() -> RunReport {
    let source = PostSource::Sample(SampleSource::new(
        Platform::Twitter,
        EngagementScorer::new(EngagementWeights::twitter()),
    ));
    let orchestrator =
        Orchestrator::new(source, ContentIdeaStrategy::Fallback, &FetchConfig::default());
    let config = RunConfig {
        competitors: vec!["alpha".to_string(), "beta".to_string(), "gamma".to_string()],
        auto_discover: false,
        posts_per_account: 4,
        ..RunConfig::default()
    };
    orchestrator
        .run(&config, &RunScope::detached())
        .await
        .unwrap()
        .report
}

#[tokio::test]
async fn report_is_written_with_a_timestamped_name() {
    let dir = tempfile::tempdir().unwrap();
    let report = sample_report().await;

    let path = write_report(&report, dir.path()).await.unwrap();

    let name = path.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("analysis_report_"));
    assert!(name.ends_with(".json"));
    assert_eq!(name, report.file_name());

    let loaded = read_report(&path).await.unwrap();
    assert_eq!(loaded.run_id, report.run_id);
    assert_eq!(loaded.execution_summary.total_posts_analyzed, 12);
    assert_eq!(loaded.content_ideas, report.content_ideas);
    assert_eq!(loaded.patterns_analysis.top_hashtags, report.patterns_analysis.top_hashtags);
}

#[tokio::test]
async fn reports_never_overwrite_each_other() {
    let dir = tempfile::tempdir().unwrap();
    let report = sample_report().await;

    let first = write_report(&report, dir.path()).await.unwrap();
    let second = write_report(&report, dir.path()).await.unwrap();

    assert_ne!(first, second);
    assert!(first.exists());
    assert!(second.exists());
    let leftovers = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(Result::ok)
        .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "tmp"))
        .count();
    assert_eq!(leftovers, 0);
}

#[tokio::test]
async fn concurrent_reports_get_distinct_files() {
    let dir = tempfile::tempdir().unwrap();
    let first = sample_report().await;
    let second = RunReport {
        run_id: format!("{}-other", first.run_id),
        ..first.clone()
    };

    let (a, b) = tokio::join!(
        write_report(&first, dir.path()),
        write_report(&second, dir.path())
    );
    let (a, b) = (a.unwrap(), b.unwrap());

    assert_ne!(a, b);
    let mut run_ids = vec![
        read_report(&a).await.unwrap().run_id,
        read_report(&b).await.unwrap().run_id,
    ];
    run_ids.sort();
    let mut expected = vec![first.run_id.clone(), second.run_id.clone()];
    expected.sort();
    assert_eq!(run_ids, expected);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);
}

#[tokio::test]
async fn report_dir_is_created_on_demand() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("reports").join("weekly");

    let path = write_report(&sample_report().await, &nested).await.unwrap();
    assert!(path.starts_with(&nested));
}

#[test]
fn partial_config_keeps_defaults() {
    let config = AnalyzerConfig::from_toml(
        r#"
[run]
competitors = ["alpha", "beta"]

[ideas]
strategy = "remote"

[scoring.twitter]
likes = 3.0
"#,
    )
    .unwrap();

    assert_eq!(config.run.competitors, vec!["alpha".to_string(), "beta".to_string()]);
    assert_eq!(config.run.posts_per_account, 20);
    assert_eq!(config.run.min_accounts, 3);
    assert_eq!(config.ideas.strategy, "remote");
    assert_eq!(config.ideas.model, "anthropic/claude-3-haiku");
    assert!((config.scoring.twitter.likes - 3.0).abs() < 1e-6);
    assert!((config.scoring.twitter.reshares - 2.0).abs() < 1e-6);
    assert!((config.scoring.instagram.views - 0.01).abs() < 1e-9);
    assert_eq!(config.fetch.source, "sample");
    assert!(config.report.persist);
}

#[test]
fn bad_config_is_rejected() {
    assert!(AnalyzerConfig::from_toml("[run]\nposts_per_account = -4\n").is_err());
    assert!(AnalyzerConfig::from_toml("[fetch]\nplatform = \"myspace\"\n").is_err());
}

#[test]
fn default_config_round_trips_through_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config").join("analyzer.toml");

    AnalyzerConfig::default().write(&path).unwrap();
    let contents = std::fs::read_to_string(&path).unwrap();
    let parsed = AnalyzerConfig::from_toml(&contents).unwrap();

    assert_eq!(parsed, AnalyzerConfig::default());
}

#[test]
fn missing_config_file_means_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let (config, path) = AnalyzerConfig::load(Some(dir.path().join("absent.toml"))).unwrap();

    assert_eq!(config.run, RunConfig::default());
    assert!(path.is_some());
}
