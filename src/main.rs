mod api;
mod server;

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use engagement_patterns::config::{default_config_path, AnalyzerConfig};
use engagement_patterns::orchestrator::analyze_and_generate;
use engagement_patterns::report::{write_report, RunReport};
use engagement_patterns::telemetry::init_logging;
use engagement_patterns::{
    format_float, format_number, format_percent, ContentIdeaStrategy, Orchestrator, Platform, Post,
    RawPost, RunScope,
};

use crate::api::ApiPatternsResponse;

#[derive(Parser)]
#[command(
    name = "engagement-patterns",
    about = "Competitor post pattern analyzer and content idea generator"
)]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch competitor posts, extract patterns and generate ideas.
    Analyze(AnalyzeArgs),
    /// Analyse a local JSON array of posts.
    Patterns(PatternsArgs),
    /// Write the default configuration file.
    InitConfig(InitConfigArgs),
    Serve(ServeArgs),
}

#[derive(Args, Debug, Clone, Default)]
struct AnalyzeArgs {
    #[arg(long)]
    target: Option<String>,
    #[arg(long = "competitor")]
    competitors: Vec<String>,
    #[arg(long)]
    posts: Option<usize>,
    #[arg(long)]
    no_discover: bool,
    #[arg(long)]
    min_competitors: Option<usize>,
    /// Post source: sample or x_api.
    #[arg(long)]
    source: Option<String>,
    #[arg(long)]
    platform: Option<String>,
    #[arg(long)]
    ai: bool,
    #[arg(long)]
    no_save: bool,
}

#[derive(Args, Debug, Clone)]
struct PatternsArgs {
    #[arg(long)]
    input: PathBuf,
    #[arg(long)]
    platform: Option<String>,
    #[arg(long)]
    ai: bool,
}

#[derive(Args, Debug, Clone)]
struct InitConfigArgs {
    #[arg(long)]
    path: Option<PathBuf>,
    #[arg(long)]
    force: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
    #[arg(long, default_value_t = 8787)]
    port: u16,
}

#[tokio::main]
async fn main() {
    load_dotenv();
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let command = cli.command.unwrap_or(Command::Analyze(AnalyzeArgs::default()));

    match command {
        Command::Analyze(args) => run_analyze(cli.config, args).await,
        Command::Patterns(args) => run_patterns(cli.config, args).await,
        Command::InitConfig(args) => run_init_config(args),
        Command::Serve(args) => {
            let (config, _) = AnalyzerConfig::load(cli.config)?;
            server::serve(config, args).await
        }
    }
}

async fn run_analyze(config_path: Option<PathBuf>, args: AnalyzeArgs) -> Result<(), String> {
    let (mut config, _) = AnalyzerConfig::load(config_path)?;
    apply_analyze_args(&mut config, &args)?;

    let orchestrator = Orchestrator::from_config(&config)?;
    let scope = RunScope::new();
    let outcome = orchestrator
        .run(&config.run, &scope)
        .await
        .map_err(|err| err.to_string())?;

    print_summary(&outcome.report, config.fetch.platform);

    if config.report.persist {
        let path = write_report(&outcome.report, &config.report.output_dir).await?;
        println!("\nReport saved to {}", path.display());
    }
    Ok(())
}

fn apply_analyze_args(config: &mut AnalyzerConfig, args: &AnalyzeArgs) -> Result<(), String> {
    if let Some(target) = args.target.as_ref() {
        config.run.target_account = Some(target.clone());
    }
    if !args.competitors.is_empty() {
        config.run.competitors = args.competitors.clone();
    }
    if let Some(posts) = args.posts {
        if posts == 0 {
            return Err("--posts must be at least 1".to_string());
        }
        config.run.posts_per_account = posts;
    }
    if args.no_discover {
        config.run.auto_discover = false;
    }
    if let Some(min) = args.min_competitors {
        config.run.min_competitors = min;
    }
    if let Some(source) = args.source.as_ref() {
        config.fetch.source = source.clone();
    }
    if let Some(platform) = args.platform.as_deref() {
        config.fetch.platform = parse_platform(platform)?;
    }
    if args.ai {
        config.ideas.strategy = "remote".to_string();
    }
    if args.no_save {
        config.report.persist = false;
    }
    Ok(())
}

async fn run_patterns(config_path: Option<PathBuf>, args: PatternsArgs) -> Result<(), String> {
    let (mut config, _) = AnalyzerConfig::load(config_path)?;
    if args.ai {
        config.ideas.strategy = "remote".to_string();
    }
    let platform = match args.platform.as_deref() {
        Some(value) => parse_platform(value)?,
        None => config.fetch.platform,
    };

    let data = tokio::fs::read_to_string(&args.input)
        .await
        .map_err(|err| format!("failed to read {}: {}", args.input.display(), err))?;
    let raw: Vec<RawPost> =
        serde_json::from_str(&data).map_err(|err| format!("failed to parse posts: {}", err))?;

    let scorer = config.scoring.scorer_for(platform);
    let posts: Vec<Post> = raw
        .into_iter()
        .map(|post| Post::from_raw(post, platform, &scorer))
        .collect();

    let strategy = ContentIdeaStrategy::from_config(&config.ideas)?;
    let scope = RunScope::new();
    let (stats, generated) = analyze_and_generate(&posts, &strategy, &scope).await;

    let response = ApiPatternsResponse::new(scope.run_id(), stats, generated);
    let payload = serde_json::to_string_pretty(&response)
        .map_err(|err| format!("failed to serialize output: {}", err))?;
    println!("{}", payload);
    Ok(())
}

fn run_init_config(args: InitConfigArgs) -> Result<(), String> {
    let path = args
        .path
        .or_else(default_config_path)
        .ok_or_else(|| "no config path available".to_string())?;
    if path.exists() && !args.force {
        return Err(format!(
            "{} already exists (pass --force to overwrite)",
            path.display()
        ));
    }
    AnalyzerConfig::default().write(&path)?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}

fn print_summary(report: &RunReport, platform: Platform) {
    let stats = &report.patterns_analysis;
    let summary = &report.execution_summary;

    println!(
        "Analyzed {} {} from {} of {} accounts ({} success)",
        format_number(summary.total_posts_analyzed as f64),
        platform.post_noun(),
        summary.accounts_analyzed,
        summary.accounts_attempted,
        format_percent(summary.success_rate)
    );
    println!(
        "Average engagement score: {}",
        format_float(stats.avg_engagement_score, 1)
    );

    if !stats.top_hashtags.is_empty() {
        let tags: Vec<String> = stats
            .top_hashtags
            .iter()
            .take(5)
            .map(|tag| format!("#{} ({})", tag.hashtag, tag.frequency))
            .collect();
        println!("Top hashtags: {}", tags.join(", "));
    }

    if let Some(day) = stats.best_day() {
        println!(
            "Best day: {} (avg {} over {} posts)",
            day.day,
            format_float(day.avg_engagement, 1),
            day.posts
        );
    }
    if let Some((bucket, bucket_stats)) = stats.best_length_bucket() {
        println!(
            "Best length: {} (avg {})",
            bucket.label(),
            format_float(bucket_stats.avg_engagement, 1)
        );
    }

    if !stats.hook_patterns.top_performing_hooks.is_empty() {
        println!("\nTop hooks:");
        for hook in stats.hook_patterns.top_performing_hooks.iter().take(3) {
            println!(
                "- \"{}\" ({}, {})",
                hook.hook,
                format_float(hook.engagement_score, 0),
                hook.author
            );
        }
    }
    if !stats.hook_patterns.common_hook_starters.is_empty() {
        println!("\nCommon hook starters:");
        for starter in stats.hook_patterns.common_hook_starters.iter().take(3) {
            println!(
                "- \"{}...\" used {} times, avg {}",
                starter.starter,
                starter.count,
                format_float(starter.avg_engagement, 1)
            );
        }
    }

    if !stats.topic_themes.is_empty() {
        let themes: Vec<&str> = stats.topic_themes.iter().take(5).map(String::as_str).collect();
        println!("\nThemes: {}", themes.join(", "));
    }
    for note in &stats.engagement_insights.high_engagement_characteristics {
        println!("Driver: {}", note);
    }

    let ideas = &report.content_ideas;
    println!(
        "\nContent ideas ({}):",
        if report.ai_generated { "AI" } else { "templates" }
    );
    for idea in ideas.tweet_ideas.iter().take(5) {
        println!("- {}", idea);
    }
    if !ideas.hook_ideas.is_empty() {
        println!("\nHook ideas:");
        for hook in ideas.hook_ideas.iter().take(5) {
            println!("- {}", hook);
        }
    }

    for warning in &report.warnings {
        eprintln!("Warning: {}", warning);
    }
}

fn parse_platform(value: &str) -> Result<Platform, String> {
    Platform::from_str(value).ok_or_else(|| format!("unknown platform: {}", value))
}

fn load_dotenv() {
    let _ = dotenvy::dotenv();
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let manifest_path = Path::new(manifest_dir).join(".env");
    let _ = dotenvy::from_path(manifest_path);
}
