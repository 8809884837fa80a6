use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use crate::api::{ApiAnalyzeRequest, ApiAnalyzeResponse, ApiPatternsRequest, ApiPatternsResponse};
use engagement_patterns::config::AnalyzerConfig;
use engagement_patterns::orchestrator::analyze_and_generate;
use engagement_patterns::report::write_report;
use engagement_patterns::{Orchestrator, Post, RunError, RunScope};

#[derive(Clone)]
struct AppState {
    config: Arc<AnalyzerConfig>,
    orchestrator: Orchestrator,
}

pub async fn serve(config: AnalyzerConfig, args: crate::ServeArgs) -> Result<(), String> {
    let orchestrator = Orchestrator::from_config(&config)?;
    let state = AppState {
        config: Arc::new(config),
        orchestrator,
    };

    let app = Router::new()
        .route("/api/health", get(health))
        .route("/api/analyze", post(analyze_handler))
        .route("/api/patterns", post(patterns_handler))
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .map_err(|err| format!("invalid bind address: {}", err))?;
    info!(%addr, "listening");

    axum::serve(tokio::net::TcpListener::bind(addr).await.map_err(|err| {
        format!("failed to bind server: {}", err)
    })?, app)
    .await
    .map_err(|err| format!("server error: {}", err))?;

    Ok(())
}

async fn health() -> impl IntoResponse {
    StatusCode::OK
}

async fn analyze_handler(
    State(state): State<AppState>,
    Json(request): Json<ApiAnalyzeRequest>,
) -> Result<Json<ApiAnalyzeResponse>, (StatusCode, String)> {
    let persist = request.persist.unwrap_or(false);
    let run_config = request
        .into_run_config(&state.config.run)
        .map_err(|err| (StatusCode::BAD_REQUEST, err))?;

    let scope = RunScope::new();
    let outcome = state
        .orchestrator
        .run(&run_config, &scope)
        .await
        .map_err(|err| {
            let status = match err {
                RunError::TooFewAccounts { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                RunError::NoData => StatusCode::BAD_GATEWAY,
            };
            (status, err.to_string())
        })?;

    let report_path = if persist {
        let path = write_report(&outcome.report, &state.config.report.output_dir)
            .await
            .map_err(|err| (StatusCode::INTERNAL_SERVER_ERROR, err))?;
        Some(path.display().to_string())
    } else {
        None
    };

    Ok(Json(ApiAnalyzeResponse {
        report: outcome.report,
        report_path,
    }))
}

async fn patterns_handler(
    State(state): State<AppState>,
    Json(request): Json<ApiPatternsRequest>,
) -> Result<Json<ApiPatternsResponse>, (StatusCode, String)> {
    let platform = request
        .platform(state.config.fetch.platform)
        .map_err(|err| (StatusCode::BAD_REQUEST, err))?;
    let scorer = state.config.scoring.scorer_for(platform);
    let posts: Vec<Post> = request
        .posts
        .into_iter()
        .map(|raw| Post::from_raw(raw, platform, &scorer))
        .collect();

    let scope = RunScope::new();
    let (stats, generated) =
        analyze_and_generate(&posts, state.orchestrator.strategy(), &scope).await;
    Ok(Json(ApiPatternsResponse::new(scope.run_id(), stats, generated)))
}
