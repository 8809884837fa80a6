use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::Span;
use tracing_subscriber::EnvFilter;

static RUN_COUNTER: AtomicUsize = AtomicUsize::new(0);

pub fn init_logging(verbose: bool) {
    let default_directive = if verbose {
        "engagement_patterns=debug,info"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[derive(Debug, Clone)]
pub struct RunScope {
    run_id: String,
    span: Span,
}

impl RunScope {
    pub fn new() -> Self {
        let run_id = generate_run_id();
        let span = tracing::info_span!("run", run_id = %run_id);
        Self { run_id, span }
    }

    pub fn detached() -> Self {
        Self {
            run_id: generate_run_id(),
            span: Span::none(),
        }
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub fn span(&self) -> &Span {
        &self.span
    }
}

impl Default for RunScope {
    fn default() -> Self {
        Self::new()
    }
}

fn generate_run_id() -> String {
    let counter = RUN_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("run-{}-{}", now_ms(), counter)
}

fn now_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_millis())
        .unwrap_or(0)
}
