pub mod sample;
pub mod x_api;

use std::time::Duration;
use tracing::debug;

use crate::config::{FetchConfig, ScoringConfig};
use crate::{Post, RunScope};

pub use sample::SampleSource;
pub use x_api::XApiClient;

#[derive(Debug, Clone)]
pub enum PostSource {
    Sample(SampleSource),
    XApi(XApiClient),
}

impl PostSource {
    pub fn from_config(fetch: &FetchConfig, scoring: &ScoringConfig) -> Result<Self, String> {
        let scorer = scoring.scorer_for(fetch.platform);
        match fetch.source.trim().to_lowercase().as_str() {
            "sample" | "demo" => Ok(PostSource::Sample(SampleSource::new(fetch.platform, scorer))),
            "x_api" | "x" | "twitter" => Ok(PostSource::XApi(XApiClient::from_env(
                scorer,
                Duration::from_millis(fetch.timeout_ms),
            )?)),
            other => Err(format!("unknown post source: {}", other)),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PostSource::Sample(_) => "sample",
            PostSource::XApi(_) => "x_api",
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, PostSource::XApi(_))
    }

    pub async fn fetch_posts(
        &self,
        handle: &str,
        count: usize,
        scope: &RunScope,
    ) -> Result<Vec<Post>, String> {
        debug!(parent: scope.span(), source = self.label(), handle, count, "fetching posts");
        match self {
            PostSource::Sample(source) => Ok(source.generate(handle, count)),
            PostSource::XApi(client) => client.fetch_posts(handle, count).await,
        }
    }
}
