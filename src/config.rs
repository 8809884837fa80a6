use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::scoring::{EngagementScorer, EngagementWeights};
use crate::Platform;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub target_account: Option<String>,
    pub competitors: Vec<String>,
    pub posts_per_account: usize,
    pub auto_discover: bool,
    pub min_competitors: usize,
    pub min_accounts: usize,
    pub max_accounts: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            target_account: None,
            competitors: Vec::new(),
            posts_per_account: 20,
            auto_discover: true,
            min_competitors: 5,
            min_accounts: 3,
            max_accounts: 15,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub source: String,
    pub platform: Platform,
    pub delay_base_ms: u64,
    pub delay_step_ms: u64,
    pub timeout_ms: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            source: "sample".to_string(),
            platform: Platform::Twitter,
            delay_base_ms: 5000,
            delay_step_ms: 2000,
            timeout_ms: 15000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub twitter: EngagementWeights,
    pub instagram: EngagementWeights,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            twitter: EngagementWeights::twitter(),
            instagram: EngagementWeights::instagram(),
        }
    }
}

impl ScoringConfig {
    pub fn scorer_for(&self, platform: Platform) -> EngagementScorer {
        let weights = match platform {
            Platform::Twitter => self.twitter.clone(),
            Platform::Instagram => self.instagram.clone(),
        };
        EngagementScorer::new(weights)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdeasConfig {
    pub strategy: String,
    pub model: String,
    pub api_base: String,
    pub max_tokens: u32,
    pub temperature: f64,
    pub timeout_ms: u64,
}

impl Default for IdeasConfig {
    fn default() -> Self {
        Self {
            strategy: "fallback".to_string(),
            model: "anthropic/claude-3-haiku".to_string(),
            api_base: "https://openrouter.ai/api/v1".to_string(),
            max_tokens: 2000,
            temperature: 0.8,
            timeout_ms: 60000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub output_dir: PathBuf,
    pub persist: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("reports"),
            persist: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub run: RunConfig,
    pub fetch: FetchConfig,
    pub scoring: ScoringConfig,
    pub ideas: IdeasConfig,
    pub report: ReportConfig,
}

impl AnalyzerConfig {
    pub fn load(path: Option<PathBuf>) -> Result<(Self, Option<PathBuf>), String> {
        let config_path = path.or_else(default_config_path);
        let mut config = match config_path.as_ref() {
            Some(path) if path.exists() => {
                let contents = std::fs::read_to_string(path)
                    .map_err(|err| format!("failed to read config: {}", err))?;
                Self::from_toml(&contents)?
            }
            _ => AnalyzerConfig::default(),
        };

        config.apply_env_overrides();
        Ok((config, config_path))
    }

    pub fn from_toml(contents: &str) -> Result<Self, String> {
        toml::from_str(contents).map_err(|err| format!("failed to parse config: {}", err))
    }

    pub fn write(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|err| format!("failed to create config dir: {}", err))?;
            }
        }
        let payload = toml::to_string_pretty(self)
            .map_err(|err| format!("failed to serialize config: {}", err))?;
        std::fs::write(path, payload).map_err(|err| format!("failed to write config: {}", err))?;
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(strategy) = env::var("IDEAS_STRATEGY") {
            if !strategy.trim().is_empty() {
                self.ideas.strategy = strategy;
            }
        }
        if let Ok(model) = env::var("IDEAS_MODEL") {
            if !model.trim().is_empty() {
                self.ideas.model = model;
            }
        }
        if let Ok(source) = env::var("FETCH_SOURCE") {
            if !source.trim().is_empty() {
                self.fetch.source = source;
            }
        }
        if let Ok(dir) = env::var("REPORT_DIR") {
            if !dir.trim().is_empty() {
                self.report.output_dir = PathBuf::from(dir);
            }
        }
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    env::var("ANALYZER_CONFIG_PATH")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| Some(PathBuf::from("config/analyzer.toml")))
}
