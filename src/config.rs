//! Application configuration loading and validation.
//!
//! Configuration is loaded from a TOML file with environment variable
//! overrides for sensitive values: `ODDS_API_KEY` and `OPENROUTER_API_KEY`
//! are read from the environment at load time and never from the file.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};
use url::Url;

use crate::error::{ConfigError, Result};

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub resolver: ResolverConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub llm: LlmConfig,
}

#[derive(Debug, Deserialize)]
pub struct NetworkConfig {
    /// Base URL of the stats provider's site API.
    #[serde(default = "default_stats_base_url")]
    pub stats_base_url: String,
    /// Base URL of the odds provider (The Odds API v4 layout).
    #[serde(default = "default_odds_base_url")]
    pub odds_base_url: String,
    /// Bookmaker regions requested from the odds provider.
    #[serde(default = "default_regions")]
    pub regions: String,
    /// Featured markets requested per league.
    #[serde(default = "default_markets")]
    pub markets: String,
    /// Player-prop markets fetched per event; empty disables prop fetching.
    #[serde(default = "default_prop_markets")]
    pub prop_markets: String,
    /// Odds API key loaded from `ODDS_API_KEY` env var at runtime.
    #[serde(skip)]
    pub odds_api_key: Option<String>,
}

fn default_stats_base_url() -> String {
    "https://site.api.espn.com/apis/site/v2/sports".into()
}

fn default_odds_base_url() -> String {
    "https://api.the-odds-api.com/v4".into()
}

fn default_regions() -> String {
    "us".into()
}

fn default_markets() -> String {
    "h2h,spreads,totals".into()
}

fn default_prop_markets() -> String {
    "player_points".into()
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            stats_base_url: default_stats_base_url(),
            odds_base_url: default_odds_base_url(),
            regions: default_regions(),
            markets: default_markets(),
            prop_markets: default_prop_markets(),
            odds_api_key: None,
        }
    }
}

/// Name resolution configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ResolverConfig {
    /// Path to the human-maintained alias table.
    #[serde(default = "default_alias_file")]
    pub alias_file: PathBuf,
    /// Minimum composite similarity accepted by fuzzy matching.
    /// The 0.85 default is a starting point to be tuned against observed
    /// alias collisions, not a law of nature.
    #[serde(default = "default_fuzzy_threshold")]
    pub fuzzy_threshold: f64,
}

fn default_alias_file() -> PathBuf {
    PathBuf::from("aliases.toml")
}

fn default_fuzzy_threshold() -> f64 {
    0.85
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            alias_file: default_alias_file(),
            fuzzy_threshold: default_fuzzy_threshold(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".into()
}

fn default_log_format() -> String {
    "pretty".into()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// LLM commentary configuration.
#[derive(Debug, Deserialize)]
pub struct LlmConfig {
    /// Enable narrative generation for the `--narrate` flag.
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_llm_model")]
    pub model: String,
    #[serde(default = "default_llm_base_url")]
    pub base_url: String,
    /// API key loaded from `OPENROUTER_API_KEY` env var at runtime.
    #[serde(skip)]
    pub api_key: Option<String>,
}

fn default_llm_model() -> String {
    "openai/gpt-4o-mini".into()
}

fn default_llm_base_url() -> String {
    "https://openrouter.ai/api/v1".into()
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            model: default_llm_model(),
            base_url: default_llm_base_url(),
            api_key: None,
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;

        let mut config: Self = toml::from_str(&content).map_err(ConfigError::Parse)?;
        config.apply_env();
        config.validate()?;

        Ok(config)
    }

    /// Load the config file if it exists; otherwise fall back to defaults.
    ///
    /// Secrets still come from the environment either way.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            let mut config = Self::default();
            config.apply_env();
            config.validate()?;
            Ok(config)
        }
    }

    fn apply_env(&mut self) {
        self.network.odds_api_key = std::env::var("ODDS_API_KEY").ok();
        self.llm.api_key = std::env::var("OPENROUTER_API_KEY").ok();
    }

    fn validate(&self) -> Result<()> {
        Url::parse(&self.network.stats_base_url).map_err(|e| ConfigError::InvalidValue {
            field: "stats_base_url",
            reason: e.to_string(),
        })?;
        Url::parse(&self.network.odds_base_url).map_err(|e| ConfigError::InvalidValue {
            field: "odds_base_url",
            reason: e.to_string(),
        })?;
        if !(0.0..=1.0).contains(&self.resolver.fuzzy_threshold)
            || self.resolver.fuzzy_threshold == 0.0
        {
            return Err(ConfigError::InvalidValue {
                field: "fuzzy_threshold",
                reason: format!(
                    "{} is outside (0.0, 1.0]",
                    self.resolver.fuzzy_threshold
                ),
            }
            .into());
        }
        if self.logging.level.is_empty() {
            return Err(ConfigError::MissingField { field: "level" }.into());
        }
        Ok(())
    }

    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.logging.level));

        match self.logging.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).init();
            }
            _ => {
                fmt().with_env_filter(filter).init();
            }
        }
    }
}
