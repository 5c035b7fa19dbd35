use thiserror::Error;

use crate::domain::error::DomainError;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Errors from an external data provider (stats or odds).
///
/// Cloneable so scripted test sources can replay the same failure. Transport
/// errors carry a `transient` flag consulted by the single-retry policy.
#[derive(Error, Debug, Clone)]
pub enum SourceError {
    #[error("{provider} request failed: {reason}")]
    Transport {
        provider: &'static str,
        reason: String,
        transient: bool,
    },

    #[error("{provider} returned HTTP {status}")]
    Status { provider: &'static str, status: u16 },

    #[error("malformed {provider} payload: {reason}")]
    Malformed {
        provider: &'static str,
        reason: String,
    },
}

impl SourceError {
    /// Wrap a reqwest error, marking timeouts and connection failures as
    /// transient (eligible for the one immediate retry).
    pub fn transport(provider: &'static str, err: &reqwest::Error) -> Self {
        SourceError::Transport {
            provider,
            reason: err.to_string(),
            transient: err.is_timeout() || err.is_connect(),
        }
    }

    /// Whether a single immediate retry is worth attempting.
    pub fn is_transient(&self) -> bool {
        matches!(self, SourceError::Transport { transient: true, .. })
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The stats source is the backbone of a slate; its failure is fatal
    /// for the requested league/date.
    #[error("stats source failed: {0}")]
    Stats(#[source] SourceError),

    #[error("odds source failed: {0}")]
    Odds(#[source] SourceError),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, Error>;
