//! Client configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honoured when present.

use std::env;
use std::str::FromStr;

use crate::error::ConfigError;

pub const API_BASE_URL_VAR: &str = "WORDGAME_API_BASE_URL";
pub const VALIDATION_SOURCE_VAR: &str = "WORDGAME_VALIDATION_SOURCE";
pub const DICTIONARY_URL_VAR: &str = "WORDGAME_DICTIONARY_URL";
pub const VALIDATION_FAILURE_VAR: &str = "WORDGAME_VALIDATION_FAILURE";

/// Public lexicon used when validating against the dictionary.
pub const DEFAULT_DICTIONARY_URL: &str = "https://api.dictionaryapi.dev/api/v2/entries/en";

/// Where `validate_word` sends its lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationSource {
    /// `POST /words/validate` on the game backend
    #[default]
    Backend,
    /// Public dictionary lookup keyed by word
    Dictionary,
}

impl FromStr for ValidationSource {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "backend" => Ok(Self::Backend),
            "dictionary" => Ok(Self::Dictionary),
            _ => Err(ConfigError::InvalidValue {
                var: VALIDATION_SOURCE_VAR,
                value: s.to_string(),
            }),
        }
    }
}

/// What `validate_word` answers when the lookup itself fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationFailurePolicy {
    /// Treat the word as invalid
    #[default]
    FailClosed,
    /// Treat the word as valid so play is never blocked by an outage
    FailOpen,
}

impl ValidationFailurePolicy {
    /// Validity reported for a word whose lookup failed.
    pub fn outcome(&self) -> bool {
        matches!(self, Self::FailOpen)
    }
}

impl FromStr for ValidationFailurePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "closed" | "fail-closed" => Ok(Self::FailClosed),
            "open" | "fail-open" => Ok(Self::FailOpen),
            _ => Err(ConfigError::InvalidValue {
                var: VALIDATION_FAILURE_VAR,
                value: s.to_string(),
            }),
        }
    }
}

/// Everything needed to wire the game state to its backends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the word/score service, without trailing slash
    pub api_base_url: String,
    pub validation_source: ValidationSource,
    pub dictionary_url: String,
    pub validation_failure: ValidationFailurePolicy,
}

impl ClientConfig {
    /// Config pointing at `api_base_url` with every other setting defaulted.
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
            validation_source: ValidationSource::default(),
            dictionary_url: DEFAULT_DICTIONARY_URL.to_string(),
            validation_failure: ValidationFailurePolicy::default(),
        }
    }

    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = lookup(API_BASE_URL_VAR)
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing {
                var: API_BASE_URL_VAR,
            })?;
        check_url(API_BASE_URL_VAR, &api_base_url)?;

        let mut config = Self::new(api_base_url);

        if let Some(source) = lookup(VALIDATION_SOURCE_VAR) {
            config.validation_source = source.parse()?;
        }

        if let Some(url) = lookup(DICTIONARY_URL_VAR) {
            check_url(DICTIONARY_URL_VAR, &url)?;
            config.dictionary_url = url.trim_end_matches('/').to_string();
        }

        if let Some(policy) = lookup(VALIDATION_FAILURE_VAR) {
            config.validation_failure = policy.parse()?;
        }

        Ok(config)
    }
}

fn check_url(var: &'static str, value: &str) -> Result<(), ConfigError> {
    reqwest::Url::parse(value)
        .map(|_| ())
        .map_err(|e| ConfigError::InvalidUrl {
            var,
            value: value.to_string(),
            detail: e.to_string(),
        })
}
