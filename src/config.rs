//! Process configuration, read once at startup from the environment.
//!
//! # Environment Variables
//!
//! - `GEMINI_API_KEY` (or `GOOGLE_API_KEY`) — required API secret
//! - `GEMINI_MODEL` — model id (default: `gemini-2.0-flash`)
//! - `GEMINI_BASE_URL` — API base URL override
//! - `GEMINI_TIMEOUT_SECS` — optional request timeout
//! - `KNOWLEDGE_BASE_PATH` — document location (default: `lib/knowledge_base.json`)
//! - `KNOWLEDGE_CACHE` — keep the first successful load (default: false)
//! - `PORTFOLIO_OWNER` — persona name used in the system instruction
//! - `HOST` / `PORT` — bind address (default: `0.0.0.0:8080`)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::knowledge::KnowledgeConfig;
use crate::llms::providers::gemini::{DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL};

/// Persona name used when `PORTFOLIO_OWNER` is unset.
pub const DEFAULT_OWNER: &str = "Ibrahim Naoun";

/// Startup misconfiguration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("GEMINI_API_KEY (or GOOGLE_API_KEY) is not set")]
    MissingApiKey,

    #[error("invalid value for {var}: {value:?}")]
    InvalidValue { var: &'static str, value: String },
}

/// Everything the server binary needs to start.
#[derive(Clone)]
pub struct AppConfig {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub gemini_timeout: Option<Duration>,
    pub knowledge: KnowledgeConfig,
    pub owner: String,
    pub host: String,
    pub port: u16,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("gemini_api_key", &"<redacted>")
            .field("gemini_model", &self.gemini_model)
            .field("gemini_base_url", &self.gemini_base_url)
            .field("gemini_timeout", &self.gemini_timeout)
            .field("knowledge", &self.knowledge)
            .field("owner", &self.owner)
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}

impl AppConfig {
    /// Load from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let gemini_api_key = get("GEMINI_API_KEY")
            .or_else(|| get("GOOGLE_API_KEY"))
            .ok_or(ConfigError::MissingApiKey)?;

        let gemini_timeout = match get("GEMINI_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                    var: "GEMINI_TIMEOUT_SECS",
                    value: raw.clone(),
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        let cache = match get("KNOWLEDGE_CACHE") {
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::InvalidValue {
                var: "KNOWLEDGE_CACHE",
                value: raw,
            })?,
            None => false,
        };

        let port: u16 = match get("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                var: "PORT",
                value: raw.clone(),
            })?,
            None => 8080,
        };

        Ok(Self {
            gemini_api_key,
            gemini_model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.into()),
            gemini_base_url: get("GEMINI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.into()),
            gemini_timeout,
            knowledge: KnowledgeConfig::new(get("KNOWLEDGE_BASE_PATH").map(PathBuf::from), Some(cache)),
            owner: get("PORTFOLIO_OWNER").unwrap_or_else(|| DEFAULT_OWNER.into()),
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
        })
    }

    /// `host:port` string suitable for `TcpListener::bind`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "k")])).unwrap();
        assert_eq!(config.gemini_api_key, "k");
        assert_eq!(config.gemini_model, "gemini-2.0-flash");
        assert_eq!(config.gemini_base_url, DEFAULT_GEMINI_BASE_URL);
        assert_eq!(config.gemini_timeout, None);
        assert_eq!(config.knowledge, KnowledgeConfig::default());
        assert_eq!(config.owner, DEFAULT_OWNER);
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_missing_key_is_an_error() {
        let err = AppConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey));

        let err = AppConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey));
    }

    #[test]
    fn test_google_api_key_fallback() {
        let config = AppConfig::from_lookup(lookup(&[("GOOGLE_API_KEY", "g")])).unwrap();
        assert_eq!(config.gemini_api_key, "g");
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "k"),
            ("GEMINI_MODEL", "gemini-2.5-pro"),
            ("GEMINI_TIMEOUT_SECS", "30"),
            ("KNOWLEDGE_BASE_PATH", "/srv/kb.json"),
            ("KNOWLEDGE_CACHE", "true"),
            ("PORTFOLIO_OWNER", "Jane Doe"),
            ("HOST", "127.0.0.1"),
            ("PORT", "3000"),
        ]))
        .unwrap();
        assert_eq!(config.gemini_model, "gemini-2.5-pro");
        assert_eq!(config.gemini_timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.knowledge.path, PathBuf::from("/srv/kb.json"));
        assert!(config.knowledge.cache);
        assert_eq!(config.owner, "Jane Doe");
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
    }

    #[test]
    fn test_invalid_values() {
        let err = AppConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "k"), ("PORT", "http")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { var: "PORT", .. }));

        let err = AppConfig::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "k"),
            ("KNOWLEDGE_CACHE", "maybe"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { var: "KNOWLEDGE_CACHE", .. }));
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = AppConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "secret-key")])).unwrap();
        assert!(!format!("{:?}", config).contains("secret-key"));
    }
}
