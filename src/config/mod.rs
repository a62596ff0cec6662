//! Configuration module for the showcase site.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

use crate::github::GITHUB_API;

/// Errors raised while reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A variable was set but could not be parsed.
    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Organization whose public repositories are showcased
    pub org: String,
    /// Optional token for the hosting API
    pub github_token: Option<String>,
    /// Base URL of the hosting REST API
    pub github_api_url: String,
    /// Per-request timeout for upstream calls (transport default when unset)
    pub upstream_timeout: Option<Duration>,
    /// Repository names never shown in listings
    pub denylist: Vec<String>,
    /// Subdomain prefix of tag preview deployments
    pub preview_prefix: String,
    /// Domain hosting tag preview deployments
    pub preview_domain: String,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from the process environment (and `.env`, if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        let org = var("SHOWCASE_ORG", "0human");

        let github_token = lookup("SHOWCASE_GITHUB_TOKEN").filter(|t| !t.trim().is_empty());

        let github_api_url = var("SHOWCASE_GITHUB_API_URL", GITHUB_API)
            .trim_end_matches('/')
            .to_string();

        let upstream_timeout = match lookup("SHOWCASE_UPSTREAM_TIMEOUT_SECS") {
            Some(raw) => Some(Duration::from_secs(raw.trim().parse().map_err(|_| {
                ConfigError::Invalid {
                    name: "SHOWCASE_UPSTREAM_TIMEOUT_SECS",
                    value: raw.clone(),
                }
            })?)),
            None => None,
        };

        let denylist = var("SHOWCASE_DENYLIST", ".github,showcase-infra")
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();

        let preview_prefix = var("SHOWCASE_PREVIEW_PREFIX", "nextjs");
        let preview_domain = var("SHOWCASE_PREVIEW_DOMAIN", "0human.website");

        let raw_addr = var("SHOWCASE_BIND_ADDR", "127.0.0.1:8080");
        let bind_addr = raw_addr.parse().map_err(|_| ConfigError::Invalid {
            name: "SHOWCASE_BIND_ADDR",
            value: raw_addr.clone(),
        })?;

        let log_level = var("SHOWCASE_LOG_LEVEL", "info");

        let log_format = match var("SHOWCASE_LOG_FORMAT", "pretty").as_str() {
            "json" => LogFormat::Json,
            "pretty" => LogFormat::Pretty,
            other => {
                return Err(ConfigError::Invalid {
                    name: "SHOWCASE_LOG_FORMAT",
                    value: other.to_string(),
                })
            }
        };

        Ok(Self {
            org,
            github_token,
            github_api_url,
            upstream_timeout,
            denylist,
            preview_prefix,
            preview_domain,
            bind_addr,
            log_level,
            log_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_default_config() {
        let config = load(&[]).unwrap();

        assert_eq!(config.org, "0human");
        assert!(config.github_token.is_none());
        assert_eq!(config.github_api_url, "https://api.github.com");
        assert!(config.upstream_timeout.is_none());
        assert_eq!(config.denylist, vec![".github", "showcase-infra"]);
        assert_eq!(config.preview_prefix, "nextjs");
        assert_eq!(config.preview_domain, "0human.website");
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("SHOWCASE_ORG", "acme"),
            ("SHOWCASE_GITHUB_TOKEN", "ghp_secret"),
            ("SHOWCASE_GITHUB_API_URL", "http://localhost:9000/"),
            ("SHOWCASE_UPSTREAM_TIMEOUT_SECS", "5"),
            ("SHOWCASE_DENYLIST", " tools , ,dotfiles"),
            ("SHOWCASE_LOG_FORMAT", "json"),
        ])
        .unwrap();

        assert_eq!(config.org, "acme");
        assert_eq!(config.github_token.as_deref(), Some("ghp_secret"));
        assert_eq!(config.github_api_url, "http://localhost:9000");
        assert_eq!(config.upstream_timeout, Some(Duration::from_secs(5)));
        assert_eq!(config.denylist, vec!["tools", "dotfiles"]);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_blank_token_is_ignored() {
        let config = load(&[("SHOWCASE_GITHUB_TOKEN", "  ")]).unwrap();
        assert!(config.github_token.is_none());
    }

    #[test]
    fn test_invalid_bind_addr() {
        let err = load(&[("SHOWCASE_BIND_ADDR", "not-an-addr")]).unwrap_err();
        assert!(err.to_string().contains("SHOWCASE_BIND_ADDR"));
    }

    #[test]
    fn test_invalid_timeout() {
        assert!(load(&[("SHOWCASE_UPSTREAM_TIMEOUT_SECS", "soon")]).is_err());
    }
}
