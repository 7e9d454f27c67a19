//! Service configuration, read from the process environment.
//!
//! A `.env` file in the working directory is loaded first when present.

use std::{fmt::Display, net::SocketAddr, str::FromStr, time::Duration};

use interfaces_github_starred::index::{GitHubClientConfig, DEFAULT_API_URL};
use thiserror::Error;
use utils_trace::LogFormat;

#[derive(Debug, Clone)]
pub struct Config {
    pub github_token: String,
    pub github_account: String,
    pub github_api_url: String,
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub release_concurrency: usize,
    pub request_timeout: Duration,
    pub log_level: String,
    pub log_format: LogFormat,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("MissingVar: {name} must be set")]
    MissingVar {
        name: &'static str,
    },
    #[error("InvalidVar: {name}={value}: {reason}")]
    InvalidVar {
        name: &'static str,
        value: String,
        reason: String,
    },
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from any variable source; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let required = |name: &'static str| get(name).ok_or(ConfigError::MissingVar { name });

        let release_concurrency: usize = parse_or(&get, "RELEASE_CONCURRENCY", 5)?;
        if release_concurrency == 0 {
            return Err(invalid("RELEASE_CONCURRENCY", "0", "must be at least 1"));
        }

        let request_timeout_secs: u64 = parse_or(&get, "REQUEST_TIMEOUT_SECS", 10)?;
        if request_timeout_secs == 0 {
            return Err(invalid("REQUEST_TIMEOUT_SECS", "0", "must be at least 1"));
        }

        Ok(Self {
            github_token: required("GITHUB_TOKEN")?,
            github_account: required("GITHUB_ACCOUNT")?,
            github_api_url: get("GITHUB_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            database_url: get("DATABASE_URL").unwrap_or_else(|| "starred_releases.db".to_string()),
            bind_addr: parse_or(&get, "BIND_ADDR", SocketAddr::from(([0, 0, 0, 0], 8000)))?,
            release_concurrency,
            request_timeout: Duration::from_secs(request_timeout_secs),
            log_level: get("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            log_format: parse_or(&get, "LOG_FORMAT", LogFormat::default())?,
        })
    }

    pub fn github_client_config(&self) -> GitHubClientConfig {
        GitHubClientConfig {
            api_url: self.github_api_url.clone(),
            timeout: self.request_timeout,
            ..GitHubClientConfig::new(self.github_token.clone())
        }
    }
}

fn parse_or<T, G>(get: &G, name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
    G: Fn(&str) -> Option<String>,
{
    match get(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|err: T::Err| invalid(name, &value, err)),
        None => Ok(default),
    }
}

fn invalid(name: &'static str, value: &str, reason: impl Display) -> ConfigError {
    ConfigError::InvalidVar {
        name,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
