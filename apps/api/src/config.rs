use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_TEXT_RAZOR_URL: &str = "https://api.textrazor.com/";

/// Application configuration loaded from environment variables.
/// Fails at startup if a provided value cannot be parsed.
#[derive(Debug, Clone)]
pub struct Config {
    /// `None` when no key is configured; analysis then runs on the local fallback only.
    pub text_razor_api_key: Option<String>,
    pub text_razor_url: String,
    pub adapter_timeout: Duration,
    pub port: u16,
    pub rust_log: String,
    pub production: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let timeout_secs = std::env::var("TEXT_RAZOR_TIMEOUT_SECS")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u64>()
            .context("TEXT_RAZOR_TIMEOUT_SECS must be a whole number of seconds")?;

        Ok(Config {
            text_razor_api_key: optional_env("TEXT_RAZOR_API_KEY"),
            text_razor_url: optional_env("TEXT_RAZOR_URL")
                .unwrap_or_else(|| DEFAULT_TEXT_RAZOR_URL.to_string()),
            adapter_timeout: Duration::from_secs(timeout_secs),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            production: std::env::var("APP_ENV")
                .map(|v| v.eq_ignore_ascii_case("production"))
                .unwrap_or(false),
        })
    }
}

/// Reads a variable, treating blank values the same as unset ones.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
impl Config {
    /// Offline configuration for handler tests.
    pub fn for_tests(production: bool) -> Self {
        Config {
            text_razor_api_key: None,
            text_razor_url: DEFAULT_TEXT_RAZOR_URL.to_string(),
            adapter_timeout: Duration::from_secs(1),
            port: 0,
            rust_log: "debug".to_string(),
            production,
        }
    }
}
