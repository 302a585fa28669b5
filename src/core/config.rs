//! Environment-driven configuration
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Reminder interval and throttle settings
//! - 1.0.0: Token, database path, log level

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub discord_guild_id: Option<String>,
    pub database_path: String,
    pub log_level: String,
    pub reminder_interval: Duration,
    pub rate_limit_max_actions: usize,
    pub rate_limit_window: Duration,
}

impl Config {
    /// Read configuration from the process environment.
    ///
    /// Call `dotenvy::dotenv()` first if a `.env` file should be honoured.
    pub fn from_env() -> Result<Self> {
        let discord_token = env::var("DISCORD_TOKEN")
            .context("DISCORD_TOKEN environment variable is required")?;
        if discord_token.trim().is_empty() {
            anyhow::bail!("DISCORD_TOKEN is set but empty");
        }

        Ok(Config {
            discord_token,
            discord_guild_id: env::var("DISCORD_GUILD_ID").ok().filter(|s| !s.is_empty()),
            database_path: env::var("DATABASE_PATH").unwrap_or_else(|_| "luna.db".to_string()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            reminder_interval: Duration::from_secs(parse_var("REMINDER_INTERVAL_SECS", 3600)?),
            rate_limit_max_actions: parse_var("RATE_LIMIT_MAX_ACTIONS", 20)?,
            rate_limit_window: Duration::from_secs(parse_var("RATE_LIMIT_WINDOW_SECS", 60)?),
        })
    }
}

fn parse_var<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}
