use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: String,
    pub database_url: String,
    pub database_max_connections: u32,

    /// `None` means any origin may call the API.
    pub allowed_origins: Option<Vec<String>>,

    // Rate limiting, 0 turns it off
    pub rate_limit_per_min: u32,

    pub api_prefix: String,
    pub log_dir: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let string_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Self {
            server_addr: string_or("SERVER_ADDR", "0.0.0.0:8000"),
            database_url: string_or("DATABASE_URL", "sqlite://hrms.db?mode=rwc"),
            database_max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 5)?,
            allowed_origins: parse_origins(&string_or("ALLOWED_ORIGINS", "*")),
            rate_limit_per_min: parse_or(&lookup, "RATE_LIMIT_PER_MIN", 600)?,
            api_prefix: string_or("API_PREFIX", "/api"),
            log_dir: string_or("LOG_DIR", "logs"),
        })
    }

    /// Milliseconds between replenished requests, never below 1.
    pub fn rate_limit_interval_ms(&self) -> u64 {
        (60_000 / u64::from(self.rate_limit_per_min.max(1))).max(1)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw:?}")),
        None => Ok(default),
    }
}

/// `*` allows every origin; otherwise a comma-separated allow list.
fn parse_origins(raw: &str) -> Option<Vec<String>> {
    if raw.trim() == "*" {
        return None;
    }

    Some(
        raw.split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect(),
    )
}
