use anyhow::{Context, Result, ensure};
use dotenvy::dotenv;
use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub server_addr: String,
    pub log_dir: String,

    // Rate limiting
    pub rate_per_min: u32,

    /// Echoed back by `GET /`
    pub developer: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            server_addr: env::var("SERVER_ADDR").unwrap_or_else(|_| "127.0.0.1:5000".to_string()),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://hrms.db?mode=rwc".to_string()),
            log_dir: env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string()),
            rate_per_min: parse_rate(
                &env::var("RATE_PER_MIN").unwrap_or_else(|_| "1000".to_string()),
            )?,
            developer: env::var("APP_DEVELOPER").unwrap_or_else(|_| "Ujju".to_string()),
        })
    }
}

/// Requests per minute per client; zero would admit nothing and is refused.
fn parse_rate(raw: &str) -> Result<u32> {
    let rate: u32 = raw
        .trim()
        .parse()
        .with_context(|| format!("RATE_PER_MIN must be a positive integer, got {raw:?}"))?;
    ensure!(rate > 0, "RATE_PER_MIN must be at least 1");
    Ok(rate)
}

#[cfg(test)]
impl Config {
    /// In-memory database, generous rate budget.
    pub fn for_tests() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            server_addr: "127.0.0.1:0".to_string(),
            log_dir: "logs".to_string(),
            rate_per_min: 10_000,
            developer: "Ujju".to_string(),
        }
    }
}
