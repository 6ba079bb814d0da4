use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every value has a default; malformed numbers fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Directory holding the key-value store and section snapshot files.
    pub content_dir: PathBuf,
    /// Site root served to browsers; uploads land in `<public_dir>/uploads`.
    pub public_dir: PathBuf,
    /// When set, uploads and deletes are forwarded to this origin instead of
    /// touching the local filesystem.
    pub media_backend_url: Option<String>,
    pub media_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            content_dir: env_or("CONTENT_DIR", "content").into(),
            public_dir: env_or("PUBLIC_DIR", "public").into(),
            media_backend_url: std::env::var("MEDIA_BACKEND_URL")
                .ok()
                .map(|url| url.trim_end_matches('/').to_string())
                .filter(|url| !url.is_empty()),
            media_timeout_secs: std::env::var("MEDIA_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse::<u64>()
                .context("MEDIA_TIMEOUT_SECS must be a whole number of seconds")?,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
