// src/config.rs

use std::{env, net::SocketAddr};

use dotenvy::dotenv;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the CodeLab platform API (question fetch, submission intake).
    pub api_base_url: Url,
    pub draft_database_url: String,
    pub bind_addr: SocketAddr,
    /// Browser origins allowed to call the editor endpoints.
    pub cors_origins: Vec<String>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();

        let api_base_url = env::var("CODELAB_API_URL")
            .map_err(|_| ConfigError::Missing("CODELAB_API_URL"))?;
        let api_base_url = Url::parse(&api_base_url).map_err(|e| ConfigError::Invalid {
            name: "CODELAB_API_URL",
            reason: e.to_string(),
        })?;

        let draft_database_url = env::var("DRAFT_DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://codelab_drafts.db".to_string());

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                name: "BIND_ADDR",
                reason: e.to_string(),
            })?;

        let cors_origins = parse_origins(
            &env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".to_string()),
        );

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            api_base_url,
            draft_database_url,
            bind_addr,
            cors_origins,
            rust_log,
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
