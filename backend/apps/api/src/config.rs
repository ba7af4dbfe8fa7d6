//! Process Configuration
//!
//! Read once at boot from the environment (after `.env` is loaded).

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use auth::AuthConfig;
use axum::http::HeaderValue;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:31113";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:40922,http://127.0.0.1:40922";

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    /// In-memory user records when unset
    pub database_url: Option<String>,
    pub frontend_origins: Vec<HeaderValue>,
    pub auth: AuthConfig,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr: SocketAddr = get("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("BIND_ADDR must be a socket address")?;

        let frontend_origins: Vec<HeaderValue> = get("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .filter_map(|origin| origin.trim().parse().ok())
            .collect();

        let mut auth = AuthConfig::default();
        if let Some(path) = get("SECRET_FILE") {
            auth.secret_file = PathBuf::from(path);
        }
        if let Some(flag) = get("ROTATE_SECRET_ON_BOOT") {
            auth.rotate_secret_on_boot = parse_flag(&flag)
                .with_context(|| format!("ROTATE_SECRET_ON_BOOT must be a boolean, got {flag:?}"))?;
        }
        auth.banned_terms_file = get("BANNED_TERMS_FILE").map(PathBuf::from);

        Ok(Self {
            bind_addr,
            database_url: get("DATABASE_URL"),
            frontend_origins,
            auth,
        })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
