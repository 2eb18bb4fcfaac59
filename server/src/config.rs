use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result, anyhow};
use axum::http::HeaderValue;
use axum_extra::extract::cookie::Key;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use products_hr::{RecordStore, seed};
use tracing::{info, warn};

const DEFAULT_IDLE_MINUTES: u64 = 60;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub cookie_secret: Option<Vec<u8>>,
    pub secure_cookies: bool,
    pub cors_allowed_origins: Vec<String>,
    pub session_idle: Duration,
    pub seed_file: Option<PathBuf>,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let cookie_secret = match non_empty("COOKIE_SECRET_BASE64") {
            Some(raw) => {
                let bytes = STANDARD
                    .decode(raw.trim())
                    .context("invalid COOKIE_SECRET_BASE64")?;
                if bytes.len() < 32 {
                    return Err(anyhow!(
                        "COOKIE_SECRET_BASE64 must decode to at least 32 bytes"
                    ));
                }
                Some(bytes)
            }
            None => None,
        };

        let secure_cookies = non_empty("COOKIE_SECURE")
            .map(|val| matches!(val.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let cors_allowed_origins = non_empty("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect::<Vec<_>>();
        if cors_allowed_origins.is_empty() {
            return Err(anyhow!("CORS_ALLOWED_ORIGINS lists no origins"));
        }
        for origin in &cors_allowed_origins {
            HeaderValue::from_str(origin)
                .with_context(|| format!("invalid origin `{origin}` in CORS_ALLOWED_ORIGINS"))?;
        }

        let idle_minutes = match non_empty("SESSION_IDLE_MINUTES") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("invalid SESSION_IDLE_MINUTES `{raw}`"))?,
            None => DEFAULT_IDLE_MINUTES,
        };
        let idle_seconds = idle_minutes
            .checked_mul(60)
            .with_context(|| format!("SESSION_IDLE_MINUTES `{idle_minutes}` is too large"))?;

        Ok(Self {
            cookie_secret,
            secure_cookies,
            cors_allowed_origins,
            session_idle: Duration::from_secs(idle_seconds),
            seed_file: non_empty("EMPLOYEE_SEED_FILE").map(PathBuf::from),
        })
    }

    /// Key for the private session cookie; random per process when no secret is configured.
    pub fn cookie_key(&self) -> Key {
        match &self.cookie_secret {
            Some(secret) => Key::derive_from(secret),
            None => {
                warn!("COOKIE_SECRET_BASE64 not set; sessions will not survive a restart");
                Key::generate()
            }
        }
    }

    /// Records every new session starts from.
    pub fn seed_store(&self) -> Result<RecordStore> {
        let Some(path) = &self.seed_file else {
            return Ok(seed::mock_store());
        };
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read seed file {}", path.display()))?;
        let store = seed::store_from_json(&raw)
            .with_context(|| format!("failed to load seed file {}", path.display()))?;
        info!(path = %path.display(), records = store.len(), "seed file loaded");
        Ok(store)
    }
}
