use std::collections::HashMap;

use anyhow::{bail, Result};

pub const DEFAULT_JWT_SECRET: &str = "your-secret-key-change-in-production";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-pro";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Full application configuration.
/// Read from the process environment first, then from a `.env` file in the
/// working directory.
#[derive(Debug, Clone)]
pub struct Config {
    // HTTP
    pub bind: String,
    pub port: u16,
    /// Directory served under `/public` (note PDFs).
    pub public_dir: String,
    /// Writable directory for `feedback.json`.
    pub data_dir: String,

    // Auth
    pub jwt_secret: String,
    pub jwt_ttl_days: i64,

    // External provider. Empty key = local knowledge base only.
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub provider_timeout_s: u64,

    /// "development", "production", ...
    pub environment: String,
}

fn parse_dotenv() -> HashMap<String, String> {
    let Ok(contents) = std::fs::read_to_string(".env") else {
        return HashMap::new();
    };
    parse_dotenv_str(&contents)
}

fn parse_dotenv_str(contents: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((k, v)) = line.split_once('=') {
            let v = v.trim();
            let v = v
                .strip_prefix('"')
                .and_then(|s| s.strip_suffix('"'))
                .unwrap_or(v);
            map.insert(k.trim().to_string(), v.to_string());
        }
    }
    map
}

fn get_str(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    lookup(key).unwrap_or_else(|| default.to_string())
}

fn get_parsed<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T> {
    match lookup(key) {
        None => Ok(default),
        Some(raw) if raw.trim().is_empty() => Ok(default),
        Some(raw) => match raw.trim().parse() {
            Ok(v) => Ok(v),
            Err(_) => bail!("invalid value for {key}: {raw:?}"),
        },
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let dotenv = parse_dotenv();
        Self::from_lookup(|key| std::env::var(key).ok().or_else(|| dotenv.get(key).cloned()))
    }

    /// Build a config from an arbitrary key lookup (environment, map, ...).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let jwt_secret = get_str(&lookup, "JWT_SECRET", DEFAULT_JWT_SECRET);
        let environment = get_str(&lookup, "APP_ENV", "development");

        let config = Config {
            bind: get_str(&lookup, "BIND", "0.0.0.0"),
            port: get_parsed(&lookup, "PORT", 5000)?,
            public_dir: get_str(&lookup, "PUBLIC_DIR", "public"),
            data_dir: get_str(&lookup, "DATA_DIR", "store"),
            jwt_secret,
            jwt_ttl_days: get_parsed(&lookup, "JWT_TTL_DAYS", 7)?,
            gemini_api_key: get_str(&lookup, "GEMINI_API_KEY", "").trim().to_string(),
            gemini_model: get_str(&lookup, "GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
            gemini_base_url: get_str(&lookup, "GEMINI_BASE_URL", DEFAULT_GEMINI_BASE_URL),
            provider_timeout_s: get_parsed(&lookup, "PROVIDER_TIMEOUT_S", 30)?,
            environment,
        };

        if config.is_production() && config.jwt_secret == DEFAULT_JWT_SECRET {
            tracing::warn!("JWT_SECRET is unset in production; tokens are signed with the default secret");
        }
        if config.jwt_ttl_days <= 0 {
            bail!("JWT_TTL_DAYS must be positive, got {}", config.jwt_ttl_days);
        }
        Ok(config)
    }

    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }

    /// Whether the external provider should be attempted at all.
    pub fn provider_enabled(&self) -> bool {
        !self.gemini_api_key.is_empty()
    }

    pub fn feedback_path(&self) -> String {
        format!("{}/feedback.json", self.data_dir.trim_end_matches('/'))
    }
}
