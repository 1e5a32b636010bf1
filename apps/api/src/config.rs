use anyhow::{bail, Context, Result};

pub const DEFAULT_APP_NAME: &str = "SkillSync - Resume Gap Analyzer";
pub const DEFAULT_APP_VERSION: &str = "1.0.0";
pub const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";
/// Fallback used when `DATABASE_URL` is absent. Reported as "not set" by the
/// diagnostics endpoint.
pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost:5432/skillsync";
pub const DEFAULT_LLM_MODEL: &str = "gpt-4o-mini";

/// Application configuration loaded from environment variables.
/// Built once at startup and cloned into `AppState`.
#[derive(Debug, Clone)]
pub struct Config {
    pub app_name: String,
    pub app_version: String,
    pub debug: bool,
    /// Raw comma-separated origin list, as supplied.
    pub cors_origins: String,
    pub database_url: String,
    pub openai_api_key: String,
    pub llm_model: String,
    pub port: u16,
    pub rust_log: String,
    pub db_acquire_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Parses configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let or_default =
            |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let debug = match lookup("DEBUG") {
            Some(raw) => parse_bool(&raw)
                .with_context(|| format!("DEBUG must be a boolean, got '{raw}'"))?,
            None => false,
        };

        Ok(Config {
            app_name: or_default("APP_NAME", DEFAULT_APP_NAME),
            app_version: or_default("APP_VERSION", DEFAULT_APP_VERSION),
            debug,
            cors_origins: or_default("CORS_ORIGINS", DEFAULT_CORS_ORIGINS),
            database_url: or_default("DATABASE_URL", DEFAULT_DATABASE_URL),
            openai_api_key: or_default("OPENAI_API_KEY", ""),
            llm_model: or_default("LLM_MODEL", DEFAULT_LLM_MODEL),
            port: or_default("PORT", "8000")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: or_default("RUST_LOG", "info"),
            db_acquire_timeout_secs: or_default("DB_ACQUIRE_TIMEOUT_SECS", "5")
                .parse::<u64>()
                .context("DB_ACQUIRE_TIMEOUT_SECS must be a whole number of seconds")?,
        })
    }

    /// The configured origins, split on commas with blanks dropped.
    pub fn cors_origins_list(&self) -> Vec<String> {
        self.cors_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn database_url_set(&self) -> bool {
        !self.database_url.is_empty() && self.database_url != DEFAULT_DATABASE_URL
    }
}

fn parse_bool(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => bail!("unrecognised boolean '{other}'"),
    }
}
