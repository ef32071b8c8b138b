//! Service configuration read from the environment.

use anyhow::Context;
use chrono::Duration;

use quizwall_core::export::{DEFAULT_IMPORT_BASE_URL, DEFAULT_SESSION_KEY_PREFIX};

/// Default staleness window for stored cards, in seconds.
pub const DEFAULT_CARD_TTL_SECS: i64 = 3600;

/// Default lifetime of a stored export, in seconds.
pub const DEFAULT_EXPORT_TTL_SECS: i64 = 86_400;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// How long extracted cards stay retrievable through `get-cards`.
    pub card_ttl: Duration,
    /// How long a stored export stays readable by its session key.
    pub export_ttl: Duration,
    pub import_base_url: String,
    pub session_key_prefix: String,
}

impl Config {
    /// Load from `.env` and the process environment.
    ///
    /// Recognized vars: HOST, PORT, CARD_TTL_SECS, EXPORT_TTL_SECS,
    /// IMPORT_BASE_URL, SESSION_KEY_PREFIX. Anything unset keeps its default.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let port = match std::env::var("PORT") {
            Ok(v) => v.parse().with_context(|| format!("invalid PORT: {}", v))?,
            Err(_) => defaults.port,
        };

        let card_ttl = ttl_var("CARD_TTL_SECS")?.unwrap_or(defaults.card_ttl);
        let export_ttl = ttl_var("EXPORT_TTL_SECS")?.unwrap_or(defaults.export_ttl);

        Ok(Self {
            host: std::env::var("HOST").unwrap_or(defaults.host),
            port,
            card_ttl,
            export_ttl,
            import_base_url: std::env::var("IMPORT_BASE_URL").unwrap_or(defaults.import_base_url),
            session_key_prefix: std::env::var("SESSION_KEY_PREFIX")
                .unwrap_or(defaults.session_key_prefix),
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn ttl_var(name: &str) -> anyhow::Result<Option<Duration>> {
    match std::env::var(name) {
        Ok(v) => {
            let secs: i64 = v
                .parse()
                .with_context(|| format!("invalid {}: {}", name, v))?;
            Ok(Some(Duration::seconds(secs)))
        }
        Err(_) => Ok(None),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            card_ttl: Duration::seconds(DEFAULT_CARD_TTL_SECS),
            export_ttl: Duration::seconds(DEFAULT_EXPORT_TTL_SECS),
            import_base_url: DEFAULT_IMPORT_BASE_URL.to_string(),
            session_key_prefix: DEFAULT_SESSION_KEY_PREFIX.to_string(),
        }
    }
}
