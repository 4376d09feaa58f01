//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file when present).

use serde::Deserialize;
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

const REDACTED: &str = "[redacted]";

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    pub line: LineConfig,
    pub market: MarketConfig,
    pub gemini: GeminiConfig,
    pub http: HttpConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// Apply pending migrations at startup
    pub run_migrations: bool,
    pub migrations_dir: PathBuf,
}

/// LINE Messaging API credentials and endpoint
#[derive(Clone)]
pub struct LineConfig {
    /// Shared secret used to sign webhook bodies
    pub channel_secret: String,
    /// Bearer token for outbound calls
    pub channel_access_token: String,
    pub api_base_url: String,
}

impl fmt::Debug for LineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LineConfig")
            .field("channel_secret", &REDACTED)
            .field("channel_access_token", &REDACTED)
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

/// Market data (TWSE MIS) endpoint
#[derive(Debug, Clone)]
pub struct MarketConfig {
    pub api_base_url: String,
}

/// Gemini text generation settings
#[derive(Clone)]
pub struct GeminiConfig {
    /// `None` disables AI opinions; the bot answers with the fallback text
    pub api_key: Option<String>,
    pub model: String,
    pub api_base_url: String,
}

impl GeminiConfig {
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }
}

impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| REDACTED))
            .field("model", &self.model)
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

/// Timeouts for inbound and outbound HTTP
#[derive(Debug, Clone, Copy)]
pub struct HttpConfig {
    /// Per-call timeout for upstream APIs
    pub outbound_timeout: Duration,
    /// Per-request timeout for inbound handlers
    pub request_timeout: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            outbound_timeout: Duration::from_secs(default_http_timeout_secs()),
            request_timeout: Duration::from_secs(default_request_timeout_secs()),
        }
    }
}

// Default value functions
fn default_app_name() -> String {
    "stockbot".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_migrations_dir() -> PathBuf {
    PathBuf::from("crates/stockbot-db/migrations")
}

fn default_line_api_base_url() -> String {
    "https://api.line.me".to_string()
}

fn default_market_api_base_url() -> String {
    "https://mis.twse.com.tw".to_string()
}

fn default_gemini_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_gemini_api_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_http_timeout_secs() -> u64 {
    10
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::MissingVar(key))
        };
        let parsed = |key: &'static str| -> Result<Option<u64>, ConfigError> {
            lookup(key)
                .map(|v| {
                    v.trim()
                        .parse::<u64>()
                        .map_err(|_| ConfigError::InvalidValue(key, v))
                })
                .transpose()
        };

        let port = required("API_PORT")?;
        let port = port
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue("API_PORT", port))?;

        let run_migrations = match lookup("DATABASE_RUN_MIGRATIONS") {
            None => false,
            Some(v) => match v.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" | "" => false,
                _ => return Err(ConfigError::InvalidValue("DATABASE_RUN_MIGRATIONS", v)),
            },
        };

        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env: lookup("APP_ENV")
                    .and_then(|s| Environment::parse(&s))
                    .unwrap_or_default(),
            },
            api: ServerConfig {
                host: lookup("API_HOST").unwrap_or_else(default_host),
                port,
            },
            database: DatabaseConfig {
                url: required("DATABASE_URL")?,
                max_connections: parsed("DATABASE_MAX_CONNECTIONS")?
                    .map_or_else(default_max_connections, |n| n as u32),
                min_connections: parsed("DATABASE_MIN_CONNECTIONS")?
                    .map_or_else(default_min_connections, |n| n as u32),
                run_migrations,
                migrations_dir: lookup("DATABASE_MIGRATIONS_DIR")
                    .map_or_else(default_migrations_dir, PathBuf::from),
            },
            line: LineConfig {
                channel_secret: required("LINE_CHANNEL_SECRET")?,
                channel_access_token: required("LINE_CHANNEL_ACCESS_TOKEN")?,
                api_base_url: lookup("LINE_API_BASE_URL")
                    .unwrap_or_else(default_line_api_base_url),
            },
            market: MarketConfig {
                api_base_url: lookup("MARKET_API_BASE_URL")
                    .unwrap_or_else(default_market_api_base_url),
            },
            gemini: GeminiConfig {
                api_key: lookup("GEMINI_API_KEY").filter(|v| !v.trim().is_empty()),
                model: lookup("GEMINI_MODEL").unwrap_or_else(default_gemini_model),
                api_base_url: lookup("GEMINI_API_BASE_URL")
                    .unwrap_or_else(default_gemini_api_base_url),
            },
            http: HttpConfig {
                outbound_timeout: Duration::from_secs(
                    parsed("HTTP_TIMEOUT_SECS")?.unwrap_or_else(default_http_timeout_secs),
                ),
                request_timeout: Duration::from_secs(
                    parsed("REQUEST_TIMEOUT_SECS")?.unwrap_or_else(default_request_timeout_secs),
                ),
            },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
