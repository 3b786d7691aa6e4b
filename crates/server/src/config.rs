//! Directory service configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `DIRECTORY_DATABASE_URL` - `SQLite` URL (fallback `DATABASE_URL`, default `sqlite://database.db`)
//! - `DIRECTORY_HOST` - Bind address (default: 127.0.0.1)
//! - `DIRECTORY_PORT` - Listen port (default: 5000)
//! - `GOOGLE_PLACES_API_KEY` - Places API key; listing lookups fail with 500 without it
//! - `GOOGLE_PLACES_BASE_URL` - Place-details endpoint (default: Google's)
//! - `OUTBOUND_TIMEOUT_SECS` - Timeout for places and SMTP calls (default: 5)
//! - `SERVER_EMAIL` / `GOOGLE_EMAIL_APP_PASS` / `CONTACT_RECIPIENT` - Contact mail (all or none)
//! - `MAIL_SERVER` / `MAIL_PORT` - SMTP relay (default: smtp.gmail.com:587)
//! - `SHOP_LIST_SOURCE` - `fixture` (default) or `store`, backs `/get-all-shops`
//! - `SHOP_FIXTURE_PATH` - Curated shop list file (default: bundled fixture)
//! - `LOG_FORMAT` - `text` (default) or `json`
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT`, `SENTRY_SAMPLE_RATE`, `SENTRY_TRACES_SAMPLE_RATE`

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

use honest_shops_core::Email;

const DEFAULT_DATABASE_URL: &str = "sqlite://database.db";
const DEFAULT_PLACES_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place/details/json";
const DEFAULT_MAIL_SERVER: &str = "smtp.gmail.com";
const DEFAULT_MAIL_PORT: &str = "587";
const DEFAULT_TIMEOUT_SECS: &str = "5";
const SENDER_NAME: &str = "Honest Shops SERVER";

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Directory service configuration.
#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    /// `SQLite` database URL
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Place-details API configuration
    pub places: PlacesConfig,
    /// Contact-form mail configuration (None disables delivery)
    pub email: Option<EmailConfig>,
    /// Data source for the public shop list
    pub shop_list: ShopListConfig,
    /// Timeout applied to every outbound call
    pub outbound_timeout: Duration,
    /// Log output format
    pub log_format: LogFormat,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

/// Place-details API configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct PlacesConfig {
    /// API key; `None` means listing lookups are not configured
    pub api_key: Option<SecretString>,
    /// Place-details endpoint
    pub base_url: Url,
}

impl std::fmt::Debug for PlacesConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlacesConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

/// SMTP configuration for contact-form notifications.
#[derive(Clone)]
pub struct EmailConfig {
    /// SMTP server hostname
    pub smtp_host: String,
    /// SMTP server port
    pub smtp_port: u16,
    /// SMTP authentication username (the sender mailbox)
    pub smtp_username: String,
    /// SMTP authentication password
    pub smtp_password: SecretString,
    /// Display name for the From header
    pub from_name: String,
    /// Email sender address (From header)
    pub from_address: Email,
    /// Where contact-form submissions are delivered
    pub recipient: Email,
}

impl std::fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailConfig")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("smtp_username", &self.smtp_username)
            .field("smtp_password", &"[REDACTED]")
            .field("from_name", &self.from_name)
            .field("from_address", &self.from_address)
            .field("recipient", &self.recipient)
            .finish()
    }
}

/// Where `/get-all-shops` reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShopListSource {
    /// Manually curated list shipped with the service.
    #[default]
    Fixture,
    /// Live directory from the entity store.
    Store,
}

impl FromStr for ShopListSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixture" => Ok(Self::Fixture),
            "store" => Ok(Self::Store),
            other => Err(format!("expected 'fixture' or 'store', got '{other}'")),
        }
    }
}

/// Shop list configuration.
#[derive(Debug, Clone, Default)]
pub struct ShopListConfig {
    pub source: ShopListSource,
    /// Overrides the bundled fixture when set.
    pub fixture_path: Option<PathBuf>,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl DirectoryConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is invalid, the mail settings are
    /// only partially set, or the places API key fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`DirectoryConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(lookup);

        let database_url = SecretString::from(
            env.optional("DIRECTORY_DATABASE_URL")
                .or_else(|| env.optional("DATABASE_URL"))
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
        );
        let host = env.parsed("DIRECTORY_HOST", "127.0.0.1")?;
        let port = env.parsed("DIRECTORY_PORT", "5000")?;
        let timeout_secs: u64 = env.parsed("OUTBOUND_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "OUTBOUND_TIMEOUT_SECS".to_string(),
                "must be greater than zero".to_string(),
            ));
        }

        let places = PlacesConfig::from_env(&env)?;
        let email = EmailConfig::from_env(&env)?;
        let shop_list = ShopListConfig {
            source: env.parsed("SHOP_LIST_SOURCE", "fixture")?,
            fixture_path: env.optional("SHOP_FIXTURE_PATH").map(PathBuf::from),
        };
        let log_format = match env.or_default("LOG_FORMAT", "text").to_ascii_lowercase().as_str() {
            "json" => LogFormat::Json,
            "text" => LogFormat::Text,
            other => {
                return Err(ConfigError::InvalidEnvVar(
                    "LOG_FORMAT".to_string(),
                    format!("expected 'text' or 'json', got '{other}'"),
                ));
            }
        };

        Ok(Self {
            database_url,
            host,
            port,
            places,
            email,
            shop_list,
            outbound_timeout: Duration::from_secs(timeout_secs),
            log_format,
            sentry_dsn: env.optional("SENTRY_DSN"),
            sentry_environment: env.optional("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: env
                .optional("SENTRY_SAMPLE_RATE")
                .and_then(|s| s.parse().ok())
                .unwrap_or(1.0),
            sentry_traces_sample_rate: env
                .optional("SENTRY_TRACES_SAMPLE_RATE")
                .and_then(|s| s.parse().ok())
                .unwrap_or(1.0),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl PlacesConfig {
    fn from_env<F: Fn(&str) -> Option<String>>(env: &Env<F>) -> Result<Self, ConfigError> {
        let api_key = match env.optional("GOOGLE_PLACES_API_KEY") {
            Some(key) => {
                validate_secret_strength(&key, "GOOGLE_PLACES_API_KEY")?;
                Some(SecretString::from(key))
            }
            None => None,
        };
        let base_url = env.parsed("GOOGLE_PLACES_BASE_URL", DEFAULT_PLACES_BASE_URL)?;

        Ok(Self { api_key, base_url })
    }
}

impl EmailConfig {
    fn from_env<F: Fn(&str) -> Option<String>>(env: &Env<F>) -> Result<Option<Self>, ConfigError> {
        let sender = env.optional("SERVER_EMAIL");
        let password = env.optional("GOOGLE_EMAIL_APP_PASS");
        let recipient = env.optional("CONTACT_RECIPIENT");

        match (sender, password, recipient) {
            (Some(sender), Some(password), Some(recipient)) => {
                let from_address = parse_email("SERVER_EMAIL", &sender)?;
                let recipient = parse_email("CONTACT_RECIPIENT", &recipient)?;
                Ok(Some(Self {
                    smtp_host: env.or_default("MAIL_SERVER", DEFAULT_MAIL_SERVER),
                    smtp_port: env.parsed("MAIL_PORT", DEFAULT_MAIL_PORT)?,
                    smtp_username: from_address.as_str().to_string(),
                    smtp_password: SecretString::from(password),
                    from_name: SENDER_NAME.to_string(),
                    from_address,
                    recipient,
                }))
            }
            (None, None, None) => Ok(None),
            _ => Err(ConfigError::InvalidEnvVar(
                "SERVER_EMAIL/GOOGLE_EMAIL_APP_PASS/CONTACT_RECIPIENT".to_string(),
                "must be set together".to_string(),
            )),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Key lookup with the typed accessors config loading needs.
struct Env<F: Fn(&str) -> Option<String>>(F);

impl<F: Fn(&str) -> Option<String>> Env<F> {
    /// Get an optional variable; blank values count as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }

    /// Parse a variable (or its default) into `T`.
    fn parsed<T>(&self, key: &str, default: &str) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.or_default(key, default)
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    }
}

fn parse_email(key: &str, value: &str) -> Result<Email, ConfigError> {
    Email::parse(value).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.chars().count() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1})"
            ),
        ));
    }

    Ok(())
}
