//! Site configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `BISTRO_DATABASE_URL` - `SQLite` URL (falls back to `DATABASE_URL`, then `sqlite://bistro.db`)
//! - `BISTRO_HOST` - Bind address (default: 127.0.0.1)
//! - `BISTRO_PORT` - Listen port (default: 5000)
//! - `BISTRO_BASE_URL` - Public URL (default: <http://localhost:5000>); `https://` enables secure cookies
//! - `BISTRO_BOOTSTRAP_EMAIL` - Email of the bootstrap account created at startup
//! - `BISTRO_BOOTSTRAP_PASSWORD` - Its password (required when the email is set)
//! - `BISTRO_BOOTSTRAP_FULLNAME` - Its display name (default: "Test User")
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

use bistro_core::Email;

const DEFAULT_DATABASE_URL: &str = "sqlite://bistro.db";
const DEFAULT_BOOTSTRAP_FULLNAME: &str = "Test User";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct BistroConfig {
    /// `SQLite` database URL
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL
    pub base_url: String,
    /// Optional bootstrap account
    pub bootstrap: Option<BootstrapAccount>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: Option<String>,
}

/// An account created at startup that may sign up again with its own
/// password to log in.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct BootstrapAccount {
    pub email: Email,
    pub fullname: String,
    pub password: SecretString,
}

impl std::fmt::Debug for BootstrapAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BootstrapAccount")
            .field("email", &self.email)
            .field("fullname", &self.fullname)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl BistroConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid, or if the
    /// bootstrap email is set without a password.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("BISTRO_DATABASE_URL");
        let host = get_env_or_default("BISTRO_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("BISTRO_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("BISTRO_PORT", "5000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("BISTRO_PORT".to_string(), e.to_string()))?;
        let base_url = get_env_or_default("BISTRO_BASE_URL", "http://localhost:5000");
        let bootstrap = BootstrapAccount::from_env()?;

        Ok(Self {
            database_url,
            host,
            port,
            base_url,
            bootstrap,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Configuration for a local database with every optional feature off.
    #[must_use]
    pub fn local(database_url: &str) -> Self {
        Self {
            database_url: SecretString::from(database_url),
            host: IpAddr::from([127, 0, 0, 1]),
            port: 5000,
            base_url: "http://localhost:5000".to_string(),
            bootstrap: None,
            sentry_dsn: None,
            sentry_environment: None,
        }
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether cookies should carry the `Secure` flag.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

impl BootstrapAccount {
    fn from_env() -> Result<Option<Self>, ConfigError> {
        let Some(raw_email) = get_optional_env("BISTRO_BOOTSTRAP_EMAIL") else {
            return Ok(None);
        };
        let email = Email::parse(&raw_email).map_err(|e| {
            ConfigError::InvalidEnvVar("BISTRO_BOOTSTRAP_EMAIL".to_string(), e.to_string())
        })?;
        let password = get_required_env("BISTRO_BOOTSTRAP_PASSWORD")?;

        Ok(Some(Self {
            email,
            fullname: get_env_or_default("BISTRO_BOOTSTRAP_FULLNAME", DEFAULT_BOOTSTRAP_FULLNAME),
            password: SecretString::from(password),
        }))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get database URL with fallback to generic `DATABASE_URL`, then the local file.
fn get_database_url(primary_key: &str) -> SecretString {
    std::env::var(primary_key)
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_or_else(
            |_| SecretString::from(DEFAULT_DATABASE_URL),
            SecretString::from,
        )
}

/// Get an optional environment variable, treating empty values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
