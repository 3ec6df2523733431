//! Configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Database (one of)
//! - `DELIVERIES_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//! - `DELIVERIES_DB_HOST`, `DELIVERIES_DB_NAME`, `DELIVERIES_DB_USER`,
//!   `DELIVERIES_DB_PASSWORD` - discrete connection parameters
//!   (`DELIVERIES_DB_PORT` optional, default 5432)
//!
//! ## Optional
//! - `DELIVERIES_DB_MAX_CONNECTIONS` - Pool size (default: 5)
//! - `DELIVERIES_HOST` - Bind address (default: 127.0.0.1)
//! - `DELIVERIES_PORT` - Listen port (default: 3000)
//! - `DELIVERIES_STRICT_INPUT` - Reject non-numeric part numbers and
//!   quantities instead of storing `0` (default: false)
//! - `LOG_FORMAT` - `json` for structured logs, anything else for text
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

const DEFAULT_PG_PORT: u16 = 5432;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Where the delivery store connects.
#[derive(Debug, Clone)]
pub enum DatabaseTarget {
    /// A full connection string (contains the password).
    Url(SecretString),
    /// Discrete connection parameters.
    Components(DatabaseComponents),
}

/// Host, database name, user and password for the delivery store.
#[derive(Debug, Clone)]
pub struct DatabaseComponents {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    pub password: SecretString,
}

/// Delivery store connection settings.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub target: DatabaseTarget,
    /// Upper bound on pooled connections.
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// Load database settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if neither a URL nor the full set of discrete
    /// parameters is present, or if a numeric setting does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(&env_lookup)
    }

    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let target = if let Some(url) =
            lookup("DELIVERIES_DATABASE_URL").or_else(|| lookup("DATABASE_URL"))
        {
            DatabaseTarget::Url(SecretString::from(url))
        } else {
            DatabaseTarget::Components(DatabaseComponents {
                host: get_required(lookup, "DELIVERIES_DB_HOST")
                    .map_err(|_| ConfigError::MissingEnvVar("DELIVERIES_DATABASE_URL".to_string()))?,
                port: get_parsed(lookup, "DELIVERIES_DB_PORT", DEFAULT_PG_PORT)?,
                database: get_required(lookup, "DELIVERIES_DB_NAME")?,
                username: get_required(lookup, "DELIVERIES_DB_USER")?,
                password: SecretString::from(get_required(lookup, "DELIVERIES_DB_PASSWORD")?),
            })
        };

        let max_connections = get_parsed(
            lookup,
            "DELIVERIES_DB_MAX_CONNECTIONS",
            DEFAULT_MAX_CONNECTIONS,
        )?;
        if max_connections == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "DELIVERIES_DB_MAX_CONNECTIONS".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            target,
            max_connections,
        })
    }
}

/// Web binary configuration.
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// Delivery store connection settings
    pub database: DatabaseConfig,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Validate form input strictly instead of coercing to zero
    pub strict_input: bool,
    /// Emit JSON logs
    pub json_logs: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl WebConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(&env_lookup)
    }

    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database = DatabaseConfig::from_lookup(lookup)?;
        let host = get_parsed(lookup, "DELIVERIES_HOST", IpAddr::from([127, 0, 0, 1]))?;
        let port = get_parsed(lookup, "DELIVERIES_PORT", 3000_u16)?;
        let strict_input = get_parsed(lookup, "DELIVERIES_STRICT_INPUT", false)?;
        let json_logs = lookup("LOG_FORMAT").is_some_and(|f| f.eq_ignore_ascii_case("json"));

        Ok(Self {
            database,
            host,
            port,
            strict_input,
            json_logs,
            sentry_dsn: lookup("SENTRY_DSN"),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Get a required variable.
fn get_required(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<String, ConfigError> {
    lookup(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

/// Parse a variable, falling back to a default when it is unset.
fn get_parsed<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key).map_or(Ok(default), |raw| {
        raw.trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}
