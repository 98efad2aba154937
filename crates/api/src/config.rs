//! # API Configuration Module
//!
//! This module handles loading and managing configuration for the Slotbook API server.
//! It retrieves configuration values from environment variables and provides defaults
//! where appropriate.
//!
//! ## Environment Variables
//!
//! The following environment variables are used:
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `DB_MAX_CONNECTIONS`: Size of the connection pool (default: 5)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: Per-request timeout (default: 30)
//! - `STORE_TIMEOUT_MS`: Upper bound on a single store call (default: 5000)
//! - `WORKING_HOURS_OPEN` / `WORKING_HOURS_CLOSE`: Daily booking window in
//!   UTC, `HH:MM` (default: 09:00 to 17:00)

use chrono::NaiveTime;
use eyre::{Result, WrapErr};
use slotbook_core::engine::{slots::WorkingHours, EngineConfig, DEFAULT_STORE_TIMEOUT};
use std::{env, time::Duration};
use tracing::Level;

/// Configuration for the Slotbook API server
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use slotbook_api::config::ApiConfig;
///
/// fn example() -> Result<()> {
///     let config = ApiConfig::from_env()?;
///     println!("Starting server on {}:{}", config.host, config.port);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// PostgreSQL database connection string
    pub database_url: String,

    /// Maximum number of pooled database connections
    pub db_max_connections: u32,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Timeout applied to every store call made by the booking engine
    pub store_timeout: Duration,

    /// Daily window in which slots are offered
    pub working_hours: WorkingHours,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The DATABASE_URL environment variable is not set
    /// - A numeric setting cannot be parsed
    /// - The working hours are not `HH:MM` or close is not after open
    pub fn from_env() -> Result<Self> {
        // Network settings
        let host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("API_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Database settings
        let database_url = env::var("DATABASE_URL")
            .wrap_err("DATABASE_URL environment variable must be set")?;
        let db_max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .wrap_err("Invalid DB_MAX_CONNECTIONS value")?;

        // Logging settings
        let log_level = parse_log_level(&env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()));

        // CORS settings
        let cors_origins = env::var("API_CORS_ORIGINS").ok().map(|origins| {
            origins.split(',').map(|s| s.trim().to_string()).collect()
        });

        // Performance settings
        let request_timeout = env::var("API_REQUEST_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);
        let store_timeout = match env::var("STORE_TIMEOUT_MS") {
            Ok(ms) => Duration::from_millis(ms.parse().wrap_err("Invalid STORE_TIMEOUT_MS value")?),
            Err(_) => DEFAULT_STORE_TIMEOUT,
        };

        // Booking window
        let working_hours = parse_working_hours(
            env::var("WORKING_HOURS_OPEN").ok().as_deref(),
            env::var("WORKING_HOURS_CLOSE").ok().as_deref(),
        )?;

        Ok(Self {
            host,
            port,
            database_url,
            db_max_connections,
            log_level,
            cors_origins,
            request_timeout,
            store_timeout,
            working_hours,
        })
    }

    /// Returns the server address as a string (e.g., "127.0.0.1:8080")
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Settings the booking engine is built with
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            working_hours: self.working_hours,
            store_timeout: self.store_timeout,
        }
    }
}

pub fn parse_log_level(level: &str) -> Level {
    match level {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Parses optional `HH:MM` bounds, falling back to the default window for
/// whichever bound is missing.
pub fn parse_working_hours(open: Option<&str>, close: Option<&str>) -> Result<WorkingHours> {
    let defaults = WorkingHours::default();
    let parse = |value: Option<&str>, fallback: NaiveTime, name: &str| -> Result<NaiveTime> {
        match value {
            Some(raw) => NaiveTime::parse_from_str(raw.trim(), "%H:%M")
                .wrap_err_with(|| format!("Invalid {name} value {raw:?}, expected HH:MM")),
            None => Ok(fallback),
        }
    };

    let open = parse(open, defaults.open(), "WORKING_HOURS_OPEN")?;
    let close = parse(close, defaults.close(), "WORKING_HOURS_CLOSE")?;
    Ok(WorkingHours::new(open, close)?)
}
