//! # API Configuration Module
//!
//! This module handles loading and managing configuration for the LessonSync
//! API server. It retrieves configuration values from environment variables
//! and provides defaults where appropriate.
//!
//! ## Environment Variables
//!
//! The following environment variables are used:
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: Request timeout (default: 30)
//! - `GOOGLE_CALENDAR_API_KEY`: API key for the studio calendar feed (required)
//! - `GOOGLE_CALENDAR_ID`: Calendar id the lessons are synced from (required)
//! - `STUDIO_UTC_OFFSET_HOURS`: The studio's fixed UTC offset (default: 9)

use eyre::{Result, WrapErr};
use lessonsync_core::studio::DEFAULT_UTC_OFFSET_HOURS;
use std::env;
use tracing::Level;

/// Configuration for the LessonSync API server
///
/// This struct encapsulates all configuration options for the API server,
/// including networking, database connections, and the calendar feed.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// PostgreSQL database connection string
    pub database_url: String,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// API key for the Google Calendar feed
    pub calendar_api_key: String,

    /// Id of the calendar the lesson catalog is synced from
    pub calendar_id: String,

    /// The studio's fixed UTC offset, in hours
    pub studio_utc_offset_hours: i32,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// This function loads configuration values from environment variables,
    /// providing sensible defaults where possible. DATABASE_URL and the
    /// calendar feed credentials are required and will cause an error if
    /// not set.
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

        // Logging settings
        let log_level = match env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()).as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };

        // CORS settings
        let cors_origins = env::var("API_CORS_ORIGINS").ok().map(|origins| {
            origins.split(',').map(|s| s.trim().to_string()).collect()
        });

        // Performance settings
        let request_timeout = env::var("API_REQUEST_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);

        // Calendar feed settings
        let calendar_api_key = env::var("GOOGLE_CALENDAR_API_KEY")
            .wrap_err("GOOGLE_CALENDAR_API_KEY environment variable must be set")?;
        let calendar_id = env::var("GOOGLE_CALENDAR_ID")
            .wrap_err("GOOGLE_CALENDAR_ID environment variable must be set")?;

        // Studio locale
        let studio_utc_offset_hours = env::var("STUDIO_UTC_OFFSET_HOURS")
            .unwrap_or_else(|_| DEFAULT_UTC_OFFSET_HOURS.to_string())
            .parse()
            .wrap_err("Invalid STUDIO_UTC_OFFSET_HOURS value")?;

        Ok(Self {
            host,
            port,
            database_url,
            log_level,
            cors_origins,
            request_timeout,
            calendar_api_key,
            calendar_id,
            studio_utc_offset_hours,
        })
    }

    /// Returns the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
