//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CLIPJOINT_API_URL` - Base URL of the booking API, including the
//!   `/api` path segment (default: `http://localhost:5000/api`). Deployed
//!   installs point this at the real origin.
//! - `CLIPJOINT_SESSION_FILE` - Path of the persisted session marker file
//!   (default: `$HOME/.clipjoint/session.json`)

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Default API base URL for local development.
const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Directory under `$HOME` holding client state.
const STATE_DIR: &str = ".clipjoint";

/// File name of the persisted session marker.
const SESSION_FILE: &str = "session.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Booking client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the booking API
    pub api_url: Url,
    /// Path of the persisted session marker file
    pub session_file: PathBuf,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `CLIPJOINT_API_URL` is not a valid URL, or
    /// if neither `CLIPJOINT_SESSION_FILE` nor `HOME` is set.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_url = get_env_or_default("CLIPJOINT_API_URL", DEFAULT_API_URL)
            .parse::<Url>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("CLIPJOINT_API_URL".to_string(), e.to_string())
            })?;

        let session_file = match get_optional_env("CLIPJOINT_SESSION_FILE") {
            Some(path) => PathBuf::from(path),
            None => default_session_file()?,
        };

        Ok(Self {
            api_url,
            session_file,
        })
    }

    /// Build a configuration directly, bypassing the environment.
    #[must_use]
    pub fn new(api_url: Url, session_file: impl Into<PathBuf>) -> Self {
        Self {
            api_url,
            session_file: session_file.into(),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Default session marker location under the user's home directory.
fn default_session_file() -> Result<PathBuf, ConfigError> {
    let home = get_required_env("HOME")?;
    Ok(PathBuf::from(home).join(STATE_DIR).join(SESSION_FILE))
}
