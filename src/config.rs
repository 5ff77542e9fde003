//! Configuration module for the remixer service.
//!
//! This module contains the configuration structure and environment variable handling
//! for the Anthropic API integration and the HTTP listener.

use log::{debug, error, info, warn};
use std::env;
use thiserror::Error;

/// Primary environment variable holding the Anthropic API key.
pub const API_KEY_VAR: &str = "ANTHROPIC_API_KEY";

/// Alternate name accepted for the API key.
pub const API_KEY_FALLBACK_VAR: &str = "CLAUDE_API_KEY";

/// Port used when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 3000;

/// Errors raised while loading configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing ANTHROPIC_API_KEY environment variable")]
    MissingApiKey,
    #[error("{0} is set but empty")]
    EmptyApiKey(&'static str),
    #[error("PORT must be a valid port number, got '{0}'")]
    InvalidPort(String),
}

/// Configuration struct for Anthropic API credentials.
///
/// The API key is the only external setting the remix client needs. It is
/// sent as the `x-api-key` header on every request and is never logged in full.
#[derive(Clone)]
pub struct RemixerConfig {
    /// The static API key for the Anthropic Messages API
    pub api_key: String,
}

impl std::fmt::Debug for RemixerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemixerConfig")
            .field("api_key", &mask_secret(&self.api_key))
            .finish()
    }
}

impl RemixerConfig {
    /// Creates a new `RemixerConfig` by loading the API key from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `ANTHROPIC_API_KEY`: the API key (required)
    /// - `CLAUDE_API_KEY`: accepted when `ANTHROPIC_API_KEY` is absent
    ///
    /// A `.env` file is not read here; `main` loads it before calling this.
    ///
    /// # Returns
    ///
    /// - `Ok(RemixerConfig)`: If a non-blank key is present
    /// - `Err(ConfigError)`: If the key is missing or blank
    ///
    /// # Example
    ///
    /// ```rust
    /// use remixer::RemixerConfig;
    ///
    /// std::env::set_var("ANTHROPIC_API_KEY", "sk-ant-example-key");
    /// let config = RemixerConfig::from_env().unwrap();
    /// assert_eq!(config.api_key, "sk-ant-example-key");
    /// ```
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading Anthropic configuration from environment variables");

        let (var_name, api_key) = match env::var(API_KEY_VAR) {
            Ok(key) => (API_KEY_VAR, key),
            Err(_) => match env::var(API_KEY_FALLBACK_VAR) {
                Ok(key) => {
                    info!("{} not set, using {}", API_KEY_VAR, API_KEY_FALLBACK_VAR);
                    (API_KEY_FALLBACK_VAR, key)
                }
                Err(e) => {
                    error!("Failed to load {} from environment: {}", API_KEY_VAR, e);
                    error!("Make sure {} environment variable is set", API_KEY_VAR);
                    return Err(ConfigError::MissingApiKey);
                }
            },
        };

        let api_key = api_key.trim().to_string();
        info!(
            "Found {} environment variable with length: {}",
            var_name,
            api_key.len()
        );
        debug!("API key (masked): {}", mask_secret(&api_key));

        if api_key.is_empty() {
            error!("{} is empty", var_name);
            return Err(ConfigError::EmptyApiKey(var_name));
        }

        if api_key.len() < 10 {
            warn!(
                "API key seems unusually short ({} characters)",
                api_key.len()
            );
        }

        info!("Anthropic configuration loaded successfully");
        Ok(RemixerConfig { api_key })
    }
}

/// Masks a secret for logging, keeping at most 8 leading and 4 trailing characters.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    let len = chars.len();
    if len > 16 {
        let prefix: String = chars[..8].iter().collect();
        let suffix: String = chars[len - 4..].iter().collect();
        format!("{}...{}", prefix, suffix)
    } else if len > 8 {
        let prefix: String = chars[..8].iter().collect();
        format!("{}...", prefix)
    } else {
        "...".to_string()
    }
}

/// Gets the server port from the `PORT` environment variable.
///
/// Returns 3000 when `PORT` is unset, and an error when it is set to something
/// that is not a valid port number.
///
/// # Example
///
/// ```rust
/// use remixer::get_server_port;
///
/// std::env::remove_var("PORT");
/// assert_eq!(get_server_port().unwrap(), 3000);
/// ```
pub fn get_server_port() -> Result<u16, ConfigError> {
    match env::var("PORT") {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidPort(value)),
        Err(_) => Ok(DEFAULT_PORT),
    }
}
