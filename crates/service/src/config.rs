//! Registry configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `REGISTRY_STORE_URL` - Store connection string (default: `memory://customer-registry`)
//! - `REGISTRY_DEBUG` - `true`/`false`; when set, failure envelopes expose
//!   the original message of unclassified errors (default: `false`)

use secrecy::SecretString;
use thiserror::Error;

/// Default store connection string.
pub const DEFAULT_STORE_URI: &str = "memory://customer-registry";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Customer registry configuration.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Store connection URL (may contain credentials)
    pub store_uri: SecretString,
    /// Expose unclassified error messages to callers
    pub debug: bool,
}

impl RegistryConfig {
    /// Load configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnvVar`] if `REGISTRY_DEBUG` is set to
    /// something other than `true` or `false`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let store_uri = std::env::var("REGISTRY_STORE_URL")
            .unwrap_or_else(|_| DEFAULT_STORE_URI.to_owned());

        let debug = match std::env::var("REGISTRY_DEBUG") {
            Err(_) => false,
            Ok(raw) => raw.parse::<bool>().map_err(|_| {
                ConfigError::InvalidEnvVar(
                    "REGISTRY_DEBUG".to_owned(),
                    format!("expected true or false, got {raw:?}"),
                )
            })?,
        };

        Ok(Self {
            store_uri: SecretString::from(store_uri),
            debug,
        })
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            store_uri: SecretString::from(DEFAULT_STORE_URI),
            debug: false,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = RegistryConfig::default();
        assert_eq!(config.store_uri.expose_secret(), DEFAULT_STORE_URI);
        assert!(!config.debug);
    }
}
