//! Shop configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `SHOP_HOST` - Bind address (default: 127.0.0.1)
//! - `SHOP_PORT` - Listen port (default: 3000)
//! - `SHOP_ACTOR_BUFFER` - Mailbox capacity of each actor (default: 32)
//! - `SHOP_SEED_ON_START` - Seed the demo catalog at startup (default: true)

use std::net::{IpAddr, SocketAddr};

use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Shop application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ShopConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Mailbox capacity of each actor
    pub actor_buffer: usize,
    /// Whether the demo catalog is seeded at startup
    pub seed_on_start: bool,
}

impl ShopConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to a value that does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let host = var("SHOP_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("SHOP_HOST".to_string(), e.to_string()))?;
        let port = var("SHOP_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("SHOP_PORT".to_string(), e.to_string()))?;
        let actor_buffer = match var("SHOP_ACTOR_BUFFER", "32").parse::<usize>() {
            Ok(0) => {
                return Err(ConfigError::InvalidEnvVar(
                    "SHOP_ACTOR_BUFFER".to_string(),
                    "must be greater than zero".to_string(),
                ))
            }
            Ok(n) => n,
            Err(e) => {
                return Err(ConfigError::InvalidEnvVar(
                    "SHOP_ACTOR_BUFFER".to_string(),
                    e.to_string(),
                ))
            }
        };
        let seed_on_start = parse_bool("SHOP_SEED_ON_START", &var("SHOP_SEED_ON_START", "true"))?;

        Ok(Self {
            host,
            port,
            actor_buffer,
            seed_on_start,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("expected a boolean, got {value:?}"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<ShopConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        ShopConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.actor_buffer, 32);
        assert!(config.seed_on_start);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("SHOP_HOST", "0.0.0.0"),
            ("SHOP_PORT", "8080"),
            ("SHOP_ACTOR_BUFFER", "128"),
            ("SHOP_SEED_ON_START", "False"),
        ])
        .unwrap();
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(config.actor_buffer, 128);
        assert!(!config.seed_on_start);
    }

    #[test]
    fn test_invalid_port() {
        let err = load(&[("SHOP_PORT", "70000")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "SHOP_PORT"));
    }

    #[test]
    fn test_zero_buffer_rejected() {
        let err = load(&[("SHOP_ACTOR_BUFFER", "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "SHOP_ACTOR_BUFFER"));
    }

    #[test]
    fn test_invalid_bool() {
        assert!(load(&[("SHOP_SEED_ON_START", "maybe")]).is_err());
    }
}
