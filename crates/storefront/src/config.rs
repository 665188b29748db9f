//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; the defaults run a local development server.
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_PAYMENT_DELAY_MS` - Simulated payment processing time
//!   (default: 1500)
//! - `STOREFRONT_TOAST_DURATION_MS` - How long the "Added to cart"
//!   acknowledgment stays up (default: 2000)

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Simulated payment processing time
    pub payment_delay: Duration,
    /// Lifetime of the transient "Added to cart" acknowledgment
    pub toast_duration: Duration,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_env_or("STOREFRONT_HOST", "127.0.0.1")?;
        let port = parse_env_or("STOREFRONT_PORT", "3000")?;
        let payment_delay_ms: u64 = parse_env_or("STOREFRONT_PAYMENT_DELAY_MS", "1500")?;
        let toast_duration_ms: u64 = parse_env_or("STOREFRONT_TOAST_DURATION_MS", "2000")?;

        Ok(Self {
            host,
            port,
            payment_delay: Duration::from_millis(payment_delay_ms),
            toast_duration: Duration::from_millis(toast_duration_ms),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for StorefrontConfig {
    /// Local development defaults, also used by the test suites (with the
    /// payment delay shortened there).
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            payment_delay: Duration::from_millis(1500),
            toast_duration: Duration::from_millis(2000),
        }
    }
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_env_or<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = std::env::var(key).unwrap_or_else(|_| default.to_string());
    raw.parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StorefrontConfig::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.payment_delay, Duration::from_millis(1500));
        assert_eq!(config.toast_duration, Duration::from_millis(2000));
    }

    #[test]
    fn test_socket_addr() {
        let config = StorefrontConfig {
            host: "0.0.0.0".parse().unwrap(),
            port: 8080,
            ..StorefrontConfig::default()
        };
        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "0.0.0.0");
        assert_eq!(addr.port(), 8080);
    }

    #[test]
    fn test_parse_env_or_uses_default_when_unset() {
        let port: u16 = parse_env_or("STOREFRONT_TEST_UNSET_PORT", "3000").unwrap();
        assert_eq!(port, 3000);
    }

    #[test]
    fn test_parse_env_or_reports_bad_default_type() {
        let result: Result<u16, _> = parse_env_or("STOREFRONT_TEST_UNSET_PORT", "not-a-port");
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }
}
