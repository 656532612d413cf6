//! Environment-driven server configuration
//!
//! Mirrors the deployment convention of the service: credentials and
//! overrides come from the process environment (optionally seeded from a
//! `.env` file by `main`). Only the Naver credentials are mandatory.

use crate::error::ConfigError;
use std::env;
use std::time::Duration;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_TRENDS_FEED_URL: &str = "https://trends.google.com/trending/rss?geo=KR";
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 10;

/// Runtime configuration assembled from environment variables
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to (`TIPO_LISTEN_ADDR`)
    pub listen_addr: String,
    /// Naver open-API client id (`NAVER_CLIENT_ID`, required)
    pub naver_client_id: String,
    /// Naver open-API client secret (`NAVER_CLIENT_SECRET`, required)
    pub naver_client_secret: String,
    /// Trend feed URL (`TIPO_TRENDS_FEED_URL`)
    pub trends_feed_url: String,
    /// Per-request timeout for upstream calls (`TIPO_UPSTREAM_TIMEOUT_SECS`)
    pub upstream_timeout: Duration,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let listen_addr =
            env::var("TIPO_LISTEN_ADDR").unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string());
        let naver_client_id = required_var("NAVER_CLIENT_ID")?;
        let naver_client_secret = required_var("NAVER_CLIENT_SECRET")?;
        let trends_feed_url = env::var("TIPO_TRENDS_FEED_URL")
            .unwrap_or_else(|_| DEFAULT_TRENDS_FEED_URL.to_string());
        let upstream_timeout = match env::var("TIPO_UPSTREAM_TIMEOUT_SECS") {
            Ok(raw) => {
                let secs = raw
                    .parse::<u64>()
                    .ok()
                    .filter(|secs| *secs > 0)
                    .ok_or(ConfigError::InvalidVar {
                        name: "TIPO_UPSTREAM_TIMEOUT_SECS",
                        value: raw.clone(),
                    })?;
                Duration::from_secs(secs)
            }
            Err(_) => Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS),
        };

        Ok(ServerConfig {
            listen_addr,
            naver_client_id,
            naver_client_secret,
            trends_feed_url,
            upstream_timeout,
        })
    }
}

fn required_var(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar { name }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Environment mutation is process-global, so everything lives in one
    // test to avoid interleaving with parallel test threads.
    #[test]
    fn from_env_reads_required_and_defaulted_values() {
        env::set_var("NAVER_CLIENT_ID", "id-123");
        env::set_var("NAVER_CLIENT_SECRET", "secret-456");
        env::remove_var("TIPO_LISTEN_ADDR");
        env::remove_var("TIPO_TRENDS_FEED_URL");
        env::remove_var("TIPO_UPSTREAM_TIMEOUT_SECS");

        let config = ServerConfig::from_env().expect("required vars are set");
        assert_eq!(config.listen_addr, DEFAULT_LISTEN_ADDR);
        assert_eq!(config.naver_client_id, "id-123");
        assert_eq!(config.naver_client_secret, "secret-456");
        assert_eq!(config.trends_feed_url, DEFAULT_TRENDS_FEED_URL);
        assert_eq!(config.upstream_timeout, Duration::from_secs(10));

        env::set_var("TIPO_UPSTREAM_TIMEOUT_SECS", "0");
        assert!(matches!(
            ServerConfig::from_env(),
            Err(ConfigError::InvalidVar { .. })
        ));

        env::set_var("TIPO_UPSTREAM_TIMEOUT_SECS", "3");
        let config = ServerConfig::from_env().expect("timeout override parses");
        assert_eq!(config.upstream_timeout, Duration::from_secs(3));

        env::remove_var("NAVER_CLIENT_ID");
        assert!(matches!(
            ServerConfig::from_env(),
            Err(ConfigError::MissingVar {
                name: "NAVER_CLIENT_ID"
            })
        ));

        env::remove_var("NAVER_CLIENT_SECRET");
        env::remove_var("TIPO_UPSTREAM_TIMEOUT_SECS");
    }
}
