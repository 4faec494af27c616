//! Process-wide configuration
//!
//! Loaded once at startup from the environment and passed explicitly into
//! the constructors that need it. Token lifetimes and the signing secret
//! live here so the token service never reads the environment itself.

use std::str::FromStr;

use time::Duration;

/// Default access token lifetime in minutes
const DEFAULT_ACCESS_TOKEN_MINUTES: i64 = 30;

/// Default refresh token lifetime in days
const DEFAULT_REFRESH_TOKEN_DAYS: i64 = 7;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_address: String,
    pub jwt_secret: String,
    pub access_token_minutes: i64,
    pub refresh_token_days: i64,
    pub allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = require_env("DATABASE_URL")?;
        let jwt_secret = require_env("JWT_SECRET")?;
        if jwt_secret.trim().is_empty() {
            anyhow::bail!("JWT_SECRET must not be empty");
        }

        let bind_address =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        let access_token_minutes =
            env_or("ACCESS_TOKEN_MINUTES", DEFAULT_ACCESS_TOKEN_MINUTES);
        let refresh_token_days = env_or("REFRESH_TOKEN_DAYS", DEFAULT_REFRESH_TOKEN_DAYS);

        let allowed_origins = std::env::var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            database_url,
            bind_address,
            jwt_secret,
            access_token_minutes,
            refresh_token_days,
            allowed_origins,
        })
    }

    pub fn access_ttl(&self) -> Duration {
        Duration::minutes(self.access_token_minutes)
    }

    pub fn refresh_ttl(&self) -> Duration {
        Duration::days(self.refresh_token_days)
    }
}

fn require_env(name: &str) -> anyhow::Result<String> {
    std::env::var(name).map_err(|_| anyhow::anyhow!("{name} must be set"))
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_or_falls_back_to_default() {
        // Variable is not set in the test environment
        let minutes: i64 = env_or("QUILLBOX_TEST_UNSET_VARIABLE", 30);
        assert_eq!(minutes, 30);
    }

    #[test]
    fn token_lifetimes_convert_to_durations() {
        let config = Config {
            database_url: "postgres://localhost/test".to_string(),
            bind_address: "0.0.0.0:8080".to_string(),
            jwt_secret: "test-secret".to_string(),
            access_token_minutes: 30,
            refresh_token_days: 7,
            allowed_origins: vec![],
        };

        assert_eq!(config.access_ttl(), Duration::minutes(30));
        assert_eq!(config.refresh_ttl(), Duration::days(7));
    }
}
