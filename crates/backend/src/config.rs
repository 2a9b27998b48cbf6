use std::env;

use thiserror::Error;

const DEFAULT_PORT: u16 = 3000;

/// Service configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    /// All absent required variables are listed, not just the first one hit.
    #[error("missing required environment variables: {}", .0.join(", "))]
    MissingVars(Vec<String>),

    #[error("PORT must be a valid port number, got {0:?}")]
    InvalidPort(String),
}

impl AppConfig {
    /// Read configuration from the environment.
    ///
    /// Missing required variables are collected and reported together in a
    /// single error. An empty value counts as missing.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut missing = Vec::new();

        let database_url = env::var("DATABASE_URL").unwrap_or_default();
        if database_url.is_empty() {
            missing.push("DATABASE_URL".to_string());
        }

        if !missing.is_empty() {
            return Err(ConfigError::MissingVars(missing));
        }

        let port = match env::var("PORT") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidPort(raw))?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self { database_url, port })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_vars_are_enumerated_in_the_message() {
        let err = ConfigError::MissingVars(vec!["DATABASE_URL".to_string()]);
        assert_eq!(
            err.to_string(),
            "missing required environment variables: DATABASE_URL"
        );
    }
}
