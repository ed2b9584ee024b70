//! Environment configuration for the standalone server.

use axum::http::StatusCode;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("PORT must be a port number, got {0:?}")]
    InvalidPort(String),

    #[error("MOCK_STATUS must be an HTTP status code, got {0:?}")]
    InvalidStatus(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockConfig {
    pub port: u16,
    pub status: StatusCode,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            status: StatusCode::OK,
        }
    }
}

impl MockConfig {
    /// Read `PORT` and `MOCK_STATUS`, falling back to defaults when unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::var("PORT").ok(), std::env::var("MOCK_STATUS").ok())
    }

    pub fn from_vars(port: Option<String>, status: Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(port) = port {
            config.port = match port.trim().parse() {
                Ok(port) => port,
                Err(_) => return Err(ConfigError::InvalidPort(port)),
            };
        }
        if let Some(status) = status {
            let code = status.trim().parse::<u16>().ok();
            config.status = match code.and_then(|code| StatusCode::from_u16(code).ok()) {
                Some(code) => code,
                None => return Err(ConfigError::InvalidStatus(status)),
            };
        }
        Ok(config)
    }

    pub fn bind_addr(&self) -> String {
        format!("127.0.0.1:{}", self.port)
    }
}
