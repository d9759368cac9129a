//! Server configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults. `main` loads an optional `.env` file first.
//!
//! | Variable                        | Default       |
//! |---------------------------------|---------------|
//! | `SALMA_HOST`                    | `0.0.0.0`     |
//! | `PORT`                          | `3000`        |
//! | `SALMA_DB_PATH`                 | `./salma.db`  |
//! | `SALMA_DB_MAX_CONNECTIONS`      | `5`           |
//! | `SALMA_DB_ACQUIRE_TIMEOUT_SECS` | `30`          |

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use salma_db::DbConfig;

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,

    /// HTTP port
    pub port: u16,

    /// SQLite database file (`:memory:` for a throwaway database)
    pub database_path: PathBuf,

    /// Pool size
    pub db_max_connections: u32,

    /// Seconds a request waits for a pooled connection
    pub db_acquire_timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = ServerConfig {
            host: lookup("SALMA_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),

            port: lookup("PORT")
                .unwrap_or_else(|| "3000".to_string())
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("PORT".to_string()))?,

            database_path: lookup("SALMA_DB_PATH")
                .unwrap_or_else(|| "./salma.db".to_string())
                .into(),

            db_max_connections: lookup("SALMA_DB_MAX_CONNECTIONS")
                .unwrap_or_else(|| "5".to_string())
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SALMA_DB_MAX_CONNECTIONS".to_string()))?,

            db_acquire_timeout_secs: lookup("SALMA_DB_ACQUIRE_TIMEOUT_SECS")
                .unwrap_or_else(|| "30".to_string())
                .trim()
                .parse()
                .map_err(|_| {
                    ConfigError::InvalidValue("SALMA_DB_ACQUIRE_TIMEOUT_SECS".to_string())
                })?,
        };

        if config.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue(
                "SALMA_DB_MAX_CONNECTIONS".to_string(),
            ));
        }

        Ok(config)
    }

    /// Socket address string for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Database pool settings derived from this configuration.
    pub fn db_config(&self) -> DbConfig {
        let config = if self.database_path.as_os_str() == ":memory:" {
            DbConfig::in_memory()
        } else {
            DbConfig::new(&self.database_path).max_connections(self.db_max_connections)
        };
        config.connect_timeout(Duration::from_secs(self.db_acquire_timeout_secs))
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
