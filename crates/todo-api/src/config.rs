//! API configuration.
//!
//! # Environment Variables
//!
//! - `TODO_HOST`: bind host (default `127.0.0.1`)
//! - `TODO_PORT`: bind port (default `8765`)
//! - `TODO_DATA_DIR`: document store directory (default `~/.todo-list`)
//! - `TODO_CORS_ORIGINS`: comma-separated allowed origins (default `*`)

use std::path::PathBuf;
use std::time::Instant;

use tracing::warn;

/// Environment variable for the bind host.
pub const HOST_ENV: &str = "TODO_HOST";

/// Environment variable for the bind port.
pub const PORT_ENV: &str = "TODO_PORT";

/// Environment variable for the store directory.
pub const DATA_DIR_ENV: &str = "TODO_DATA_DIR";

/// Environment variable for allowed CORS origins.
pub const CORS_ORIGINS_ENV: &str = "TODO_CORS_ORIGINS";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8765;
const DEFAULT_DATA_DIR: &str = ".todo-list";

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to bind to.
    pub port: u16,
    /// Directory of the JSON document store.
    pub data_dir: PathBuf,
    /// Keep items in memory instead of on disk.
    pub in_memory: bool,
    /// Allowed CORS origins. `*` allows any.
    pub cors_origins: Vec<String>,
    /// Server start time for uptime calculation.
    pub start_time: Instant,
}

impl ApiConfig {
    /// Builds a configuration from `TODO_*` environment variables, falling
    /// back to defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(host) = lookup(HOST_ENV).filter(|h| !h.is_empty()) {
            config.host = host;
        }
        if let Some(port) = lookup(PORT_ENV) {
            match port.parse() {
                Ok(port) => config.port = port,
                Err(_) => warn!(value = %port, "ignoring invalid {}", PORT_ENV),
            }
        }
        if let Some(dir) = lookup(DATA_DIR_ENV).filter(|d| !d.is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(origins) = lookup(CORS_ORIGINS_ENV) {
            let origins: Vec<String> = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(String::from)
                .collect();
            if !origins.is_empty() {
                config.cors_origins = origins;
            }
        }
        config
    }

    /// Sets the store directory.
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Switches to the in-memory store.
    pub fn with_in_memory(mut self, in_memory: bool) -> Self {
        self.in_memory = in_memory;
        self
    }

    /// Returns the bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the uptime in seconds.
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

/// `~/.todo-list`, or `.todo-list` in the working directory if there is no home.
pub fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(DEFAULT_DATA_DIR))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            data_dir: default_data_dir(),
            in_memory: false,
            cors_origins: vec!["*".to_string()],
            start_time: Instant::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_api_config_default() {
        let config = ApiConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8765);
        assert!(!config.in_memory);
        assert_eq!(config.cors_origins, vec!["*".to_string()]);
        assert!(config.data_dir.ends_with(".todo-list"));
    }

    #[test]
    fn test_api_config_bind_address() {
        let config = ApiConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
            ..ApiConfig::default()
        };
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = ApiConfig::from_lookup(lookup_from(&[
            (HOST_ENV, "0.0.0.0"),
            (PORT_ENV, "9000"),
            (DATA_DIR_ENV, "/var/lib/todos"),
            (CORS_ORIGINS_ENV, "http://a.test, http://b.test,"),
        ]));
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9000);
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/todos"));
        assert_eq!(
            config.cors_origins,
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
    }

    #[test]
    fn test_from_lookup_ignores_bad_values() {
        let config = ApiConfig::from_lookup(lookup_from(&[
            (PORT_ENV, "not-a-port"),
            (HOST_ENV, ""),
            (CORS_ORIGINS_ENV, " , "),
        ]));
        assert_eq!(config.port, 8765);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.cors_origins, vec!["*".to_string()]);
    }

    #[test]
    fn test_builders() {
        let config = ApiConfig::default()
            .with_data_dir("/tmp/todos")
            .with_in_memory(true);
        assert_eq!(config.data_dir, PathBuf::from("/tmp/todos"));
        assert!(config.in_memory);
    }
}
