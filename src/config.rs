use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::ConfigError;

pub const CONFIG_PATH_ENV: &str = "COUNTRY_SEARCH_CONFIG";

static COUNTRIES_URL: once_cell::sync::Lazy<String> = once_cell::sync::Lazy::new(|| {
    std::env::var("COUNTRIES_URL").unwrap_or(String::from("https://restcountries.com"))
});

const DEFAULT_CLIENT_TIMEOUT: u64 = 10;

/// Process configuration. Timeouts are in seconds.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub listen_addr: String,
    pub countries_url: String,
    pub client_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub shutdown_timeout: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            listen_addr: "0.0.0.0:8000".to_string(),
            countries_url: COUNTRIES_URL.clone(),
            client_timeout: DEFAULT_CLIENT_TIMEOUT,
            read_timeout: 15,
            write_timeout: 15,
            shutdown_timeout: 10,
        }
    }
}

impl Config {
    /// Defaults, overridden by the YAML file named in `COUNTRY_SEARCH_CONFIG` if set.
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::from_file(&path),
            Err(_) => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_yaml(&raw).map_err(|source| ConfigError::Yaml {
            path: path.to_string(),
            source,
        })
    }

    pub fn from_yaml(raw: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(raw)
    }

    /// Zero falls back to the default client timeout.
    pub fn client_timeout(&self) -> Duration {
        match self.client_timeout {
            0 => Duration::from_secs(DEFAULT_CLIENT_TIMEOUT),
            secs => Duration::from_secs(secs),
        }
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout)
    }

    pub fn write_timeout(&self) -> Duration {
        Duration::from_secs(self.write_timeout)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout)
    }
}
