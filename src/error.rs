use thiserror::Error;

/// Failures of a single call to the upstream country API.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("failed to create request: {0}")]
    Request(String),

    #[error("request execution failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("request cancelled by caller")]
    Cancelled,

    #[error("country not found: {0}")]
    NotFound(String),

    #[error("unexpected status code: {0}")]
    UnexpectedStatus(u16),

    #[error("failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Failures of a country lookup.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("country name cannot be empty")]
    InvalidInput,

    #[error("failed to search country by name: {0}")]
    Upstream(#[from] ClientError),

    #[error("no country data found for name: {0}")]
    NoData(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}
