use thiserror::Error;

/// Failure on a read endpoint
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Request to {path} failed with status {status}")]
    Status { path: String, status: u16 },

    #[error("Malformed response from {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials. The correct password is \"test123\".")]
    InvalidCredentials,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
