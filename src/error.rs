use thiserror::Error;

/// Extension UI error type
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed address or key that cannot be decoded/encoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// Credentials rejected by the wallet backend
    #[error("Validation error: {0}")]
    Validation(String),

    /// Account persistence failed
    #[error("Account creation error: {0}")]
    Creation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/Deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Error::Config(err.to_string())
    }
}
