use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors from loading or validating a mock server configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no config file found (searched for .graphqlmockrc.* and graphql-mock.config.*)")]
    NotFound,

    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config at {path}: {message}")]
    Invalid { path: PathBuf, message: String },

    #[error("unsupported config format: {0}")]
    UnsupportedFormat(PathBuf),

    #[error("no schema files matched the configured patterns: {patterns:?}")]
    NoSchemaFiles { patterns: Vec<String> },
}
