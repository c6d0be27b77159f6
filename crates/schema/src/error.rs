use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or indexing a schema.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The SDL could not be parsed.
    #[error("failed to parse schema: {0}")]
    Parse(String),

    /// The SDL parsed but does not describe a valid type system.
    #[error("schema validation failed: {0}")]
    Validation(String),

    /// A schema file could not be read.
    #[error("failed to read schema file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
