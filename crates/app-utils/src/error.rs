use core_mapping::MappingError;
use thiserror::Error;

/// Main error type for the `app-utils` crate.
#[derive(Error, Debug)]
pub enum Error {
    /// Config file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parse failure
    #[error("YAML parsing failed: {0}")]
    YamlParseError(String),

    /// TOML parse failure
    #[error("TOML parsing failed: {0}")]
    TomlParseError(String),

    /// A declared resource failed validation
    #[error("Invalid resource declaration: {0}")]
    Validation(#[from] MappingError),

    /// File extension not recognised as a config format
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    /// Tracing subscriber could not be installed
    #[error("Logging setup failed: {0}")]
    Logging(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
