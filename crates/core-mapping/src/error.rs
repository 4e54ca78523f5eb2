//! Error types for core-mapping

use thiserror::Error;

/// Result type alias for mapping operations
pub type Result<T> = std::result::Result<T, MappingError>;

/// Errors that can occur while compiling templates or validating declarations.
///
/// Request-time resolution never produces these: the registry reports absence
/// with `None` and logs compile failures instead of returning them.
#[derive(Error, Debug)]
pub enum MappingError {
    /// Path template exceeds maximum length (DoS prevention)
    #[error("Path template exceeds maximum {max} characters (length: {length})")]
    TemplateTooLong {
        /// Maximum allowed length
        max: usize,
        /// Actual template length
        length: usize,
    },

    /// Resource or action name exceeds maximum length
    #[error("Name exceeds maximum {max} characters (length: {length})")]
    NameTooLong {
        /// Maximum allowed length
        max: usize,
        /// Actual name length
        length: usize,
    },

    /// Resource or action declaration is malformed
    #[error("Invalid definition: {0}")]
    InvalidDefinition(String),

    /// The generated matcher could not be built
    #[error("Failed to build path matcher: {0}")]
    Regex(#[from] regex::Error),
}
