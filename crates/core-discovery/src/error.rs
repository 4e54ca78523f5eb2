//! Discovery error types

use core_mapping::MappingError;
use thiserror::Error;

/// Errors raised while turning host routes into endpoints
#[derive(Error, Debug)]
pub enum DiscoveryError {
    /// HTTP method name not recognised
    #[error("Unknown HTTP method: {0}")]
    UnknownMethod(String),

    /// Route declares no HTTP methods
    #[error("Route {0} declares no HTTP methods")]
    NoMethods(String),

    /// Route path could not be compiled
    #[error(transparent)]
    Mapping(#[from] MappingError),
}

/// Result type alias for discovery operations
pub type Result<T> = std::result::Result<T, DiscoveryError>;
