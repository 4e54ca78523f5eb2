// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 P47H Team <https://p47h.com>

//! # app-utils
//!
//! Utility modules for configuration and logging.
//!
//! This crate provides non-core features:
//! - YAML/TOML mapper config parsing
//! - `tracing` subscriber setup

#![forbid(unsafe_code)]

pub mod config;
pub mod error;

pub mod logging {
    //! Tracing subscriber setup
    use super::error::{Error, Result};
    use tracing_subscriber::EnvFilter;

    /// Filter used when neither `RUST_LOG` nor a CLI flag sets one
    pub const DEFAULT_FILTER: &str = "warn";

    /// Install a stderr fmt subscriber.
    ///
    /// `RUST_LOG` takes precedence over `filter`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Logging` if `filter` is not a valid directive or a
    /// global subscriber is already installed
    pub fn init(filter: &str) -> Result<()> {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(filter))
            .map_err(|e| Error::Logging(e.to_string()))?;

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| Error::Logging(e.to_string()))
    }
}

/// Re-export commonly used types
pub use config::{load, parser_for, ConfigParser, MapperConfig, TomlParser, YamlParser};
pub use error::{Error, Result};
