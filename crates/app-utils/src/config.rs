//! Mapper configuration files
//!
//! A config file carries three optional sections:
//!
//! ```yaml
//! discovery:
//!   flat: true
//!   exclude_prefixes: ["/health"]
//! resources:
//!   - name: documents
//!     path: /accounts/:acctId/documents/:docId
//!     actions:
//!       - name: view
//! routes:
//!   - path: /accounts
//!     methods: [GET, POST]
//! ```
//!
//! The format is picked from the file extension (`.yaml`/`.yml` or `.toml`).
//! Declared resources are validated on load.

use crate::error::{Error, Result};
use core_discovery::{discover, register_all, DiscoveredResource, DiscoveryConfig, RouteSpec};
use core_mapping::{ResourceActionRegistry, ResourceDefinition};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Declared resources, discovery options and the route table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperConfig {
    /// Discovery options
    pub discovery: DiscoveryConfig,
    /// Hand-declared resources, registered before discovered ones
    pub resources: Vec<ResourceDefinition>,
    /// Host route table
    pub routes: Vec<RouteSpec>,
}

impl MapperConfig {
    /// Validate every declared resource
    ///
    /// # Errors
    ///
    /// Returns `Error::Validation` for the first invalid declaration
    pub fn validate(&self) -> Result<()> {
        for resource in &self.resources {
            resource.validate()?;
        }
        Ok(())
    }

    /// Run discovery over the configured routes
    #[must_use]
    pub fn discover(&self) -> Vec<DiscoveredResource> {
        discover(&self.routes, &self.discovery)
    }

    /// Build a registry: declared resources first, then discovered ones
    ///
    /// Declared resources come first so their bindings win over discovered
    /// bindings for the same paths.
    #[must_use]
    pub fn build_registry(&self) -> ResourceActionRegistry {
        let mut registry = ResourceActionRegistry::new();
        for resource in &self.resources {
            registry.add_resource(resource.clone());
        }
        let added = register_all(&self.discover(), &mut registry);
        info!(
            declared = self.resources.len(),
            discovered = added,
            bindings = registry.bindings().len(),
            "registry built"
        );
        registry
    }
}

/// Trait for config parsers (one per file format)
pub trait ConfigParser {
    /// Parse and validate a config document
    ///
    /// # Errors
    ///
    /// Returns a parse error for malformed input, or `Error::Validation` if a
    /// declared resource is invalid
    fn parse(&self, input: &str) -> Result<MapperConfig>;
}

/// YAML parser implementation
pub struct YamlParser;

impl ConfigParser for YamlParser {
    fn parse(&self, input: &str) -> Result<MapperConfig> {
        let config: MapperConfig =
            serde_yaml::from_str(input).map_err(|e| Error::YamlParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

/// TOML parser implementation
pub struct TomlParser;

impl ConfigParser for TomlParser {
    fn parse(&self, input: &str) -> Result<MapperConfig> {
        let config: MapperConfig =
            toml::from_str(input).map_err(|e| Error::TomlParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

/// Pick a parser from a file extension
///
/// # Errors
///
/// Returns `Error::UnsupportedFormat` for anything but `yaml`, `yml` or `toml`
pub fn parser_for(path: &Path) -> Result<Box<dyn ConfigParser>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("yaml" | "yml") => Ok(Box::new(YamlParser)),
        Some("toml") => Ok(Box::new(TomlParser)),
        _ => Err(Error::UnsupportedFormat(path.display().to_string())),
    }
}

/// Load and validate a config file
///
/// # Errors
///
/// Returns `Error::Io` if the file cannot be read, and otherwise whatever the
/// format's parser returns
pub fn load(path: impl AsRef<Path>) -> Result<MapperConfig> {
    let path = path.as_ref();
    let parser = parser_for(path)?;
    let content = fs::read_to_string(path)?;
    debug!(path = %path.display(), bytes = content.len(), "config read");
    parser.parse(&content)
}

/// Serialize a value to YAML
///
/// # Errors
///
/// Returns `Error::YamlParseError` if the value cannot be represented
pub fn to_yaml<T: Serialize>(value: &T) -> Result<String> {
    serde_yaml::to_string(value).map_err(|e| Error::YamlParseError(e.to_string()))
}
