//! Endpoints discovered from a host framework's route table

use crate::error::{DiscoveryError, Result};
use core_mapping::CompiledPattern;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// HTTP verb exposed by an endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// PATCH
    Patch,
    /// DELETE
    Delete,
    /// HEAD
    Head,
    /// OPTIONS
    Options,
}

impl HttpMethod {
    /// Upper-case method name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
        }
    }

    /// Conventional action name for this verb
    ///
    /// `OPTIONS` carries no authorization meaning and maps to `None`.
    #[must_use]
    pub const fn default_action(&self) -> Option<&'static str> {
        match self {
            Self::Get | Self::Head => Some("view"),
            Self::Post => Some("create"),
            Self::Put | Self::Patch => Some("update"),
            Self::Delete => Some("remove"),
            Self::Options => None,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = DiscoveryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            "HEAD" => Ok(Self::Head),
            "OPTIONS" => Ok(Self::Options),
            _ => Err(DiscoveryError::UnknownMethod(s.to_string())),
        }
    }
}

impl TryFrom<String> for HttpMethod {
    type Error = DiscoveryError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<HttpMethod> for String {
    fn from(method: HttpMethod) -> Self {
        method.as_str().to_string()
    }
}

/// A route as reported by the host framework shim.
///
/// Paths are expected to already use the `:name` parameter convention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteSpec {
    /// Normalized path template
    #[serde(alias = "path_template")]
    pub path: String,
    /// HTTP methods served by the route
    pub methods: Vec<HttpMethod>,
    /// Middleware identifiers attached to the route
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub middleware: Vec<String>,
}

impl RouteSpec {
    /// Create a route without middleware
    #[must_use]
    pub fn new(path: impl Into<String>, methods: impl IntoIterator<Item = HttpMethod>) -> Self {
        Self {
            path: path.into(),
            methods: methods.into_iter().collect(),
            middleware: Vec::new(),
        }
    }

    /// Attach a middleware identifier
    #[must_use]
    pub fn with_middleware(mut self, id: impl Into<String>) -> Self {
        self.middleware.push(id.into());
        self
    }
}

/// An endpoint with its compiled matcher and action-name overrides
#[derive(Debug, Clone, PartialEq)]
pub struct MappedEndpoint {
    pattern: CompiledPattern,
    /// HTTP methods served
    pub methods: BTreeSet<HttpMethod>,
    /// Middleware identifiers
    pub middleware: Vec<String>,
    /// Action names overriding the verb convention, per method
    pub named_methods: BTreeMap<HttpMethod, String>,
}

impl MappedEndpoint {
    /// Compile an endpoint for a path and its methods
    ///
    /// # Errors
    ///
    /// Returns `DiscoveryError::NoMethods` if `methods` is empty, or
    /// `DiscoveryError::Mapping` if the path cannot be compiled.
    pub fn new(
        path: impl Into<String>,
        methods: impl IntoIterator<Item = HttpMethod>,
    ) -> Result<Self> {
        let path = path.into();
        let methods: BTreeSet<HttpMethod> = methods.into_iter().collect();
        if methods.is_empty() {
            return Err(DiscoveryError::NoMethods(path));
        }

        Ok(Self {
            pattern: CompiledPattern::compile(path)?,
            methods,
            middleware: Vec::new(),
            named_methods: BTreeMap::new(),
        })
    }

    /// Compile an endpoint from a host route
    ///
    /// # Errors
    ///
    /// See `MappedEndpoint::new`
    pub fn from_route(route: &RouteSpec) -> Result<Self> {
        let mut endpoint = Self::new(route.path.clone(), route.methods.iter().copied())?;
        endpoint.middleware = route.middleware.clone();
        Ok(endpoint)
    }

    /// Path template
    #[must_use]
    pub fn path(&self) -> &str {
        self.pattern.template()
    }

    /// Compiled matcher
    #[must_use]
    pub fn pattern(&self) -> &CompiledPattern {
        &self.pattern
    }

    /// Parameter names in declaration order
    #[must_use]
    pub fn param_names(&self) -> &[String] {
        self.pattern.param_names()
    }

    /// The method, if the endpoint exposes exactly one
    #[must_use]
    pub fn single_method(&self) -> Option<HttpMethod> {
        match self.methods.len() {
            1 => self.methods.first().copied(),
            _ => None,
        }
    }

    /// Override the action name used for `method`
    pub fn set_action_name(&mut self, method: HttpMethod, name: impl Into<String>) {
        self.named_methods.insert(method, name.into());
    }

    /// Action name for `method`: the override, else the verb convention
    #[must_use]
    pub fn action_name(&self, method: HttpMethod) -> Option<String> {
        self.named_methods
            .get(&method)
            .cloned()
            .or_else(|| method.default_action().map(str::to_string))
    }
}
