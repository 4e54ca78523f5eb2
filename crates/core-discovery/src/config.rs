//! Discovery options

use crate::endpoint::{HttpMethod, RouteSpec};
use crate::prefix::is_path_prefix;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Options controlling how routes are turned into resources
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Collapse nested junctions into one level per root
    pub flat: bool,

    /// Verb → action name overrides applied before the built-in convention,
    /// e.g. `{ "GET": "read" }`. Keys are matched case-insensitively.
    pub verb_actions: BTreeMap<String, String>,

    /// Only discover routes carrying this middleware identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_middleware: Option<String>,

    /// Skip routes under these path prefixes (segment-aware)
    pub exclude_prefixes: Vec<String>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            flat: true,
            verb_actions: BTreeMap::new(),
            required_middleware: None,
            exclude_prefixes: Vec::new(),
        }
    }
}

impl DiscoveryConfig {
    /// Configured action name for a verb, if any
    #[must_use]
    pub fn verb_action(&self, method: HttpMethod) -> Option<&str> {
        self.verb_actions
            .iter()
            .find(|(verb, _)| verb.eq_ignore_ascii_case(method.as_str()))
            .map(|(_, name)| name.as_str())
    }

    /// Check if a route passes the middleware and prefix filters
    #[must_use]
    pub fn accepts(&self, route: &RouteSpec) -> bool {
        if let Some(required) = &self.required_middleware {
            if !route.middleware.iter().any(|m| m == required) {
                return false;
            }
        }

        !self
            .exclude_prefixes
            .iter()
            .any(|prefix| is_path_prefix(prefix, &route.path))
    }
}
