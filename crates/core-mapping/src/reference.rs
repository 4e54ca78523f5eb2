//! Resource references handed to enforcement.
//!
//! An authorization check names its resource in one of three shapes: a raw
//! request path, an explicit resource instance, or a bag of attributes. The
//! shapes are modelled as variants of `ResourceReference` and resolved
//! structurally by the registry, so no caller has to probe what it was given.

use crate::registry::ResourceActionRegistry;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::trace;

/// Attribute carrying the resource type in `ResourceReference::Attributes`
pub const TYPE_ATTRIBUTE: &str = "type";

/// Attribute carrying the instance key in `ResourceReference::Attributes`
pub const KEY_ATTRIBUTE: &str = "key";

/// How an authorization check refers to its resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceReference {
    /// Concrete request path, resolved through the registry's path bindings
    Path(String),
    /// Explicit resource instance
    Instance {
        /// Resource type (the registered resource name)
        resource_type: String,
        /// Optional instance key
        key: Option<String>,
        /// Instance attributes
        attributes: BTreeMap<String, String>,
    },
    /// Raw attributes; `type` is required, `key` optional
    Attributes(BTreeMap<String, String>),
}

/// Resource as presented to the policy decision point
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedResource {
    /// Resource type (the registered resource name)
    #[serde(rename = "type")]
    pub resource_type: String,
    /// Optional instance key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Attributes, or path parameters for path references
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl ResourceReference {
    /// Create a path reference
    #[must_use]
    pub fn path(path: impl Into<String>) -> Self {
        Self::Path(path.into())
    }

    /// Create an instance reference without attributes
    #[must_use]
    pub fn instance(resource_type: impl Into<String>, key: Option<String>) -> Self {
        Self::Instance {
            resource_type: resource_type.into(),
            key,
            attributes: BTreeMap::new(),
        }
    }
}

impl ResourceActionRegistry {
    /// Resolves a resource reference for enforcement
    ///
    /// - `Path`: the first matching binding; its parameters become attributes
    /// - `Instance`: passed through unchanged
    /// - `Attributes`: `type` and `key` are lifted out, the rest kept
    ///
    /// # Returns
    ///
    /// `None` if a path matches nothing or an attribute bag has no `type`
    #[must_use]
    pub fn resolve(&self, reference: &ResourceReference) -> Option<ResolvedResource> {
        match reference {
            ResourceReference::Path(path) => {
                let found = self.get_resource_by_path(path)?;
                Some(ResolvedResource {
                    resource_type: found.resource_name.to_string(),
                    key: None,
                    attributes: found.context,
                })
            }
            ResourceReference::Instance {
                resource_type,
                key,
                attributes,
            } => Some(ResolvedResource {
                resource_type: resource_type.clone(),
                key: key.clone(),
                attributes: attributes.clone(),
            }),
            ResourceReference::Attributes(raw) => {
                let mut attributes = raw.clone();
                let Some(resource_type) = attributes.remove(TYPE_ATTRIBUTE) else {
                    trace!("attribute reference without a type");
                    return None;
                };
                let key = attributes.remove(KEY_ATTRIBUTE);
                Some(ResolvedResource {
                    resource_type,
                    key,
                    attributes,
                })
            }
        }
    }
}
