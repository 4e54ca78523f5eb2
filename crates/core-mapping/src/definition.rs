//! Resource and action declarations
//!
//! This module provides the domain types the registry stores:
//! - `ActionDefinition`: an authorization-relevant verb scoped to a resource
//! - `ResourceDefinition`: an authorization-relevant noun with its actions
//! - `ResourceRecord` / `ActionRecord`: plain serializable records handed to the
//!   remote-sync component
//!
//! ## Constraints
//!
//! Declarations loaded from configuration are checked with `validate()`:
//! - `MAX_RESOURCE_NAME_LENGTH` (128): maximum resource/action name length
//! - `MAX_PATH_TEMPLATE_LENGTH` (256): maximum path template length

use crate::error::{MappingError, Result};
use crate::{MAX_PATH_TEMPLATE_LENGTH, MAX_RESOURCE_NAME_LENGTH};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Resource type assigned when a declaration does not name one
pub const DEFAULT_RESOURCE_TYPE: &str = "rest";

fn default_resource_type() -> String {
    DEFAULT_RESOURCE_TYPE.to_string()
}

/// Action that can be performed on a resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionDefinition {
    /// Functional action name (lowercase, e.g. `view` or `suspend`)
    pub name: String,

    /// Human-facing display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Path template of the endpoint this action is exposed on.
    ///
    /// When unset the action rides on its resource's path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Free-form attributes (BTreeMap for deterministic serialization)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,

    /// Remote id of the owning resource, copied when the action is attached
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,

    /// Name of the owning resource, set by the registry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_name: Option<String>,
}

impl ActionDefinition {
    /// Create a new action with only a name
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: None,
            description: None,
            path: None,
            attributes: BTreeMap::new(),
            resource_id: None,
            resource_name: None,
        }
    }

    /// Set the path this action is exposed on
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the display title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Composite identity key used for sync tracking: `"<resource>:<action>"`
    #[must_use]
    pub fn sync_key(&self) -> String {
        format!(
            "{}:{}",
            self.resource_name.as_deref().unwrap_or_default(),
            self.name
        )
    }

    /// Display name: the explicit title, or the title-cased action name
    #[must_use]
    pub fn display_name(&self) -> String {
        self.title.clone().unwrap_or_else(|| title_case(&self.name))
    }

    /// Plain record for the remote-sync component
    #[must_use]
    pub fn to_record(&self) -> ActionRecord {
        ActionRecord {
            name: self.display_name(),
            description: self.description.clone(),
            attributes: self.attributes.clone(),
        }
    }

    /// Validate the action declaration
    ///
    /// # Errors
    ///
    /// Returns `MappingError::InvalidDefinition` if the name is empty or the
    /// path does not start with `/`, `MappingError::NameTooLong` or
    /// `MappingError::TemplateTooLong` if a limit is exceeded.
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name, "Action")?;
        if let Some(path) = &self.path {
            validate_path(path)?;
        }
        Ok(())
    }
}

/// Resource that actions are scoped to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDefinition {
    /// Unique resource name (registry key)
    pub name: String,

    /// Resource type identifier
    #[serde(rename = "type", default = "default_resource_type")]
    pub resource_type: String,

    /// Path template the resource is exposed on
    pub path: String,

    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Actions in declaration order
    #[serde(default)]
    pub actions: Vec<ActionDefinition>,

    /// Free-form attributes (BTreeMap for deterministic serialization)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,

    /// Id assigned by the remote control plane once synced
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_id: Option<String>,
}

impl ResourceDefinition {
    /// Create a new resource of the default type with no actions
    #[must_use]
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            resource_type: default_resource_type(),
            path: path.into(),
            description: None,
            actions: Vec::new(),
            attributes: BTreeMap::new(),
            remote_id: None,
        }
    }

    /// Append an action
    #[must_use]
    pub fn with_action(mut self, action: ActionDefinition) -> Self {
        self.actions.push(action);
        self
    }

    /// Find an action by name
    #[must_use]
    pub fn action(&self, name: &str) -> Option<&ActionDefinition> {
        self.actions.iter().find(|a| a.name == name)
    }

    /// Check if an action with this name is attached
    #[must_use]
    pub fn has_action(&self, name: &str) -> bool {
        self.action(name).is_some()
    }

    /// Identity key used for sync tracking
    #[must_use]
    pub fn sync_key(&self) -> String {
        self.name.clone()
    }

    /// Plain record for the remote-sync component.
    ///
    /// Actions are keyed by name; when several actions share a name the first
    /// one wins.
    #[must_use]
    pub fn to_record(&self) -> ResourceRecord {
        let mut actions = BTreeMap::new();
        for action in &self.actions {
            actions
                .entry(action.name.clone())
                .or_insert_with(|| action.to_record());
        }

        ResourceRecord {
            key: self.name.clone(),
            name: title_case(&self.name),
            resource_type: self.resource_type.clone(),
            description: self.description.clone(),
            actions,
            attributes: self.attributes.clone(),
        }
    }

    /// Validate the resource declaration and all of its actions
    ///
    /// # Errors
    ///
    /// Returns `MappingError::InvalidDefinition` if:
    /// - the name or type is empty
    /// - the path does not start with `/`
    /// - any action is invalid
    ///
    /// Returns `MappingError::NameTooLong` / `MappingError::TemplateTooLong`
    /// if a limit is exceeded.
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name, "Resource")?;

        if self.resource_type.is_empty() {
            return Err(MappingError::InvalidDefinition(format!(
                "Resource '{}' has an empty type",
                self.name
            )));
        }

        validate_path(&self.path)?;

        for action in &self.actions {
            action.validate()?;
        }

        Ok(())
    }
}

/// Serializable resource record consumed by the remote-sync component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRecord {
    /// Unique resource key
    pub key: String,
    /// Display name
    pub name: String,
    /// Resource type identifier
    #[serde(rename = "type")]
    pub resource_type: String,
    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Actions keyed by functional name
    pub actions: BTreeMap<String, ActionRecord>,
    /// Free-form attributes
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

/// Serializable action record consumed by the remote-sync component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Display name
    pub name: String,
    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Free-form attributes
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

/// Title-case a space separated name: `accounts documents` -> `Accounts Documents`
#[must_use]
pub fn title_case(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn validate_name(name: &str, kind: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(MappingError::InvalidDefinition(format!(
            "{kind} name cannot be empty"
        )));
    }

    if name.len() > MAX_RESOURCE_NAME_LENGTH {
        return Err(MappingError::NameTooLong {
            max: MAX_RESOURCE_NAME_LENGTH,
            length: name.len(),
        });
    }

    Ok(())
}

fn validate_path(path: &str) -> Result<()> {
    if !path.starts_with('/') {
        return Err(MappingError::InvalidDefinition(format!(
            "Path '{path}' must start with '/'"
        )));
    }

    if path.len() > MAX_PATH_TEMPLATE_LENGTH {
        return Err(MappingError::TemplateTooLong {
            max: MAX_PATH_TEMPLATE_LENGTH,
            length: path.len(),
        });
    }

    Ok(())
}
