//! # Resource/Action Registry
//!
//! In-memory store of resource and action declarations, their remote-sync
//! state, and the compiled path bindings used to resolve a request path back to
//! the resource it addresses.
//!
//! ## Resolution order
//!
//! Path bindings are tried in registration order and the first structural
//! match wins. There is no best-match or longest-match ranking: applications
//! disambiguate overlapping templates by declaration order.
//!
//! ## Usage Example
//!
//! ```rust
//! use core_mapping::{ActionDefinition, ResourceActionRegistry, ResourceDefinition};
//!
//! let mut registry = ResourceActionRegistry::new();
//!
//! let documents = ResourceDefinition::new("documents", "/accounts/:acctId/documents/:docId")
//!     .with_action(ActionDefinition::new("view"))
//!     .with_action(ActionDefinition::new("share").with_path("/accounts/:acctId/documents/:docId/share"));
//! registry.add_resource(documents);
//!
//! let found = registry.get_resource_by_path("/accounts/42/documents/99").unwrap();
//! assert_eq!(found.resource_name, "documents");
//! assert_eq!(found.context["acctId"], "42");
//! assert_eq!(found.context["docId"], "99");
//!
//! let shared = registry.get_resource_by_path("/accounts/42/documents/99/share").unwrap();
//! assert_eq!(shared.resource_name, "documents");
//! ```
//!
//! ## Thread-safety
//!
//! Writes take `&mut self`. The check-then-insert in `add_resource` is only
//! atomic because of that exclusive borrow; share a registry across threads
//! behind a lock.

use crate::definition::{ActionDefinition, ResourceDefinition};
use crate::path::CompiledPattern;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, trace, warn};

/// A compiled path template bound to the resource it resolves to
#[derive(Debug, Clone)]
pub struct PathBinding {
    pattern: CompiledPattern,
    resource_name: String,
}

impl PathBinding {
    /// Compiled pattern
    #[must_use]
    pub fn pattern(&self) -> &CompiledPattern {
        &self.pattern
    }

    /// Template the pattern was compiled from
    #[must_use]
    pub fn template(&self) -> &str {
        self.pattern.template()
    }

    /// Name of the resource this binding resolves to
    #[must_use]
    pub fn resource_name(&self) -> &str {
        &self.resource_name
    }
}

/// Result of resolving a concrete request path
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceMatch<'a> {
    /// Name of the matched resource
    pub resource_name: &'a str,
    /// The registry's copy of the matched resource
    pub resource: &'a ResourceDefinition,
    /// Path parameters captured from the request path
    pub context: BTreeMap<String, String>,
}

/// Declaration whose sync state is being queried or updated
#[derive(Debug, Clone, Copy)]
pub enum SyncTarget<'a> {
    /// A resource, tracked by name
    Resource(&'a ResourceDefinition),
    /// An action, tracked by `"<resource>:<action>"`
    Action(&'a ActionDefinition),
}

impl<'a> From<&'a ResourceDefinition> for SyncTarget<'a> {
    fn from(resource: &'a ResourceDefinition) -> Self {
        Self::Resource(resource)
    }
}

impl<'a> From<&'a ActionDefinition> for SyncTarget<'a> {
    fn from(action: &'a ActionDefinition) -> Self {
        Self::Action(action)
    }
}

impl SyncTarget<'_> {
    /// Identity key, or `None` for an action with no owning resource
    fn key(&self) -> Option<String> {
        match self {
            Self::Resource(resource) => Some(resource.sync_key()),
            Self::Action(action) => action.resource_name.as_ref().map(|_| action.sync_key()),
        }
    }
}

/// Registry of resource/action declarations keyed by path template
#[derive(Debug, Default)]
pub struct ResourceActionRegistry {
    resources: BTreeMap<String, ResourceDefinition>,
    bindings: Vec<PathBinding>,
    processed_paths: BTreeSet<String>,
    synced: BTreeSet<String>,
}

impl ResourceActionRegistry {
    /// Creates a new empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a resource and its actions
    ///
    /// A new name stores the resource and binds its path. For a name that is
    /// already registered the stored entry is kept as-is, but actions it does
    /// not have yet are appended. In both cases every action gets its
    /// `resource_name` set and an action declaring its own `path` has that
    /// path bound to the resource.
    ///
    /// # Returns
    ///
    /// `true` if the resource was new, `false` if the name was already known
    pub fn add_resource(&mut self, mut def: ResourceDefinition) -> bool {
        let name = def.name.clone();
        let actions = std::mem::take(&mut def.actions);
        let is_new = !self.resources.contains_key(&name);

        if is_new {
            debug!(resource = %name, path = %def.path, "registering resource");
            self.register_path(&def.path, &name);
            self.resources.insert(name.clone(), def);
        } else {
            trace!(resource = %name, "resource already registered, merging actions");
        }

        for mut action in actions {
            action.resource_name = Some(name.clone());
            if let Some(path) = action.path.clone() {
                self.register_path(&path, &name);
            }

            let Some(stored) = self.resources.get_mut(&name) else {
                continue;
            };
            if is_new || !stored.has_action(&action.name) {
                stored.actions.push(action);
            }
        }

        is_new
    }

    /// Registers a copy of `def` and stamps the owner name on the caller's
    /// actions, so they can be passed to `is_synced` / `mark_as_synced`.
    ///
    /// # Returns
    ///
    /// Same as `add_resource`
    pub fn add_resource_in_place(&mut self, def: &mut ResourceDefinition) -> bool {
        for action in &mut def.actions {
            action.resource_name = Some(def.name.clone());
        }
        self.add_resource(def.clone())
    }

    /// Attaches an action to an already registered resource
    ///
    /// The action inherits the resource's current `remote_id` as its
    /// `resource_id` and is appended only if no action of the same name exists.
    /// Its path (or, without one, the resource path) is bound either way.
    ///
    /// # Returns
    ///
    /// The action as attached, or `None` if `resource_name` is unknown
    pub fn add_action_to_resource(
        &mut self,
        resource_name: &str,
        mut action: ActionDefinition,
    ) -> Option<ActionDefinition> {
        let Some(resource) = self.resources.get_mut(resource_name) else {
            debug!(resource = %resource_name, action = %action.name, "unknown resource");
            return None;
        };

        action.resource_id = resource.remote_id.clone();
        action.resource_name = Some(resource_name.to_string());

        if !resource.has_action(&action.name) {
            debug!(resource = %resource_name, action = %action.name, "attaching action");
            resource.actions.push(action.clone());
        }

        let path = action.path.clone().unwrap_or_else(|| resource.path.clone());
        self.register_path(&path, resource_name);

        Some(action)
    }

    /// Checks if a resource or action has been acknowledged by the control plane
    ///
    /// An action without `resource_name` is never synced.
    pub fn is_synced<'a>(&self, target: impl Into<SyncTarget<'a>>) -> bool {
        target
            .into()
            .key()
            .is_some_and(|key| self.synced.contains(&key))
    }

    /// Records that the control plane acknowledged a resource or action
    ///
    /// For a resource, `remote_id` is stored on the registry's copy and every
    /// action currently attached to it is marked as well. For an action only
    /// its own key is marked; callers keep the remote id on their instance.
    pub fn mark_as_synced<'a>(
        &mut self,
        target: impl Into<SyncTarget<'a>>,
        remote_id: impl Into<String>,
    ) {
        match target.into() {
            SyncTarget::Resource(resource) => {
                let remote_id = remote_id.into();
                debug!(resource = %resource.name, %remote_id, "resource synced");

                let action_keys: Vec<String> = match self.resources.get_mut(&resource.name) {
                    Some(stored) => {
                        stored.remote_id = Some(remote_id);
                        stored.actions.iter().map(ActionDefinition::sync_key).collect()
                    }
                    None => resource
                        .actions
                        .iter()
                        .map(|a| format!("{}:{}", resource.name, a.name))
                        .collect(),
                };

                self.synced.insert(resource.sync_key());
                self.synced.extend(action_keys);
            }
            SyncTarget::Action(action) => {
                if action.resource_name.is_none() {
                    debug!(action = %action.name, "action has no owning resource, not marked");
                    return;
                }
                trace!(key = %action.sync_key(), "action synced");
                self.synced.insert(action.sync_key());
            }
        }
    }

    /// Resolves a concrete request path to the first matching resource
    ///
    /// Bindings are tried in registration order. The captured parameters are
    /// returned as the match context.
    #[must_use]
    pub fn get_resource_by_path(&self, path: &str) -> Option<ResourceMatch<'_>> {
        for binding in &self.bindings {
            let Some(context) = binding.pattern.captures(path) else {
                continue;
            };
            let Some((resource_name, resource)) = self.resources.get_key_value(&binding.resource_name)
            else {
                continue;
            };

            trace!(path, template = %binding.template(), resource = %resource_name, "path resolved");
            return Some(ResourceMatch {
                resource_name: resource_name.as_str(),
                resource,
                context,
            });
        }

        trace!(path, "no resource matches path");
        None
    }

    /// Gets a registered resource by name
    #[must_use]
    pub fn resource(&self, name: &str) -> Option<&ResourceDefinition> {
        self.resources.get(name)
    }

    /// Iterates registered resources ordered by name
    pub fn resources(&self) -> impl Iterator<Item = &ResourceDefinition> {
        self.resources.values()
    }

    /// Counts the registered resources
    #[must_use]
    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }

    /// Path bindings in registration (resolution) order
    #[must_use]
    pub fn bindings(&self) -> &[PathBinding] {
        &self.bindings
    }

    /// Number of synced identity keys
    #[must_use]
    pub fn synced_count(&self) -> usize {
        self.synced.len()
    }

    fn register_path(&mut self, template: &str, resource_name: &str) {
        if self.processed_paths.contains(template) {
            trace!(template, resource = %resource_name, "template already bound");
            return;
        }

        match CompiledPattern::compile(template) {
            Ok(pattern) => {
                self.processed_paths.insert(template.to_string());
                self.bindings.push(PathBinding {
                    pattern,
                    resource_name: resource_name.to_string(),
                });
            }
            Err(e) => {
                warn!(template, resource = %resource_name, error = %e, "skipping unusable path template");
            }
        }
    }
}
