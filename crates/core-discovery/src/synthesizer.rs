//! # Resource synthesis
//!
//! Turns each root branch of an `EndpointTree` into one resource:
//!
//! - the first node of the branch is canonical and names the resource after
//!   the literal segments of its path (`/accounts/:id/documents` →
//!   `accounts documents`, a path without literals → `root`);
//! - every endpoint of the branch, the canonical one included, contributes one
//!   action per HTTP method, bound to the endpoint's own path;
//! - rest-hole members contribute their derived names;
//! - junctions (nested mode) synthesize resources of their own.
//!
//! Action names resolve in order: rest-hole name, configured verb action,
//! verb convention (`GET`→`view`, `POST`→`create`, `PUT`/`PATCH`→`update`,
//! `DELETE`→`remove`). Methods without a name (`OPTIONS`) are skipped.

use crate::config::DiscoveryConfig;
use crate::endpoint::MappedEndpoint;
use crate::tree::{EndpointTree, TreeNode};
use core_mapping::path::literal_name;
use core_mapping::{
    title_case, ActionDefinition, ResourceActionRegistry, ResourceDefinition, ResourceRecord,
};
use tracing::{debug, trace};

/// Name given to a resource whose path has no literal segment
pub const ROOT_RESOURCE_NAME: &str = "root";

/// A synthesized resource and the actions discovered for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredResource {
    /// The resource, without actions
    pub definition: ResourceDefinition,
    /// Actions in discovery order; names may repeat across endpoints
    pub actions: Vec<ActionDefinition>,
}

impl DiscoveredResource {
    /// Resource name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.definition.name
    }

    /// Canonical path
    #[must_use]
    pub fn path(&self) -> &str {
        &self.definition.path
    }

    /// Distinct action names in discovery order
    #[must_use]
    pub fn action_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for action in &self.actions {
            if !names.contains(&action.name.as_str()) {
                names.push(&action.name);
            }
        }
        names
    }

    /// Register the resource, then attach every action so each endpoint path
    /// gets bound.
    ///
    /// # Returns
    ///
    /// `true` if the resource name was new to the registry
    pub fn register(&self, registry: &mut ResourceActionRegistry) -> bool {
        let is_new = registry.add_resource(self.definition.clone());
        for action in &self.actions {
            registry.add_action_to_resource(&self.definition.name, action.clone());
        }
        is_new
    }

    /// Collapse into a single declaration; the first action of a name wins
    #[must_use]
    pub fn into_definition(self) -> ResourceDefinition {
        let mut definition = self.definition;
        for action in self.actions {
            if !definition.has_action(&action.name) {
                definition.actions.push(action);
            }
        }
        definition
    }

    /// Sync record for the remote control plane
    #[must_use]
    pub fn to_record(&self) -> ResourceRecord {
        self.clone().into_definition().to_record()
    }
}

/// Synthesizes resources from an endpoint tree
#[derive(Debug, Clone, Copy)]
pub struct ResourceSynthesizer<'a> {
    config: &'a DiscoveryConfig,
}

impl<'a> ResourceSynthesizer<'a> {
    /// Creates a synthesizer using `config` for verb action names
    #[must_use]
    pub fn new(config: &'a DiscoveryConfig) -> Self {
        Self { config }
    }

    /// One resource per root branch, in root order, followed by the
    /// resources of any junction inside that branch
    #[must_use]
    pub fn synthesize(&self, tree: &EndpointTree) -> Vec<DiscoveredResource> {
        let mut resources = Vec::new();
        for (root, nodes) in &tree.branches {
            self.synthesize_branch(root, nodes, &mut resources);
        }
        resources
    }

    fn synthesize_branch(
        &self,
        root: &str,
        nodes: &[TreeNode],
        out: &mut Vec<DiscoveredResource>,
    ) {
        let Some(canonical) = nodes.first() else {
            return;
        };
        let path = match canonical {
            TreeNode::Junction(_) => root,
            node => node.path(),
        };

        let name = match literal_name(path) {
            name if name.is_empty() => ROOT_RESOURCE_NAME.to_string(),
            name => name,
        };

        let mut actions = Vec::new();
        let mut junctions = Vec::new();
        for node in nodes {
            match node {
                TreeNode::Endpoint(endpoint) => self.collect_actions(endpoint, &mut actions),
                TreeNode::RestHole(group) => {
                    for member in &group.members {
                        self.collect_actions(member, &mut actions);
                    }
                }
                TreeNode::Junction(tree) => junctions.push(tree),
            }
        }

        debug!(resource = %name, path = %path, actions = actions.len(), "resource synthesized");
        out.push(DiscoveredResource {
            definition: ResourceDefinition::new(name, path),
            actions,
        });

        for tree in junctions {
            for (junction_root, junction_nodes) in &tree.branches {
                self.synthesize_branch(junction_root, junction_nodes, out);
            }
        }
    }

    fn collect_actions(&self, endpoint: &MappedEndpoint, out: &mut Vec<ActionDefinition>) {
        for &method in &endpoint.methods {
            let name = endpoint
                .named_methods
                .get(&method)
                .cloned()
                .or_else(|| self.config.verb_action(method).map(str::to_string))
                .or_else(|| method.default_action().map(str::to_string));

            let Some(name) = name else {
                trace!(path = %endpoint.path(), %method, "method carries no action");
                continue;
            };

            out.push(
                ActionDefinition::new(name.clone())
                    .with_title(title_case(&name))
                    .with_path(endpoint.path()),
            );
        }
    }
}
