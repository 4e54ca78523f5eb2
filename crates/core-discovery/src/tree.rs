//! # Endpoint tree
//!
//! Groups discovered endpoints into root branches, one per candidate resource.
//!
//! Endpoints are walked in lexicographic path order. Its root is the nearest
//! open root whose path is a segment prefix of the endpoint's path. Roots stay
//! open across unrelated siblings that sort inside their range, so
//! `/accounts-archive` or `/accounts.json` (`-` and `.` sort before `/`) do not
//! cut `/accounts` off from `/accounts/:id`. Each endpoint either:
//! - starts a **new root** when no open root prefixes it, or (flat mode) the
//!   last endpoint of its root introduced a new parameter;
//! - **continues the branch** as a sibling leaf when the last endpoint of its
//!   root is a segment prefix of its path and did not introduce a new
//!   parameter;
//! - otherwise opens a **junction** under its root. Flat mode pushes the
//!   endpoint onto the root instead.
//!
//! An endpoint *introduces a new parameter* when it carries more parameter
//! segments than the endpoint before it in the same root, and that endpoint
//! already had one.
//! The item id of a top-level collection (`/accounts` → `/accounts/:id`)
//! therefore stays in the collection's branch:
//!
//! ```text
//! /accounts                     ─┐
//! /accounts/:id                  ├─ root "/accounts"
//! /accounts/:id/documents       ─┘
//! /accounts/:id/documents/:docId   (introduces :docId)
//! /accounts/:id/documents/:docId/archive ─ root of its own (flat)
//! ```

use crate::endpoint::MappedEndpoint;
use crate::prefix::is_path_prefix;
use crate::rest_hole::RestHoleGroup;
use core_mapping::path::{parameter_count, segments};
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// A node in a root branch
#[derive(Debug, Clone, PartialEq)]
pub enum TreeNode {
    /// A single endpoint
    Endpoint(MappedEndpoint),
    /// A group of single-verb endpoints sharing a prefix
    RestHole(RestHoleGroup),
    /// A nested tree (nested mode only)
    Junction(EndpointTree),
}

impl TreeNode {
    /// Path identifying this node
    ///
    /// The endpoint path, the rest-hole prefix, or a junction's first key.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::Endpoint(endpoint) => endpoint.path(),
            Self::RestHole(group) => &group.prefix,
            Self::Junction(tree) => tree.branches.keys().next().map_or("", String::as_str),
        }
    }
}

/// Root path → ordered branch nodes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EndpointTree {
    /// Branches keyed by root path
    pub branches: BTreeMap<String, Vec<TreeNode>>,
}

impl EndpointTree {
    fn single(key: String, nodes: Vec<TreeNode>) -> Self {
        let mut branches = BTreeMap::new();
        branches.insert(key, nodes);
        Self { branches }
    }

    /// Nodes of the branch rooted at `path`
    #[must_use]
    pub fn branch(&self, path: &str) -> Option<&[TreeNode]> {
        self.branches.get(path).map(Vec::as_slice)
    }

    /// Root paths in order
    pub fn roots(&self) -> impl Iterator<Item = &str> {
        self.branches.keys().map(String::as_str)
    }

    /// Number of root branches
    #[must_use]
    pub fn len(&self) -> usize {
        self.branches.len()
    }

    /// Check if the tree has no branches
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }

    /// Move rest-hole members out of their leaves into `RestHole` nodes.
    ///
    /// Each group lands in the branch whose root is the longest segment prefix
    /// of the group prefix, or in a new branch keyed by the prefix when no
    /// root qualifies. Junctions and branches left empty are dropped.
    pub fn augment(&mut self, groups: &[RestHoleGroup]) {
        if groups.is_empty() {
            return;
        }

        let grouped = |path: &str| groups.iter().any(|g| g.contains(path));
        self.remove_endpoints(&grouped);

        for group in groups {
            let host = self
                .branches
                .keys()
                .filter(|root| is_path_prefix(root, &group.prefix))
                .max_by_key(|root| segments(root).count())
                .cloned();

            let key = host.unwrap_or_else(|| group.prefix.clone());
            debug!(prefix = %group.prefix, root = %key, members = group.members.len(), "rest-hole attached");
            self.branches
                .entry(key)
                .or_default()
                .push(TreeNode::RestHole(group.clone()));
        }
    }

    fn remove_endpoints(&mut self, grouped: &impl Fn(&str) -> bool) {
        for nodes in self.branches.values_mut() {
            nodes.retain_mut(|node| match node {
                TreeNode::Endpoint(endpoint) => !grouped(endpoint.path()),
                TreeNode::RestHole(_) => true,
                TreeNode::Junction(tree) => {
                    tree.remove_endpoints(grouped);
                    !tree.is_empty()
                }
            });
        }
        self.branches.retain(|_, nodes| !nodes.is_empty());
    }
}

/// Builds an `EndpointTree` from a flat endpoint list
#[derive(Debug, Clone, Copy)]
pub struct EndpointTreeBuilder {
    flat: bool,
}

impl Default for EndpointTreeBuilder {
    fn default() -> Self {
        Self { flat: true }
    }
}

struct Previous {
    path: String,
    params: usize,
    introduced: bool,
}

struct Branch {
    key: String,
    nodes: Vec<TreeNode>,
    junction: Option<(String, Vec<TreeNode>)>,
    prev: Previous,
}

impl Branch {
    fn new(first: MappedEndpoint, params: usize, introduced: bool) -> Self {
        let key = first.path().to_string();
        Self {
            prev: Previous {
                path: key.clone(),
                params,
                introduced,
            },
            key,
            nodes: vec![TreeNode::Endpoint(first)],
            junction: None,
        }
    }

    /// Whether an endpoint with `params` parameters adds one over the last leaf
    fn introduces(&self, params: usize) -> bool {
        self.prev.params > 0 && params > self.prev.params
    }

    fn push(&mut self, endpoint: MappedEndpoint, params: usize, flat: bool) {
        let path = endpoint.path().to_string();
        let introduced = self.introduces(params);
        let continues = !self.prev.introduced && is_path_prefix(&self.prev.path, &path);

        if continues || flat {
            trace!(path = %path, root = %self.key, "leaf");
            match &mut self.junction {
                Some((_, nodes)) => nodes.push(TreeNode::Endpoint(endpoint)),
                None => self.nodes.push(TreeNode::Endpoint(endpoint)),
            }
        } else {
            trace!(path = %path, root = %self.key, "junction");
            self.close_junction();
            self.junction = Some((path.clone(), vec![TreeNode::Endpoint(endpoint)]));
        }

        self.prev = Previous {
            path,
            params,
            introduced,
        };
    }

    fn close_junction(&mut self) {
        if let Some((key, nodes)) = self.junction.take() {
            self.nodes
                .push(TreeNode::Junction(EndpointTree::single(key, nodes)));
        }
    }

    fn finish(mut self, tree: &mut EndpointTree) {
        self.close_junction();
        tree.branches.entry(self.key).or_default().extend(self.nodes);
    }
}

impl EndpointTreeBuilder {
    /// Creates a builder in flat mode
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Collapse junctions into their root (`true`, default) or keep them nested
    #[must_use]
    pub fn flat(mut self, flat: bool) -> Self {
        self.flat = flat;
        self
    }

    /// Group endpoints into root branches
    ///
    /// Never fails. Endpoints sharing a path end up in the same branch.
    #[must_use]
    pub fn build(&self, endpoints: Vec<MappedEndpoint>) -> EndpointTree {
        let mut endpoints = endpoints;
        endpoints.sort_by(|a, b| a.path().cmp(b.path()));

        let mut tree = EndpointTree::default();
        // Open roots, each a string prefix of the one above it
        let mut open: Vec<Branch> = Vec::new();

        for endpoint in endpoints {
            let path = endpoint.path().to_string();
            let params = parameter_count(&path);

            // Paths are sorted, so a root that is not a string prefix of this
            // path can not prefix any later one either
            while let Some(top) = open.pop() {
                if path.starts_with(top.key.as_str()) {
                    open.push(top);
                    break;
                }
                top.finish(&mut tree);
            }

            let parent = open
                .iter_mut()
                .rev()
                .find(|branch| is_path_prefix(&branch.key, &path));

            match parent {
                Some(branch) if !(self.flat && branch.prev.introduced) => {
                    branch.push(endpoint, params, self.flat);
                }
                parent => {
                    let introduced = parent.is_some_and(|branch| branch.introduces(params));
                    trace!(path = %path, "root");
                    open.push(Branch::new(endpoint, params, introduced));
                }
            }
        }

        for done in open {
            done.finish(&mut tree);
        }

        debug!(roots = tree.len(), flat = self.flat, "endpoint tree built");
        tree
    }
}
