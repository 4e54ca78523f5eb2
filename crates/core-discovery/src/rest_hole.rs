//! # REST-hole grouping
//!
//! A REST-hole is an endpoint exposing a single HTTP verb whose meaning lives
//! in its trailing path segment rather than in the verb, e.g.
//! `POST /accounts/:id/suspend`. Treated like any other endpoint it would map
//! to a `create` action or, worse, become a resource of its own.
//!
//! The grouper pairs such endpoints by their shared leading path segments and
//! names each one after the literal segments beyond that prefix:
//!
//! ```text
//! POST /accounts/:id/suspend     ─┐
//!                                 ├─ /accounts/:id → { suspend, reactivate }
//! POST /accounts/:id/reactivate  ─┘
//! ```
//!
//! ## Limitations
//!
//! This is a greedy string heuristic. Candidates are visited longest path
//! first (ties keep input order) and each joins the group of the *first* other
//! candidate it shares a non-empty prefix with, not the closest one. The
//! output is a pure function of the input order.

use crate::endpoint::MappedEndpoint;
use crate::prefix::{leading_segments, shared_segment_count};
use core_mapping::path::{is_parameter, segments};
use tracing::{debug, trace};

/// Single-verb endpoints sharing a path prefix
#[derive(Debug, Clone, PartialEq)]
pub struct RestHoleGroup {
    /// Shared leading path segments
    pub prefix: String,
    /// Members, each carrying its resolved action name as an override
    pub members: Vec<MappedEndpoint>,
}

impl RestHoleGroup {
    /// Check if an endpoint path belongs to this group
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.members.iter().any(|m| m.path() == path)
    }
}

/// Output of `RestHoleGrouper::group`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RestHoleGrouping {
    /// All input endpoints, in input order, with rest-hole names applied
    pub endpoints: Vec<MappedEndpoint>,
    /// Groups in order of first assignment
    pub groups: Vec<RestHoleGroup>,
}

impl RestHoleGrouping {
    /// Find the group keyed by `prefix`
    #[must_use]
    pub fn group(&self, prefix: &str) -> Option<&RestHoleGroup> {
        self.groups.iter().find(|g| g.prefix == prefix)
    }

    /// Check if an endpoint path was absorbed into any group
    #[must_use]
    pub fn is_grouped(&self, path: &str) -> bool {
        self.groups.iter().any(|g| g.contains(path))
    }
}

/// Detects REST-hole endpoints and derives their action names
#[derive(Debug, Clone, Copy, Default)]
pub struct RestHoleGrouper;

impl RestHoleGrouper {
    /// Creates a new grouper
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Group single-verb endpoints by shared path prefix
    ///
    /// Never fails: an endpoint that shares no prefix with another candidate,
    /// or whose suffix beyond the prefix is made only of parameters, stays
    /// ungrouped and keeps its verb-derived action name.
    #[must_use]
    pub fn group(&self, endpoints: Vec<MappedEndpoint>) -> RestHoleGrouping {
        let mut endpoints = endpoints;

        let mut candidates: Vec<usize> = endpoints
            .iter()
            .enumerate()
            .filter(|(_, ep)| ep.single_method().is_some())
            .map(|(i, _)| i)
            .collect();
        // Stable: equal lengths keep input order
        candidates.sort_by(|&a, &b| endpoints[b].path().len().cmp(&endpoints[a].path().len()));

        let mut groups: Vec<RestHoleGroup> = Vec::new();

        for &a in &candidates {
            let path = endpoints[a].path().to_string();

            let shared = candidates
                .iter()
                .filter(|&&b| b != a)
                .map(|&b| shared_segment_count(&path, endpoints[b].path()))
                .find(|&count| count > 0);
            let Some(shared) = shared else {
                trace!(path = %path, "no shared prefix, left ungrouped");
                continue;
            };

            let name = action_name_beyond(&path, shared);
            if name.is_empty() {
                trace!(path = %path, "suffix has no literal segment, left ungrouped");
                continue;
            }

            let Some(method) = endpoints[a].single_method() else {
                continue;
            };
            endpoints[a].set_action_name(method, name.clone());

            let prefix = leading_segments(&path, shared);
            debug!(path = %path, prefix = %prefix, action = %name, "rest-hole grouped");

            let member = endpoints[a].clone();
            match groups.iter_mut().find(|g| g.prefix == prefix) {
                Some(group) => group.members.push(member),
                None => groups.push(RestHoleGroup {
                    prefix,
                    members: vec![member],
                }),
            }
        }

        RestHoleGrouping { endpoints, groups }
    }
}

/// Literal segments of `path` after its first `shared` segments, space-joined
fn action_name_beyond(path: &str, shared: usize) -> String {
    segments(path)
        .skip(shared)
        .filter(|s| !is_parameter(s))
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::HttpMethod;

    fn ep(path: &str, methods: &[HttpMethod]) -> MappedEndpoint {
        MappedEndpoint::new(path, methods.iter().copied()).unwrap()
    }

    #[test]
    fn test_action_name_beyond() {
        assert_eq!(action_name_beyond("/accounts/:id/suspend", 2), "suspend");
        assert_eq!(
            action_name_beyond("/accounts/:id/documents/:docId/archive", 2),
            "documents archive"
        );
        assert_eq!(action_name_beyond("/users/:id", 1), "");
    }

    #[test]
    fn test_multi_method_endpoints_ignored() {
        let grouping = RestHoleGrouper::new().group(vec![
            ep("/accounts/:id/a", &[HttpMethod::Get, HttpMethod::Post]),
            ep("/accounts/:id/b", &[HttpMethod::Post]),
        ]);
        assert!(grouping.groups.is_empty());
        assert!(grouping.endpoints[1].named_methods.is_empty());
    }

    #[test]
    fn test_parameter_only_suffix_left_ungrouped() {
        let grouping = RestHoleGrouper::new().group(vec![
            ep("/users", &[HttpMethod::Get]),
            ep("/users/:id", &[HttpMethod::Get]),
        ]);
        assert!(grouping.groups.is_empty());
    }
}
