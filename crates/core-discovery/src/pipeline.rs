//! Discovery pipeline: host routes in, synthesized resources out.
//!
//! Stages run in this order:
//! 1. filter routes by `DiscoveryConfig::accepts`
//! 2. merge routes sharing a path (methods and middleware are unioned, first
//!    occurrence keeps its position)
//! 3. compile each route into a `MappedEndpoint`; routes that fail are logged
//!    and skipped
//! 4. group REST-holes
//! 5. build the endpoint tree and attach REST-hole groups
//! 6. synthesize one resource per root, merging resources that share a name

use crate::config::DiscoveryConfig;
use crate::endpoint::{MappedEndpoint, RouteSpec};
use crate::rest_hole::RestHoleGrouper;
use crate::synthesizer::{DiscoveredResource, ResourceSynthesizer};
use crate::tree::EndpointTreeBuilder;
use core_mapping::ResourceActionRegistry;
use tracing::{debug, info, warn};

/// Discover resources and actions from a route table
#[must_use]
pub fn discover(routes: &[RouteSpec], config: &DiscoveryConfig) -> Vec<DiscoveredResource> {
    let accepted: Vec<&RouteSpec> = routes.iter().filter(|r| config.accepts(r)).collect();
    debug!(total = routes.len(), accepted = accepted.len(), "routes filtered");

    let endpoints: Vec<MappedEndpoint> = merge_routes(accepted)
        .iter()
        .filter_map(|route| match MappedEndpoint::from_route(route) {
            Ok(endpoint) => Some(endpoint),
            Err(e) => {
                warn!(path = %route.path, error = %e, "route skipped");
                None
            }
        })
        .collect();

    let grouping = RestHoleGrouper::new().group(endpoints);
    let mut tree = EndpointTreeBuilder::new()
        .flat(config.flat)
        .build(grouping.endpoints);
    tree.augment(&grouping.groups);

    let resources = merge_by_name(ResourceSynthesizer::new(config).synthesize(&tree));
    info!(resources = resources.len(), "discovery complete");
    resources
}

/// Register discovered resources in order
///
/// # Returns
///
/// The number of resource names that were new to the registry
pub fn register_all(resources: &[DiscoveredResource], registry: &mut ResourceActionRegistry) -> usize {
    resources
        .iter()
        .filter(|resource| resource.register(registry))
        .count()
}

fn merge_routes(routes: Vec<&RouteSpec>) -> Vec<RouteSpec> {
    let mut merged: Vec<RouteSpec> = Vec::with_capacity(routes.len());

    for route in routes {
        match merged.iter_mut().find(|m| m.path == route.path) {
            Some(existing) => {
                for method in &route.methods {
                    if !existing.methods.contains(method) {
                        existing.methods.push(*method);
                    }
                }
                for id in &route.middleware {
                    if !existing.middleware.contains(id) {
                        existing.middleware.push(id.clone());
                    }
                }
            }
            None => merged.push(route.clone()),
        }
    }

    merged
}

fn merge_by_name(resources: Vec<DiscoveredResource>) -> Vec<DiscoveredResource> {
    let mut merged: Vec<DiscoveredResource> = Vec::with_capacity(resources.len());

    for resource in resources {
        match merged.iter_mut().find(|m| m.name() == resource.name()) {
            Some(existing) => {
                debug!(resource = %resource.name(), path = %resource.path(), "merged into earlier resource");
                existing.actions.extend(resource.actions);
            }
            None => merged.push(resource),
        }
    }

    merged
}
