// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 P47H Team <https://p47h.com>

//! # endpoint-authz
//!
//! Endpoint-to-resource mapping for authorization SDKs.
//!
//! This crate provides a unified API over:
//!
//! - **Mapping**: path template compilation and a registry resolving request
//!   paths to the resource they address, with remote-sync bookkeeping
//! - **Discovery**: heuristics proposing Resource/Action declarations from a
//!   host framework's route table
//!
//! ## Quick Start
//!
//! ```rust
//! use endpoint_authz::discovery::{discover, register_all, DiscoveryConfig, HttpMethod, RouteSpec};
//! use endpoint_authz::ResourceActionRegistry;
//!
//! let routes = vec![
//!     RouteSpec::new("/accounts", [HttpMethod::Get]),
//!     RouteSpec::new("/accounts/:id", [HttpMethod::Get, HttpMethod::Delete]),
//! ];
//!
//! let mut registry = ResourceActionRegistry::new();
//! register_all(&discover(&routes, &DiscoveryConfig::default()), &mut registry);
//!
//! let found = registry.get_resource_by_path("/accounts/42").unwrap();
//! assert_eq!(found.resource_name, "accounts");
//! assert_eq!(found.context["id"], "42");
//! ```
//!
//! ## Architecture
//!
//! This facade crate re-exports the following modules:
//!
//! - [`mapping`] - templates, declarations and the registry (from `core-mapping`)
//! - [`discovery`] - route-table discovery (from `core-discovery`)

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Mapping module.
///
/// Re-exports `core_mapping` for path templates and the resource registry.
pub mod mapping {
    pub use core_mapping::*;
}

/// Discovery module.
///
/// Re-exports `core_discovery` for route-table introspection.
pub mod discovery {
    pub use core_discovery::*;
}

// Convenience re-exports at root level
pub use core_mapping::{
    ActionDefinition, ResourceActionRegistry, ResourceDefinition, ResourceReference,
};
