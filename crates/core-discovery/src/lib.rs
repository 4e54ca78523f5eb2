// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 P47H Team <https://p47h.com>

//! # core-discovery
//!
//! Route-table introspection that proposes Resource/Action declarations for
//! an application which has not declared them by hand.
//!
//! This crate provides:
//! - `MappedEndpoint`: a host route with its compiled matcher
//! - `RestHoleGrouper`: names single-verb endpoints after their trailing segment
//! - `EndpointTreeBuilder`: groups endpoints into one branch per resource
//! - `ResourceSynthesizer`: turns branches into resources and actions
//! - `discover`: the whole pipeline behind one call
//!
//! ## Example
//!
//! ```rust
//! use core_discovery::{discover, DiscoveryConfig, HttpMethod, RouteSpec};
//!
//! let routes = vec![
//!     RouteSpec::new("/accounts", [HttpMethod::Get, HttpMethod::Post]),
//!     RouteSpec::new("/accounts/:id", [HttpMethod::Get, HttpMethod::Put]),
//!     RouteSpec::new("/accounts/:id/suspend", [HttpMethod::Post]),
//!     RouteSpec::new("/accounts/:id/reactivate", [HttpMethod::Post]),
//! ];
//!
//! let resources = discover(&routes, &DiscoveryConfig::default());
//! assert_eq!(resources.len(), 1);
//! assert_eq!(resources[0].name(), "accounts");
//! assert!(resources[0].action_names().contains(&"suspend"));
//! ```
//!
//! ## Limitations
//!
//! Discovery is a heuristic over path strings. It never fails, but what it
//! proposes should be reviewed before it is synced to a control plane.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod endpoint;
pub mod error;
pub mod pipeline;
pub mod prefix;
pub mod rest_hole;
pub mod synthesizer;
pub mod tree;

pub use config::DiscoveryConfig;
pub use endpoint::{HttpMethod, MappedEndpoint, RouteSpec};
pub use error::{DiscoveryError, Result};
pub use pipeline::{discover, register_all};
pub use rest_hole::{RestHoleGroup, RestHoleGrouper, RestHoleGrouping};
pub use synthesizer::{DiscoveredResource, ResourceSynthesizer, ROOT_RESOURCE_NAME};
pub use tree::{EndpointTree, EndpointTreeBuilder, TreeNode};
