// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 P47H Team <https://p47h.com>

//! # core-mapping
//!
//! Endpoint-to-resource mapping core with no I/O and no policy evaluation.
//!
//! This crate provides:
//! - Path template compilation (`/accounts/:id` → anchored matcher + parameter names)
//! - Resource/Action declarations and their sync records
//! - A registry resolving request paths to resources, first match wins
//! - Remote-sync bookkeeping (`is_synced` / `mark_as_synced`)
//!
//! ## Limits
//!
//! - MAX_PATH_TEMPLATE_LENGTH = 256
//! - MAX_RESOURCE_NAME_LENGTH = 128

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod builder;
pub mod definition;
pub mod error;
pub mod path;
pub mod reference;
pub mod registry;

pub use builder::{ActionBuilder, ResourceBuilder};
pub use definition::{
    title_case, ActionDefinition, ActionRecord, ResourceDefinition, ResourceRecord,
    DEFAULT_RESOURCE_TYPE,
};
/// Re-export commonly used types
pub use error::{MappingError, Result};
pub use path::CompiledPattern;
pub use reference::{ResolvedResource, ResourceReference};
pub use registry::{PathBinding, ResourceActionRegistry, ResourceMatch, SyncTarget};

/// Maximum length for path templates (DoS mitigation)
pub const MAX_PATH_TEMPLATE_LENGTH: usize = 256;

/// Maximum length for resource and action names
pub const MAX_RESOURCE_NAME_LENGTH: usize = 128;
