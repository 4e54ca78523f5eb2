//! Builder pattern for ergonomic resource declaration

use crate::definition::{ActionDefinition, ResourceDefinition, DEFAULT_RESOURCE_TYPE};
use crate::error::{MappingError, Result};
use std::collections::BTreeMap;

/// Builder for creating `ActionDefinition` instances with a fluent API
///
/// # Examples
///
/// ```
/// use core_mapping::builder::ActionBuilder;
///
/// let action = ActionBuilder::new("suspend")
///     .title("Suspend")
///     .on_path("/accounts/:id/suspend")
///     .with_attribute("audit", "true")
///     .build()
///     .unwrap();
///
/// assert_eq!(action.path.as_deref(), Some("/accounts/:id/suspend"));
/// ```
#[derive(Debug, Default)]
pub struct ActionBuilder {
    name: String,
    title: Option<String>,
    description: Option<String>,
    path: Option<String>,
    attributes: BTreeMap<String, String>,
}

impl ActionBuilder {
    /// Create a new builder for an action name
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the display title
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the description
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Expose the action on its own path instead of the resource path
    #[must_use]
    pub fn on_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add an attribute
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Build the `ActionDefinition`
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails (see `ActionDefinition::validate()`)
    pub fn build(self) -> Result<ActionDefinition> {
        let action = ActionDefinition {
            name: self.name,
            title: self.title,
            description: self.description,
            path: self.path,
            attributes: self.attributes,
            resource_id: None,
            resource_name: None,
        };
        action.validate()?;
        Ok(action)
    }
}

/// Builder for creating `ResourceDefinition` instances with a fluent API
///
/// # Examples
///
/// ```
/// use core_mapping::builder::ResourceBuilder;
///
/// let resource = ResourceBuilder::new("accounts")
///     .path("/accounts/:id")
///     .description("Customer accounts")
///     .action("view")
///     .action("update")
///     .add_action_with("suspend", |a| a.on_path("/accounts/:id/suspend"))
///     .build()
///     .unwrap();
///
/// assert_eq!(resource.actions.len(), 3);
/// ```
#[derive(Debug)]
pub struct ResourceBuilder {
    name: String,
    resource_type: String,
    path: Option<String>,
    description: Option<String>,
    actions: Vec<ActionDefinition>,
    attributes: BTreeMap<String, String>,
    invalid: Option<MappingError>,
}

impl ResourceBuilder {
    /// Create a new resource builder of the default type
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            resource_type: DEFAULT_RESOURCE_TYPE.to_string(),
            path: None,
            description: None,
            actions: Vec::new(),
            attributes: BTreeMap::new(),
            invalid: None,
        }
    }

    /// Set the resource type
    #[must_use]
    pub fn resource_type(mut self, resource_type: impl Into<String>) -> Self {
        self.resource_type = resource_type.into();
        self
    }

    /// Set the path template
    #[must_use]
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the description
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add an action that rides on the resource path
    #[must_use]
    pub fn action(mut self, name: impl Into<String>) -> Self {
        self.actions.push(ActionDefinition::new(name));
        self
    }

    /// Add an action configured through an `ActionBuilder`
    ///
    /// An invalid action is reported by `build()`.
    #[must_use]
    pub fn add_action_with<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: FnOnce(ActionBuilder) -> ActionBuilder,
    {
        match f(ActionBuilder::new(name)).build() {
            Ok(action) => self.actions.push(action),
            Err(e) => {
                self.invalid.get_or_insert(e);
            }
        }
        self
    }

    /// Add a pre-constructed action
    #[must_use]
    pub fn add_action(mut self, action: ActionDefinition) -> Self {
        self.actions.push(action);
        self
    }

    /// Add an attribute
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Build the `ResourceDefinition`
    ///
    /// # Errors
    ///
    /// Returns `MappingError::InvalidDefinition` if the path is missing, the
    /// first error from `add_action_with`, or any error from
    /// `ResourceDefinition::validate()`.
    pub fn build(self) -> Result<ResourceDefinition> {
        if let Some(err) = self.invalid {
            return Err(err);
        }

        let path = self.path.ok_or_else(|| {
            MappingError::InvalidDefinition(format!("Resource '{}' requires a path", self.name))
        })?;

        let resource = ResourceDefinition {
            name: self.name,
            resource_type: self.resource_type,
            path,
            description: self.description,
            actions: self.actions,
            attributes: self.attributes,
            remote_id: None,
        };
        resource.validate()?;
        Ok(resource)
    }
}
