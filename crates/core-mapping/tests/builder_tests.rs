use core_mapping::{ActionBuilder, MappingError, ResourceBuilder, ResourceDefinition};

#[test]
fn test_resource_builder_defaults() {
    let resource = ResourceBuilder::new("accounts")
        .path("/accounts")
        .action("view")
        .build()
        .unwrap();

    assert_eq!(resource.resource_type, "rest");
    assert_eq!(resource.actions[0].name, "view");
    assert!(resource.actions[0].path.is_none());
}

#[test]
fn test_resource_builder_requires_path() {
    let result = ResourceBuilder::new("accounts").action("view").build();
    assert!(matches!(result, Err(MappingError::InvalidDefinition(_))));
}

#[test]
fn test_invalid_nested_action_reported_at_build() {
    let result = ResourceBuilder::new("accounts")
        .path("/accounts")
        .add_action_with("suspend", |a| a.on_path("accounts/suspend"))
        .build();
    assert!(matches!(result, Err(MappingError::InvalidDefinition(_))));
}

#[test]
fn test_name_length_limit() {
    let long = "r".repeat(core_mapping::MAX_RESOURCE_NAME_LENGTH + 1);
    let result = ResourceBuilder::new(long).path("/r").build();
    assert!(matches!(result, Err(MappingError::NameTooLong { .. })));
}

#[test]
fn test_action_builder_fields() {
    let action = ActionBuilder::new("export")
        .title("Export CSV")
        .description("Download as CSV")
        .with_attribute("format", "csv")
        .build()
        .unwrap();

    assert_eq!(action.display_name(), "Export CSV");
    assert_eq!(action.attributes["format"], "csv");
    assert_eq!(action.to_record().description.as_deref(), Some("Download as CSV"));
}

#[test]
fn test_record_serializes_for_sync() {
    let resource: ResourceDefinition = ResourceBuilder::new("billing accounts")
        .path("/billing/accounts")
        .action("view")
        .build()
        .unwrap();

    let json = serde_json::to_value(resource.to_record()).unwrap();
    assert_eq!(json["key"], "billing accounts");
    assert_eq!(json["name"], "Billing Accounts");
    assert_eq!(json["type"], "rest");
    assert_eq!(json["actions"]["view"]["name"], "View");
}

#[test]
fn test_definition_deserializes_with_defaults() {
    let json = r#"{ "name": "users", "path": "/users/:id", "actions": [{ "name": "view" }] }"#;
    let resource: ResourceDefinition = serde_json::from_str(json).unwrap();
    assert_eq!(resource.resource_type, "rest");
    assert!(resource.remote_id.is_none());
    assert!(resource.validate().is_ok());
}
