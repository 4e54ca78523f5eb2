//! End-to-end discovery: routes → resources → registry

use core_discovery::{
    discover, register_all, DiscoveryConfig, EndpointTreeBuilder, HttpMethod, MappedEndpoint,
    ResourceSynthesizer, RouteSpec,
};
use core_mapping::ResourceActionRegistry;

fn account_routes() -> Vec<RouteSpec> {
    vec![
        RouteSpec::new("/accounts", [HttpMethod::Get, HttpMethod::Post]),
        RouteSpec::new(
            "/accounts/:id",
            [HttpMethod::Get, HttpMethod::Put, HttpMethod::Delete],
        ),
        RouteSpec::new("/accounts/:id/suspend", [HttpMethod::Post]),
        RouteSpec::new("/accounts/:id/reactivate", [HttpMethod::Post]),
    ]
}

#[test]
fn test_accounts_become_one_resource() {
    let resources = discover(&account_routes(), &DiscoveryConfig::default());

    assert_eq!(resources.len(), 1);
    let accounts = &resources[0];
    assert_eq!(accounts.name(), "accounts");
    assert_eq!(accounts.path(), "/accounts");
    assert_eq!(
        accounts.action_names(),
        ["view", "create", "update", "remove", "reactivate", "suspend"]
    );

    let suspend = accounts.actions.iter().find(|a| a.name == "suspend").unwrap();
    assert_eq!(suspend.path.as_deref(), Some("/accounts/:id/suspend"));
    assert_eq!(suspend.title.as_deref(), Some("Suspend"));
}

#[test]
fn test_registered_discovery_resolves_every_endpoint() {
    let resources = discover(&account_routes(), &DiscoveryConfig::default());
    let mut registry = ResourceActionRegistry::new();
    assert_eq!(register_all(&resources, &mut registry), 1);

    for path in ["/accounts", "/accounts/7", "/accounts/7/suspend", "/accounts/7/reactivate"] {
        let found = registry.get_resource_by_path(path).unwrap();
        assert_eq!(found.resource_name, "accounts", "{path}");
    }

    let found = registry.get_resource_by_path("/accounts/7/suspend").unwrap();
    assert_eq!(found.context["id"], "7");

    // Registering again binds nothing new
    let bindings = registry.bindings().len();
    assert_eq!(register_all(&resources, &mut registry), 0);
    assert_eq!(registry.bindings().len(), bindings);
}

#[test]
fn test_routes_sharing_a_path_are_merged() {
    let routes = vec![
        RouteSpec::new("/items", [HttpMethod::Get]),
        RouteSpec::new("/items", [HttpMethod::Post]),
    ];
    let resources = discover(&routes, &DiscoveryConfig::default());

    assert_eq!(resources.len(), 1);
    assert_eq!(resources[0].action_names(), ["view", "create"]);
}

#[test]
fn test_config_filters_routes() {
    let routes = vec![
        RouteSpec::new("/accounts", [HttpMethod::Get]).with_middleware("authz"),
        RouteSpec::new("/health", [HttpMethod::Get]).with_middleware("authz"),
        RouteSpec::new("/public", [HttpMethod::Get]),
    ];
    let config = DiscoveryConfig {
        required_middleware: Some("authz".into()),
        exclude_prefixes: vec!["/health".into()],
        ..DiscoveryConfig::default()
    };

    let resources = discover(&routes, &config);
    let names: Vec<&str> = resources.iter().map(|r| r.name()).collect();
    assert_eq!(names, ["accounts"]);
}

#[test]
fn test_configured_verb_actions_apply_before_convention() {
    let mut config = DiscoveryConfig::default();
    config.verb_actions.insert("GET".into(), "read".into());

    let resources = discover(&account_routes(), &config);
    let names = resources[0].action_names();
    assert!(names.contains(&"read"));
    assert!(!names.contains(&"view"));
    assert!(names.contains(&"suspend"));
}

#[test]
fn test_oversized_route_is_skipped() {
    let long = format!("/{}", "a".repeat(300));
    let routes = vec![
        RouteSpec::new(long, [HttpMethod::Get]),
        RouteSpec::new("/ok", [HttpMethod::Get]),
    ];

    let resources = discover(&routes, &DiscoveryConfig::default());
    assert_eq!(resources.len(), 1);
    assert_eq!(resources[0].name(), "ok");
}

#[test]
fn test_nested_junction_synthesizes_own_resource() {
    let endpoints = [
        "/accounts",
        "/accounts/:id",
        "/accounts/:id/documents",
        "/accounts/:id/documents/:docId",
        "/accounts/:id/documents/:docId/archive",
    ]
    .into_iter()
    .map(|p| MappedEndpoint::new(p, [HttpMethod::Get]).unwrap())
    .collect();

    let config = DiscoveryConfig {
        flat: false,
        ..DiscoveryConfig::default()
    };
    let tree = EndpointTreeBuilder::new().flat(false).build(endpoints);
    let resources = ResourceSynthesizer::new(&config).synthesize(&tree);

    let names: Vec<&str> = resources.iter().map(|r| r.name()).collect();
    assert_eq!(names, ["accounts", "accounts documents archive"]);
    assert_eq!(resources[0].actions.len(), 4);
    assert_eq!(resources[1].actions.len(), 1);
}

#[test]
fn test_sync_records_use_display_names() {
    let resources = discover(&account_routes(), &DiscoveryConfig::default());
    let record = resources[0].to_record();

    assert_eq!(record.key, "accounts");
    assert_eq!(record.name, "Accounts");
    assert_eq!(record.actions["reactivate"].name, "Reactivate");
    assert_eq!(record.actions.len(), 6);

    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["type"], "rest");
}
