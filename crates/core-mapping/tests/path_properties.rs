//! Property-based tests for template compilation and path resolution

use core_mapping::{CompiledPattern, ResourceActionRegistry, ResourceDefinition};
use proptest::prelude::*;

fn arb_literal() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-z0-9_]{0,11}").unwrap()
}

fn arb_param_name() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-zA-Z][a-zA-Z0-9_]{0,7}").unwrap()
}

fn arb_value() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-zA-Z0-9_]{1,12}").unwrap()
}

proptest! {
    /// Property: compiling the same template twice yields the same matcher
    #[test]
    fn prop_compile_idempotent(
        literals in proptest::collection::vec(arb_literal(), 1..6),
        params in proptest::collection::vec(arb_param_name(), 0..6),
    ) {
        let mut template = String::new();
        for (i, lit) in literals.iter().enumerate() {
            template.push('/');
            template.push_str(lit);
            if let Some(p) = params.get(i) {
                template.push_str("/:");
                template.push_str(p);
            }
        }

        let a = CompiledPattern::compile(template.clone()).unwrap();
        let b = CompiledPattern::compile(template).unwrap();
        prop_assert_eq!(a.as_str(), b.as_str());
        prop_assert_eq!(a.param_names(), b.param_names());
    }

    /// Property: every declared parameter is captured from a concrete path
    #[test]
    fn prop_parameters_round_trip(
        pairs in proptest::collection::vec((arb_literal(), arb_value()), 1..6),
    ) {
        let mut template = String::new();
        let mut path = String::new();
        for (i, (lit, value)) in pairs.iter().enumerate() {
            template.push_str(&format!("/{lit}/:p{i}"));
            path.push_str(&format!("/{lit}/{value}"));
        }

        let mut registry = ResourceActionRegistry::new();
        registry.add_resource(ResourceDefinition::new("r", template));

        let found = registry.get_resource_by_path(&path);
        prop_assert!(found.is_some());
        let found = found.unwrap();
        prop_assert_eq!(found.context.len(), pairs.len());
        for (i, (_, value)) in pairs.iter().enumerate() {
            prop_assert_eq!(&found.context[&format!("p{i}")], value);
        }
    }

    /// Property: a literal template only matches itself (modulo one trailing slash)
    #[test]
    fn prop_literal_matches_only_itself(
        a in proptest::collection::vec(arb_literal(), 1..5),
        b in proptest::collection::vec(arb_literal(), 1..5),
    ) {
        let ta = format!("/{}", a.join("/"));
        let tb = format!("/{}", b.join("/"));
        let p = CompiledPattern::compile(ta.clone()).unwrap();

        prop_assert!(p.is_match(&ta));
        let ta_slash = format!("{}/", ta);
        prop_assert!(p.is_match(&ta_slash));
        prop_assert_eq!(p.is_match(&tb), ta == tb);
    }
}
