//! Path template compilation tests
//!
//! Covers parameter extraction, literal escaping, trailing-slash handling and
//! the lenient treatment of malformed parameter tokens.

use core_mapping::path::{is_parameter, literal_name, parameter_count};
use core_mapping::{CompiledPattern, MappingError, MAX_PATH_TEMPLATE_LENGTH};

#[test]
fn test_exact_literal_match() {
    let p = CompiledPattern::compile("/accounts").unwrap();
    assert!(p.is_match("/accounts"));
    assert!(p.is_match("/accounts/"));
    assert!(!p.is_match("/accounts/1"));
    assert!(!p.is_match("/account"));
}

#[test]
fn test_compile_is_idempotent() {
    let a = CompiledPattern::compile("/accounts/:acctId/documents/:docId").unwrap();
    let b = CompiledPattern::compile("/accounts/:acctId/documents/:docId").unwrap();
    assert_eq!(a.as_str(), b.as_str());
    assert_eq!(a.param_names(), b.param_names());
    assert_eq!(a, b);
}

#[test]
fn test_captures_in_declaration_order() {
    let p = CompiledPattern::compile("/accounts/:acctId/documents/:docId").unwrap();
    let ctx = p.captures("/accounts/42/documents/99").unwrap();
    assert_eq!(ctx.len(), 2);
    assert_eq!(ctx["acctId"], "42");
    assert_eq!(ctx["docId"], "99");
}

#[test]
fn test_trailing_slash_in_template_and_path() {
    let p = CompiledPattern::compile("/accounts/:id/").unwrap();
    assert_eq!(p.template(), "/accounts/:id/");
    assert!(p.is_match("/accounts/5"));
    assert!(p.is_match("/accounts/5/"));
    assert!(!p.is_match("/accounts/5//"));
}

#[test]
fn test_root_template() {
    let p = CompiledPattern::compile("/").unwrap();
    assert!(p.is_match("/"));
    assert!(p.is_match(""));
    assert!(!p.is_match("/a"));
}

#[test]
fn test_parameter_does_not_cross_segments() {
    let p = CompiledPattern::compile("/files/:name").unwrap();
    assert!(p.is_match("/files/report"));
    assert!(!p.is_match("/files/a/b"));
    assert!(!p.is_match("/files/"));
}

#[test]
fn test_parameter_values_are_word_characters() {
    let p = CompiledPattern::compile("/users/:id").unwrap();
    assert!(p.is_match("/users/user_01"));
    assert!(!p.is_match("/users/550e8400-e29b"));
    assert!(!p.is_match("/users/a.b"));
}

#[test]
fn test_regex_metacharacters_are_literal() {
    let p = CompiledPattern::compile("/search+(all)/:q").unwrap();
    assert!(p.is_match("/search+(all)/term"));
    assert!(!p.is_match("/searchhh(all)/term"));
    assert!(!p.is_match("/search+all/term"));
}

#[test]
fn test_bare_delimiter_kept_literal() {
    let p = CompiledPattern::compile("/time/:/:zone").unwrap();
    assert_eq!(p.param_names(), ["zone"]);
    assert!(p.is_match("/time/:/utc"));
    assert!(!p.is_match("/time/x/utc"));
}

#[test]
fn test_delimiter_followed_by_punctuation_kept_literal() {
    let p = CompiledPattern::compile("/a/:-b").unwrap();
    assert!(p.param_names().is_empty());
    assert!(p.is_match("/a/:-b"));
}

#[test]
fn test_parameter_followed_by_literal_suffix() {
    let p = CompiledPattern::compile("/reports/:id.json").unwrap();
    assert_eq!(p.param_names(), ["id"]);
    let ctx = p.captures("/reports/2024.json").unwrap();
    assert_eq!(ctx["id"], "2024");
}

#[test]
fn test_no_match_returns_none() {
    let p = CompiledPattern::compile("/accounts/:id").unwrap();
    assert!(p.captures("/users/1").is_none());
}

#[test]
fn test_literal_template_match_has_empty_context() {
    let p = CompiledPattern::compile("/health").unwrap();
    assert_eq!(p.captures("/health"), Some(Default::default()));
}

#[test]
fn test_max_template_length_enforcement() {
    let long = "a".repeat(MAX_PATH_TEMPLATE_LENGTH + 1);
    match CompiledPattern::compile(long) {
        Err(MappingError::TemplateTooLong { max, length }) => {
            assert_eq!(max, MAX_PATH_TEMPLATE_LENGTH);
            assert_eq!(length, MAX_PATH_TEMPLATE_LENGTH + 1);
        }
        other => panic!("Expected TemplateTooLong error, got {:?}", other),
    }
}

#[test]
fn test_template_at_limit_compiles() {
    let exact = format!("/{}", "a".repeat(MAX_PATH_TEMPLATE_LENGTH - 1));
    assert!(CompiledPattern::compile(exact).is_ok());
}

#[test]
fn test_segment_helpers() {
    assert!(is_parameter(":docId"));
    assert!(!is_parameter("docs"));
    assert_eq!(parameter_count("/accounts/:a/documents/:b"), 2);
    assert_eq!(literal_name("/accounts/:a/documents/:b"), "accounts documents");
}
