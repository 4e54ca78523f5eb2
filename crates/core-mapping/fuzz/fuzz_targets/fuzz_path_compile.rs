//! Fuzz target for CompiledPattern::compile
//!
//! Compilation must never panic, and a compiled pattern must answer matches
//! and captures for arbitrary paths without panicking.

#![no_main]

use core_mapping::CompiledPattern;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    if let Ok(pattern) = CompiledPattern::compile(data) {
        let _ = pattern.is_match("");
        let _ = pattern.is_match("/");
        let _ = pattern.captures("/a/b/c");

        // Captured context never has more entries than declared parameters
        if let Some(ctx) = pattern.captures(data) {
            assert!(ctx.len() <= pattern.param_names().len());
        }

        // Recompiling yields the same matcher
        let again = CompiledPattern::compile(data).unwrap();
        assert_eq!(pattern, again);
    }
});
