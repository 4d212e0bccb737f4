//! Fuzz target for schema-driven JSON validation.
//!
//! Tests schema parsing and document validation with arbitrary input.

#![no_main]

use fieldcheck_validation::*;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    // Schema and document separated by a NUL byte
    let (schema, document) = text.split_once('\0').unwrap_or((text, "{}"));

    let Ok(schema) = Schema::from_json(schema) else {
        return;
    };
    let Ok(document) = serde_json::from_str::<serde_json::Value>(document) else {
        return;
    };

    let fail_fast = Validator::new();
    let collect_all =
        Validator::with_config(ValidatorConfig::new().with_mode(ValidationMode::CollectAll));

    let first = schema.validate_json(&document, &fail_fast);
    let all = schema.validate_json(&document, &collect_all);

    // Both modes agree on whether the document passes.
    assert_eq!(first.is_ok(), all.is_ok());
});
