//! Fuzz target for constraint spec parsing and field checks.
//!
//! Arbitrary specs and values must produce a result, never a panic.

#![no_main]

use arbitrary::Arbitrary;
use fieldcheck_validation::walker::check_field;
use fieldcheck_validation::*;
use libfuzzer_sys::fuzz_target;

/// Value shapes a field can carry.
#[derive(Debug, Arbitrary)]
enum FuzzValue {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl From<FuzzValue> for FieldValue {
    fn from(value: FuzzValue) -> Self {
        match value {
            FuzzValue::Text(s) => FieldValue::String(s),
            FuzzValue::Int(n) => FieldValue::Int(n),
            FuzzValue::Float(x) => FieldValue::Float(x),
            FuzzValue::Bool(b) => FieldValue::Bool(b),
            FuzzValue::Null => FieldValue::Null,
        }
    }
}

#[derive(Debug, Arbitrary)]
struct FuzzField {
    name: String,
    spec: String,
    value: FuzzValue,
}

fuzz_target!(|input: FuzzField| {
    let registry = RuleRegistry::global();

    if let Ok(invocations) = parse_spec(&input.name, &input.spec, &registry) {
        // Every parsed invocation renders back to a token the parser accepts.
        let rendered: Vec<String> = invocations.iter().map(ToString::to_string).collect();
        let reparsed = parse_spec(&input.name, &rendered.join(","), &registry);
        assert!(reparsed.is_ok(), "rendered spec did not reparse: {:?}", rendered);
    }

    let field = FieldDescriptor::new(input.name, input.value, input.spec);
    match check_field(&field, &registry) {
        Ok(()) | Err(Error::Invalid(_)) | Err(Error::Config(_)) => {}
        Err(other) => panic!("unexpected error kind: {other:?}"),
    }
});
