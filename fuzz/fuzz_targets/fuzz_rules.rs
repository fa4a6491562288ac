//! Fuzz target for rule parsing and field validation.
//!
//! Tests that no rule list, however malformed, panics.

#![no_main]

use std::collections::HashMap;

use arbitrary::Arbitrary;
use fieldmask::{parse_rules, validate_field, FormValidator, ValidationContext};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    value: String,
    rules: String,
    other: String,
}

fuzz_target!(|input: Input| {
    for parsed in parse_rules(&input.rules) {
        match parsed {
            Ok(rule) => assert!(!rule.name().is_empty()),
            Err(err) => assert!(!err.rule().is_empty()),
        }
    }

    let fields: HashMap<String, String> = [("other".to_string(), input.other.clone())].into();
    let ctx = ValidationContext::new().with_fields(&fields);
    let outcome = validate_field(&input.value, &input.rules, &ctx);
    assert_eq!(outcome.valid, outcome.failed_rule.is_none());

    let form = FormValidator::new()
        .field("value", &input.rules)
        .field("other", "required");
    let values: HashMap<String, String> = [
        ("value".to_string(), input.value),
        ("other".to_string(), input.other),
    ]
    .into();
    let result = form.validate(&values, &ValidationContext::new());
    assert_eq!(result.valid, result.invalid_field.is_none());
});
