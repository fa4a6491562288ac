//! Rule-list validation example.
//!
//! Run with: `cargo run --example rules`

use std::collections::HashMap;

use fieldmask::{validate_field, FormValidator, ValidationContext};

fn main() {
    println!("=== Field Validation Rules ===\n");

    let ctx = ValidationContext::new();

    // Example 1: one value, one rule list
    let cases = [
        ("111.444.777-35", "required cpf"),
        ("111.444.777-36", "required cpf"),
        ("11.222.333/0001-81", "required cpfcnpj"),
        ("4532 0151 1283 0366", "required creditcard visa"),
        ("6363 6800 0000 0001", "required creditcard"),
        ("user@example.com", "required email"),
        ("not-an-email", "email"),
        ("", "email"),
        ("", "required email"),
        ("Abc123!", "password strong"),
        ("abc123", "password strong"),
        ("31/12/2020 ~ 01/01/2020", "daterange"),
        ("-23.550520, -46.633308", "coordinate"),
        ("23:59", "shorttime"),
    ];

    for (value, rules) in cases {
        let outcome = validate_field(value, rules, &ctx);
        print!("  {:<26} {:<28} ", format!("{:?}", value), rules);
        match &outcome.failed_rule {
            None => print!("ok"),
            Some(rule) => print!("failed at '{}'", rule),
        }
        for (name, value) in &outcome.annotations {
            print!("  [{}={}]", name, value);
        }
        println!();
    }
    println!();

    // Example 2: a whole form, stopping at the first invalid field
    println!("Registration form:");
    let form = FormValidator::new()
        .field("name", "required minlen 3")
        .field("birth", "required date before today age 18")
        .field("password", "required password strong")
        .field("confirm", "required eq password")
        .on_invalid("confirm", |name, outcome| {
            println!(
                "  callback: {} failed '{}'",
                name,
                outcome.failed_rule.as_deref().unwrap_or("?")
            );
        });

    let mut values: HashMap<String, String> = [
        ("name", "Maria"),
        ("birth", "15/06/1990"),
        ("password", "Abc123!xyz"),
        ("confirm", "Abc123!xy"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    let outcome = form.validate(&values, &ctx);
    println!(
        "  valid: {}, first invalid field: {}",
        outcome.valid,
        outcome.invalid_field.as_deref().unwrap_or("-")
    );

    values.insert("confirm".to_string(), "Abc123!xyz".to_string());
    let outcome = form.validate(&values, &ctx);
    println!("  after fixing confirm: valid = {}", outcome.valid);
    println!();

    // Example 3: misconfigured rules fail closed
    println!("Misconfigured rules:");
    for rules in ["after", "minlen x", "creditcard:acme"] {
        let outcome = validate_field("whatever", rules, &ctx);
        println!(
            "  {:<18} valid = {}, failed at '{}'",
            rules,
            outcome.valid,
            outcome.failed_rule.as_deref().unwrap_or("-")
        );
    }
}
