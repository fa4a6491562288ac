//! Keystroke-by-keystroke masking example.
//!
//! Run with: `cargo run --example typing`

use std::time::{Duration, Instant};

use fieldmask::debounce::Debouncer;
use fieldmask::{apply_mask, validate_field, EditIntent, FormatId, ValidationContext};

/// Feeds `keys` to the mask one at a time, as a text field would.
fn type_keys(format: FormatId, keys: &str) -> String {
    let mut field = String::new();
    for c in keys.chars() {
        field.push(c);
        let out = apply_mask(format, &field, EditIntent::Insert);
        println!(
            "  {:>2} -> {:<25}{}",
            c,
            out.value,
            if out.is_complete { "(complete)" } else { "" }
        );
        field = out.value;
    }
    field
}

fn main() {
    println!("=== Typing Into Masked Fields ===\n");

    let fields = [
        (FormatId::Date, "25122024"),
        (FormatId::DateRange, "3112202001012020"),
        (FormatId::Phone, "11987654321"),
        (FormatId::CpfCnpj, "11222333000181"),
        (FormatId::Time, "9305"),
        (FormatId::Latitude, "-23,550520"),
    ];

    for (format, keys) in fields {
        println!("{} ({}):", format, keys);
        type_keys(format, keys);
        println!();
    }

    // Backspace: the mask is told the edit was a deletion and does not put
    // the separator back
    println!("Backspacing a date:");
    let mut field = "25/12/".to_string();
    while !field.is_empty() {
        field.pop();
        field = apply_mask(FormatId::Date, &field, EditIntent::Delete).value;
        println!("  <- {:?}", field);
    }
    println!();

    // Two-digit years expand when the user moves on
    let out = apply_mask(FormatId::Date, "01/01/99 ", EditIntent::Insert);
    println!("Two-digit year: 01/01/99 -> {}", out.value);
    println!();

    // Validate once typing pauses
    println!("Validate on pause:");
    let mut debouncer = Debouncer::new();
    let start = Instant::now();
    let ctx = ValidationContext::new();
    let mut phone = String::new();
    for (i, c) in "11987654321".chars().enumerate() {
        phone.push(c);
        phone = apply_mask(FormatId::Phone, &phone, EditIntent::Insert).value;
        debouncer.touch("phone", start + Duration::from_millis(100 * i as u64));
    }
    let later = start + Duration::from_secs(3);
    for field in debouncer.drain_due(later) {
        let outcome = validate_field(&phone, "required minlen 14", &ctx);
        println!("  {} = {:?}: valid = {}", field, phone, outcome.valid);
    }
}
