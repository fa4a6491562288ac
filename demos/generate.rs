//! Test data generation example.
//!
//! Run with: `cargo run --example generate --features generate`
//!
//! WARNING: Generated values are for testing purposes only!

use fieldmask::document::DocumentKind;
use fieldmask::generate::{
    generate_card, generate_card_deterministic, generate_document, CardGenerator,
};
use fieldmask::{apply_mask, luhn_checksum, validate_field, CardBrand, EditIntent, FormatId, ValidationContext};

fn main() {
    println!("=== Test Data Generation ===\n");
    println!("WARNING: For testing purposes only!\n");

    let ctx = ValidationContext::new();

    // Example 1: random card per brand
    println!("Random cards:");
    for brand in [
        CardBrand::Visa,
        CardBrand::Mastercard,
        CardBrand::Amex,
        CardBrand::Elo,
        CardBrand::Hipercard,
        CardBrand::Aura,
    ] {
        let card = generate_card(brand);
        let rules = format!("required creditcard {}", brand.name());
        println!(
            "  {:<12} {:<20} luhn: {:<5} rules: {}",
            brand.display_name(),
            card,
            luhn_checksum(&card),
            validate_field(&card, &rules, &ctx).valid
        );
    }
    println!();

    // Example 2: reproducible values for fixtures
    println!("Deterministic cards:");
    for brand in [CardBrand::Visa, CardBrand::Diners, CardBrand::Jcb] {
        println!("  {:<12} {}", brand.display_name(), generate_card_deterministic(brand));
    }
    println!();

    // Example 3: a custom prefix and length
    println!("Custom prefix (BIN 411111, 19 digits):");
    for card in CardGenerator::with_prefix("411111").length(19).generate_many(3) {
        println!("  {}", card);
    }
    println!();

    // Example 4: documents, masked
    println!("Documents:");
    for _ in 0..3 {
        let cpf = generate_document(DocumentKind::Cpf);
        let cnpj = generate_document(DocumentKind::Cnpj);
        println!(
            "  CPF {}   CNPJ {}",
            apply_mask(FormatId::Cpf, &cpf, EditIntent::Insert).value,
            apply_mask(FormatId::Cnpj, &cnpj, EditIntent::Insert).value
        );
    }
}
