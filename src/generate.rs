//! Test-data generation: card numbers, CPFs and CNPJs with valid check
//! digits.
//!
//! Deterministic generators are always available; the random ones need the
//! `generate` feature (which enables `rand`).
//!
//! # Example
//!
//! ```
//! use fieldmask::document::{is_valid_cnpj, is_valid_cpf, DocumentKind};
//! use fieldmask::generate::{generate_card_deterministic, generate_document_deterministic};
//! use fieldmask::{luhn_checksum, CardBrand};
//!
//! let card = generate_card_deterministic(CardBrand::Elo);
//! assert!(card.starts_with("636368"));
//! assert!(luhn_checksum(&card));
//!
//! assert!(is_valid_cpf(&generate_document_deterministic(DocumentKind::Cpf)));
//! assert!(is_valid_cnpj(&generate_document_deterministic(DocumentKind::Cnpj)));
//! ```
//!
//! # Note
//!
//! Generated numbers are mathematically valid but belong to nobody. Use
//! them for tests only.

use crate::card::CardBrand;
#[cfg(feature = "generate")]
use crate::digits::all_same;
use crate::digits::digit_values;
use crate::document::{complete_check_digits, DocumentKind};
use crate::luhn;

#[cfg(feature = "generate")]
use rand::Rng;

/// Issuer prefix used when generating numbers of a brand.
///
/// Laser, Carte Blanche and BankCard Global share their prefixes with
/// brands listed earlier in the detection table, so their numbers detect
/// as Maestro, Diners Club and Discover respectively.
pub const fn prefix_for_brand(brand: CardBrand) -> &'static str {
    match brand {
        CardBrand::Visa => "4",
        CardBrand::Mastercard => "51",
        CardBrand::Amex => "34",
        CardBrand::Diners => "36",
        CardBrand::Discover => "6011",
        CardBrand::Elo => "636368",
        CardBrand::Hipercard => "606282",
        CardBrand::Aura => "5078",
        CardBrand::Jcb => "3528",
        CardBrand::Maestro => "5018",
        CardBrand::Laser => "6706",
        CardBrand::Blanche => "389",
        CardBrand::Switch => "6333",
        CardBrand::Korean => "94",
        CardBrand::Union => "62",
        CardBrand::Solo => "6334",
        CardBrand::Insta => "637",
        CardBrand::BcGlobal => "6541",
        CardBrand::RuPay => "81",
    }
}

/// Number length used when generating numbers of a brand.
pub const fn default_length(brand: CardBrand) -> usize {
    match brand {
        CardBrand::Amex => 15,
        CardBrand::Diners | CardBrand::Blanche => 14,
        CardBrand::Aura => 19,
        _ => 16,
    }
}

fn to_string(digits: &[u8]) -> String {
    digits.iter().map(|&d| char::from(b'0' + d)).collect()
}

/// Prefix digits, at most `length - 1` of them.
fn prefix_digits(prefix: &str, length: usize) -> Vec<u8> {
    let mut digits = digit_values(prefix);
    digits.truncate(length.saturating_sub(1));
    digits
}

/// Generates a Luhn-valid number deterministically (no randomness).
///
/// # Example
///
/// ```
/// use fieldmask::generate::generate_card_deterministic;
/// use fieldmask::CardBrand;
///
/// let card = generate_card_deterministic(CardBrand::Visa);
/// assert_eq!(card.len(), 16);
/// assert_eq!(card, generate_card_deterministic(CardBrand::Visa));
/// ```
pub fn generate_card_deterministic(brand: CardBrand) -> String {
    generate_card_deterministic_with_prefix(prefix_for_brand(brand), default_length(brand))
}

/// Generates a Luhn-valid number from a prefix, filling the middle with
/// zeros.
///
/// A prefix as long as the number is cut to leave room for the check
/// digit. A zero `length` yields an empty string.
pub fn generate_card_deterministic_with_prefix(prefix: &str, length: usize) -> String {
    if length == 0 {
        return String::new();
    }
    let mut digits = prefix_digits(prefix, length);
    digits.resize(length - 1, 0);
    digits.push(luhn::generate_check_digit(&digits));
    to_string(&digits)
}

/// Generates a random Luhn-valid number for the brand.
///
/// Requires the `generate` feature.
#[cfg(feature = "generate")]
pub fn generate_card(brand: CardBrand) -> String {
    generate_card_with_rng(
        prefix_for_brand(brand),
        default_length(brand),
        &mut rand::thread_rng(),
    )
}

/// Generates a Luhn-valid number using a provided RNG.
///
/// Useful for reproducible generation with seeded RNGs.
#[cfg(feature = "generate")]
pub fn generate_card_with_rng<R: Rng>(prefix: &str, length: usize, rng: &mut R) -> String {
    if length == 0 {
        return String::new();
    }
    let mut digits = prefix_digits(prefix, length);
    while digits.len() < length - 1 {
        digits.push(rng.gen_range(0..10));
    }
    digits.push(luhn::generate_check_digit(&digits));
    to_string(&digits)
}

/// Generates several random numbers for the brand.
///
/// Requires the `generate` feature.
#[cfg(feature = "generate")]
pub fn generate_cards(brand: CardBrand, count: usize) -> Vec<String> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|_| generate_card_with_rng(prefix_for_brand(brand), default_length(brand), &mut rng))
        .collect()
}

const fn base_len(kind: DocumentKind) -> usize {
    kind.digit_count() - 2
}

/// Completes a document from its base digits (9 for CPF, 12 for CNPJ).
///
/// Missing base digits are zero-filled; extra ones are dropped.
///
/// # Example
///
/// ```
/// use fieldmask::document::DocumentKind;
/// use fieldmask::generate::document_from_base;
///
/// assert_eq!(document_from_base(DocumentKind::Cpf, "111444777"), "11144477735");
/// assert_eq!(document_from_base(DocumentKind::Cnpj, "11.222.333/0001"), "11222333000181");
/// ```
pub fn document_from_base(kind: DocumentKind, base: &str) -> String {
    let mut digits = digit_values(base);
    digits.resize(base_len(kind), 0);
    to_string(&complete_check_digits(kind, &digits))
}

/// A fixed, valid document of the given kind.
pub fn generate_document_deterministic(kind: DocumentKind) -> String {
    match kind {
        DocumentKind::Cpf => document_from_base(kind, "111444777"),
        DocumentKind::Cnpj => document_from_base(kind, "112223330001"),
    }
}

/// Generates a random valid document.
///
/// Requires the `generate` feature.
#[cfg(feature = "generate")]
pub fn generate_document(kind: DocumentKind) -> String {
    generate_document_with_rng(kind, &mut rand::thread_rng())
}

/// Generates a random valid document using a provided RNG.
///
/// Repeated-digit placeholders are never produced.
#[cfg(feature = "generate")]
pub fn generate_document_with_rng<R: Rng>(kind: DocumentKind, rng: &mut R) -> String {
    loop {
        let base: Vec<u8> = (0..base_len(kind)).map(|_| rng.gen_range(0..10)).collect();
        let digits = complete_check_digits(kind, &base);
        if !all_same(&digits) {
            return to_string(&digits);
        }
    }
}

/// Card generator builder.
#[derive(Debug, Clone)]
pub struct CardGenerator {
    prefix: String,
    length: usize,
}

impl CardGenerator {
    /// Generator for the given brand.
    pub fn new(brand: CardBrand) -> Self {
        Self {
            prefix: prefix_for_brand(brand).to_string(),
            length: default_length(brand),
        }
    }

    /// Generator for a custom prefix, 16 digits long.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            length: 16,
        }
    }

    /// Sets the number length.
    pub fn length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }

    /// Generates a number deterministically.
    pub fn generate_deterministic(&self) -> String {
        generate_card_deterministic_with_prefix(&self.prefix, self.length)
    }

    /// Generates a random number.
    #[cfg(feature = "generate")]
    pub fn generate(&self) -> String {
        generate_card_with_rng(&self.prefix, self.length, &mut rand::thread_rng())
    }

    /// Generates several random numbers.
    #[cfg(feature = "generate")]
    pub fn generate_many(&self, count: usize) -> Vec<String> {
        let mut rng = rand::thread_rng();
        (0..count)
            .map(|_| generate_card_with_rng(&self.prefix, self.length, &mut rng))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::detect_brand;
    use crate::document::{is_valid_cnpj, is_valid_cpf};
    use crate::luhn_checksum;

    const SHADOWED: [CardBrand; 3] = [CardBrand::Laser, CardBrand::Blanche, CardBrand::BcGlobal];

    #[test]
    fn test_deterministic_cards_for_all_brands() {
        for brand in CardBrand::ALL {
            let card = generate_card_deterministic(brand);
            assert!(card.starts_with(prefix_for_brand(brand)), "{:?}", brand);
            assert_eq!(card.len(), default_length(brand), "{:?}", brand);
            assert!(luhn_checksum(&card), "{:?}: {}", brand, card);
            if !SHADOWED.contains(&brand) {
                assert_eq!(detect_brand(&card), Some(brand), "{}", card);
            }
        }
    }

    #[test]
    fn test_shadowed_brands_detect_as_earlier_entries() {
        assert_eq!(
            detect_brand(&generate_card_deterministic(CardBrand::Laser)),
            Some(CardBrand::Maestro)
        );
        assert_eq!(
            detect_brand(&generate_card_deterministic(CardBrand::Blanche)),
            Some(CardBrand::Diners)
        );
        assert_eq!(
            detect_brand(&generate_card_deterministic(CardBrand::BcGlobal)),
            Some(CardBrand::Discover)
        );
    }

    #[test]
    fn test_deterministic_is_reproducible() {
        assert_eq!(
            generate_card_deterministic(CardBrand::Visa),
            generate_card_deterministic(CardBrand::Visa)
        );
    }

    #[test]
    fn test_long_prefix_is_cut() {
        let card = generate_card_deterministic_with_prefix("4111111111111111", 16);
        assert_eq!(card.len(), 16);
        assert!(card.starts_with("411111111111111"));
        assert!(luhn_checksum(&card));
        assert_eq!(generate_card_deterministic_with_prefix("4", 0), "");
    }

    #[test]
    fn test_card_generator_builder() {
        let card = CardGenerator::new(CardBrand::Visa).length(19).generate_deterministic();
        assert_eq!(card.len(), 19);
        assert_eq!(detect_brand(&card), Some(CardBrand::Visa));

        let card = CardGenerator::with_prefix("123456").generate_deterministic();
        assert!(card.starts_with("123456"));
        assert!(luhn_checksum(&card));
    }

    #[test]
    fn test_documents() {
        assert_eq!(generate_document_deterministic(DocumentKind::Cpf), "11144477735");
        assert_eq!(generate_document_deterministic(DocumentKind::Cnpj), "11222333000181");
        assert!(is_valid_cpf(&document_from_base(DocumentKind::Cpf, "529982247")));
        assert_eq!(document_from_base(DocumentKind::Cpf, "1").len(), 11);
    }

    #[cfg(feature = "generate")]
    #[test]
    fn test_random_generation() {
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let cpf = generate_document_with_rng(DocumentKind::Cpf, &mut rng);
            assert!(is_valid_cpf(&cpf));
            assert!(!all_same(&digit_values(&cpf)));
            assert!(is_valid_cnpj(&generate_document_with_rng(DocumentKind::Cnpj, &mut rng)));
            let card = generate_card_with_rng("4", 16, &mut rng);
            assert!(luhn_checksum(&card));
        }
        assert_eq!(generate_cards(CardBrand::Amex, 3).len(), 3);
        assert_eq!(CardGenerator::new(CardBrand::Elo).generate_many(2).len(), 2);
    }
}
