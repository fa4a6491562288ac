//! Card brand detection using prefix/length patterns.
//!
//! The stripped digit string is tested against an ordered table of regular
//! expressions and the first matching entry wins. Several historical brands
//! overlap (Laser and Maestro, Carte Blanche and Diners Club); for those the
//! entry listed first takes the number.

use std::sync::LazyLock;

use regex::Regex;

use crate::card::CardBrand;
use crate::digits::extract_digits;

static BRAND_TABLE: LazyLock<Vec<(CardBrand, Regex)>> = LazyLock::new(|| {
    [
        (CardBrand::Visa, r"^4\d{12}(?:\d{3}|\d{6})?$"),
        (
            CardBrand::Mastercard,
            r"^(?:5[1-5]\d{2}|222[1-9]|22[3-9]\d|2[3-6]\d{2}|27[01]\d|2720)\d{12}$",
        ),
        (CardBrand::Amex, r"^3[47]\d{13}$"),
        (CardBrand::Diners, r"^3(?:0[0-5]|[68]\d)\d{11}$"),
        (CardBrand::Discover, r"^6(?:011|5\d{2})\d{12}$"),
        (
            CardBrand::Elo,
            r"^(?:(?:636368|438935|504175|451416|636297)\d{10}|(?:5067|4576|4011)\d{12})$",
        ),
        (CardBrand::Hipercard, r"^(?:606282\d{10}(?:\d{3})?|3841\d{15})$"),
        (CardBrand::Aura, r"^5078\d{15}$"),
        (CardBrand::Jcb, r"^(?:2131|1800|35\d{2})\d{12}$"),
        (
            CardBrand::Maestro,
            r"^(?:5[0678]\d{2}|6304|6390|67\d{2})\d{8,15}$",
        ),
        (CardBrand::Laser, r"^(?:6304|6706|6709|6771)\d{12,15}$"),
        (CardBrand::Blanche, r"^389\d{11}$"),
        (
            CardBrand::Switch,
            r"^(?:(?:4903|4905|4911|4936|6333|6759)\d{12}(?:\d{2,3})?|(?:564182|633110)\d{10}(?:\d{2,3})?)$",
        ),
        (CardBrand::Korean, r"^9\d{15}$"),
        (CardBrand::Union, r"^62\d{14,17}$"),
        (CardBrand::Solo, r"^(?:6334|6767)\d{12}(?:\d{2,3})?$"),
        (CardBrand::Insta, r"^63[7-9]\d{13}$"),
        (CardBrand::BcGlobal, r"^(?:6541|6556)\d{12}$"),
        (
            CardBrand::RuPay,
            r"^(?:508[5-9]|60\d{2}|65[23]\d|81\d{2}|82\d{2})\d{12}$",
        ),
    ]
    .into_iter()
    .map(|(brand, pattern)| (brand, Regex::new(pattern).expect("brand pattern")))
    .collect()
});

/// Detects the card brand of a (possibly formatted) card number.
///
/// Non-digit characters are stripped first. Returns `None` when no table
/// entry matches, including for incomplete numbers.
///
/// # Example
///
/// ```
/// use fieldmask::detect::detect_brand;
/// use fieldmask::CardBrand;
///
/// assert_eq!(detect_brand("4532 0151 1283 0366"), Some(CardBrand::Visa));
/// assert_eq!(detect_brand("378282246310005"), Some(CardBrand::Amex));
/// assert_eq!(detect_brand("4532"), None);
/// ```
pub fn detect_brand(input: &str) -> Option<CardBrand> {
    let digits = extract_digits(input);
    if digits.is_empty() {
        return None;
    }

    BRAND_TABLE
        .iter()
        .find(|(_, pattern)| pattern.is_match(&digits))
        .map(|(brand, _)| *brand)
}

/// Returns every brand whose pattern matches, in table order.
///
/// Useful to see which later entries a number would also satisfy.
pub fn matching_brands(input: &str) -> Vec<CardBrand> {
    let digits = extract_digits(input);
    BRAND_TABLE
        .iter()
        .filter(|(_, pattern)| pattern.is_match(&digits))
        .map(|(brand, _)| *brand)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_covers_every_brand_in_order() {
        let order: Vec<CardBrand> = BRAND_TABLE.iter().map(|(b, _)| *b).collect();
        assert_eq!(order, CardBrand::ALL.to_vec());
    }

    #[test]
    fn test_visa_detection() {
        assert_eq!(detect_brand("4111111111111111"), Some(CardBrand::Visa));
        assert_eq!(detect_brand("4222222222222"), Some(CardBrand::Visa));
        assert_eq!(detect_brand("4532-0151-1283-0366"), Some(CardBrand::Visa));
    }

    #[test]
    fn test_mastercard_detection() {
        assert_eq!(detect_brand("5500000000000004"), Some(CardBrand::Mastercard));
        assert_eq!(detect_brand("5105105105105100"), Some(CardBrand::Mastercard));
        assert_eq!(detect_brand("2223000048400011"), Some(CardBrand::Mastercard));
    }

    #[test]
    fn test_amex_and_diners_detection() {
        assert_eq!(detect_brand("378282246310005"), Some(CardBrand::Amex));
        assert_eq!(detect_brand("371449635398431"), Some(CardBrand::Amex));
        assert_eq!(detect_brand("30569309025904"), Some(CardBrand::Diners));
        assert_eq!(detect_brand("38520000023237"), Some(CardBrand::Diners));
    }

    #[test]
    fn test_discover_and_jcb_detection() {
        assert_eq!(detect_brand("6011111111111117"), Some(CardBrand::Discover));
        assert_eq!(detect_brand("3530111333300000"), Some(CardBrand::Jcb));
    }

    #[test]
    fn test_regional_brands() {
        assert_eq!(detect_brand("6363680000000000"), Some(CardBrand::Elo));
        assert_eq!(detect_brand("5067000000000000"), Some(CardBrand::Elo));
        assert_eq!(detect_brand("6062825624254001"), Some(CardBrand::Hipercard));
        assert_eq!(detect_brand("5078601870000127985"), Some(CardBrand::Aura));
    }

    #[test]
    fn test_extended_brands() {
        assert_eq!(detect_brand("5018000000000009"), Some(CardBrand::Maestro));
        assert_eq!(detect_brand("6333000000000000"), Some(CardBrand::Switch));
        assert_eq!(detect_brand("9400000000000000"), Some(CardBrand::Korean));
        assert_eq!(detect_brand("6200000000000005"), Some(CardBrand::Union));
        assert_eq!(detect_brand("6334000000000000"), Some(CardBrand::Solo));
        assert_eq!(detect_brand("6370000000000000"), Some(CardBrand::Insta));
        assert_eq!(detect_brand("8100000000000000"), Some(CardBrand::RuPay));
    }

    #[test]
    fn test_first_entry_wins_on_overlap() {
        // 6304 is both Maestro and Laser
        let number = "6304000000000000";
        assert_eq!(detect_brand(number), Some(CardBrand::Maestro));
        assert_eq!(
            matching_brands(number),
            vec![CardBrand::Maestro, CardBrand::Laser]
        );
    }

    #[test]
    fn test_unknown_brand() {
        assert_eq!(detect_brand("0000000000000000"), None);
        assert_eq!(detect_brand("1234"), None);
        assert_eq!(detect_brand(""), None);
        assert_eq!(detect_brand("abc"), None);
    }
}
