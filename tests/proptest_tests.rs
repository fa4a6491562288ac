//! Property-based tests using proptest.
//!
//! These tests verify invariants that should hold for all inputs,
//! helping discover edge cases that manual tests might miss.

use chrono::NaiveDate;
use fieldmask::century::{expand_two_digit_year, CenturyWindow};
use fieldmask::document::{is_valid_cnpj, is_valid_cpf, DocumentKind};
use fieldmask::generate::{document_from_base, generate_card_deterministic_with_prefix};
use fieldmask::{
    apply_mask_with, extract_digits, luhn, luhn_checksum, validate_field, EditIntent, FormatId,
    MaskOptions, ValidationContext,
};
use proptest::prelude::*;

// =============================================================================
// STRATEGIES
// =============================================================================

fn any_format() -> impl Strategy<Value = FormatId> {
    proptest::sample::select(FormatId::ALL.to_vec())
}

fn any_intent() -> impl Strategy<Value = EditIntent> {
    prop_oneof![Just(EditIntent::Insert), Just(EditIntent::Delete)]
}

/// Characters a user can plausibly type or paste into a masked field.
fn keystrokes() -> impl Strategy<Value = String> {
    "[0-9/:~ .,()a-fA-F-]{0,40}"
}

/// Generates a random digit string of a length within range.
fn digit_string_range(range: std::ops::RangeInclusive<usize>) -> impl Strategy<Value = String> {
    range.prop_flat_map(|len| {
        proptest::collection::vec(prop::char::range('0', '9'), len)
            .prop_map(|chars| chars.into_iter().collect::<String>())
    })
}

fn options() -> MaskOptions {
    MaskOptions::new().with_current_year(2025)
}

fn ctx() -> ValidationContext<'static> {
    ValidationContext::new().with_today(NaiveDate::from_ymd_opt(2025, 6, 15).unwrap())
}

// =============================================================================
// MASK PROPERTIES
// =============================================================================

proptest! {
    /// Property: a mask's output is a fixed point of the same mask.
    #[test]
    fn mask_is_idempotent(format in any_format(), intent in any_intent(), input in keystrokes()) {
        let once = apply_mask_with(format, &input, intent, &options());
        let twice = apply_mask_with(format, &once.value, intent, &options());
        prop_assert_eq!(&twice, &once, "{} {:?} {:?}", format, intent, input);
    }

    /// Property: typing one more digit never shortens the field.
    #[test]
    fn appending_a_digit_never_shortens(
        format in any_format(),
        input in keystrokes(),
        digit in prop::char::range('0', '9'),
    ) {
        let before = apply_mask_with(format, &input, EditIntent::Insert, &options());
        let typed = format!("{}{}", before.value, digit);
        let after = apply_mask_with(format, &typed, EditIntent::Insert, &options());
        prop_assert!(
            after.value.chars().count() >= before.value.chars().count(),
            "{}: {:?} -> {:?}", format, before.value, after.value
        );
    }

    /// Property: output never exceeds the format's maximum length.
    #[test]
    fn output_respects_max_length(format in any_format(), intent in any_intent(), input in ".{0,60}") {
        let out = apply_mask_with(format, &input, intent, &options());
        if let Some(max) = format.max_length(&options()) {
            prop_assert!(out.value.chars().count() <= max, "{}: {:?}", format, out.value);
        }
        if let Some(max) = out.max_length {
            prop_assert!(out.value.chars().count() <= max);
        }
    }

    /// Property: a complete value locks the field at its own length.
    #[test]
    fn complete_values_lock_length(format in any_format(), input in keystrokes()) {
        let out = apply_mask_with(format, &input, EditIntent::Insert, &options());
        if out.is_complete {
            prop_assert_eq!(out.max_length, Some(out.value.len()));
        }
    }

    /// Property: digit-group masks keep every typed digit up to capacity.
    #[test]
    fn group_masks_preserve_digits(digits in digit_string_range(0..=14)) {
        let out = apply_mask_with(FormatId::CpfCnpj, &digits, EditIntent::Insert, &options());
        prop_assert_eq!(extract_digits(&out.value), digits);
    }

    /// Property: masks never panic on arbitrary input.
    #[test]
    fn mask_never_panics(format in any_format(), intent in any_intent(), input in ".*") {
        let _ = apply_mask_with(format, &input, intent, &options());
    }
}

// =============================================================================
// CHECK DIGIT PROPERTIES
// =============================================================================

proptest! {
    /// Property: Adding a check digit makes any digit sequence valid.
    #[test]
    fn check_digit_makes_valid(prefix in digit_string_range(11..=18)) {
        let card = generate_card_deterministic_with_prefix(&prefix, prefix.len() + 1);
        prop_assert!(luhn_checksum(&card), "{}", card);
    }

    /// Property: Changing any single digit invalidates Luhn.
    #[test]
    fn single_digit_change_invalidates_luhn(
        prefix in digit_string_range(12..=18),
        change_pos in 0usize..19usize,
        delta in 1u8..=9u8,
    ) {
        let card = generate_card_deterministic_with_prefix(&prefix, prefix.len() + 1);
        let mut digits: Vec<u8> = card.bytes().map(|b| b - b'0').collect();
        let pos = change_pos % digits.len();
        digits[pos] = (digits[pos] + delta) % 10;
        prop_assert!(!luhn::validate(&digits));
    }

    /// Property: completed documents validate unless they are a repeated digit.
    #[test]
    fn completed_documents_validate(cpf_base in digit_string_range(9..=9), cnpj_base in digit_string_range(12..=12)) {
        let cpf = document_from_base(DocumentKind::Cpf, &cpf_base);
        let repeated = cpf.bytes().all(|b| b == cpf.as_bytes()[0]);
        prop_assert_eq!(is_valid_cpf(&cpf), !repeated, "{}", cpf);

        let cnpj = document_from_base(DocumentKind::Cnpj, &cnpj_base);
        let repeated = cnpj.bytes().all(|b| b == cnpj.as_bytes()[0]);
        prop_assert_eq!(is_valid_cnpj(&cnpj), !repeated, "{}", cnpj);
    }

    /// Property: the formatted and the bare document agree.
    #[test]
    fn punctuation_does_not_matter(base in digit_string_range(9..=9)) {
        let cpf = document_from_base(DocumentKind::Cpf, &base);
        let masked = apply_mask_with(FormatId::Cpf, &cpf, EditIntent::Insert, &options());
        prop_assert_eq!(is_valid_cpf(&masked.value), is_valid_cpf(&cpf));
    }
}

// =============================================================================
// CENTURY WINDOW PROPERTIES
// =============================================================================

proptest! {
    /// Property: the expanded year ends in the typed digits and lies in the
    /// hundred-year window.
    #[test]
    fn expansion_stays_in_window(yy in 0u8..100, current in 1900i32..2200, future in 0u16..100) {
        let window = CenturyWindow::with_future(future);
        let year = expand_two_digit_year(yy, current, window);
        prop_assert_eq!(year.rem_euclid(100), i32::from(yy));
        prop_assert!(year <= current + i32::from(window.future()));
        prop_assert!(year >= current - i32::from(window.past()));
    }
}

// =============================================================================
// VALIDATION PROPERTIES
// =============================================================================

proptest! {
    /// Property: blank values pass every rule except `required`.
    #[test]
    fn blank_values_are_vacuously_valid(
        blank in "[ \t]{0,3}",
        rule in proptest::sample::select(vec![
            "cpf", "cnpj", "cpfcnpj", "email", "url", "date", "daterange", "creditcard",
            "password strong", "after today", "minlen 5", "len 2", "age 18", "coordinate",
            "uuid", "time", "number", "latitude", "eq other",
        ]),
    ) {
        prop_assert!(validate_field(&blank, rule, &ctx()).valid, "{}", rule);
        let required_rule = format!("required {}", rule);
        prop_assert!(!validate_field(&blank, &required_rule, &ctx()).valid);
    }

    /// Property: validation never panics, whatever the rules say.
    #[test]
    fn validate_never_panics(value in ".*", rules in ".*") {
        let _ = validate_field(&value, &rules, &ctx());
    }

    /// Property: rule-token noise passes.
    #[test]
    fn unknown_tokens_pass(value in "[a-z0-9]{1,10}", token in "x[a-z]{3,8}") {
        prop_assert!(validate_field(&value, &token, &ctx()).valid);
    }
}
