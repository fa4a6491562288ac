//! Fixed-layout digit masks: documents, postal code, card, phone and UUID.
//!
//! Input is reduced to its digits (hex digits for UUIDs), truncated to the
//! layout's capacity and regrouped. A separator is only written once the
//! group after it has received a character, so partial values never end in
//! a separator and backspacing behaves naturally.

use crate::detect::detect_brand;
use crate::digits::extract_digits;

/// Digit groups and the separators written between them.
///
/// `separators[i]` sits between `groups[i]` and `groups[i + 1]`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct GroupTemplate {
    groups: &'static [usize],
    separators: &'static [&'static str],
}

pub(crate) const CPF: GroupTemplate = GroupTemplate {
    groups: &[3, 3, 3, 2],
    separators: &[".", ".", "-"],
};

pub(crate) const CNPJ: GroupTemplate = GroupTemplate {
    groups: &[2, 3, 3, 4, 2],
    separators: &[".", ".", "/", "-"],
};

pub(crate) const CEP: GroupTemplate = GroupTemplate {
    groups: &[5, 3],
    separators: &["-"],
};

/// `DDDD DDDD DDDD DDDD DDD`; the last group only for 19-digit cards.
pub(crate) const CARD: GroupTemplate = GroupTemplate {
    groups: &[4, 4, 4, 4, 3],
    separators: &[" ", " ", " ", " "],
};

const CARD_SHORT_DIGITS: usize = 16;

pub(crate) const UUID: GroupTemplate = GroupTemplate {
    groups: &[8, 4, 4, 4, 12],
    separators: &["-", "-", "-", "-"],
};

/// `(DD) DDDDD-DDDD`
pub(crate) const PHONE_MAX_LENGTH: usize = 15;
const PHONE_MAX_DIGITS: usize = 11;
const PHONE_AREA_DIGITS: usize = 2;

impl GroupTemplate {
    /// Number of characters a complete value holds, separators excluded.
    pub(crate) fn capacity(&self) -> usize {
        self.groups.iter().sum()
    }

    pub(crate) fn max_length(&self) -> usize {
        self.capacity() + self.separators.iter().map(|s| s.len()).sum::<usize>()
    }

    /// Lays out `chars` (already filtered and truncated) over the groups.
    fn layout(&self, chars: &str) -> String {
        let mut result = String::with_capacity(self.max_length());
        let mut rest = chars;

        for (i, &group_size) in self.groups.iter().enumerate() {
            if rest.is_empty() {
                break;
            }
            if i > 0 {
                result.push_str(self.separators[i - 1]);
            }
            let take = group_size.min(rest.len());
            result.push_str(&rest[..take]);
            rest = &rest[take..];
        }

        result
    }

    /// Formats the digits of `input`. Complete once every group is full.
    pub(crate) fn format_digits(&self, input: &str) -> (String, bool) {
        let mut digits = extract_digits(input);
        digits.truncate(self.capacity());
        let complete = digits.len() == self.capacity();
        (self.layout(&digits), complete)
    }
}

/// CPF layout up to 11 digits, CNPJ layout from the 12th digit on.
///
/// Only a full CNPJ counts as complete, so an 11-digit CPF never locks the
/// field against continuing into a CNPJ.
pub(crate) fn format_cpf_cnpj(input: &str) -> (String, bool) {
    let digits = extract_digits(input);
    if digits.len() <= CPF.capacity() {
        (CPF.layout(&digits), false)
    } else {
        CNPJ.format_digits(&digits)
    }
}

/// Card numbers of up to 19 digits in groups of four.
///
/// A 16-digit number is complete unless its detected brand also issues
/// longer numbers (Visa, Aura, Hipercard, ...); 19 digits always are.
pub(crate) fn format_card(input: &str) -> (String, bool) {
    let mut digits = extract_digits(input);
    digits.truncate(CARD.capacity());
    let complete = match digits.len() {
        n if n == CARD.capacity() => true,
        CARD_SHORT_DIGITS => detect_brand(&digits)
            .map_or(true, |brand| brand.max_digits() <= CARD_SHORT_DIGITS),
        _ => false,
    };
    (CARD.layout(&digits), complete)
}

/// Hex digits, lowercased, laid out as 8-4-4-4-12.
pub(crate) fn format_uuid(input: &str) -> (String, bool) {
    let mut hex: String = input
        .chars()
        .filter(char::is_ascii_hexdigit)
        .map(|c| c.to_ascii_lowercase())
        .collect();
    hex.truncate(UUID.capacity());
    let complete = hex.len() == UUID.capacity();
    (UUID.layout(&hex), complete)
}

/// Brazilian phone numbers: `(DD) DDDD-DDDD` for landlines and
/// `(DD) DDDDD-DDDD` for mobiles.
///
/// The parenthesis opens with the first digit and closes once the
/// subscriber number starts. The dash appears with the fifth subscriber
/// digit and moves one position right when a ninth digit arrives.
pub(crate) fn format_phone(input: &str) -> (String, bool) {
    let mut digits = extract_digits(input);
    digits.truncate(PHONE_MAX_DIGITS);
    if digits.is_empty() {
        return (digits, false);
    }

    let mut result = String::with_capacity(PHONE_MAX_LENGTH);
    result.push('(');

    let area_len = PHONE_AREA_DIGITS.min(digits.len());
    result.push_str(&digits[..area_len]);

    let subscriber = &digits[area_len..];
    if !subscriber.is_empty() {
        result.push_str(") ");
        let head = if subscriber.len() > 8 { 5 } else { 4 };
        if subscriber.len() > head {
            result.push_str(&subscriber[..head]);
            result.push('-');
            result.push_str(&subscriber[head..]);
        } else {
            result.push_str(subscriber);
        }
    }

    (result, digits.len() == PHONE_MAX_DIGITS)
}
