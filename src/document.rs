//! Brazilian national document numbers (CPF and CNPJ).
//!
//! Both documents end with two check digits computed by the same weighted
//! modulus-11 formula; only the weight sequences differ.
//!
//! | Document | Digits | Layout | First weights | Second weights |
//! |----------|--------|--------|---------------|----------------|
//! | CPF | 11 | `000.000.000-00` | 10..2 | 11..2 |
//! | CNPJ | 14 | `00.000.000/0000-00` | 5..2, 9..2 | 6..2, 9..2 |

use std::fmt;

use crate::digits::{all_same, digit_values};

/// Number of digits in a CPF.
pub const CPF_DIGITS: usize = 11;

/// Number of digits in a CNPJ.
pub const CNPJ_DIGITS: usize = 14;

/// Kind of national document detected in a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DocumentKind {
    /// Individual taxpayer registry, 11 digits.
    Cpf,
    /// Company registry, 14 digits.
    Cnpj,
}

impl DocumentKind {
    /// Returns the lowercase annotation name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Cpf => "cpf",
            Self::Cnpj => "cnpj",
        }
    }

    /// Returns the digit count of this document.
    #[inline]
    pub const fn digit_count(&self) -> usize {
        match self {
            Self::Cpf => CPF_DIGITS,
            Self::Cnpj => CNPJ_DIGITS,
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Computes a modulus-11 check digit.
///
/// Each digit is multiplied by a weight that starts at `weight_start` and
/// decreases by one per position, wrapping back to 9 whenever it would
/// drop below `weight_floor`. The weighted sum is reduced modulo 11; a
/// remainder below 2 yields `0`, anything else yields `11 - remainder`.
///
/// # Example
///
/// ```
/// use fieldmask::document::check_digit_mod11;
///
/// // First CPF check digit of 111.444.777-35
/// assert_eq!(check_digit_mod11(&[1, 1, 1, 4, 4, 4, 7, 7, 7], 10, 2), 3);
/// ```
pub fn check_digit_mod11(digits: &[u8], weight_start: u32, weight_floor: u32) -> u8 {
    let mut weight = weight_start;
    let mut sum: u32 = 0;

    for &digit in digits {
        sum += digit as u32 * weight;
        weight = weight.saturating_sub(1);
        if weight < weight_floor {
            weight = 9;
        }
    }

    match sum % 11 {
        r if r < 2 => 0,
        r => (11 - r) as u8,
    }
}

/// Validates a CPF number.
///
/// Formatting characters are ignored. The value must contain exactly 11
/// digits, must not be one of the ten repeated-digit placeholders, and both
/// check digits must match.
///
/// # Example
///
/// ```
/// use fieldmask::document::is_valid_cpf;
///
/// assert!(is_valid_cpf("111.444.777-35"));
/// assert!(!is_valid_cpf("111.111.111-11"));
/// ```
pub fn is_valid_cpf(input: &str) -> bool {
    let digits = digit_values(input);
    if digits.len() != CPF_DIGITS || all_same(&digits) {
        return false;
    }

    check_digit_mod11(&digits[..9], 10, 2) == digits[9]
        && check_digit_mod11(&digits[..10], 11, 2) == digits[10]
}

/// Validates a CNPJ number.
///
/// Same family as [`is_valid_cpf`] with 14 digits and cyclic weights.
///
/// # Example
///
/// ```
/// use fieldmask::document::is_valid_cnpj;
///
/// assert!(is_valid_cnpj("11.222.333/0001-81"));
/// assert!(!is_valid_cnpj("11.222.333/0001-82"));
/// ```
pub fn is_valid_cnpj(input: &str) -> bool {
    let digits = digit_values(input);
    if digits.len() != CNPJ_DIGITS || all_same(&digits) {
        return false;
    }

    check_digit_mod11(&digits[..12], 5, 2) == digits[12]
        && check_digit_mod11(&digits[..13], 6, 2) == digits[13]
}

/// Detects which document a value holds, if it is a valid one.
///
/// The digit count selects the candidate document; the check digits decide.
pub fn detect_document(input: &str) -> Option<DocumentKind> {
    let count = input.bytes().filter(u8::is_ascii_digit).count();
    match count {
        CPF_DIGITS if is_valid_cpf(input) => Some(DocumentKind::Cpf),
        CNPJ_DIGITS if is_valid_cnpj(input) => Some(DocumentKind::Cnpj),
        _ => None,
    }
}

/// Appends both check digits to a document prefix.
///
/// `prefix` must hold the first 9 (CPF) or 12 (CNPJ) digits.
pub fn complete_check_digits(kind: DocumentKind, prefix: &[u8]) -> Vec<u8> {
    let (first, second) = match kind {
        DocumentKind::Cpf => (10, 11),
        DocumentKind::Cnpj => (5, 6),
    };

    let mut digits = prefix.to_vec();
    digits.push(check_digit_mod11(&digits, first, 2));
    digits.push(check_digit_mod11(&digits, second, 2));
    digits
}
