//! Luhn algorithm implementation for payment card numbers.
//!
//! The Luhn algorithm (also known as the "modulus 10" algorithm) is a checksum
//! formula used by payment cards and a handful of other identification numbers.
//!
//! # Performance
//!
//! This implementation uses a lookup table for the doubling operation,
//! making it O(n) with minimal overhead.

use crate::digits::digit_values;

/// Lookup table for doubled digits: double the value, subtract 9 if >= 10.
/// Index is the digit (0-9), value is the transformed result.
const DOUBLE_TABLE: [u8; 10] = [0, 2, 4, 6, 8, 1, 3, 5, 7, 9];

/// Checks a free-form string with the Luhn algorithm.
///
/// Every non-digit character is ignored, so formatted input such as
/// `"4532 0151 1283 0366"` is accepted. A string without digits fails the
/// check instead of passing vacuously.
///
/// # Example
///
/// ```
/// use fieldmask::luhn::luhn_checksum;
///
/// assert!(luhn_checksum("4532015112830366"));
/// assert!(luhn_checksum("4532 0151 1283 0366"));
/// assert!(!luhn_checksum("4532015112830367"));
/// assert!(!luhn_checksum("no digits"));
/// ```
pub fn luhn_checksum(input: &str) -> bool {
    validate(&digit_values(input))
}

/// Validates a digit sequence using the Luhn algorithm.
///
/// # Arguments
///
/// * `digits` - A slice of digits (0-9).
///
/// # Returns
///
/// `true` if the checksum is valid, `false` otherwise. An empty slice is
/// never valid.
///
/// # Algorithm
///
/// 1. Starting from the rightmost digit (check digit), moving left
/// 2. Double every second digit
/// 3. If doubling results in a number > 9, subtract 9
/// 4. Sum all digits
/// 5. If the sum is divisible by 10, the number is valid
#[inline]
pub fn validate(digits: &[u8]) -> bool {
    if digits.is_empty() {
        return false;
    }

    compute_checksum(digits) % 10 == 0
}

/// Computes the Luhn sum (not reduced modulo 10) for a sequence of digits.
#[inline]
pub fn compute_checksum(digits: &[u8]) -> u32 {
    digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &digit)| {
            if i % 2 == 1 {
                DOUBLE_TABLE[digit as usize] as u32
            } else {
                digit as u32
            }
        })
        .sum()
}

/// Generates the check digit for a partial number.
///
/// Given digits without the check digit, computes the digit that makes the
/// full number pass Luhn validation.
///
/// # Example
///
/// ```
/// use fieldmask::luhn::generate_check_digit;
///
/// let partial = [4, 5, 3, 2, 0, 1, 5, 1, 1, 2, 8, 3, 0, 3, 6];
/// assert_eq!(generate_check_digit(&partial), 6);
/// ```
#[inline]
pub fn generate_check_digit(digits: &[u8]) -> u8 {
    // Once the check digit is appended every existing digit shifts one place
    // to the left, so the doubling parity flips.
    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &digit)| {
            if i % 2 == 0 {
                DOUBLE_TABLE[digit as usize] as u32
            } else {
                digit as u32
            }
        })
        .sum();

    ((10 - (sum % 10)) % 10) as u8
}
