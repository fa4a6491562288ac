//! Digit extraction helpers shared by the masks and the rules.

/// Strips every character that is not an ASCII decimal digit.
///
/// # Example
///
/// ```
/// use fieldmask::extract_digits;
///
/// assert_eq!(extract_digits("(11) 98765-4321"), "11987654321");
/// assert_eq!(extract_digits("abc"), "");
/// ```
pub fn extract_digits(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Extracts the numeric values (0-9) of every ASCII digit in `input`.
pub fn digit_values(input: &str) -> Vec<u8> {
    input
        .bytes()
        .filter(u8::is_ascii_digit)
        .map(|b| b - b'0')
        .collect()
}

/// Returns true when every digit in the slice is the same.
///
/// Used to reject placeholder document numbers such as `111.111.111-11`.
#[inline]
pub fn all_same(digits: &[u8]) -> bool {
    match digits.split_first() {
        Some((first, rest)) => rest.iter().all(|d| d == first),
        None => true,
    }
}

/// Truncates `value` to at most `max` characters.
pub(crate) fn truncate_chars(value: &mut String, max: usize) {
    if let Some((idx, _)) = value.char_indices().nth(max) {
        value.truncate(idx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_digits() {
        assert_eq!(extract_digits("111.444.777-35"), "11144477735");
        assert_eq!(extract_digits(""), "");
        assert_eq!(extract_digits("١٢٣"), "");
    }

    #[test]
    fn test_digit_values() {
        assert_eq!(digit_values("4-1 1"), vec![4, 1, 1]);
        assert!(digit_values("x").is_empty());
    }

    #[test]
    fn test_all_same() {
        assert!(all_same(&[1, 1, 1]));
        assert!(!all_same(&[1, 2, 1]));
        assert!(all_same(&[]));
    }

    #[test]
    fn test_truncate_chars() {
        let mut s = String::from("abcdef");
        truncate_chars(&mut s, 3);
        assert_eq!(s, "abc");

        let mut s = String::from("ab");
        truncate_chars(&mut s, 3);
        assert_eq!(s, "ab");

        let mut s = String::from("ééé");
        truncate_chars(&mut s, 2);
        assert_eq!(s, "éé");
    }
}
