//! Stand-alone value predicates used by the rule dispatcher.
//!
//! Every function here is total: it answers `false` for anything it cannot
//! interpret and never panics.

use std::sync::LazyLock;

use regex::Regex;

use crate::rules::TimeShape;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[\w-]+(?:\.[\w-]+)*@\w+(?:\.[a-z]{2,6})*\.[a-z]{2,6}$")
        .expect("email pattern")
});

static URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:https?://)?(?:www\.)?[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,5}\.?")
        .expect("url pattern")
});

static UUID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
        .expect("uuid pattern")
});

/// Parses a decimal number, accepting `,` as the decimal separator.
///
/// Infinite and NaN values are rejected.
///
/// # Example
///
/// ```
/// use fieldmask::checks::parse_decimal;
///
/// assert_eq!(parse_decimal("1,5"), Some(1.5));
/// assert_eq!(parse_decimal(" -3 "), Some(-3.0));
/// assert_eq!(parse_decimal("inf"), None);
/// ```
pub fn parse_decimal(value: &str) -> Option<f64> {
    value
        .trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}

/// E-mail address: dotted local part, domain ending in a 2 to 6 letter
/// label.
pub fn is_email(value: &str) -> bool {
    EMAIL.is_match(value.trim())
}

/// Web address with optional scheme and `www.`.
///
/// Only the host part is checked; any path after it is accepted.
pub fn is_url(value: &str) -> bool {
    URL.is_match(value.trim())
}

/// Hyphenated UUID, any case.
pub fn is_uuid(value: &str) -> bool {
    UUID.is_match(value.trim())
}

/// Integer month between 1 and 12.
pub fn is_month(value: &str) -> bool {
    value
        .trim()
        .parse::<u32>()
        .is_ok_and(|m| (1..=12).contains(&m))
}

/// Clock value in the given shape, each component one or two digits.
///
/// # Example
///
/// ```
/// use fieldmask::checks::is_time;
/// use fieldmask::rules::TimeShape;
///
/// assert!(is_time("23:59:59", TimeShape::HourMinuteSecond));
/// assert!(!is_time("24:00", TimeShape::HourMinute));
/// assert!(is_time("59:59", TimeShape::MinuteSecond));
/// ```
pub fn is_time(value: &str, shape: TimeShape) -> bool {
    let limits: &[u32] = match shape {
        TimeShape::HourMinuteSecond => &[23, 59, 59],
        TimeShape::HourMinute => &[23, 59],
        TimeShape::MinuteSecond => &[59, 59],
    };

    let parts: Vec<&str> = value.trim().split(':').collect();
    parts.len() == limits.len()
        && parts.iter().zip(limits).all(|(part, &max)| {
            (1..=2).contains(&part.len())
                && part.bytes().all(|b| b.is_ascii_digit())
                && part.parse::<u32>().is_ok_and(|v| v <= max)
        })
}

/// Number of character classes present: lowercase, uppercase, digit and
/// symbol (anything else that is not whitespace).
///
/// # Example
///
/// ```
/// use fieldmask::checks::password_score;
///
/// assert_eq!(password_score("Abc123!"), 4);
/// assert_eq!(password_score("abc123"), 2);
/// ```
pub fn password_score(value: &str) -> u8 {
    let (mut lower, mut upper, mut digit, mut symbol) = (false, false, false, false);
    for c in value.chars() {
        if c.is_lowercase() {
            lower = true;
        } else if c.is_uppercase() {
            upper = true;
        } else if c.is_ascii_digit() {
            digit = true;
        } else if !c.is_whitespace() {
            symbol = true;
        }
    }
    [lower, upper, digit, symbol].iter().filter(|&&b| b).count() as u8
}

fn within(value: &str, limit: f64) -> bool {
    parse_decimal(value).is_some_and(|v| (-limit..=limit).contains(&v))
}

/// Decimal latitude in [-90, 90].
pub fn is_latitude(value: &str) -> bool {
    within(value, 90.0)
}

/// Decimal longitude in [-180, 180].
pub fn is_longitude(value: &str) -> bool {
    within(value, 180.0)
}

/// `latitude,longitude` pair separated by commas, semicolons or spaces.
///
/// Because `,` separates the pair, decimals must use `.` here.
///
/// # Example
///
/// ```
/// use fieldmask::checks::is_coordinate;
///
/// assert!(is_coordinate("-23.5505, -46.6333"));
/// assert!(is_coordinate("-23.5505;-46.6333"));
/// assert!(!is_coordinate("-91, 10"));
/// assert!(!is_coordinate("10"));
/// ```
pub fn is_coordinate(value: &str) -> bool {
    let parts: Vec<&str> = value
        .split([',', ';', ' '])
        .filter(|p| !p.is_empty())
        .collect();
    match parts.as_slice() {
        [lat, lng] => is_latitude(lat) && is_longitude(lng),
        _ => false,
    }
}

/// True when `value` contains at least one character of `set`.
pub fn contains_any(value: &str, set: &str) -> bool {
    value.chars().any(|c| set.contains(c))
}

/// True when every character of `set` appears in `value`.
pub fn contains_all(value: &str, set: &str) -> bool {
    set.chars().all(|c| value.contains(c))
}

/// True when no character of `set` appears in `value`.
pub fn contains_none(value: &str, set: &str) -> bool {
    !contains_any(value, set)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email() {
        assert!(is_email("john.doe@example.com"));
        assert!(is_email("a-b@mail.co.uk"));
        assert!(is_email("USER@EXAMPLE.COM"));
        assert!(!is_email("john@"));
        assert!(!is_email("john.example.com"));
        assert!(!is_email("john@example"));
        assert!(!is_email("john@@example.com"));
    }

    #[test]
    fn test_url() {
        assert!(is_url("example.com"));
        assert!(is_url("https://www.example.com/path?q=1"));
        assert!(is_url("http://sub.example.org"));
        assert!(!is_url("example"));
        assert!(!is_url("ftp://example.com"));
    }

    #[test]
    fn test_number() {
        assert_eq!(parse_decimal("42"), Some(42.0));
        assert_eq!(parse_decimal("3,14"), Some(3.14));
        assert_eq!(parse_decimal("1e3"), Some(1000.0));
        assert_eq!(parse_decimal("12a"), None);
        assert_eq!(parse_decimal("NaN"), None);
        assert_eq!(parse_decimal(""), None);
    }

    #[test]
    fn test_month() {
        assert!(is_month("1"));
        assert!(is_month("12"));
        assert!(!is_month("0"));
        assert!(!is_month("13"));
        assert!(!is_month("x"));
    }

    #[test]
    fn test_time() {
        assert!(is_time("00:00:00", TimeShape::HourMinuteSecond));
        assert!(!is_time("12:30", TimeShape::HourMinuteSecond));
        assert!(is_time("9:05", TimeShape::HourMinute));
        assert!(!is_time("12:60", TimeShape::HourMinute));
        assert!(!is_time("12:", TimeShape::HourMinute));
        assert!(!is_time("+1:30", TimeShape::HourMinute));
    }

    #[test]
    fn test_password_score() {
        assert_eq!(password_score(""), 0);
        assert_eq!(password_score("abc"), 1);
        assert_eq!(password_score("Abc"), 2);
        assert_eq!(password_score("Abc1"), 3);
        assert_eq!(password_score("Abc1 "), 3);
        assert_eq!(password_score("Abc1#"), 4);
    }

    #[test]
    fn test_coordinates() {
        assert!(is_latitude("-90"));
        assert!(is_latitude("45,5"));
        assert!(!is_latitude("90.0001"));
        assert!(is_longitude("-180"));
        assert!(!is_longitude("180.5"));
        assert!(!is_coordinate("1, 2, 3"));
    }

    #[test]
    fn test_uuid() {
        assert!(is_uuid("550e8400-e29b-41d4-a716-446655440000"));
        assert!(is_uuid("550E8400-E29B-41D4-A716-446655440000"));
        assert!(!is_uuid("550e8400e29b41d4a716446655440000"));
        assert!(!is_uuid("550e8400-e29b-41d4-a716-44665544000g"));
    }

    #[test]
    fn test_character_sets() {
        assert!(contains_any("john@doe", "@#"));
        assert!(!contains_any("john", "@#"));
        assert!(contains_all("education", "aeiou"));
        assert!(!contains_all("dog", "aeiou"));
        assert!(contains_none("nospace", " "));
        assert!(!contains_none("has space", " "));
    }
}
