//! Calendar parsing and arithmetic for `DD/MM/YYYY`-style values.
//!
//! Dates are parsed strictly: a day that overflows its month (31/04) or a
//! 29th of February outside a leap year is rejected rather than rolled
//! over into the next month.

use chrono::{Datelike, NaiveDate};

use crate::century::CenturyWindow;

/// Returns true if `year` is a Gregorian leap year.
#[inline]
pub const fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` (1-12) of `year`. Returns 0 for invalid months.
pub const fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Parses a year component of 2 or 4 digits.
pub(crate) fn parse_year(text: &str, current_year: i32, window: CenturyWindow) -> Option<i32> {
    if !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    match text.len() {
        2 => text.parse::<u8>().ok().map(|yy| window.expand(yy, current_year)),
        4 => text.parse().ok(),
        _ => None,
    }
}

fn parse_component(text: &str) -> Option<u32> {
    let text = text.trim();
    if text.is_empty() || text.len() > 2 || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Parses a `DD/MM/YYYY` (or `DD/MM/YY`) date into a real calendar date.
///
/// Anything after the first space is ignored so that values carrying a time
/// (`01/02/2024 10:30`) still parse. A two-component value (`MM/YYYY`) is
/// read as the first day of that month.
///
/// # Example
///
/// ```
/// use fieldmask::calendar::parse_date;
/// use fieldmask::century::CenturyWindow;
///
/// let window = CenturyWindow::default();
/// assert!(parse_date("29/02/2024", 2025, window).is_some());
/// assert!(parse_date("29/02/2023", 2025, window).is_none());
/// assert!(parse_date("31/04/2024", 2025, window).is_none());
/// ```
pub fn parse_date(value: &str, current_year: i32, window: CenturyWindow) -> Option<NaiveDate> {
    let head = value.trim().split(' ').next().unwrap_or_default();
    let parts: Vec<&str> = head.split('/').collect();

    let (day, month, year) = match parts.as_slice() {
        [d, m, y] => (parse_component(d)?, parse_component(m)?, y.trim()),
        [m, y] => (1, parse_component(m)?, y.trim()),
        _ => return None,
    };

    let year = parse_year(year, current_year, window)?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parses a `MM/YYYY` (or `MM/YY`) value into `(year, month)`.
///
/// A three-component value is accepted as well, using its month and year.
pub fn parse_month_year(
    value: &str,
    current_year: i32,
    window: CenturyWindow,
) -> Option<(i32, u32)> {
    let parts: Vec<&str> = value.trim().split('/').collect();
    let (month, year) = match parts.as_slice() {
        [m, y] | [_, m, y] => (parse_component(m)?, y.trim()),
        _ => return None,
    };

    if !(1..=12).contains(&month) {
        return None;
    }
    Some((parse_year(year, current_year, window)?, month))
}

/// Converts a date into an integer that orders the same way dates do.
#[inline]
pub fn ordinal_key(date: NaiveDate) -> i64 {
    date.num_days_from_ce() as i64
}

/// Whole years elapsed between `birth` and `today`.
///
/// Uses calendar subtraction: the age increases on the anniversary of the
/// birth date, and a 29th-of-February birthday is reached on the 1st of
/// March in common years. Negative when `birth` is in the future.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use fieldmask::calendar::age_on;
///
/// let birth = NaiveDate::from_ymd_opt(2000, 6, 15).unwrap();
/// assert_eq!(age_on(birth, NaiveDate::from_ymd_opt(2018, 6, 14).unwrap()), 17);
/// assert_eq!(age_on(birth, NaiveDate::from_ymd_opt(2018, 6, 15).unwrap()), 18);
/// ```
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut years = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }
    years
}
