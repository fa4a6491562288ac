//! Two-digit year expansion.
//!
//! A single sliding-window rule is used everywhere a two-digit year has to
//! become a four-digit one (date masks, date rules, range ordering):
//!
//! > The expanded year is the unique year ending in `yy` that lies in the
//! > hundred-year window `[now - (99 - future), now + future]`.
//!
//! Only the future window is configurable; the past window is always the
//! remaining 99 years, so every two-digit year maps to exactly one
//! four-digit year.

use chrono::Datelike;

/// Default number of years after the current year a two-digit year may
/// point to.
pub const DEFAULT_FUTURE_YEARS: u16 = 20;

/// Sliding century window used to expand two-digit years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CenturyWindow {
    future: u16,
}

impl CenturyWindow {
    /// Creates a window reaching `future` years past the current year.
    ///
    /// Values above 99 are clamped to 99.
    pub const fn with_future(future: u16) -> Self {
        let future = if future > 99 { 99 } else { future };
        Self { future }
    }

    /// Years after the current year covered by the window.
    #[inline]
    pub const fn future(&self) -> u16 {
        self.future
    }

    /// Years before the current year covered by the window.
    #[inline]
    pub const fn past(&self) -> u16 {
        99 - self.future
    }

    /// Expands a two-digit year relative to `current_year`.
    #[inline]
    pub fn expand(&self, yy: u8, current_year: i32) -> i32 {
        expand_two_digit_year(yy, current_year, *self)
    }
}

impl Default for CenturyWindow {
    fn default() -> Self {
        Self::with_future(DEFAULT_FUTURE_YEARS)
    }
}

/// Expands a two-digit year to a full year.
///
/// `yy` values above 99 only keep their last two digits.
///
/// # Example
///
/// ```
/// use fieldmask::century::{expand_two_digit_year, CenturyWindow};
///
/// let window = CenturyWindow::with_future(5);
/// assert_eq!(expand_two_digit_year(30, 2025, window), 2030);
/// assert_eq!(expand_two_digit_year(96, 2025, window), 1996);
/// ```
pub fn expand_two_digit_year(yy: u8, current_year: i32, window: CenturyWindow) -> i32 {
    let latest = i64::from(current_year) + i64::from(window.future);
    let yy = i64::from(yy % 100);
    let year = latest - (latest - yy).rem_euclid(100);
    // saturates only for current years at the edge of the i32 range
    year.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Returns the current calendar year from the local clock.
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}
