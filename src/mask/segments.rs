//! Segment walker for date, month/year and time masks.
//!
//! The input is tokenized into digits, separators, spaces and range markers,
//! then walked left to right filling one segment at a time:
//!
//! - a bounded segment (day, month, hour, ...) closes after two digits,
//!   clamped into its bounds; a first digit that cannot start a two-digit
//!   value in bounds is zero-padded and closes the segment at once;
//! - an explicit separator after a lone digit zero-pads it when the padded
//!   value is in bounds, and is ignored otherwise;
//! - a four-digit year holding exactly two digits is expanded through the
//!   century window when a separator, space or range marker follows, but
//!   only while inserting.
//!
//! Rendering writes a trailing separator after the last closed segment when
//! inserting, which is what makes the cursor jump past `/` while typing.

use chrono::NaiveDate;

use super::{EditIntent, MaskOptions};
use crate::calendar::{ordinal_key, parse_year};

/// One field of a segmented value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Segment {
    Day,
    Month,
    /// Four digits, two-digit input expands through the century window.
    Year,
    /// Two digits, never expanded.
    ShortYear,
    Hour,
    Minute,
    Second,
}

impl Segment {
    const fn bounds(self) -> Option<(u32, u32)> {
        match self {
            Self::Day => Some((1, 31)),
            Self::Month => Some((1, 12)),
            Self::Hour => Some((0, 23)),
            Self::Minute | Self::Second => Some((0, 59)),
            Self::Year | Self::ShortYear => None,
        }
    }

    const fn width(self) -> usize {
        match self {
            Self::Year => 4,
            _ => 2,
        }
    }
}

/// Ordered segments plus the separator printed between them.
#[derive(Debug)]
pub(crate) struct SegmentLayout {
    segments: &'static [Segment],
    separator: char,
    accepted: &'static [char],
}

const DATE_SEPARATORS: &[char] = &['/', '-', '.'];
const TIME_SEPARATORS: &[char] = &[':'];

pub(crate) static DATE: SegmentLayout = SegmentLayout {
    segments: &[Segment::Day, Segment::Month, Segment::Year],
    separator: '/',
    accepted: DATE_SEPARATORS,
};

pub(crate) static MONTH_YEAR: SegmentLayout = SegmentLayout {
    segments: &[Segment::Month, Segment::Year],
    separator: '/',
    accepted: DATE_SEPARATORS,
};

pub(crate) static SHORT_MONTH_YEAR: SegmentLayout = SegmentLayout {
    segments: &[Segment::Month, Segment::ShortYear],
    separator: '/',
    accepted: DATE_SEPARATORS,
};

pub(crate) static TIME: SegmentLayout = SegmentLayout {
    segments: &[Segment::Hour, Segment::Minute, Segment::Second],
    separator: ':',
    accepted: TIME_SEPARATORS,
};

pub(crate) static SHORT_TIME: SegmentLayout = SegmentLayout {
    segments: &[Segment::Hour, Segment::Minute],
    separator: ':',
    accepted: TIME_SEPARATORS,
};

pub(crate) static MINUTE_SECOND: SegmentLayout = SegmentLayout {
    segments: &[Segment::Minute, Segment::Second],
    separator: ':',
    accepted: TIME_SEPARATORS,
};

impl SegmentLayout {
    pub(crate) fn max_length(&self) -> usize {
        let digits: usize = self.segments.iter().map(|s| s.width()).sum();
        digits + self.segments.len() - 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token {
    Digit(u8),
    Sep,
    Space,
    Range,
}

/// Splits raw input into walker tokens. Unrecognised characters are dropped.
pub(crate) fn tokenize(input: &str, layout: &SegmentLayout, allow_range: bool) -> Vec<Token> {
    input
        .chars()
        .filter_map(|c| match c {
            '0'..='9' => Some(Token::Digit(c as u8 - b'0')),
            ' ' => Some(Token::Space),
            '~' if allow_range => Some(Token::Range),
            c if layout.accepted.contains(&c) => Some(Token::Sep),
            _ => None,
        })
        .collect()
}

/// State of one walked value.
#[derive(Debug, Default)]
pub(crate) struct Side {
    segments: Vec<String>,
    partial: String,
    /// Index of the first token the walk did not consume.
    pub(crate) consumed: usize,
    /// True when the walk stopped on a range marker.
    pub(crate) stopped_at_range: bool,
}

impl Side {
    pub(crate) fn is_empty(&self) -> bool {
        self.segments.is_empty() && self.partial.is_empty()
    }

    pub(crate) fn is_complete(&self, layout: &SegmentLayout) -> bool {
        self.segments.len() == layout.segments.len()
    }

    fn close(&mut self, text: String) {
        self.segments.push(text);
        self.partial.clear();
    }

    fn push_digit(&mut self, segment: Segment, digit: u8) {
        match segment.bounds() {
            Some((_, max)) if self.partial.is_empty() && u32::from(digit) > max / 10 => {
                self.close(format!("0{digit}"));
            }
            Some((min, max)) => {
                self.partial.push(char::from(b'0' + digit));
                if self.partial.len() == 2 {
                    let value = self.partial.parse::<u32>().map_or(min, |v| v.clamp(min, max));
                    self.close(format!("{value:02}"));
                }
            }
            None => {
                self.partial.push(char::from(b'0' + digit));
                if self.partial.len() == segment.width() {
                    let text = std::mem::take(&mut self.partial);
                    self.close(text);
                }
            }
        }
    }

    fn close_on_separator(&mut self, segment: Segment, intent: EditIntent, options: &MaskOptions) {
        match segment.bounds() {
            Some((min, max)) if self.partial.len() == 1 => {
                if let Ok(value) = self.partial.parse::<u32>() {
                    if (min..=max).contains(&value) {
                        self.close(format!("{value:02}"));
                    }
                }
            }
            Some(_) => {}
            None => self.expand_year(segment, intent, options),
        }
    }

    fn expand_year(&mut self, segment: Segment, intent: EditIntent, options: &MaskOptions) {
        if segment != Segment::Year || self.partial.len() != 2 || !intent.is_insert() {
            return;
        }
        if let Ok(yy) = self.partial.parse::<u8>() {
            let year = options.century.expand(yy, options.current_year);
            self.close(format!("{year:04}"));
        }
    }

    /// Joins closed segments and the partial one.
    ///
    /// With `trailing`, a separator follows the last closed segment when the
    /// value is neither empty nor complete.
    pub(crate) fn render(&self, layout: &SegmentLayout, trailing: bool) -> String {
        let mut out = String::with_capacity(layout.max_length());
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                out.push(layout.separator);
            }
            out.push_str(segment);
        }

        if !self.partial.is_empty() {
            if !self.segments.is_empty() {
                out.push(layout.separator);
            }
            out.push_str(&self.partial);
        } else if trailing && !self.segments.is_empty() && !self.is_complete(layout) {
            out.push(layout.separator);
        }
        out
    }

    /// Orderable key of a complete date or month/year value.
    ///
    /// `None` for time layouts, incomplete values and dates that do not
    /// exist in the calendar (31/02).
    pub(crate) fn sort_key(&self, layout: &SegmentLayout, options: &MaskOptions) -> Option<i64> {
        if !self.is_complete(layout) {
            return None;
        }

        let (mut day, mut month, mut year) = (1, None, None);
        for (segment, text) in layout.segments.iter().zip(&self.segments) {
            match segment {
                Segment::Day => day = text.parse().ok()?,
                Segment::Month => month = text.parse().ok(),
                Segment::Year | Segment::ShortYear => {
                    year = parse_year(text, options.current_year, options.century)
                }
                _ => return None,
            }
        }

        NaiveDate::from_ymd_opt(year?, month?, day).map(ordinal_key)
    }
}

/// Walks `tokens` until the layout is full, the tokens run out or a range
/// marker is reached.
pub(crate) fn walk(
    tokens: &[Token],
    layout: &SegmentLayout,
    intent: EditIntent,
    options: &MaskOptions,
) -> Side {
    let mut side = Side::default();

    for (i, token) in tokens.iter().enumerate() {
        let Some(&segment) = layout.segments.get(side.segments.len()) else {
            side.consumed = i;
            return side;
        };

        match *token {
            Token::Digit(digit) => side.push_digit(segment, digit),
            Token::Sep => side.close_on_separator(segment, intent, options),
            Token::Space => side.expand_year(segment, intent, options),
            Token::Range => {
                side.expand_year(segment, intent, options);
                side.consumed = i;
                side.stopped_at_range = true;
                return side;
            }
        }
    }

    side.consumed = tokens.len();
    side
}

/// Masks a single (non-range) segmented value.
pub(crate) fn format_single(
    layout: &SegmentLayout,
    input: &str,
    intent: EditIntent,
    options: &MaskOptions,
) -> (String, bool) {
    let tokens = tokenize(input, layout, false);
    let side = walk(&tokens, layout, intent, options);
    (side.render(layout, intent.is_insert()), side.is_complete(layout))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> MaskOptions {
        MaskOptions::new().with_current_year(2025)
    }

    fn insert(layout: &SegmentLayout, input: &str) -> String {
        format_single(layout, input, EditIntent::Insert, &opts()).0
    }

    fn delete(layout: &SegmentLayout, input: &str) -> String {
        format_single(layout, input, EditIntent::Delete, &opts()).0
    }

    #[test]
    fn test_date_typing_progression() {
        assert_eq!(insert(&DATE, "2"), "2");
        assert_eq!(insert(&DATE, "25"), "25/");
        assert_eq!(insert(&DATE, "25/1"), "25/1");
        assert_eq!(insert(&DATE, "25/12"), "25/12/");
        assert_eq!(insert(&DATE, "25/12/2"), "25/12/2");
        assert_eq!(
            format_single(&DATE, "25/12/2024", EditIntent::Insert, &opts()),
            ("25/12/2024".to_string(), true)
        );
    }

    #[test]
    fn test_date_padding() {
        assert_eq!(insert(&DATE, "4"), "04/");
        assert_eq!(insert(&DATE, "1/"), "01/");
        assert_eq!(insert(&DATE, "12/3"), "12/03/");
        assert_eq!(insert(&DATE, "12-1-"), "12/01/");
    }

    #[test]
    fn test_lone_zero_ignores_separator() {
        assert_eq!(insert(&DATE, "0/"), "0");
        assert_eq!(insert(&DATE, "0/5"), "05/");
        assert_eq!(insert(&DATE, "12//"), "12/");
    }

    #[test]
    fn test_date_clamping() {
        assert_eq!(insert(&DATE, "35"), "31/");
        assert_eq!(insert(&DATE, "00"), "01/");
        assert_eq!(insert(&DATE, "1513"), "15/12/");
        assert_eq!(insert(&DATE, "1500"), "15/01/");
    }

    #[test]
    fn test_two_digit_year_expansion() {
        assert_eq!(insert(&DATE, "01/01/20/"), "01/01/2020");
        assert_eq!(insert(&DATE, "01/01/96/"), "01/01/1996");
        assert_eq!(insert(&DATE, "01/01/45 "), "01/01/2045");
        assert_eq!(insert(&DATE, "01/01/2/"), "01/01/2");
        assert_eq!(insert(&MONTH_YEAR, "03/99/"), "03/1999");
    }

    #[test]
    fn test_delete_never_reinserts_separator() {
        assert_eq!(delete(&DATE, "25/12"), "25/12");
        assert_eq!(delete(&DATE, "25"), "25");
        assert_eq!(delete(&DATE, "01/01/20/"), "01/01/20");
    }

    #[test]
    fn test_time_layouts() {
        assert_eq!(insert(&TIME, "2"), "2");
        assert_eq!(insert(&TIME, "24"), "23:");
        assert_eq!(insert(&TIME, "7"), "07:");
        assert_eq!(insert(&TIME, "1234"), "12:34:");
        assert_eq!(
            format_single(&TIME, "123456", EditIntent::Insert, &opts()),
            ("12:34:56".to_string(), true)
        );
        assert_eq!(insert(&TIME, "0:"), "00:");
        assert_eq!(insert(&SHORT_TIME, "0930"), "09:30");
        assert_eq!(insert(&MINUTE_SECOND, "75"), "07:5");
    }

    #[test]
    fn test_month_year_layouts() {
        assert_eq!(insert(&MONTH_YEAR, "3"), "03/");
        assert_eq!(insert(&MONTH_YEAR, "122024"), "12/2024");
        assert_eq!(insert(&SHORT_MONTH_YEAR, "13"), "12/");
        assert_eq!(
            format_single(&SHORT_MONTH_YEAR, "1225/", EditIntent::Insert, &opts()),
            ("12/25".to_string(), true)
        );
    }

    #[test]
    fn test_extra_input_after_complete_is_dropped() {
        assert_eq!(insert(&DATE, "25/12/20249999"), "25/12/2024");
        assert_eq!(insert(&DATE, "25/12/2024 ~ 01"), "25/12/2024");
    }

    #[test]
    fn test_reapplying_is_stable() {
        for input in ["2", "4", "25", "1/", "0/", "1513", "01/01/20/", "3x5", "123456"] {
            for layout in [&DATE, &TIME, &MONTH_YEAR, &SHORT_MONTH_YEAR] {
                let once = insert(layout, input);
                assert_eq!(insert(layout, &once), once, "{input}");
                let once = delete(layout, input);
                assert_eq!(delete(layout, &once), once, "{input}");
            }
        }
    }

    #[test]
    fn test_max_length() {
        assert_eq!(DATE.max_length(), 10);
        assert_eq!(MONTH_YEAR.max_length(), 7);
        assert_eq!(SHORT_MONTH_YEAR.max_length(), 5);
        assert_eq!(TIME.max_length(), 8);
        assert_eq!(SHORT_TIME.max_length(), 5);
    }

    #[test]
    fn test_sort_key() {
        let o = opts();
        let tokens = tokenize("31/12/2020", &DATE, false);
        let late = walk(&tokens, &DATE, EditIntent::Insert, &o);
        let tokens = tokenize("01/01/2021", &DATE, false);
        let early = walk(&tokens, &DATE, EditIntent::Insert, &o);
        assert!(late.sort_key(&DATE, &o) < early.sort_key(&DATE, &o));

        let tokens = tokenize("31/02/2020", &DATE, false);
        let invalid = walk(&tokens, &DATE, EditIntent::Insert, &o);
        assert_eq!(invalid.sort_key(&DATE, &o), None);

        let tokens = tokenize("12:30", &SHORT_TIME, false);
        let time = walk(&tokens, &SHORT_TIME, EditIntent::Insert, &o);
        assert_eq!(time.sort_key(&SHORT_TIME, &o), None);
    }
}
