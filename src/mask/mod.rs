//! Keystroke-level input masks.
//!
//! Every mask takes whatever the field currently holds, possibly half-typed
//! or already formatted by a previous call, and returns the next valid
//! partial or complete formatted value. Masks are pure functions of
//! `(format, value, intent, options)`:
//!
//! - re-applying a mask to its own output returns the same output;
//! - appending digits never shortens the output, and the output never
//!   exceeds the format's maximum length;
//! - with [`EditIntent::Delete`] no trailing separator is re-inserted, so
//!   backspacing over a separator is never undone.
//!
//! # Example
//!
//! ```
//! use fieldmask::mask::{apply_mask, EditIntent, FormatId};
//!
//! let out = apply_mask(FormatId::Cpf, "1114447773", EditIntent::Insert);
//! assert_eq!(out.value, "111.444.777-3");
//! assert!(!out.is_complete);
//!
//! let out = apply_mask(FormatId::Cpf, "111.444.777-35", EditIntent::Insert);
//! assert!(out.is_complete);
//! assert_eq!(out.max_length, Some(14));
//! ```

mod coordinate;
mod groups;
mod range;
mod segments;

use std::fmt;
use std::str::FromStr;

use crate::century::{self, CenturyWindow};
use crate::digits::truncate_chars;
use crate::error::MaskError;

use segments::SegmentLayout;

/// Separator printed between the two sides of a range value.
pub const RANGE_SEPARATOR: &str = " ~ ";

/// Default number of decimals kept by the coordinate masks.
pub const DEFAULT_COORDINATE_PRECISION: usize = 6;

/// What the keystroke that triggered the mask was doing.
///
/// Derived by the caller from the key event: backspace and delete map to
/// [`EditIntent::Delete`], everything else to [`EditIntent::Insert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum EditIntent {
    /// Characters are being typed or pasted.
    #[default]
    Insert,
    /// Characters are being removed.
    Delete,
}

impl EditIntent {
    /// Maps a "key is backspace/delete" flag to an intent.
    #[inline]
    pub const fn from_deleting(deleting: bool) -> Self {
        if deleting {
            Self::Delete
        } else {
            Self::Insert
        }
    }

    #[inline]
    pub(crate) const fn is_insert(&self) -> bool {
        matches!(self, Self::Insert)
    }
}

/// Tunables shared by every mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaskOptions {
    /// Window used to expand two-digit years.
    pub century: CenturyWindow,
    /// Year the century window is anchored to.
    pub current_year: i32,
    /// Decimals kept by the latitude/longitude masks.
    pub precision: usize,
}

impl MaskOptions {
    /// Options anchored to the local clock's current year.
    pub fn new() -> Self {
        Self {
            century: CenturyWindow::default(),
            current_year: century::current_year(),
            precision: DEFAULT_COORDINATE_PRECISION,
        }
    }

    /// Anchors the century window to a fixed year.
    pub fn with_current_year(mut self, year: i32) -> Self {
        self.current_year = year;
        self
    }

    /// Replaces the century window.
    pub fn with_century(mut self, century: CenturyWindow) -> Self {
        self.century = century;
        self
    }

    /// Sets the coordinate precision.
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }
}

impl Default for MaskOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of applying a mask once.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MaskOutput {
    /// The reformatted value to write back into the field.
    pub value: String,
    /// Maximum length the field should accept: the current length once the
    /// value is complete, otherwise the format maximum. `None` for
    /// unbounded formats.
    pub max_length: Option<usize>,
    /// True when the value has the complete shape of its format.
    pub is_complete: bool,
}

impl MaskOutput {
    fn passthrough(value: &str) -> Self {
        Self {
            value: value.to_string(),
            max_length: None,
            is_complete: false,
        }
    }
}

/// Field shapes supported by the mask engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FormatId {
    /// `(DD) DDDD-DDDD` or `(DD) DDDDD-DDDD`
    Phone,
    /// `DD/MM/YYYY`
    Date,
    /// `DD/MM/YYYY ~ DD/MM/YYYY`
    DateRange,
    /// `MM/YYYY`
    MonthYear,
    /// `MM/YYYY ~ MM/YYYY`
    MonthYearRange,
    /// `MM/YY`
    ShortMonthYear,
    /// `MM/YY ~ MM/YY`
    ShortMonthYearRange,
    /// `HH:MM:SS`
    Time,
    /// `HH:MM`
    ShortTime,
    /// `MM:SS`
    MinuteSecond,
    /// `000.000.000-00`
    Cpf,
    /// `00.000.000/0000-00`
    Cnpj,
    /// CPF layout up to 11 digits, CNPJ layout beyond.
    CpfCnpj,
    /// Brazilian postal code, `00000-000`
    Cep,
    /// `0000 0000 0000 0000`, up to `0000 0000 0000 0000 000`
    CreditCard,
    /// Digits only, unbounded.
    Number,
    /// Decimal degrees in [-90, 90].
    Latitude,
    /// Decimal degrees in [-180, 180].
    Longitude,
    /// `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx`
    Uuid,
}

impl FormatId {
    /// Every format, in declaration order.
    pub const ALL: [FormatId; 19] = [
        Self::Phone,
        Self::Date,
        Self::DateRange,
        Self::MonthYear,
        Self::MonthYearRange,
        Self::ShortMonthYear,
        Self::ShortMonthYearRange,
        Self::Time,
        Self::ShortTime,
        Self::MinuteSecond,
        Self::Cpf,
        Self::Cnpj,
        Self::CpfCnpj,
        Self::Cep,
        Self::CreditCard,
        Self::Number,
        Self::Latitude,
        Self::Longitude,
        Self::Uuid,
    ];

    /// Canonical lowercase identifier.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Phone => "phone",
            Self::Date => "date",
            Self::DateRange => "daterange",
            Self::MonthYear => "monthyear",
            Self::MonthYearRange => "monthyearrange",
            Self::ShortMonthYear => "shortmonthyear",
            Self::ShortMonthYearRange => "shortmonthyearrange",
            Self::Time => "time",
            Self::ShortTime => "shorttime",
            Self::MinuteSecond => "minutesecond",
            Self::Cpf => "cpf",
            Self::Cnpj => "cnpj",
            Self::CpfCnpj => "cpfcnpj",
            Self::Cep => "cep",
            Self::CreditCard => "creditcard",
            Self::Number => "number",
            Self::Latitude => "latitude",
            Self::Longitude => "longitude",
            Self::Uuid => "uuid",
        }
    }

    /// True for the two-value `A ~ B` formats.
    pub const fn is_range(&self) -> bool {
        matches!(
            self,
            Self::DateRange | Self::MonthYearRange | Self::ShortMonthYearRange
        )
    }

    fn segment_layout(&self) -> Option<&'static SegmentLayout> {
        match self {
            Self::Date | Self::DateRange => Some(&segments::DATE),
            Self::MonthYear | Self::MonthYearRange => Some(&segments::MONTH_YEAR),
            Self::ShortMonthYear | Self::ShortMonthYearRange => Some(&segments::SHORT_MONTH_YEAR),
            Self::Time => Some(&segments::TIME),
            Self::ShortTime => Some(&segments::SHORT_TIME),
            Self::MinuteSecond => Some(&segments::MINUTE_SECOND),
            _ => None,
        }
    }

    /// Longest value the format can produce, `None` when unbounded.
    pub fn max_length(&self, options: &MaskOptions) -> Option<usize> {
        if let Some(layout) = self.segment_layout() {
            let single = layout.max_length();
            return Some(if self.is_range() {
                single * 2 + RANGE_SEPARATOR.len()
            } else {
                single
            });
        }

        match self {
            Self::Phone => Some(groups::PHONE_MAX_LENGTH),
            Self::Cpf => Some(groups::CPF.max_length()),
            Self::Cnpj | Self::CpfCnpj => Some(groups::CNPJ.max_length()),
            Self::Cep => Some(groups::CEP.max_length()),
            Self::CreditCard => Some(groups::CARD.max_length()),
            Self::Uuid => Some(groups::UUID.max_length()),
            Self::Latitude => Some(coordinate::LATITUDE.max_length(options.precision)),
            Self::Longitude => Some(coordinate::LONGITUDE.max_length(options.precision)),
            _ => None,
        }
    }
}

impl fmt::Display for FormatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FormatId {
    type Err = MaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let format = match s.trim().to_ascii_lowercase().as_str() {
            "phone" | "tel" => Self::Phone,
            "date" | "data" => Self::Date,
            "daterange" => Self::DateRange,
            "monthyear" => Self::MonthYear,
            "monthyearrange" => Self::MonthYearRange,
            "shortmonthyear" => Self::ShortMonthYear,
            "shortmonthyearrange" => Self::ShortMonthYearRange,
            "time" => Self::Time,
            "shorttime" => Self::ShortTime,
            "minutesecond" => Self::MinuteSecond,
            "cpf" => Self::Cpf,
            "cnpj" => Self::Cnpj,
            "cpfcnpj" => Self::CpfCnpj,
            "cep" | "postalcode" => Self::Cep,
            "creditcard" | "debitcard" => Self::CreditCard,
            "number" | "num" | "month" => Self::Number,
            "latitude" | "lat" => Self::Latitude,
            "longitude" | "long" | "lng" => Self::Longitude,
            "uuid" | "guid" => Self::Uuid,
            _ => return Err(MaskError::UnknownFormat(s.to_string())),
        };
        Ok(format)
    }
}

/// Applies a mask using options anchored to the current year.
pub fn apply_mask(format: FormatId, value: &str, intent: EditIntent) -> MaskOutput {
    apply_mask_with(format, value, intent, &MaskOptions::default())
}

/// Applies a mask with explicit options.
///
/// # Example
///
/// ```
/// use fieldmask::mask::{apply_mask_with, EditIntent, FormatId, MaskOptions};
///
/// let options = MaskOptions::new().with_current_year(2025);
/// let out = apply_mask_with(FormatId::Date, "3", EditIntent::Insert, &options);
/// assert_eq!(out.value, "3");
/// let out = apply_mask_with(FormatId::Date, "4", EditIntent::Insert, &options);
/// assert_eq!(out.value, "04/");
/// ```
pub fn apply_mask_with(
    format: FormatId,
    value: &str,
    intent: EditIntent,
    options: &MaskOptions,
) -> MaskOutput {
    let (mut text, is_complete) = match (format, format.segment_layout()) {
        (_, Some(layout)) if format.is_range() => {
            range::format_range(layout, value, intent, options)
        }
        (_, Some(layout)) => segments::format_single(layout, value, intent, options),
        (FormatId::Phone, _) => groups::format_phone(value),
        (FormatId::Cpf, _) => groups::CPF.format_digits(value),
        (FormatId::Cnpj, _) => groups::CNPJ.format_digits(value),
        (FormatId::CpfCnpj, _) => groups::format_cpf_cnpj(value),
        (FormatId::Cep, _) => groups::CEP.format_digits(value),
        (FormatId::CreditCard, _) => groups::format_card(value),
        (FormatId::Uuid, _) => groups::format_uuid(value),
        (FormatId::Latitude, _) => coordinate::LATITUDE.format(value, options.precision),
        (FormatId::Longitude, _) => coordinate::LONGITUDE.format(value, options.precision),
        // number
        _ => (crate::digits::extract_digits(value), false),
    };

    let max_length = format.max_length(options);
    if let Some(max) = max_length {
        truncate_chars(&mut text, max);
    }

    MaskOutput {
        max_length: if is_complete {
            Some(text.len())
        } else {
            max_length
        },
        value: text,
        is_complete,
    }
}

/// Applies a mask named by its identifier.
///
/// An unknown identifier is a caller configuration error: it is logged and
/// the value is returned unchanged so that typing is never blocked.
pub fn mask_by_name(format: &str, value: &str, intent: EditIntent) -> MaskOutput {
    match format.parse::<FormatId>() {
        Ok(format) => apply_mask(format, value, intent),
        Err(err) => {
            tracing::warn!(%err, "mask left value untouched");
            MaskOutput::passthrough(value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> MaskOptions {
        MaskOptions::new().with_current_year(2025)
    }

    fn mask(format: FormatId, value: &str) -> MaskOutput {
        apply_mask_with(format, value, EditIntent::Insert, &opts())
    }

    #[test]
    fn test_format_names_round_trip() {
        for format in FormatId::ALL {
            assert_eq!(format.name().parse::<FormatId>(), Ok(format));
        }
    }

    #[test]
    fn test_format_aliases() {
        assert_eq!("tel".parse::<FormatId>(), Ok(FormatId::Phone));
        assert_eq!("data".parse::<FormatId>(), Ok(FormatId::Date));
        assert_eq!("debitcard".parse::<FormatId>(), Ok(FormatId::CreditCard));
        assert_eq!("lng".parse::<FormatId>(), Ok(FormatId::Longitude));
        assert_eq!("GUID".parse::<FormatId>(), Ok(FormatId::Uuid));
        assert_eq!(
            "zip".parse::<FormatId>(),
            Err(MaskError::UnknownFormat("zip".into()))
        );
    }

    #[test]
    fn test_max_lengths() {
        let o = opts();
        assert_eq!(FormatId::Date.max_length(&o), Some(10));
        assert_eq!(FormatId::DateRange.max_length(&o), Some(23));
        assert_eq!(FormatId::MonthYear.max_length(&o), Some(7));
        assert_eq!(FormatId::ShortMonthYearRange.max_length(&o), Some(13));
        assert_eq!(FormatId::Time.max_length(&o), Some(8));
        assert_eq!(FormatId::Phone.max_length(&o), Some(15));
        assert_eq!(FormatId::Cpf.max_length(&o), Some(14));
        assert_eq!(FormatId::Cnpj.max_length(&o), Some(18));
        assert_eq!(FormatId::Cep.max_length(&o), Some(9));
        assert_eq!(FormatId::CreditCard.max_length(&o), Some(23));
        assert_eq!(FormatId::Uuid.max_length(&o), Some(36));
        assert_eq!(FormatId::Latitude.max_length(&o), Some(10));
        assert_eq!(FormatId::Longitude.max_length(&o), Some(11));
        assert_eq!(FormatId::Number.max_length(&o), None);
    }

    #[test]
    fn test_complete_value_locks_length() {
        let out = mask(FormatId::Date, "25122024");
        assert_eq!(out.value, "25/12/2024");
        assert!(out.is_complete);
        assert_eq!(out.max_length, Some(10));

        let out = mask(FormatId::Date, "2512");
        assert!(!out.is_complete);
        assert_eq!(out.max_length, Some(10));
    }

    #[test]
    fn test_card_mask_grows_to_nineteen_digits() {
        let out = mask(FormatId::CreditCard, "4532015112830366");
        assert_eq!(out.value, "4532 0151 1283 0366");
        assert!(!out.is_complete);
        assert_eq!(out.max_length, Some(23));

        let out = mask(FormatId::CreditCard, "5555555555554444");
        assert!(out.is_complete);
        assert_eq!(out.max_length, Some(19));

        let out = mask(FormatId::CreditCard, "50786018700001279851");
        assert_eq!(out.value, "5078 6018 7000 0127 985");
        assert!(out.is_complete);
    }

    #[test]
    fn test_extreme_current_year_does_not_panic() {
        for year in [i32::MAX, i32::MIN] {
            let options = MaskOptions::new().with_current_year(year);
            let out = apply_mask_with(FormatId::Date, "01/01/30/", EditIntent::Insert, &options);
            assert!(out.value.len() <= 10, "{}", out.value);
            let _ = apply_mask_with(FormatId::DateRange, "0101303112", EditIntent::Insert, &options);
        }
    }

    #[test]
    fn test_number_mask() {
        let out = mask(FormatId::Number, "1a2b3");
        assert_eq!(out.value, "123");
        assert_eq!(out.max_length, None);
        assert!(!out.is_complete);
    }

    #[test]
    fn test_mask_by_name_unknown_format_passes_through() {
        let out = mask_by_name("zip", "12ab", EditIntent::Insert);
        assert_eq!(out.value, "12ab");
        assert_eq!(out.max_length, None);
        assert!(!out.is_complete);
    }

    #[test]
    fn test_mask_by_name_known_format() {
        let out = mask_by_name("cep", "01310100", EditIntent::Insert);
        assert_eq!(out.value, "01310-100");
        assert!(out.is_complete);
    }

    #[test]
    fn test_edit_intent_from_flag() {
        assert_eq!(EditIntent::from_deleting(true), EditIntent::Delete);
        assert_eq!(EditIntent::from_deleting(false), EditIntent::Insert);
        assert_eq!(EditIntent::default(), EditIntent::Insert);
    }
}
