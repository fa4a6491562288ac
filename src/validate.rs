//! Rule evaluation for a single field.
//!
//! [`validate_field`] parses a rule list and evaluates each rule in order
//! against the field's value, stopping at the first failure. Rules that
//! learn something about the value (the card brand, the document type)
//! leave annotations in the outcome, including when a later rule fails.
//!
//! An empty or whitespace-only value passes every rule except `required`,
//! so optional fields are only checked once something is typed.
//!
//! # Example
//!
//! ```
//! use fieldmask::validate::{validate_field, ValidationContext, CARD_BRAND};
//!
//! let ctx = ValidationContext::new();
//!
//! let outcome = validate_field("4532 0151 1283 0366", "required creditcard", &ctx);
//! assert!(outcome.valid);
//! assert_eq!(outcome.annotation(CARD_BRAND), Some("visa"));
//!
//! let outcome = validate_field("", "required cpf", &ctx);
//! assert!(!outcome.valid);
//! assert_eq!(outcome.failed_rule.as_deref(), Some("required"));
//! ```

use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use chrono::{Datelike, NaiveDate};

use crate::calendar::{age_on, ordinal_key, parse_date, parse_month_year};
use crate::century::CenturyWindow;
use crate::checks;
use crate::detect::detect_brand;
use crate::document::{self, DocumentKind};
use crate::error::RuleError;
use crate::luhn::luhn_checksum;
use crate::rules::{parse_rules, Bound, Rule};

/// Annotation holding the detected card brand class, or `"false"`.
pub const CARD_BRAND: &str = "cardbrand";

/// Annotation holding the document type (`cpf`/`cnpj`), or `"false"`.
pub const DOCUMENT_TYPE: &str = "documenttype";

/// Source of other fields' values for cross-field rules such as `eq`.
pub trait FieldLookup {
    /// Returns the current value of the named field, if it exists.
    fn field_value(&self, name: &str) -> Option<Cow<'_, str>>;
}

impl<S: BuildHasher> FieldLookup for HashMap<String, String, S> {
    fn field_value(&self, name: &str) -> Option<Cow<'_, str>> {
        self.get(name).map(|v| Cow::Borrowed(v.as_str()))
    }
}

impl FieldLookup for BTreeMap<String, String> {
    fn field_value(&self, name: &str) -> Option<Cow<'_, str>> {
        self.get(name).map(|v| Cow::Borrowed(v.as_str()))
    }
}

/// A lookup with no fields at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFields;

impl FieldLookup for NoFields {
    fn field_value(&self, _name: &str) -> Option<Cow<'_, str>> {
        None
    }
}

/// Adapts a closure into a [`FieldLookup`].
///
/// # Example
///
/// ```
/// use fieldmask::validate::{validate_field, FnLookup, ValidationContext};
///
/// let lookup = FnLookup(|name: &str| (name == "password").then(|| "s3cret".to_string()));
/// let ctx = ValidationContext::new().with_fields(&lookup);
/// assert!(validate_field("s3cret", "eq password", &ctx).valid);
/// ```
pub struct FnLookup<F>(pub F);

impl<F> FieldLookup for FnLookup<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn field_value(&self, name: &str) -> Option<Cow<'_, str>> {
        (self.0)(name).map(Cow::Owned)
    }
}

static NO_FIELDS: NoFields = NoFields;

/// Everything a rule may need besides the value itself.
#[derive(Clone, Copy)]
pub struct ValidationContext<'a> {
    fields: &'a dyn FieldLookup,
    today: NaiveDate,
    century: CenturyWindow,
}

impl<'a> ValidationContext<'a> {
    /// Context with no other fields, today's local date and the default
    /// century window.
    pub fn new() -> Self {
        Self {
            fields: &NO_FIELDS,
            today: chrono::Local::now().date_naive(),
            century: CenturyWindow::default(),
        }
    }

    /// Sets the lookup used by `eq`.
    pub fn with_fields(mut self, fields: &'a dyn FieldLookup) -> Self {
        self.fields = fields;
        self
    }

    /// Fixes the date used by `today` bounds and age rules.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Replaces the window used to expand two-digit years.
    pub fn with_century(mut self, century: CenturyWindow) -> Self {
        self.century = century;
        self
    }

    /// The date `today` resolves to.
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    fn parse_date(&self, value: &str) -> Option<NaiveDate> {
        parse_date(value, self.today.year(), self.century)
    }

    fn parse_month_year(&self, value: &str) -> Option<(i32, u32)> {
        parse_month_year(value, self.today.year(), self.century)
    }
}

impl Default for ValidationContext<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ValidationContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationContext")
            .field("today", &self.today)
            .field("century", &self.century)
            .finish_non_exhaustive()
    }
}

/// Verdict for one field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValidationOutcome {
    /// True when every rule passed.
    pub valid: bool,
    /// Keyword of the first failing rule.
    pub failed_rule: Option<String>,
    /// Facts learned while evaluating, keyed by annotation name.
    pub annotations: BTreeMap<String, String>,
}

impl ValidationOutcome {
    fn passing() -> Self {
        Self {
            valid: true,
            ..Self::default()
        }
    }

    fn fail(mut self, rule: &str) -> Self {
        self.valid = false;
        self.failed_rule = Some(rule.to_string());
        self
    }

    /// Returns an annotation value by name.
    pub fn annotation(&self, name: &str) -> Option<&str> {
        self.annotations.get(name).map(String::as_str)
    }
}

/// Validates `value` against a whitespace-separated rule list.
pub fn validate_field(value: &str, rules: &str, ctx: &ValidationContext<'_>) -> ValidationOutcome {
    validate_rules(value, &parse_rules(rules), ctx)
}

/// Validates `value` against an already parsed rule list.
///
/// A rule that failed to parse fails the field with its keyword as
/// `failed_rule`.
pub fn validate_rules(
    value: &str,
    rules: &[Result<Rule, RuleError>],
    ctx: &ValidationContext<'_>,
) -> ValidationOutcome {
    let mut outcome = ValidationOutcome::passing();

    for parsed in rules {
        let rule = match parsed {
            Ok(rule) => rule,
            Err(err) => {
                tracing::warn!(%err, "rule list is misconfigured");
                return outcome.fail(err.rule());
            }
        };

        if !evaluate(rule, value, ctx, &mut outcome.annotations) {
            tracing::debug!(rule = rule.name(), "rule failed");
            return outcome.fail(rule.name());
        }
    }

    outcome
}

/// Evaluates a single rule, recording annotations as a side effect.
pub fn evaluate(
    rule: &Rule,
    value: &str,
    ctx: &ValidationContext<'_>,
    annotations: &mut BTreeMap<String, String>,
) -> bool {
    let blank = value.trim().is_empty();
    if blank && !matches!(rule, Rule::Required | Rule::Any(_)) {
        return true;
    }

    match rule {
        Rule::Required => !blank,
        Rule::Number => checks::parse_decimal(value).is_some(),
        Rule::Email => checks::is_email(value),
        Rule::Url => checks::is_url(value),
        Rule::Uuid => checks::is_uuid(value),
        Rule::Month => checks::is_month(value),
        Rule::Time(shape) => checks::is_time(value, *shape),
        Rule::Date => ctx.parse_date(value).is_some(),
        Rule::DateRange => ordered_range(value, |s| ctx.parse_date(s).map(ordinal_key)),
        Rule::MonthYear => ctx.parse_month_year(value).is_some(),
        Rule::MonthYearRange => ordered_range(value, |s| ctx.parse_month_year(s)),
        Rule::ShortMonthYear => short_month_year(value, ctx).is_some(),
        Rule::ShortMonthYearRange => ordered_range(value, |s| short_month_year(s, ctx)),
        Rule::Cpf => document::is_valid_cpf(value),
        Rule::Cnpj => document::is_valid_cnpj(value),
        Rule::CpfCnpj => {
            let kind = match crate::digits::extract_digits(value).len() {
                document::CPF_DIGITS => Some(DocumentKind::Cpf),
                document::CNPJ_DIGITS => Some(DocumentKind::Cnpj),
                _ => None,
            };
            annotations.insert(
                DOCUMENT_TYPE.to_string(),
                kind.map_or("false", |k| k.name()).to_string(),
            );
            document::detect_document(value).is_some()
        }
        Rule::CreditCard(declared) => {
            let detected = detect_brand(value);
            annotations.insert(
                CARD_BRAND.to_string(),
                detected.map_or("false", |b| b.name()).to_string(),
            );
            luhn_checksum(value)
                && match (declared, detected) {
                    (Some(declared), Some(detected)) => *declared == detected,
                    (None, detected) => detected.is_some(),
                    (Some(_), None) => false,
                }
        }
        Rule::Password(threshold) => checks::password_score(value) >= *threshold,
        Rule::After(bound) => compare(value, bound, ctx).is_some_and(|o| o != Ordering::Less),
        Rule::Before(bound) => compare(value, bound, ctx).is_some_and(|o| o != Ordering::Greater),
        Rule::Between(first, second) => {
            match (compare(value, first, ctx), compare(value, second, ctx)) {
                (Some(a), Some(b)) => {
                    (a != Ordering::Less && b != Ordering::Greater)
                        || (a != Ordering::Greater && b != Ordering::Less)
                }
                _ => false,
            }
        }
        Rule::Equal(field) => match ctx.fields.field_value(field) {
            Some(other) => other == value,
            None => {
                tracing::debug!(field = field.as_str(), "eq refers to a missing field");
                false
            }
        },
        Rule::Contains(set) => checks::contains_any(value, set),
        Rule::ContainsAllChars(set) => checks::contains_all(value, set),
        Rule::NotChars(set) => checks::contains_none(value, set),
        Rule::Length(n) => value.chars().count() == *n,
        Rule::MinLength(n) => value.chars().count() >= *n,
        Rule::MaxLength(n) => value.chars().count() <= *n,
        Rule::MinAge(years) => age(value, ctx).is_some_and(|a| i64::from(a) >= i64::from(*years)),
        Rule::MaxAge(years) => age(value, ctx).is_some_and(|a| i64::from(a) <= i64::from(*years)),
        Rule::Latitude => checks::is_latitude(value),
        Rule::Longitude => checks::is_longitude(value),
        Rule::Coordinate => checks::is_coordinate(value),
        Rule::Any(alternatives) => alternatives
            .iter()
            .any(|alt| evaluate(alt, value, ctx, annotations)),
        Rule::Unknown(token) => {
            tracing::debug!(token = token.as_str(), "ignoring unknown rule");
            true
        }
    }
}

/// Orders `value` against a bound. Dates compare as dates, anything else
/// as numbers; `None` when the two cannot be compared.
fn compare(value: &str, bound: &Bound, ctx: &ValidationContext<'_>) -> Option<Ordering> {
    match bound {
        Bound::Number(n) => checks::parse_decimal(value)?.partial_cmp(n),
        Bound::Today => Some(ctx.parse_date(value)?.cmp(&ctx.today)),
        Bound::Date(text) => Some(ctx.parse_date(value)?.cmp(&ctx.parse_date(text)?)),
    }
}

fn ordered_range<K: Ord>(value: &str, key: impl Fn(&str) -> Option<K>) -> bool {
    let parts: Vec<&str> = value.split('~').map(str::trim).collect();
    match *parts.as_slice() {
        [start, end] => matches!((key(start), key(end)), (Some(s), Some(e)) if s <= e),
        _ => false,
    }
}

fn short_month_year(value: &str, ctx: &ValidationContext<'_>) -> Option<(i32, u32)> {
    let (_, year) = value.trim().split_once('/')?;
    if year.len() != 2 {
        return None;
    }
    ctx.parse_month_year(value)
}

fn age(value: &str, ctx: &ValidationContext<'_>) -> Option<i32> {
    ctx.parse_date(value).map(|birth| age_on(birth, ctx.today))
}
