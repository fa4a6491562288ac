//! Rule vocabulary and rule-list parsing.
//!
//! A field declares its rules as a whitespace-separated token list, e.g.
//! `"required cpf"`, `"creditcard visa"` or `"after:today before 31/12/2030"`.
//! Parameterised rules take their parameters either from the following
//! tokens or attached with a colon. Two rules joined by `or` pass when
//! either passes.
//!
//! # Example
//!
//! ```
//! use fieldmask::rules::{parse_rules, Bound, Rule};
//! use fieldmask::CardBrand;
//!
//! let rules: Vec<Rule> = parse_rules("req creditcard visa after:today")
//!     .into_iter()
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//!
//! assert_eq!(
//!     rules,
//!     vec![
//!         Rule::Required,
//!         Rule::CreditCard(Some(CardBrand::Visa)),
//!         Rule::After(Bound::Today),
//!     ]
//! );
//! ```

use std::fmt;
use std::iter::Peekable;
use std::str::{FromStr, SplitWhitespace};

use crate::card::CardBrand;
use crate::error::RuleError;

/// Parameter token that stands for a literal space in character sets.
pub const SPACE_TOKEN: &str = "space";

/// Reference value for `after`, `before` and `to`.
#[derive(Debug, Clone, PartialEq)]
pub enum Bound {
    /// The context's current date.
    Today,
    /// A `DD/MM/YYYY` date, resolved when the rule is evaluated.
    Date(String),
    /// A plain number.
    Number(f64),
}

impl FromStr for Bound {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("today") {
            return Ok(Self::Today);
        }
        if s.contains('/') {
            return Ok(Self::Date(s.to_string()));
        }
        s.replace(',', ".")
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map(Self::Number)
            .ok_or(())
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Today => f.write_str("today"),
            Self::Date(date) => f.write_str(date),
            Self::Number(n) => write!(f, "{}", n),
        }
    }
}

/// Shape accepted by the time rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeShape {
    /// `HH:MM:SS`
    HourMinuteSecond,
    /// `HH:MM`
    HourMinute,
    /// `MM:SS`
    MinuteSecond,
}

/// Password strength thresholds, counted in character classes
/// (lowercase, uppercase, digit, symbol).
pub mod strength {
    /// Two character classes.
    pub const WEAK: u8 = 2;
    /// Three character classes.
    pub const MEDIUM: u8 = 3;
    /// All four character classes.
    pub const STRONG: u8 = 4;
}

fn parse_strength(s: &str) -> Option<u8> {
    match s.to_ascii_lowercase().as_str() {
        "weak" => Some(strength::WEAK),
        "medium" => Some(strength::MEDIUM),
        "strong" => Some(strength::STRONG),
        other => other.parse().ok(),
    }
}

/// A single validation rule.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    /// Value must contain a non-whitespace character.
    Required,
    /// Decimal number, `,` accepted as decimal separator.
    Number,
    /// E-mail address.
    Email,
    /// Web address, scheme and `www.` optional.
    Url,
    /// Real calendar date, `DD/MM/YYYY` or `DD/MM/YY`.
    Date,
    /// Two dates joined by `~`, first not after second.
    DateRange,
    /// Integer month, 1 to 12.
    Month,
    /// `MM/YYYY`.
    MonthYear,
    /// Two month/year values joined by `~`, first not after second.
    MonthYearRange,
    /// `MM/YY`.
    ShortMonthYear,
    /// Two `MM/YY` values joined by `~`, first not after second.
    ShortMonthYearRange,
    /// Clock time.
    Time(TimeShape),
    /// Brazilian individual taxpayer number.
    Cpf,
    /// Brazilian company number.
    Cnpj,
    /// CPF or CNPJ, chosen by digit count.
    CpfCnpj,
    /// Luhn-valid card of a known brand, optionally a declared one.
    CreditCard(Option<CardBrand>),
    /// Minimum number of character classes.
    Password(u8),
    /// Value must not be before the bound.
    After(Bound),
    /// Value must not be after the bound.
    Before(Bound),
    /// Value must lie between both bounds, in either order.
    Between(Bound, Bound),
    /// Value must equal the named field's value.
    Equal(String),
    /// Value must contain at least one of the characters.
    Contains(String),
    /// Value must contain every one of the characters.
    ContainsAllChars(String),
    /// Value must contain none of the characters.
    NotChars(String),
    /// Exact length in characters.
    Length(usize),
    /// Minimum length in characters.
    MinLength(usize),
    /// Maximum length in characters.
    MaxLength(usize),
    /// Birth date at least this many years ago.
    MinAge(u32),
    /// Birth date at most this many years ago.
    MaxAge(u32),
    /// Decimal latitude in [-90, 90].
    Latitude,
    /// Decimal longitude in [-180, 180].
    Longitude,
    /// `latitude, longitude` pair.
    Coordinate,
    /// Hyphenated UUID.
    Uuid,
    /// Passes when any alternative passes.
    Any(Vec<Rule>),
    /// Unrecognised token, always passes.
    Unknown(String),
}

impl Rule {
    /// Keyword used in logs and in `failed_rule`.
    pub fn name(&self) -> &str {
        match self {
            Self::Required => "required",
            Self::Number => "number",
            Self::Email => "email",
            Self::Url => "url",
            Self::Date => "date",
            Self::DateRange => "daterange",
            Self::Month => "month",
            Self::MonthYear => "monthyear",
            Self::MonthYearRange => "monthyearrange",
            Self::ShortMonthYear => "shortmonthyear",
            Self::ShortMonthYearRange => "shortmonthyearrange",
            Self::Time(TimeShape::HourMinuteSecond) => "time",
            Self::Time(TimeShape::HourMinute) => "shorttime",
            Self::Time(TimeShape::MinuteSecond) => "minutesecond",
            Self::Cpf => "cpf",
            Self::Cnpj => "cnpj",
            Self::CpfCnpj => "cpfcnpj",
            Self::CreditCard(_) => "creditcard",
            Self::Password(_) => "password",
            Self::After(_) => "after",
            Self::Before(_) => "before",
            Self::Between(..) => "to",
            Self::Equal(_) => "eq",
            Self::Contains(_) => "contains",
            Self::ContainsAllChars(_) => "containsallchars",
            Self::NotChars(_) => "notchars",
            Self::Length(_) => "len",
            Self::MinLength(_) => "minlen",
            Self::MaxLength(_) => "maxlen",
            Self::MinAge(_) => "minage",
            Self::MaxAge(_) => "maxage",
            Self::Latitude => "latitude",
            Self::Longitude => "longitude",
            Self::Coordinate => "coordinate",
            Self::Uuid => "uuid",
            Self::Any(_) => "or",
            Self::Unknown(token) => token.as_str(),
        }
    }
}

/// Parses a rule token list.
///
/// Each item is one rule, or the error that made its tokens unusable; a
/// bad parameter never affects the rules around it.
pub fn parse_rules(rules: &str) -> Vec<Result<Rule, RuleError>> {
    RuleParser::new(rules).collect()
}

struct RuleParser<'a> {
    tokens: Peekable<SplitWhitespace<'a>>,
}

impl<'a> RuleParser<'a> {
    fn new(rules: &'a str) -> Self {
        Self {
            tokens: rules.split_whitespace().peekable(),
        }
    }

    fn next_is_or(&mut self) -> bool {
        self.tokens
            .peek()
            .is_some_and(|t| t.eq_ignore_ascii_case("or"))
    }

    /// Inline (`kw:param`) parameter, or else the next token.
    fn param(&mut self, keyword: &str, inline: Option<&'a str>) -> Result<&'a str, RuleError> {
        match inline {
            Some(p) if !p.is_empty() => Ok(p),
            _ => self.tokens.next().ok_or_else(|| RuleError::MissingParameter {
                rule: keyword.to_string(),
            }),
        }
    }

    /// Consumes the next token only when `accept` recognises it.
    fn optional<T>(&mut self, accept: impl Fn(&str) -> Option<T>) -> Option<T> {
        let next = *self.tokens.peek()?;
        let value = accept(next)?;
        self.tokens.next();
        Some(value)
    }

    fn parse_one(&mut self, token: &'a str) -> Result<Rule, RuleError> {
        let (keyword, inline) = match token.split_once(':') {
            Some((k, p)) => (k, Some(p)),
            None => (token, None),
        };
        let lower = keyword.to_ascii_lowercase();

        let invalid = |value: &str| RuleError::InvalidParameter {
            rule: lower.clone(),
            value: value.to_string(),
        };

        let rule = match lower.as_str() {
            "required" | "req" | "obg" => Rule::Required,
            "number" | "num" | "decimal" | "money" | "integer" | "int" => Rule::Number,
            "email" | "mail" | "e-mail" => Rule::Email,
            "url" | "link" => Rule::Url,
            "date" | "data" => Rule::Date,
            "daterange" => Rule::DateRange,
            "month" => Rule::Month,
            "monthyear" => Rule::MonthYear,
            "monthyearrange" => Rule::MonthYearRange,
            "shortmonthyear" => Rule::ShortMonthYear,
            "shortmonthyearrange" => Rule::ShortMonthYearRange,
            "time" => Rule::Time(TimeShape::HourMinuteSecond),
            "shorttime" => Rule::Time(TimeShape::HourMinute),
            "minutesecond" => Rule::Time(TimeShape::MinuteSecond),
            "cpf" => Rule::Cpf,
            "cnpj" => Rule::Cnpj,
            "cpfcnpj" => Rule::CpfCnpj,
            "latitude" | "lat" => Rule::Latitude,
            "longitude" | "long" | "lng" => Rule::Longitude,
            "coordinate" => Rule::Coordinate,
            "uuid" | "guid" => Rule::Uuid,
            "creditcard" | "debitcard" => match inline {
                Some(brand) => Rule::CreditCard(Some(brand.parse()?)),
                None => Rule::CreditCard(self.optional(|t| t.parse().ok())),
            },
            "password" => match inline {
                Some(p) => Rule::Password(parse_strength(p).ok_or_else(|| invalid(p))?),
                None => Rule::Password(self.optional(parse_strength).unwrap_or(strength::MEDIUM)),
            },
            "after" | "before" => {
                let p = self.param(&lower, inline)?;
                let bound = p.parse::<Bound>().map_err(|_| invalid(p))?;
                if lower == "after" {
                    Rule::After(bound)
                } else {
                    Rule::Before(bound)
                }
            }
            "to" => {
                let (first, second) = match inline.and_then(|p| p.split_once(':')) {
                    Some(pair) => pair,
                    None => {
                        let first = self.param(&lower, inline)?;
                        (first, self.param(&lower, None)?)
                    }
                };
                Rule::Between(
                    first.parse().map_err(|_| invalid(first))?,
                    second.parse().map_err(|_| invalid(second))?,
                )
            }
            "eq" | "equal" => Rule::Equal(self.param(&lower, inline)?.to_string()),
            "contains" | "containsallchars" | "notchars" | "notchar" => {
                let p = self.param(&lower, inline)?;
                let chars = if p.eq_ignore_ascii_case(SPACE_TOKEN) {
                    " ".to_string()
                } else {
                    p.to_string()
                };
                match lower.as_str() {
                    "contains" => Rule::Contains(chars),
                    "containsallchars" => Rule::ContainsAllChars(chars),
                    _ => Rule::NotChars(chars),
                }
            }
            "len" | "minlen" | "maxlen" => {
                let p = self.param(&lower, inline)?;
                let n = p.parse::<usize>().map_err(|_| invalid(p))?;
                match lower.as_str() {
                    "len" => Rule::Length(n),
                    "minlen" => Rule::MinLength(n),
                    _ => Rule::MaxLength(n),
                }
            }
            "age" | "minage" | "maxage" => {
                let p = self.param(&lower, inline)?;
                let n = p.parse::<u32>().map_err(|_| invalid(p))?;
                if lower == "maxage" {
                    Rule::MaxAge(n)
                } else {
                    Rule::MinAge(n)
                }
            }
            _ => Rule::Unknown(token.to_string()),
        };
        Ok(rule)
    }
}

impl Iterator for RuleParser<'_> {
    type Item = Result<Rule, RuleError>;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.tokens.next()?;
        let mut item = self.parse_one(token);

        while self.next_is_or() {
            self.tokens.next();
            // a trailing `or` has nothing to combine with
            let Some(token) = self.tokens.next() else {
                break;
            };
            let alternative = self.parse_one(token);
            item = match (item, alternative) {
                (Ok(Rule::Any(mut alternatives)), Ok(rule)) => {
                    alternatives.push(rule);
                    Ok(Rule::Any(alternatives))
                }
                (Ok(first), Ok(second)) => Ok(Rule::Any(vec![first, second])),
                (Err(err), _) | (_, Err(err)) => Err(err),
            };
        }

        Some(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(rules: &str) -> Vec<Rule> {
        parse_rules(rules)
            .into_iter()
            .collect::<Result<_, _>>()
            .unwrap()
    }

    #[test]
    fn test_simple_rules_and_aliases() {
        assert_eq!(
            parse_ok("obg num mail link data"),
            vec![Rule::Required, Rule::Number, Rule::Email, Rule::Url, Rule::Date]
        );
        assert_eq!(parse_ok("REQUIRED Cpf"), vec![Rule::Required, Rule::Cpf]);
        assert_eq!(parse_ok(""), vec![]);
    }

    #[test]
    fn test_creditcard_brand_is_optional() {
        assert_eq!(parse_ok("creditcard"), vec![Rule::CreditCard(None)]);
        assert_eq!(
            parse_ok("creditcard elo required"),
            vec![Rule::CreditCard(Some(CardBrand::Elo)), Rule::Required]
        );
        assert_eq!(
            parse_ok("debitcard required"),
            vec![Rule::CreditCard(None), Rule::Required]
        );
        assert_eq!(
            parse_rules("creditcard:acme"),
            vec![Err(RuleError::UnknownBrand("acme".into()))]
        );
    }

    #[test]
    fn test_password_strength() {
        assert_eq!(parse_ok("password"), vec![Rule::Password(3)]);
        assert_eq!(parse_ok("password strong"), vec![Rule::Password(4)]);
        assert_eq!(parse_ok("password:weak"), vec![Rule::Password(2)]);
        assert_eq!(parse_ok("password 1"), vec![Rule::Password(1)]);
        assert_eq!(
            parse_ok("password required"),
            vec![Rule::Password(3), Rule::Required]
        );
    }

    #[test]
    fn test_bounds() {
        assert_eq!(
            parse_ok("after today before:31/12/2030"),
            vec![
                Rule::After(Bound::Today),
                Rule::Before(Bound::Date("31/12/2030".into()))
            ]
        );
        assert_eq!(
            parse_ok("to 1 10"),
            vec![Rule::Between(Bound::Number(1.0), Bound::Number(10.0))]
        );
        assert_eq!(
            parse_ok("to:2,5:7"),
            vec![Rule::Between(Bound::Number(2.5), Bound::Number(7.0))]
        );
    }

    #[test]
    fn test_missing_parameter() {
        assert_eq!(
            parse_rules("after"),
            vec![Err(RuleError::MissingParameter {
                rule: "after".into()
            })]
        );
        assert_eq!(
            parse_rules("to 5"),
            vec![Err(RuleError::MissingParameter { rule: "to".into() })]
        );
    }

    #[test]
    fn test_invalid_parameter_does_not_affect_neighbours() {
        let parsed = parse_rules("required minlen ten cpf");
        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed[0], Ok(Rule::Required));
        assert_eq!(
            parsed[1],
            Err(RuleError::InvalidParameter {
                rule: "minlen".into(),
                value: "ten".into()
            })
        );
        assert_eq!(parsed[2], Ok(Rule::Cpf));
    }

    #[test]
    fn test_character_sets() {
        assert_eq!(
            parse_ok("contains @ notchars space containsallchars:aeiou"),
            vec![
                Rule::Contains("@".into()),
                Rule::NotChars(" ".into()),
                Rule::ContainsAllChars("aeiou".into())
            ]
        );
    }

    #[test]
    fn test_length_and_age() {
        assert_eq!(
            parse_ok("len 8 minlen:2 maxlen 5 age 18 maxage:65"),
            vec![
                Rule::Length(8),
                Rule::MinLength(2),
                Rule::MaxLength(5),
                Rule::MinAge(18),
                Rule::MaxAge(65)
            ]
        );
    }

    #[test]
    fn test_or_combinator() {
        assert_eq!(
            parse_ok("cpf or cnpj or email required"),
            vec![
                Rule::Any(vec![Rule::Cpf, Rule::Cnpj, Rule::Email]),
                Rule::Required
            ]
        );
        assert_eq!(parse_ok("cpf or"), vec![Rule::Cpf]);
    }

    #[test]
    fn test_eq_and_unknown() {
        assert_eq!(
            parse_ok("eq:password form-control"),
            vec![
                Rule::Equal("password".into()),
                Rule::Unknown("form-control".into())
            ]
        );
    }

    #[test]
    fn test_bound_parsing() {
        assert_eq!("TODAY".parse::<Bound>(), Ok(Bound::Today));
        assert_eq!("1,5".parse::<Bound>(), Ok(Bound::Number(1.5)));
        assert_eq!("soon".parse::<Bound>(), Err(()));
        assert_eq!("NaN".parse::<Bound>(), Err(()));
    }
}
