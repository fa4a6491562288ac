//! Error types.
//!
//! Nothing a user types is ever an error: partial input is reformatted and
//! failed rules are verdicts. [`MaskError`] and [`RuleError`] describe
//! mistakes made by the *caller*, such as naming a format that does not
//! exist or writing a rule list with a missing parameter. [`LookupError`]
//! is what an address service reports back.

use std::fmt;

/// Errors raised while resolving a mask format identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaskError {
    /// The identifier does not name any supported format.
    UnknownFormat(String),
}

impl fmt::Display for MaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownFormat(id) => write!(f, "unknown mask format '{}'", id.escape_default()),
        }
    }
}

impl std::error::Error for MaskError {}

/// Errors raised while parsing a rule token list.
///
/// The dispatcher never returns these to its caller; a rule that fails to
/// parse is evaluated as a failing verdict and the error is logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    /// A parameterised rule reached the end of the token list.
    MissingParameter {
        /// The rule keyword as written.
        rule: String,
    },

    /// A parameter could not be interpreted for its rule.
    InvalidParameter {
        /// The rule keyword as written.
        rule: String,
        /// The offending parameter token.
        value: String,
    },

    /// The card brand class is not in the brand table.
    UnknownBrand(String),
}

impl RuleError {
    /// Returns the rule keyword this error belongs to.
    pub fn rule(&self) -> &str {
        match self {
            Self::MissingParameter { rule } | Self::InvalidParameter { rule, .. } => rule,
            Self::UnknownBrand(_) => "creditcard",
        }
    }
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingParameter { rule } => {
                write!(f, "rule '{}' requires a parameter", rule)
            }
            Self::InvalidParameter { rule, value } => {
                write!(
                    f,
                    "invalid parameter '{}' for rule '{}'",
                    value.escape_default(),
                    rule
                )
            }
            Self::UnknownBrand(brand) => {
                write!(f, "unknown card brand class '{}'", brand.escape_default())
            }
        }
    }
}

impl std::error::Error for RuleError {}

/// Errors reported by an address lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// The value does not hold the 8 digits of a postal code.
    InvalidPostalCode(String),

    /// Another lookup is still filling one of the target fields.
    Busy,

    /// The service knows no address for this postal code.
    NotFound,

    /// The service could not be reached or answered garbage.
    Service(String),
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPostalCode(value) => {
                write!(f, "'{}' is not a postal code", value.escape_default())
            }
            Self::Busy => write!(f, "address fields are already being filled"),
            Self::NotFound => write!(f, "postal code not found"),
            Self::Service(msg) => write!(f, "address service error: {}", msg),
        }
    }
}

impl std::error::Error for LookupError {}
