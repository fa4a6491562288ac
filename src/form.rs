//! Whole-form validation.
//!
//! A [`FormValidator`] holds the rule list of every field, parsed once, and
//! validates them in declaration order. Validation stops at the first
//! invalid field, which is reported through the outcome and through any
//! callback registered for it with [`FormValidator::on_invalid`].
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use fieldmask::form::{validate_form, FormValidator};
//!
//! let form = FormValidator::new()
//!     .field("email", "required email")
//!     .field("password", "required password strong")
//!     .field("confirm", "required eq password");
//!
//! let mut fields = HashMap::new();
//! fields.insert("email".to_string(), "ana@example.com".to_string());
//! fields.insert("password".to_string(), "Abc123!".to_string());
//! fields.insert("confirm".to_string(), "Abc123?".to_string());
//!
//! let outcome = validate_form(&form, &fields);
//! assert!(!outcome.valid);
//! assert_eq!(outcome.invalid_field.as_deref(), Some("confirm"));
//! ```

use std::collections::BTreeMap;
use std::fmt;

use crate::error::RuleError;
use crate::rules::{parse_rules, Rule};
use crate::validate::{validate_rules, FieldLookup, ValidationContext, ValidationOutcome};

/// Callback run when a field fails: receives the field name and its outcome.
pub type InvalidCallback = Box<dyn Fn(&str, &ValidationOutcome) + Send + Sync>;

struct FormField {
    name: String,
    rules: Vec<Result<Rule, RuleError>>,
    on_invalid: Vec<InvalidCallback>,
}

/// Ordered set of fields and their rules.
#[derive(Default)]
pub struct FormValidator {
    fields: Vec<FormField>,
}

impl fmt::Debug for FormValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormValidator")
            .field("fields", &self.field_names().collect::<Vec<_>>())
            .finish()
    }
}

/// Verdict for a whole form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormOutcome {
    /// True when every field passed.
    pub valid: bool,
    /// Name of the first invalid field.
    pub invalid_field: Option<String>,
    /// Outcomes of the fields evaluated, up to and including the first
    /// invalid one.
    pub fields: BTreeMap<String, ValidationOutcome>,
}

impl FormValidator {
    /// Creates an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field with its whitespace-separated rule list.
    ///
    /// Declaring the same name again replaces its rules and keeps its
    /// position and callbacks.
    pub fn field(mut self, name: impl Into<String>, rules: &str) -> Self {
        let name = name.into();
        let rules = parse_rules(rules);
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(existing) => existing.rules = rules,
            None => self.fields.push(FormField {
                name,
                rules,
                on_invalid: Vec::new(),
            }),
        }
        self
    }

    /// Registers a callback run whenever `field` fails. Unknown field names
    /// are ignored.
    pub fn on_invalid<F>(mut self, field: &str, callback: F) -> Self
    where
        F: Fn(&str, &ValidationOutcome) + Send + Sync + 'static,
    {
        match self.fields.iter_mut().find(|f| f.name == field) {
            Some(entry) => entry.on_invalid.push(Box::new(callback)),
            None => tracing::warn!(field, "on_invalid for an undeclared field"),
        }
        self
    }

    /// Declared field names, in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when no field is declared.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Validates one declared field, running its callbacks on failure.
    ///
    /// Returns `None` for an undeclared name. A field missing from
    /// `fields` is validated as the empty string.
    pub fn validate_field(
        &self,
        name: &str,
        fields: &dyn FieldLookup,
        ctx: &ValidationContext<'_>,
    ) -> Option<ValidationOutcome> {
        let field = self.fields.iter().find(|f| f.name == name)?;
        let ctx = ValidationContext::with_fields(*ctx, fields);
        Some(Self::run(field, fields, &ctx))
    }

    /// Validates every field in order, stopping at the first failure.
    ///
    /// `fields` also serves cross-field rules such as `eq`.
    pub fn validate(&self, fields: &dyn FieldLookup, ctx: &ValidationContext<'_>) -> FormOutcome {
        let ctx = ValidationContext::with_fields(*ctx, fields);
        let mut outcome = FormOutcome {
            valid: true,
            ..FormOutcome::default()
        };

        for field in &self.fields {
            let result = Self::run(field, fields, &ctx);
            let valid = result.valid;
            outcome.fields.insert(field.name.clone(), result);
            if !valid {
                outcome.valid = false;
                outcome.invalid_field = Some(field.name.clone());
                break;
            }
        }
        outcome
    }

    fn run(
        field: &FormField,
        fields: &dyn FieldLookup,
        ctx: &ValidationContext<'_>,
    ) -> ValidationOutcome {
        let value = fields.field_value(&field.name).unwrap_or_default();
        let outcome = validate_rules(&value, &field.rules, ctx);
        if !outcome.valid {
            tracing::debug!(
                field = field.name.as_str(),
                rule = outcome.failed_rule.as_deref().unwrap_or_default(),
                "field invalid"
            );
            for callback in &field.on_invalid {
                callback(&field.name, &outcome);
            }
        }
        outcome
    }
}

/// Validates a form against today's date and the default century window.
pub fn validate_form(form: &FormValidator, fields: &dyn FieldLookup) -> FormOutcome {
    form.validate(fields, &ValidationContext::new())
}
