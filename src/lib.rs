//! # fieldmask
//!
//! Keystroke-level input masks and declarative field validation.
//!
//! ## Features
//!
//! - Incremental masks for dates, date ranges, month/year, times, phone
//!   numbers, CPF/CNPJ, postal codes, card numbers, coordinates and UUIDs
//! - Whitespace-separated validation rule lists (`"required cpf"`,
//!   `"creditcard visa"`, `"after today"`, ...)
//! - Document check digits (CPF, CNPJ), Luhn and card brand detection
//! - Multiple interfaces: library, CLI, REST API, WASM
//!
//! ## Masking
//!
//! Call the mask on every keystroke with whatever the field holds. The
//! result is stable: feeding it back in gives the same value.
//!
//! ```rust
//! use fieldmask::{apply_mask, EditIntent, FormatId};
//!
//! let out = apply_mask(FormatId::Date, "2512", EditIntent::Insert);
//! assert_eq!(out.value, "25/12/");
//! assert!(!out.is_complete);
//!
//! // backspacing over the separator is not undone
//! let out = apply_mask(FormatId::Date, "25/12", EditIntent::Delete);
//! assert_eq!(out.value, "25/12");
//!
//! let out = apply_mask(FormatId::Phone, "11987654321", EditIntent::Insert);
//! assert_eq!(out.value, "(11) 98765-4321");
//! assert!(out.is_complete);
//! ```
//!
//! ## Ranges
//!
//! Range formats print both sides joined by ` ~ ` and put the earlier date
//! first once both are complete.
//!
//! ```rust
//! use fieldmask::{apply_mask, EditIntent, FormatId};
//!
//! let out = apply_mask(FormatId::DateRange, "3112202001012020", EditIntent::Insert);
//! assert_eq!(out.value, "01/01/2020 ~ 31/12/2020");
//! ```
//!
//! ## Validation
//!
//! ```rust
//! use fieldmask::{validate_field, ValidationContext};
//!
//! let ctx = ValidationContext::new();
//! assert!(validate_field("111.444.777-35", "required cpf", &ctx).valid);
//!
//! let outcome = validate_field("abc123", "password strong", &ctx);
//! assert!(!outcome.valid);
//! assert_eq!(outcome.failed_rule.as_deref(), Some("password"));
//! ```
//!
//! ## Forms
//!
//! ```rust
//! use std::collections::HashMap;
//! use fieldmask::{validate_form, FormValidator};
//!
//! let form = FormValidator::new()
//!     .field("cep", "required len 9")
//!     .field("doc", "required cpfcnpj");
//!
//! let fields: HashMap<String, String> = [
//!     ("cep".to_string(), "01310-100".to_string()),
//!     ("doc".to_string(), "11.222.333/0001-81".to_string()),
//! ]
//! .into();
//! assert!(validate_form(&form, &fields).valid);
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `serde` | Serializable outcomes |
//! | `generate` | Random test document/card generation |
//! | `cli` | Command-line tool |
//! | `server` | REST API with Swagger UI |
//! | `wasm` | WebAssembly bindings |

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod calendar;
pub mod card;
pub mod century;
pub mod checks;
pub mod debounce;
pub mod detect;
pub mod digits;
pub mod document;
pub mod error;
pub mod form;
pub mod generate;
pub mod luhn;
pub mod mask;
pub mod postal;
pub mod rules;
pub mod validate;

#[cfg(feature = "wasm")]
mod wasm;

// Re-export main types at crate root
pub use card::CardBrand;
pub use digits::extract_digits;
pub use error::{LookupError, MaskError, RuleError};
pub use form::{validate_form, FormOutcome, FormValidator};
pub use luhn::luhn_checksum;
pub use mask::{apply_mask, apply_mask_with, mask_by_name, EditIntent, FormatId, MaskOptions, MaskOutput};
pub use rules::{parse_rules, Rule};
pub use validate::{validate_field, ValidationContext, ValidationOutcome};
