//! WebAssembly bindings for browser callers.
//!
//! The page binds its own input events and calls in here on every
//! keystroke and on submit.
//!
//! # Usage from JavaScript
//!
//! ```javascript
//! import init, { apply_mask, validate_field, detect_brand } from 'fieldmask';
//!
//! await init();
//!
//! input.addEventListener('input', (e) => {
//!     const deleting = e.inputType.startsWith('delete');
//!     const result = apply_mask('date', input.value, deleting);
//!     input.value = result.value;
//!     if (result.max_length !== undefined) input.maxLength = result.max_length;
//! });
//!
//! const verdict = validate_field(card.value, 'required creditcard');
//! if (!verdict.valid) console.log(`failed: ${verdict.failed_rule}`);
//! console.log(verdict.card_brand);  // "visa"
//! ```

#![cfg(feature = "wasm")]

use std::str::FromStr;

use wasm_bindgen::prelude::*;

use crate::mask::{EditIntent, FormatId};
use crate::validate::{ValidationContext, CARD_BRAND, DOCUMENT_TYPE};

/// Masked value returned to JavaScript.
#[wasm_bindgen]
pub struct MaskResult {
    value: String,
    max_length: Option<u32>,
    is_complete: bool,
}

#[wasm_bindgen]
impl MaskResult {
    #[wasm_bindgen(getter)]
    pub fn value(&self) -> String {
        self.value.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn max_length(&self) -> Option<u32> {
        self.max_length
    }

    #[wasm_bindgen(getter)]
    pub fn is_complete(&self) -> bool {
        self.is_complete
    }
}

/// Reformats `value` for the format named `format`.
///
/// `deleting` is true when the keystroke removed characters.
///
/// # Example
/// ```javascript
/// apply_mask('cpf', '11144477735', false).value  // "111.444.777-35"
/// ```
#[wasm_bindgen]
pub fn apply_mask(format: &str, value: &str, deleting: bool) -> Result<MaskResult, JsValue> {
    let format = FormatId::from_str(format).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let output = crate::mask::apply_mask(format, value, EditIntent::from_deleting(deleting));
    Ok(MaskResult {
        value: output.value,
        max_length: output.max_length.and_then(|n| u32::try_from(n).ok()),
        is_complete: output.is_complete,
    })
}

/// Verdict returned to JavaScript.
#[wasm_bindgen]
pub struct ValidationResult {
    valid: bool,
    failed_rule: Option<String>,
    card_brand: Option<String>,
    document_type: Option<String>,
}

#[wasm_bindgen]
impl ValidationResult {
    #[wasm_bindgen(getter)]
    pub fn valid(&self) -> bool {
        self.valid
    }

    #[wasm_bindgen(getter)]
    pub fn failed_rule(&self) -> Option<String> {
        self.failed_rule.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn card_brand(&self) -> Option<String> {
        self.card_brand.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn document_type(&self) -> Option<String> {
        self.document_type.clone()
    }
}

/// Validates `value` against a whitespace-separated rule list.
///
/// `eq` rules always fail here, since no other fields are visible.
#[wasm_bindgen]
pub fn validate_field(value: &str, rules: &str) -> ValidationResult {
    let outcome = crate::validate::validate_field(value, rules, &ValidationContext::new());
    ValidationResult {
        valid: outcome.valid,
        card_brand: outcome.annotation(CARD_BRAND).map(str::to_string),
        document_type: outcome.annotation(DOCUMENT_TYPE).map(str::to_string),
        failed_rule: outcome.failed_rule,
    }
}

/// Validates several values against the same rule list.
#[wasm_bindgen]
pub fn validate_many(values: js_sys::Array, rules: &str) -> js_sys::Array {
    let results = js_sys::Array::new();

    for value in values.iter() {
        if let Some(value) = value.as_string() {
            results.push(&JsValue::from(validate_field(&value, rules)));
        }
    }

    results
}

/// Detects the card brand class of a card number.
///
/// # Example
/// ```javascript
/// detect_brand("4532015112830366")  // "visa"
/// ```
#[wasm_bindgen]
pub fn detect_brand(card_number: &str) -> Option<String> {
    crate::detect::detect_brand(card_number).map(|b| b.name().to_string())
}

/// Checks if a number passes the Luhn algorithm.
#[wasm_bindgen]
pub fn luhn_checksum(number: &str) -> bool {
    crate::luhn::luhn_checksum(number)
}

/// Checks a CPF.
#[wasm_bindgen]
pub fn is_valid_cpf(value: &str) -> bool {
    crate::document::is_valid_cpf(value)
}

/// Checks a CNPJ.
#[wasm_bindgen]
pub fn is_valid_cnpj(value: &str) -> bool {
    crate::document::is_valid_cnpj(value)
}

/// Generates a valid test card number for the given brand class.
///
/// # Example
/// ```javascript
/// const card = generate_test_card("elo");
/// ```
#[wasm_bindgen]
pub fn generate_test_card(brand: &str) -> Result<String, JsValue> {
    let brand = crate::CardBrand::from_str(brand).map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(crate::generate::generate_card_deterministic(brand))
}
