//! Fuzz target for CPF/CNPJ check digits and card brand detection.

#![no_main]

use fieldmask::detect::{detect_brand, matching_brands};
use fieldmask::document::{complete_check_digits, detect_document, is_valid_cnpj, is_valid_cpf};
use fieldmask::document::DocumentKind;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let _ = is_valid_cpf(data);
    let _ = is_valid_cnpj(data);
    let _ = detect_document(data);

    // The first match is always the detected brand
    assert_eq!(detect_brand(data), matching_brands(data).first().copied());

    let digits: Vec<u8> = data.bytes().map(|b| b % 10).collect();
    if digits.len() >= 12 {
        let cnpj = complete_check_digits(DocumentKind::Cnpj, &digits[..12]);
        let text: String = cnpj.iter().map(|d| char::from(b'0' + d)).collect();
        let repeated = cnpj.iter().all(|&d| d == cnpj[0]);
        assert_eq!(is_valid_cnpj(&text), !repeated, "{}", text);
    }
    if digits.len() >= 9 {
        let cpf = complete_check_digits(DocumentKind::Cpf, &digits[..9]);
        let text: String = cpf.iter().map(|d| char::from(b'0' + d)).collect();
        let repeated = cpf.iter().all(|&d| d == cpf[0]);
        assert_eq!(is_valid_cpf(&text), !repeated, "{}", text);
    }
});
