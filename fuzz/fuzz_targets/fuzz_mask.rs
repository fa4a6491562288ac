//! Fuzz target for input masks.
//!
//! Every mask must accept any input without panicking, stay within its
//! maximum length and be stable when fed its own output.

#![no_main]

use arbitrary::Arbitrary;
use fieldmask::{apply_mask_with, mask_by_name, EditIntent, FormatId, MaskOptions};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    format: u8,
    deleting: bool,
    precision: u8,
    current_year: u16,
    value: &'a str,
}

fuzz_target!(|input: Input<'_>| {
    let format = FormatId::ALL[input.format as usize % FormatId::ALL.len()];
    let intent = EditIntent::from_deleting(input.deleting);
    let options = MaskOptions::new()
        .with_current_year(i32::from(input.current_year % 400) + 1800)
        .with_precision(usize::from(input.precision % 10));

    let once = apply_mask_with(format, input.value, intent, &options);
    if let Some(max) = format.max_length(&options) {
        assert!(once.value.chars().count() <= max, "{} overflowed: {:?}", format, once.value);
    }

    let twice = apply_mask_with(format, &once.value, intent, &options);
    assert_eq!(twice, once, "{} is not stable on {:?}", format, input.value);

    // Unknown names pass the value through
    let _ = mask_by_name(input.value, input.value, intent);
});
