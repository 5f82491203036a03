#![no_main]
use libfuzzer_sys::fuzz_target;
use vartable::format::{format_color, format_number};
use vartable::model::RawValue;
use vartable::records::dev_token;
use vartable::store::decode_raw_value;

/// Fuzz value decoding and cell formatting with arbitrary JSON values.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = dev_token(s);
    }

    let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };
    match decode_raw_value(&value) {
        Some(RawValue::Number(n)) => {
            let _ = format_number(n);
        }
        Some(RawValue::Color(color)) => {
            let _ = format_color(&color);
        }
        _ => {}
    }
});
