//! Fuzz target: field validators over arbitrary text.
//!
//! The email regex and the name/price rules must accept or reject any
//! input without panicking, and anything `normalize_email` accepts must
//! re-validate unchanged (normalization is idempotent).

#![no_main]

use libfuzzer_sys::fuzz_target;
use trove_core::validate;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else { return };

    if let Ok(email) = validate::normalize_email(text) {
        assert_eq!(
            validate::normalize_email(&email).as_deref(),
            Ok(email.as_str()),
            "normalized email must re-validate to itself"
        );
    }
    let _ = validate::normalize_name(text);

    if data.len() >= 8 {
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&data[..8]);
        let _ = validate::check_price(f64::from_le_bytes(bytes));
    }
});
