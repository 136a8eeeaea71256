//! Fuzz target: product query normalization.
//!
//! Query parameters are attacker-controlled strings; normalization must
//! drop anything unparsable without ever panicking, and the normalized
//! query must be safe to evaluate against a record.

#![no_main]

use libfuzzer_sys::fuzz_target;
use trove_core::seed::seed_products;
use trove_core::RawProductQuery;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else { return };
    let raw = RawProductQuery {
        min_price: Some(text.to_owned()),
        max_price: Some(text.chars().rev().collect()),
        name: Some(text.to_owned()),
        sort_by: Some(text.to_owned()),
        order: Some(text.to_owned()),
    };
    let query = raw.normalize();
    for probe in seed_products() {
        let _ = query.matches(&probe);
    }
});
