//! Fuzz target for the expiration classifier.
//!
//! Tests that classification never panics on arbitrary input.

#![no_main]

use card_entry::expiry::{classify_expiration, ExpirationFields};
use card_entry::{FixedCalendar, ValidityState};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (&str, u8, u8, u8)| {
    let (data, year, month, range) = input;
    let Some(today) = FixedCalendar::new(year % 100, month % 12 + 1) else {
        return;
    };

    let validity = classify_expiration(data, &today, range);
    if validity == ValidityState::Valid {
        let fields = ExpirationFields::from_digits(data).expect("valid value has fields");
        let _ = fields.resolve(2000 + u16::from(year % 100));
        let _ = fields.resolve(u16::from(year).wrapping_mul(257));
        let _ = format!("{}", fields);
    }
});
