//! Fuzz target for filtering and reformatting.
//!
//! Tests that the formatters never panic and always keep the caret inside
//! the formatted text.

#![no_main]

use card_entry::expiry::YearWindow;
use card_entry::filter::filter_to_alphabet;
use card_entry::format::{group_digits, reformat_expiration};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (&str, u8, u8)| {
    let (data, cursor, year) = input;
    let (digits, cursor) = filter_to_alphabet(data, cursor as usize, |c| c.is_ascii_digit());
    assert!(cursor <= digits.chars().count());

    let years = YearWindow::new(year % 100, 30);
    let formatted = reformat_expiration(&digits, cursor, &years);
    assert!(formatted.cursor <= formatted.text.chars().count());

    let grouped = group_digits(&digits, cursor, Some(4), ' ');
    assert!(grouped.cursor <= grouped.text.chars().count());
    let stripped: String = grouped.text.chars().filter(|c| c.is_ascii_digit()).collect();
    assert_eq!(stripped, digits, "Grouping should preserve digits");
});
