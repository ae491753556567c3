//! # card_entry
//!
//! Live reformatting and validation for payment card entry fields.
//!
//! While the user types, deletes or pastes, the field text is stripped to its
//! meaningful characters, reformatted (`MM/YY`, `4111 1111 ...`), checked for
//! whether it can still become valid, and the caret is carried through every
//! change. Edits that can never lead to a valid value are rejected and the
//! field keeps its last good state.
//!
//! ## Features
//!
//! - Cursor-preserving filter and reformatter
//! - Expiration date state machine with a rolling year window
//! - Card number and security code fields sharing the same edit controller
//! - Injectable calendar for deterministic tests
//! - Masked `Debug` output and zeroized field buffers
//!
//! ## Quick Start
//!
//! ```rust
//! use card_entry::{CardEntryField, ExpirationFormat, FixedCalendar, ValidityState};
//!
//! let today = FixedCalendar::new(25, 3).unwrap(); // March 2025
//! let mut field = CardEntryField::new(ExpirationFormat::new(today));
//!
//! // A lone "2" can only be February.
//! field.insert_text("2");
//! assert_eq!(field.text(), "02/");
//! assert_eq!(field.selection().end, 3);
//!
//! field.insert_text("27");
//! assert_eq!(field.text(), "02/27");
//! assert_eq!(field.validity(), ValidityState::Valid);
//!
//! let fields = field.expiration().unwrap();
//! assert_eq!((fields.month(), fields.year()), ("02", "27"));
//! ```
//!
//! ## Rejection and Rollback
//!
//! ```rust
//! use card_entry::{CardEntryField, EditDecision, EditError, ExpirationFormat, FixedCalendar};
//!
//! let mut field = CardEntryField::new(ExpirationFormat::new(FixedCalendar::new(25, 3).unwrap()));
//! field.insert_text("0");
//!
//! // Month "00" does not exist; the field keeps "0".
//! assert_eq!(field.insert_text("0"), EditDecision::Reject(EditError::ImpossibleDate));
//! assert_eq!(field.text(), "0");
//!
//! // Letters are never accepted.
//! assert!(field.insert_text("a").is_rejected());
//! ```
//!
//! ## Pure Functions
//!
//! Every step is also available without a stateful field:
//!
//! ```rust
//! use card_entry::expiry::{classify_expiration, YearWindow};
//! use card_entry::filter::filter_to_alphabet;
//! use card_entry::format::reformat_expiration;
//! use card_entry::{FixedCalendar, ValidityState};
//!
//! let (digits, cursor) = filter_to_alphabet("1/", 2, |c| c.is_ascii_digit());
//! assert_eq!((digits.as_str(), cursor), ("1", 1));
//!
//! let formatted = reformat_expiration("0425", 4, &YearWindow::new(25, 30));
//! assert_eq!(formatted.text, "04/25");
//!
//! let today = FixedCalendar::new(25, 3).unwrap();
//! assert_eq!(classify_expiration("0425", &today, 30), ValidityState::Valid);
//! ```
//!
//! ## Card Number Fields
//!
//! ```rust
//! use card_entry::{CardEntryField, GroupedDigitsFormat};
//!
//! let mut field = CardEntryField::new(GroupedDigitsFormat::card_number());
//! field.insert_text("41111111");
//! assert_eq!(field.text(), "4111 1111");
//!
//! // Deleting the only digit of a group also drops its separator.
//! field.insert_text("1");
//! field.delete_backward();
//! assert_eq!(field.text(), "4111 1111");
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `serde` | `Serialize`/`Deserialize` for config and value types |
//! | `cli` | `cardentry` command-line tool |
//!
//! ## Security
//!
//! - Field buffers are zeroized when dropped or cleared
//! - `Debug` output shows masked text only
//! - Log lines never contain raw field text
//! - No unsafe code (`#![deny(unsafe_code)]`)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod calendar;
pub mod config;
pub mod error;
pub mod expiry;
pub mod field;
pub mod filter;
pub mod format;
pub mod mask;
pub mod validity;

// Re-export main types at crate root
pub use calendar::{Calendar, FixedCalendar, SystemCalendar};
pub use config::{CharacterSet, FieldConfig};
pub use error::{ConfigError, EditError};
pub use expiry::{ExpirationFields, ExpirationFormat, ExpiryDate};
pub use field::{
    propose_delete_backward, propose_edit, CardEntryField, EditDecision, ExpirationField,
    FieldDelegate, FieldFormat, FieldState,
};
pub use filter::Selection;
pub use format::{Formatted, GroupedDigitsFormat};
pub use validity::ValidityState;

#[cfg(test)]
mod tests {
    use super::*;

    fn march_2025() -> FixedCalendar {
        FixedCalendar::new(25, 3).unwrap()
    }

    fn typed(format: &impl FieldFormat, keys: &str) -> String {
        let mut state = FieldState::default();
        for key in keys.chars() {
            let decision = propose_edit(format, &state, state.selection, &key.to_string());
            if let EditDecision::Accept {
                text, selection, ..
            } = decision
            {
                state = FieldState::new(text, selection);
            }
        }
        state.text.clone()
    }

    #[test]
    fn test_typing_full_dates() {
        let format = ExpirationFormat::new(march_2025());
        assert_eq!(typed(&format, "0427"), "04/27");
        assert_eq!(typed(&format, "1230"), "12/30");
        assert_eq!(typed(&format, "427"), "04/27");
        assert_eq!(typed(&format, "1/27"), "01/27");
    }

    #[test]
    fn test_typing_skips_impossible_keys() {
        let format = ExpirationFormat::new(march_2025());
        // "00" rejected, then "4", then "1" (year 1x) rejected, then "28".
        assert_eq!(typed(&format, "004128"), "04/28");
    }

    #[test]
    fn test_typing_stops_at_max_length() {
        let format = ExpirationFormat::new(march_2025());
        assert_eq!(typed(&format, "042799"), "04/27");
    }

    #[test]
    fn test_card_number_typing() {
        let format = GroupedDigitsFormat::card_number();
        assert_eq!(typed(&format, "4111111111111111"), "4111 1111 1111 1111");
        assert_eq!(typed(&format, "41111111111111119"), "4111 1111 1111 1111");
    }

    #[test]
    fn test_security_code_typing() {
        let format = GroupedDigitsFormat::security_code(3);
        assert_eq!(typed(&format, "1234"), "123");
        assert!(format.is_complete("123"));
    }

    #[test]
    fn test_format_by_reference() {
        let format = ExpirationFormat::new(march_2025());
        let by_ref = &format;
        assert_eq!(by_ref.placeholder(), "MM/YY");
        assert!(by_ref.is_complete("04/27"));
    }

    #[test]
    fn test_value_types_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FieldState>();
        assert_send_sync::<EditDecision>();
        assert_send_sync::<ExpirationFormat<FixedCalendar>>();
        assert_send_sync::<GroupedDigitsFormat>();
        assert_send_sync::<ValidityState>();
    }
}
