//! Fuzz target for edit transactions.
//!
//! Replays arbitrary edits against expiration and card number fields and
//! checks that committed state never becomes impossible.

#![no_main]

use arbitrary::Arbitrary;
use card_entry::{CardEntryField, ExpirationFormat, FieldFormat, FixedCalendar, GroupedDigitsFormat, Selection};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Action {
    Insert(String),
    Backspace,
    Select(u8, u8),
    Replace(u8, u8, String),
    SetText(String),
}

#[derive(Debug, Arbitrary)]
struct Session {
    year: u8,
    month: u8,
    actions: Vec<Action>,
}

fn replay<F: FieldFormat>(field: &mut CardEntryField<F>, actions: &[Action]) {
    for action in actions {
        match action {
            Action::Insert(text) => {
                field.insert_text(text);
            }
            Action::Backspace => {
                field.delete_backward();
            }
            Action::Select(start, end) => field.select(Selection::new(*start as usize, *end as usize)),
            Action::Replace(start, end, text) => {
                field.propose_edit(Selection::new(*start as usize, *end as usize), text);
            }
            Action::SetText(text) => {
                let _ = field.set_text(text);
            }
        }

        assert!(field.validity().is_possible());
        assert!(field.unformatted_text().chars().count() <= field.format().config().max_length);
        assert!(field.selection().end <= field.text().chars().count());
    }
}

fuzz_target!(|session: Session| {
    let Some(today) = FixedCalendar::new(session.year % 100, session.month % 12 + 1) else {
        return;
    };

    let mut expiration = CardEntryField::new(ExpirationFormat::new(today));
    replay(&mut expiration, &session.actions);
    let _ = expiration.expiration();

    let mut card = CardEntryField::new(GroupedDigitsFormat::card_number());
    replay(&mut card, &session.actions);
    let _ = format!("{:?}", card);
});
