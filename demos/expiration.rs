//! Expiration date field example.
//!
//! Run with: `cargo run --example expiration`

use card_entry::{
    CardEntryField, EditDecision, ExpirationFormat, FieldDelegate, FixedCalendar, ValidityState,
};

/// Prints every event the field reports.
struct Logger;

impl FieldDelegate for Logger {
    fn did_change(&mut self, text: &str, validity: ValidityState) {
        println!("      changed  -> {:<6} ({})", text, validity);
    }

    fn did_reject(&mut self, error: &card_entry::EditError) {
        println!("      rejected -> {}", error);
    }

    fn should_forward_input(&mut self, input: &str) {
        println!("      forward  -> '{}' goes to the next field", input);
    }

    fn backspace_without_content(&mut self) {
        println!("      back     -> move to the previous field");
    }
}

fn main() {
    println!("=== Expiration Date Entry ===\n");

    let today = FixedCalendar::new(25, 3).unwrap();
    println!("Today is pinned to 03/25; years 25 through 55 are accepted.\n");

    // -------------------------------------------------------------------------
    // Typing key by key
    // -------------------------------------------------------------------------
    println!("--- Typing ---\n");

    let sequences = [
        ("0427", "plain month and year"),
        ("427", "leading zero skipped"),
        ("13", "'1' then a year digit"),
        ("1/29", "slash after a lone digit"),
        ("0099", "impossible keys are dropped"),
        ("04271", "extra input is forwarded"),
    ];

    for (keys, description) in sequences {
        println!("  {} (keys \"{}\")", description, keys);
        let mut field = CardEntryField::new(ExpirationFormat::new(today)).with_delegate(Logger);
        for key in keys.chars() {
            println!("    key '{}'", key);
            field.insert_text(&key.to_string());
        }
        println!("    final: {:<6} complete: {}\n", field.text(), field.is_complete());
    }

    // -------------------------------------------------------------------------
    // Deleting
    // -------------------------------------------------------------------------
    println!("--- Backspace ---\n");

    let mut field = CardEntryField::new(ExpirationFormat::new(today)).with_delegate(Logger);
    field.insert_text("12");
    println!("  text: {}", field.text());
    for _ in 0..3 {
        println!("    backspace");
        field.delete_backward();
    }
    println!();

    // -------------------------------------------------------------------------
    // Autofill and extraction
    // -------------------------------------------------------------------------
    println!("--- Autofill ---\n");

    let autofill = ["0427", "04/27", "02/25", "13/27", "04/2027"];
    for value in autofill {
        let mut field = CardEntryField::new(ExpirationFormat::new(today));
        match field.set_text(value) {
            Ok(validity) => {
                print!("  {:<8} -> {:<6} {}", value, field.text(), validity);
                if let Some(date) = field.expiration().and_then(|fields| fields.resolve(2025)) {
                    print!("  ({}, {} months left)", date.format_long(), date.months_until_expiry_at(2025, 3));
                }
                println!();
            }
            Err(error) => println!("  {:<8} -> rejected: {}", value, error),
        }
    }
    println!();

    // -------------------------------------------------------------------------
    // Pure decisions
    // -------------------------------------------------------------------------
    println!("--- Pure API ---\n");

    let format = ExpirationFormat::new(today);
    let state = card_entry::FieldState::with_caret_at_end("1");
    let decision = card_entry::propose_edit(&format, &state, state.selection, "3");
    if let EditDecision::Accept { text, selection, validity } = decision {
        println!("  \"1\" + \"3\" -> \"{}\" caret {} ({})", text, selection.end, validity);
    }
}
