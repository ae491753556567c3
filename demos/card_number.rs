//! Card number and security code field example.
//!
//! Run with: `cargo run --example card_number`

use card_entry::{
    CardEntryField, CharacterSet, EditDecision, FieldConfig, GroupedDigitsFormat, Selection,
};

fn main() {
    println!("=== Card Number Entry ===\n");

    // -------------------------------------------------------------------------
    // Live grouping
    // -------------------------------------------------------------------------
    println!("--- Live Grouping ---\n");

    let mut field = CardEntryField::new(GroupedDigitsFormat::card_number());
    println!("  placeholder: {}", field.placeholder());
    for key in "4111111111111111".chars() {
        field.insert_text(&key.to_string());
        println!("    {:<20} caret {}", field.text(), field.selection().end);
    }
    println!("  complete: {}\n", field.is_complete());

    // -------------------------------------------------------------------------
    // Editing inside the value
    // -------------------------------------------------------------------------
    println!("--- Editing ---\n");

    let mut field = CardEntryField::new(GroupedDigitsFormat::card_number());
    field.insert_text("41111111");
    println!("  start:              {}", field.text());

    field.select(Selection::caret(0));
    field.insert_text("5");
    println!("  '5' at the front:   {} (caret {})", field.text(), field.selection().end);

    field.select(Selection::caret(5));
    field.delete_backward();
    println!("  backspace over ' ': {} (caret {})", field.text(), field.selection().end);
    println!();

    // -------------------------------------------------------------------------
    // Custom formats
    // -------------------------------------------------------------------------
    println!("--- Custom Formats ---\n");

    let config = FieldConfig::card_number()
        .with_max_length(15)
        .with_formatting_characters(CharacterSet::chars(" -"));
    match GroupedDigitsFormat::with_config(config, Some(5)) {
        Ok(format) => {
            let mut field = CardEntryField::new(format);
            println!("  placeholder: {}", field.placeholder());
            match field.insert_text("37828-22463-10005") {
                EditDecision::Accept { text, validity, .. } => println!("  pasted: {} ({})", text, validity),
                other => println!("  paste failed: {:?}", other),
            }
        }
        Err(error) => println!("  invalid config: {}", error),
    }
    println!();

    // -------------------------------------------------------------------------
    // Security code and chained fields
    // -------------------------------------------------------------------------
    println!("--- Security Code ---\n");

    let mut number = CardEntryField::new(GroupedDigitsFormat::card_number());
    let mut cvv = CardEntryField::new(GroupedDigitsFormat::security_code(3));
    for key in "5500000000000004123".chars() {
        if let EditDecision::ForwardToNext(input) = number.insert_text(&key.to_string()) {
            cvv.insert_text(&input);
        }
    }
    println!("  number: {:?}", number);
    println!("  cvv:    {:?}", cvv);
    println!("  cvv complete: {}", cvv.is_complete());
}
