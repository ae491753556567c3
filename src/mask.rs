//! PCI-DSS friendly masking of field contents.
//!
//! Field text may hold cardholder data, so `Debug` output and log lines only
//! ever show it through [`mask_text`]: every input character except the last
//! four is replaced with `*`, formatting characters are kept so the shape of
//! the value stays readable.
//!
//! # Example
//!
//! ```
//! use card_entry::mask::mask_text;
//!
//! assert_eq!(mask_text("4111 1111 1111 1111", |c| c.is_ascii_digit()), "**** **** **** 1111");
//! assert_eq!(mask_text("04/27", |c| c.is_ascii_digit()), "04/27");
//! ```

/// Number of trailing input characters left visible.
pub const VISIBLE_TRAILING: usize = 4;

/// Character used in place of hidden input characters.
pub const MASK_CHAR: char = '*';

/// Masks all input characters of `text` except the last four.
///
/// Characters rejected by `is_input` are copied unchanged.
pub fn mask_text<F>(text: &str, is_input: F) -> String
where
    F: Fn(char) -> bool,
{
    let input_count = text.chars().filter(|&c| is_input(c)).count();
    let hidden = input_count.saturating_sub(VISIBLE_TRAILING);

    let mut result = String::with_capacity(text.len());
    let mut seen = 0;

    for c in text.chars() {
        if is_input(c) {
            if seen < hidden {
                result.push(MASK_CHAR);
            } else {
                result.push(c);
            }
            seen += 1;
        } else {
            result.push(c);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digits(c: char) -> bool {
        c.is_ascii_digit()
    }

    #[test]
    fn test_mask_card_number() {
        assert_eq!(mask_text("4111111111111111", digits), "************1111");
        assert_eq!(mask_text("4111 1111 1111 1111", digits), "**** **** **** 1111");
        assert_eq!(mask_text("4111 11", digits), "**11 11");
    }

    #[test]
    fn test_mask_short_values_untouched() {
        assert_eq!(mask_text("", digits), "");
        assert_eq!(mask_text("123", digits), "123");
        assert_eq!(mask_text("12/34", digits), "12/34");
    }

    #[test]
    fn test_mask_never_exposes_prefix() {
        let masked = mask_text("5500 0000 0000 0004", digits);
        assert!(!masked.contains("5500"));
        assert!(masked.ends_with("0004"));
    }
}
