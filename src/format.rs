//! Live reformatting with cursor remapping.
//!
//! Formatting runs on the *unformatted* value of a field (its input
//! characters only) and a caret offset inside that value. Each formatter
//! re-inserts separators at canonical positions and reports where the caret
//! lands in the formatted text.
//!
//! # Format Conventions
//!
//! - **Expiration date**: `MM/YY`. A lone `2`-`9` is padded to `0d/`, and a
//!   `1` followed by a digit that cannot finish a month but can start a year
//!   becomes `01/d`.
//! - **Card number**: groups of 4 separated by spaces, e.g. `4111 1111 1`.
//! - **Security code**: digits only.
//!
//! # Example
//!
//! ```
//! use card_entry::format::{group_digits, reformat_expiration};
//! use card_entry::expiry::YearWindow;
//!
//! let years = YearWindow::new(25, 30);
//!
//! let formatted = reformat_expiration("2", 1, &years);
//! assert_eq!(formatted.text, "02/");
//! assert_eq!(formatted.cursor, 3);
//!
//! let formatted = group_digits("41111", 5, Some(4), ' ');
//! assert_eq!(formatted.text, "4111 1");
//! assert_eq!(formatted.cursor, 6);
//! ```

use crate::config::FieldConfig;
use crate::error::ConfigError;
use crate::expiry::YearWindow;
use crate::field::FieldFormat;
use crate::filter::char_len;
use crate::validity::ValidityState;
use crate::CharacterSet;

/// Separator between month and year.
pub const EXPIRATION_SEPARATOR: char = '/';

/// Formatted text and the caret offset inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formatted {
    /// Display text.
    pub text: String,
    /// Caret offset in chars.
    pub cursor: usize,
}

/// Output builder that carries a caret through inserted characters.
///
/// Input characters keep their place relative to the caret. Inserted
/// characters either lead the next input character (padding) or trail the
/// previous one (separators), and move the caret accordingly.
#[derive(Debug)]
struct CursorTracker {
    text: String,
    input_cursor: usize,
    consumed: usize,
    cursor: usize,
}

impl CursorTracker {
    fn new(input_cursor: usize, capacity: usize) -> Self {
        Self {
            text: String::with_capacity(capacity),
            input_cursor,
            consumed: 0,
            cursor: 0,
        }
    }

    /// Copies an input character.
    fn push_input(&mut self, c: char) {
        if self.consumed < self.input_cursor {
            self.cursor += 1;
        }
        self.text.push(c);
        self.consumed += 1;
    }

    /// Inserts a character glued to the front of the next input character.
    fn push_leading(&mut self, c: char) {
        if self.consumed < self.input_cursor {
            self.cursor += 1;
        }
        self.text.push(c);
    }

    /// Inserts a character glued to the back of the previous input character.
    fn push_trailing(&mut self, c: char) {
        if self.consumed > 0 && self.consumed <= self.input_cursor {
            self.cursor += 1;
        }
        self.text.push(c);
    }

    fn finish(self) -> Formatted {
        Formatted {
            text: self.text,
            cursor: self.cursor,
        }
    }
}

/// Formats unformatted expiration digits as `MM/YY`, remapping the caret.
///
/// `digits` is expected to hold at most four ASCII digits; longer input is
/// formatted the same way and left for the caller to reject.
///
/// - a single `2`-`9` can only be a month with a skipped leading zero, so it
///   becomes `0d/`;
/// - `1` followed by a digit that cannot complete a month (`10`-`12`) but can
///   start a year inside `years` becomes `01/d`;
/// - otherwise digits are copied and `/` follows the second one.
///
/// # Example
///
/// ```
/// use card_entry::expiry::YearWindow;
/// use card_entry::format::reformat_expiration;
///
/// let years = YearWindow::new(25, 30);
/// assert_eq!(reformat_expiration("1", 1, &years).text, "1");
/// assert_eq!(reformat_expiration("12", 2, &years).text, "12/");
/// assert_eq!(reformat_expiration("13", 2, &years).text, "01/3");
/// assert_eq!(reformat_expiration("0427", 4, &years).text, "04/27");
/// ```
pub fn reformat_expiration(digits: &str, cursor: usize, years: &YearWindow) -> Formatted {
    let chars: Vec<char> = digits.chars().collect();
    let mut out = CursorTracker::new(cursor, chars.len() + 2);

    match chars.as_slice() {
        [first] if ('2'..='9').contains(first) => {
            out.push_leading('0');
            out.push_input(*first);
            out.push_trailing(EXPIRATION_SEPARATOR);
        }
        ['1', second] if !('0'..='2').contains(second) && years.prefix_matches_digit(*second) => {
            out.push_leading('0');
            out.push_input('1');
            out.push_trailing(EXPIRATION_SEPARATOR);
            out.push_input(*second);
        }
        _ => {
            for (index, &c) in chars.iter().enumerate() {
                out.push_input(c);
                if index == 1 {
                    out.push_trailing(EXPIRATION_SEPARATOR);
                }
            }
        }
    }

    out.finish()
}

/// Splits digits into groups of `group_size`, remapping the caret.
///
/// A separator is only written once a digit follows it, so partial input
/// never ends with a separator. `None` disables grouping.
pub fn group_digits(
    digits: &str,
    cursor: usize,
    group_size: Option<usize>,
    separator: char,
) -> Formatted {
    let len = char_len(digits);
    let mut out = CursorTracker::new(cursor, len + len / 4);

    for (index, c) in digits.chars().enumerate() {
        if let Some(size) = group_size.filter(|&size| size > 0) {
            if index > 0 && index % size == 0 {
                out.push_trailing(separator);
            }
        }
        out.push_input(c);
    }

    out.finish()
}

/// A plain digit field: card number grouped by spaces, or a security code.
///
/// Validity only looks at length: the value is [`ValidityState::Valid`] once
/// it holds exactly `max_length` input characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupedDigitsFormat {
    config: FieldConfig,
    group_size: Option<usize>,
    separator: char,
    placeholder: String,
}

impl GroupedDigitsFormat {
    /// A 16-digit card number in groups of four.
    pub fn card_number() -> Self {
        Self {
            config: FieldConfig::card_number(),
            group_size: Some(4),
            separator: ' ',
            placeholder: "0000 0000 0000 0000".to_string(),
        }
    }

    /// An ungrouped security code of `length` digits.
    pub fn security_code(length: usize) -> Self {
        Self {
            config: FieldConfig::security_code(length),
            group_size: None,
            separator: ' ',
            placeholder: "0".repeat(length),
        }
    }

    /// A custom grouped field.
    ///
    /// With grouping enabled the separator is the first character of an
    /// explicit formatting set; [`ConfigError::NoGroupSeparator`] otherwise.
    pub fn with_config(config: FieldConfig, group_size: Option<usize>) -> Result<Self, ConfigError> {
        config.validate()?;

        let separator = match (&config.formatting_characters, group_size) {
            (_, None) => ' ',
            (CharacterSet::Chars(set), Some(_)) => set
                .chars()
                .next()
                .ok_or(ConfigError::NoGroupSeparator)?,
            (_, Some(_)) => return Err(ConfigError::NoGroupSeparator),
        };

        let raw = "0".repeat(config.max_length);
        let placeholder = group_digits(&raw, 0, group_size, separator).text;

        Ok(Self {
            config,
            group_size,
            separator,
            placeholder,
        })
    }

    /// Digits per group, if grouped.
    pub fn group_size(&self) -> Option<usize> {
        self.group_size
    }
}

impl FieldFormat for GroupedDigitsFormat {
    fn config(&self) -> &FieldConfig {
        &self.config
    }

    fn placeholder(&self) -> &str {
        &self.placeholder
    }

    fn reformat(&self, unformatted: &str, cursor: usize) -> Formatted {
        group_digits(unformatted, cursor, self.group_size, self.separator)
    }

    fn classify(&self, unformatted: &str) -> ValidityState {
        if unformatted.is_empty() {
            return ValidityState::Empty;
        }
        if !unformatted.chars().all(|c| self.config.is_input(c)) {
            return ValidityState::Impossible;
        }
        let len = char_len(unformatted);
        if len > self.config.max_length {
            ValidityState::Impossible
        } else if len == self.config.max_length {
            ValidityState::Valid
        } else {
            ValidityState::Incomplete
        }
    }
}
