//! Error types for field edits and field configuration.
//!
//! Every edit error is recoverable: the field rolls back to its last committed
//! state and the caller is expected to give the user some feedback.

use std::fmt;

/// Reasons an edit to a card entry field is rejected.
///
/// The field's committed state is never changed when one of these is
/// produced. Incomplete input is not an error; see
/// [`ValidityState::Incomplete`](crate::ValidityState::Incomplete).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    /// The replacement string contains a character that is neither an input
    /// character nor a formatting character for this field.
    InvalidCharacter {
        /// Position inside the replacement string (0-indexed, in chars).
        position: usize,
        /// The offending character.
        character: char,
    },

    /// The edit would leave more unformatted characters than the field allows.
    LengthExceeded {
        /// Unformatted length after the edit.
        length: usize,
        /// The field's maximum unformatted length.
        maximum: usize,
    },

    /// The resulting value can never become valid (bad month, year outside
    /// the accepted window, or a month that already passed this year).
    ImpossibleDate,
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCharacter {
                position,
                character,
            } => {
                write!(
                    f,
                    "invalid character '{}' at position {} of the replacement text",
                    character.escape_default(),
                    position
                )
            }

            Self::LengthExceeded { length, maximum } => {
                write!(
                    f,
                    "input too long: got {} characters, maximum is {}",
                    length, maximum
                )
            }

            Self::ImpossibleDate => write!(f, "value can never form a valid date"),
        }
    }
}

impl std::error::Error for EditError {}

/// Errors raised when a [`FieldConfig`](crate::FieldConfig) cannot drive a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `max_length` was zero.
    ZeroMaxLength,

    /// A character belongs to both the input and the formatting set.
    OverlappingCharacterSets {
        /// A character found in both sets.
        character: char,
    },

    /// The format inserts a separator the formatting set does not contain.
    MissingSeparator {
        /// The separator the format needs.
        separator: char,
    },

    /// Grouping was requested but the formatting set lists no character to
    /// use as the group separator.
    NoGroupSeparator,

    /// The future-year window wraps onto itself.
    YearRangeTooWide {
        /// The configured window in years.
        years: u8,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroMaxLength => write!(f, "max_length must be at least 1"),
            Self::OverlappingCharacterSets { character } => write!(
                f,
                "character '{}' is both an input and a formatting character",
                character.escape_default()
            ),
            Self::MissingSeparator { separator } => write!(
                f,
                "separator '{}' is missing from the formatting characters",
                separator.escape_default()
            ),
            Self::NoGroupSeparator => write!(
                f,
                "grouping needs an explicit formatting character to use as separator"
            ),
            Self::YearRangeTooWide { years } => write!(
                f,
                "future year range of {} years is too wide (maximum is 99)",
                years
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            EditError::InvalidCharacter {
                position: 2,
                character: 'x'
            }
            .to_string(),
            "invalid character 'x' at position 2 of the replacement text"
        );

        assert_eq!(
            EditError::LengthExceeded {
                length: 5,
                maximum: 4
            }
            .to_string(),
            "input too long: got 5 characters, maximum is 4"
        );

        assert_eq!(
            EditError::ImpossibleDate.to_string(),
            "value can never form a valid date"
        );
    }

    #[test]
    fn test_config_error_display() {
        assert_eq!(
            ConfigError::YearRangeTooWide { years: 120 }.to_string(),
            "future year range of 120 years is too wide (maximum is 99)"
        );
        assert_eq!(
            ConfigError::MissingSeparator { separator: '/' }.to_string(),
            "separator '/' is missing from the formatting characters"
        );
        assert_eq!(
            ConfigError::NoGroupSeparator.to_string(),
            "grouping needs an explicit formatting character to use as separator"
        );
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<EditError>();
        assert_send_sync::<ConfigError>();
    }
}
