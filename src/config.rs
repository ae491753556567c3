//! Per-field configuration.
//!
//! A [`FieldConfig`] describes which characters a field accepts, which
//! characters it inserts for display, how long its unformatted value may get,
//! and how deletion behaves.
//!
//! # Example
//!
//! ```
//! use card_entry::{CharacterSet, FieldConfig};
//!
//! let config = FieldConfig::expiration();
//! assert_eq!(config.max_length, 4);
//! assert!(config.input_characters.contains('7'));
//! assert!(config.formatting_characters.contains('/'));
//! assert!(config.validate().is_ok());
//!
//! let cvv = FieldConfig::security_code(4);
//! assert_eq!(cvv.formatting_characters, CharacterSet::none());
//! ```

use std::borrow::Cow;

use crate::error::{ConfigError, EditError};

/// Default window of accepted future expiration years.
pub const VALID_FUTURE_EXP_YEAR_RANGE: u8 = 30;

/// Maximum unformatted length of an expiration date (`MMYY`).
pub const EXPIRATION_MAX_LENGTH: usize = 4;

/// A set of characters accepted by a field.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CharacterSet {
    /// ASCII digits `0-9`.
    DecimalDigits,
    /// Unicode alphanumeric characters.
    Alphanumerics,
    /// Exactly the listed characters.
    Chars(Cow<'static, str>),
}

impl CharacterSet {
    /// The empty set.
    pub const fn none() -> Self {
        Self::Chars(Cow::Borrowed(""))
    }

    /// A set made of the characters in `chars`.
    pub fn chars(chars: impl Into<Cow<'static, str>>) -> Self {
        Self::Chars(chars.into())
    }

    /// Returns true if `c` is in the set.
    #[inline]
    pub fn contains(&self, c: char) -> bool {
        match self {
            Self::DecimalDigits => c.is_ascii_digit(),
            Self::Alphanumerics => c.is_alphanumeric(),
            Self::Chars(set) => set.contains(c),
        }
    }

    /// Returns true if the set has no members.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Chars(set) if set.is_empty())
    }
}

/// Configuration surface of a single field instance.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldConfig {
    /// Maximum number of unformatted characters.
    pub max_length: usize,
    /// Characters that carry meaning (kept when formatting is stripped).
    pub input_characters: CharacterSet,
    /// Separators inserted for display only.
    pub formatting_characters: CharacterSet,
    /// When set, deleting or replacing a non-empty range also drops
    /// everything after the range.
    pub deleting_removes_trailing: bool,
    /// Number of future years accepted after the current one.
    pub valid_future_year_range: u8,
}

impl FieldConfig {
    /// Configuration of the `MM/YY` expiration field.
    pub fn expiration() -> Self {
        Self {
            max_length: EXPIRATION_MAX_LENGTH,
            input_characters: CharacterSet::DecimalDigits,
            formatting_characters: CharacterSet::chars("/"),
            deleting_removes_trailing: true,
            valid_future_year_range: VALID_FUTURE_EXP_YEAR_RANGE,
        }
    }

    /// Configuration of a 16-digit card number field grouped by spaces.
    pub fn card_number() -> Self {
        Self {
            max_length: 16,
            input_characters: CharacterSet::DecimalDigits,
            formatting_characters: CharacterSet::chars(" "),
            deleting_removes_trailing: false,
            valid_future_year_range: VALID_FUTURE_EXP_YEAR_RANGE,
        }
    }

    /// Configuration of an ungrouped security code field of `length` digits.
    pub fn security_code(length: usize) -> Self {
        Self {
            max_length: length,
            input_characters: CharacterSet::DecimalDigits,
            formatting_characters: CharacterSet::none(),
            deleting_removes_trailing: false,
            valid_future_year_range: VALID_FUTURE_EXP_YEAR_RANGE,
        }
    }

    /// Sets the maximum unformatted length.
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    /// Sets the input character set.
    pub fn with_input_characters(mut self, set: CharacterSet) -> Self {
        self.input_characters = set;
        self
    }

    /// Sets the formatting character set.
    pub fn with_formatting_characters(mut self, set: CharacterSet) -> Self {
        self.formatting_characters = set;
        self
    }

    /// Sets the trailing-delete behaviour.
    pub fn with_deleting_removes_trailing(mut self, enabled: bool) -> Self {
        self.deleting_removes_trailing = enabled;
        self
    }

    /// Sets the accepted future-year window.
    pub fn with_valid_future_year_range(mut self, years: u8) -> Self {
        self.valid_future_year_range = years;
        self
    }

    /// Returns true if `c` is an input character.
    #[inline]
    pub fn is_input(&self, c: char) -> bool {
        self.input_characters.contains(c)
    }

    /// Returns true if `c` is a formatting character.
    #[inline]
    pub fn is_formatting(&self, c: char) -> bool {
        self.formatting_characters.contains(c)
    }

    /// Checks that every character of `replacement` is either an input or a
    /// formatting character.
    ///
    /// # Example
    ///
    /// ```
    /// use card_entry::{EditError, FieldConfig};
    ///
    /// let config = FieldConfig::expiration();
    /// assert!(config.accepts("12/").is_ok());
    /// assert_eq!(
    ///     config.accepts("1a"),
    ///     Err(EditError::InvalidCharacter { position: 1, character: 'a' })
    /// );
    /// ```
    pub fn accepts(&self, replacement: &str) -> Result<(), EditError> {
        match replacement
            .chars()
            .enumerate()
            .find(|&(_, c)| !self.is_input(c) && !self.is_formatting(c))
        {
            Some((position, character)) => Err(EditError::InvalidCharacter {
                position,
                character,
            }),
            None => Ok(()),
        }
    }

    /// Checks the configuration for internal consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_length == 0 {
            return Err(ConfigError::ZeroMaxLength);
        }
        if self.valid_future_year_range >= 100 {
            return Err(ConfigError::YearRangeTooWide {
                years: self.valid_future_year_range,
            });
        }
        // Only explicit formatting sets can be enumerated.
        if let CharacterSet::Chars(set) = &self.formatting_characters {
            if let Some(character) = set.chars().find(|&c| self.is_input(c)) {
                return Err(ConfigError::OverlappingCharacterSets { character });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_set_membership() {
        assert!(CharacterSet::DecimalDigits.contains('0'));
        assert!(!CharacterSet::DecimalDigits.contains('a'));
        assert!(CharacterSet::Alphanumerics.contains('a'));
        assert!(!CharacterSet::Alphanumerics.contains('/'));
        assert!(CharacterSet::chars("/-").contains('-'));
        assert!(!CharacterSet::none().contains('/'));
        assert!(CharacterSet::none().is_empty());
        assert!(!CharacterSet::DecimalDigits.is_empty());
    }

    #[test]
    fn test_expiration_defaults() {
        let config = FieldConfig::expiration();
        assert_eq!(config.max_length, 4);
        assert!(config.deleting_removes_trailing);
        assert_eq!(config.valid_future_year_range, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_accepts() {
        let config = FieldConfig::expiration();
        assert!(config.accepts("").is_ok());
        assert!(config.accepts("0/9").is_ok());
        assert_eq!(
            config.accepts("12-"),
            Err(EditError::InvalidCharacter {
                position: 2,
                character: '-'
            })
        );
    }

    #[test]
    fn test_validate_rejects_bad_configs() {
        assert_eq!(
            FieldConfig::expiration().with_max_length(0).validate(),
            Err(ConfigError::ZeroMaxLength)
        );
        assert_eq!(
            FieldConfig::expiration()
                .with_valid_future_year_range(100)
                .validate(),
            Err(ConfigError::YearRangeTooWide { years: 100 })
        );
        assert_eq!(
            FieldConfig::expiration()
                .with_formatting_characters(CharacterSet::chars("/5"))
                .validate(),
            Err(ConfigError::OverlappingCharacterSets { character: '5' })
        );
    }

    #[test]
    fn test_builder() {
        let config = FieldConfig::card_number()
            .with_max_length(19)
            .with_deleting_removes_trailing(true);
        assert_eq!(config.max_length, 19);
        assert!(config.deleting_removes_trailing);
        assert!(config.is_formatting(' '));
        assert!(config.is_input('4'));
    }
}
