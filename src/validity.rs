//! Validity classification of a field's unformatted value.

use std::fmt;

/// How close a field's current value is to being usable.
///
/// Recomputed from scratch on every change and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ValidityState {
    /// Nothing entered yet.
    Empty,
    /// Partial input that can still be completed into a valid value.
    Incomplete,
    /// A complete, valid value.
    Valid,
    /// No completion of this input is valid; the edit must be rolled back.
    Impossible,
}

impl ValidityState {
    /// Returns true for [`ValidityState::Valid`].
    #[inline]
    pub const fn is_valid(self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Returns true if the field must reject the value.
    #[inline]
    pub const fn is_impossible(self) -> bool {
        matches!(self, Self::Impossible)
    }

    /// Returns true if editing may continue from this value.
    #[inline]
    pub const fn is_possible(self) -> bool {
        !self.is_impossible()
    }

    /// Lowercase name used in CLI and log output.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Incomplete => "incomplete",
            Self::Valid => "valid",
            Self::Impossible => "impossible",
        }
    }
}

impl fmt::Display for ValidityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicates() {
        assert!(ValidityState::Valid.is_valid());
        assert!(!ValidityState::Incomplete.is_valid());
        assert!(ValidityState::Impossible.is_impossible());
        assert!(ValidityState::Empty.is_possible());
        assert!(ValidityState::Incomplete.is_possible());
    }

    #[test]
    fn test_display() {
        assert_eq!(ValidityState::Incomplete.to_string(), "incomplete");
        assert_eq!(ValidityState::Impossible.to_string(), "impossible");
    }
}
