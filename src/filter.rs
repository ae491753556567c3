//! Cursor-aware character filtering.
//!
//! All offsets in this crate count `char`s, not bytes: a cursor offset of `n`
//! means the caret sits after the first `n` characters of the text.

use std::ops::Range;

/// A selected range of characters; an empty range is a plain caret.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, zeroize::Zeroize)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Selection {
    /// First selected character.
    pub start: usize,
    /// One past the last selected character.
    pub end: usize,
}

impl Selection {
    /// A selection spanning `start..end`. The bounds are swapped if reversed.
    pub fn new(start: usize, end: usize) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// An empty selection (caret) at `offset`.
    #[inline]
    pub const fn caret(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    /// Returns true if nothing is selected.
    #[inline]
    pub const fn is_caret(&self) -> bool {
        self.start == self.end
    }

    /// Number of selected characters.
    #[inline]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns true if the selection is a caret.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.is_caret()
    }

    /// Clamps both ends to `0..=len`.
    pub fn clamped(self, len: usize) -> Self {
        Self::new(self.start.min(len), self.end.min(len))
    }
}

impl From<Range<usize>> for Selection {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

impl From<Selection> for Range<usize> {
    fn from(selection: Selection) -> Self {
        selection.start..selection.end
    }
}

/// Keeps only the characters accepted by `accept`, remapping the cursor.
///
/// Every dropped character that sat before the cursor moves the cursor one
/// position left, so the caret stays next to the same retained character.
/// A cursor past the end of `text` is treated as sitting at the end.
///
/// # Example
///
/// ```
/// use card_entry::filter::filter_to_alphabet;
///
/// let (digits, cursor) = filter_to_alphabet("12/3", 3, |c| c.is_ascii_digit());
/// assert_eq!(digits, "123");
/// assert_eq!(cursor, 2);
/// ```
pub fn filter_to_alphabet<F>(text: &str, cursor: usize, accept: F) -> (String, usize)
where
    F: Fn(char) -> bool,
{
    let mut filtered = String::with_capacity(text.len());
    let mut new_cursor = cursor;
    let mut seen = 0;

    for (index, c) in text.chars().enumerate() {
        seen += 1;
        if accept(c) {
            filtered.push(c);
        } else if index < cursor {
            new_cursor -= 1;
        }
    }

    // Cursor offsets beyond the text collapse onto its end.
    let excess = cursor.saturating_sub(seen);
    (filtered, new_cursor - excess)
}

/// Keeps only the characters accepted by `accept`.
///
/// # Example
///
/// ```
/// use card_entry::filter::strip_formatting;
///
/// assert_eq!(strip_formatting("04/27", |c| c.is_ascii_digit()), "0427");
/// ```
pub fn strip_formatting<F>(text: &str, accept: F) -> String
where
    F: Fn(char) -> bool,
{
    text.chars().filter(|&c| accept(c)).collect()
}

/// Number of chars in `text`.
#[inline]
pub(crate) fn char_len(text: &str) -> usize {
    text.chars().count()
}
