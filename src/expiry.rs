//! Expiration date classification and extraction.
//!
//! An expiration field holds up to four digits `MMYY`. While the user types,
//! every prefix of a date that could still become valid is accepted; anything
//! else is rejected on the spot.
//!
//! # Rules
//!
//! - The month must prefix-match `01`-`12`.
//! - The year must prefix-match the rolling window that starts at the current
//!   two-digit year and spans `valid_future_exp_year_range` more years,
//!   wrapping past `99`.
//! - A date in the current year must not be in a month that already passed.
//!
//! # Example
//!
//! ```
//! use card_entry::expiry::classify_expiration;
//! use card_entry::{FixedCalendar, ValidityState};
//!
//! let march_2025 = FixedCalendar::new(25, 3).unwrap();
//!
//! assert_eq!(classify_expiration("", &march_2025, 30), ValidityState::Empty);
//! assert_eq!(classify_expiration("1", &march_2025, 30), ValidityState::Incomplete);
//! assert_eq!(classify_expiration("0325", &march_2025, 30), ValidityState::Valid);
//! assert_eq!(classify_expiration("0225", &march_2025, 30), ValidityState::Impossible);
//! assert_eq!(classify_expiration("13", &march_2025, 30), ValidityState::Impossible);
//! ```

use std::fmt;

use crate::calendar::{Calendar, SystemCalendar};
use crate::config::{FieldConfig, EXPIRATION_MAX_LENGTH};
use crate::error::ConfigError;
use crate::field::{FieldFormat, TentativeEdit};
use crate::filter::char_len;
use crate::format::{reformat_expiration, Formatted, EXPIRATION_SEPARATOR};
use crate::validity::ValidityState;

/// Closed range of two-digit values matched by prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefixRange {
    low: u8,
    high: u8,
}

/// Valid months.
pub const MONTHS: PrefixRange = PrefixRange { low: 1, high: 12 };

impl PrefixRange {
    /// A range `low..=high` of two-digit values (bounds above 99 are clamped).
    pub const fn new(low: u8, high: u8) -> Self {
        let low = if low > 99 { 99 } else { low };
        let high = if high > 99 { 99 } else { high };
        Self { low, high }
    }

    /// The range containing only `value`.
    pub const fn single(value: u8) -> Self {
        Self::new(value, value)
    }

    /// Lower bound.
    pub const fn low(&self) -> u8 {
        self.low
    }

    /// Upper bound.
    pub const fn high(&self) -> u8 {
        self.high
    }

    /// Returns true if some two-digit completion of `candidate` lies in the
    /// range.
    ///
    /// Only the first two characters are considered. An empty candidate
    /// matches any non-empty range; non-digits never match.
    ///
    /// # Example
    ///
    /// ```
    /// use card_entry::expiry::MONTHS;
    ///
    /// assert!(MONTHS.prefix_matches("0"));
    /// assert!(MONTHS.prefix_matches("1"));
    /// assert!(MONTHS.prefix_matches("12"));
    /// assert!(!MONTHS.prefix_matches("2"));
    /// assert!(!MONTHS.prefix_matches("00"));
    /// ```
    pub fn prefix_matches(&self, candidate: &str) -> bool {
        if self.low > self.high {
            return false;
        }
        let mut chars = candidate.chars();
        match (chars.next(), chars.next()) {
            (None, _) => true,
            (Some(first), None) => self.prefix_matches_digit(first),
            (Some(first), Some(second)) => match (first.to_digit(10), second.to_digit(10)) {
                (Some(tens), Some(ones)) => {
                    let value = (tens * 10 + ones) as u8;
                    (self.low..=self.high).contains(&value)
                }
                _ => false,
            },
        }
    }

    /// Returns true if some value in the range has `digit` as its tens digit.
    pub fn prefix_matches_digit(&self, digit: char) -> bool {
        match digit.to_digit(10) {
            Some(tens) => {
                let smallest = (tens * 10) as u8;
                let largest = smallest + 9;
                smallest <= self.high && largest >= self.low
            }
            None => false,
        }
    }
}

impl fmt::Display for PrefixRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}", self.low, self.high)
    }
}

/// Rolling window of accepted two-digit expiration years.
///
/// Starts at the current year suffix and covers `years` further years. When
/// the window crosses `99` it splits into two ranges.
///
/// # Example
///
/// ```
/// use card_entry::expiry::{PrefixRange, YearWindow};
///
/// let window = YearWindow::new(85, 30);
/// assert_eq!(window.ranges(), vec![PrefixRange::new(85, 99), PrefixRange::new(0, 15)]);
/// assert!(window.prefix_matches("99"));
/// assert!(window.prefix_matches("00"));
/// assert!(!window.prefix_matches("16"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearWindow {
    start: u8,
    years: u8,
}

impl YearWindow {
    /// Window starting at `current_year_suffix` spanning `years` more years.
    ///
    /// Windows of 100 years or more are capped at 99.
    pub fn new(current_year_suffix: u8, years: u8) -> Self {
        Self {
            start: current_year_suffix % 100,
            years: years.min(99),
        }
    }

    /// Window for the given calendar.
    pub fn for_calendar(calendar: &impl Calendar, years: u8) -> Self {
        Self::new(calendar.current_year_suffix(), years)
    }

    /// First year suffix of the window.
    pub fn start(&self) -> u8 {
        self.start
    }

    /// The one or two closed ranges making up the window.
    pub fn ranges(&self) -> Vec<PrefixRange> {
        let end = self.start as u16 + self.years as u16;
        if end < 100 {
            vec![PrefixRange::new(self.start, end as u8)]
        } else {
            vec![
                PrefixRange::new(self.start, 99),
                PrefixRange::new(0, (end % 100) as u8),
            ]
        }
    }

    /// Returns true if some year in the window completes `candidate`.
    pub fn prefix_matches(&self, candidate: &str) -> bool {
        self.ranges().iter().any(|range| range.prefix_matches(candidate))
    }

    /// Returns true if some year in the window starts with `digit`.
    pub fn prefix_matches_digit(&self, digit: char) -> bool {
        self.ranges()
            .iter()
            .any(|range| range.prefix_matches_digit(digit))
    }
}

/// Classifies unformatted expiration digits against `calendar`.
///
/// `future_years` is the width of the accepted year window. Input longer than
/// four characters, or containing non-digits, is [`ValidityState::Impossible`].
pub fn classify_expiration(digits: &str, calendar: &impl Calendar, future_years: u8) -> ValidityState {
    if digits.is_empty() {
        return ValidityState::Empty;
    }
    if !digits.chars().all(|c| c.is_ascii_digit()) || digits.len() > EXPIRATION_MAX_LENGTH {
        return ValidityState::Impossible;
    }

    // ASCII only from here, so byte offsets are char offsets.
    let split = digits.len().min(2);
    let (month, year) = digits.split_at(split);

    if !MONTHS.prefix_matches(month) {
        return ValidityState::Impossible;
    }
    if year.is_empty() {
        return ValidityState::Incomplete;
    }

    let current_year = calendar.current_year_suffix() % 100;
    let window = YearWindow::new(current_year, future_years);
    if !window.prefix_matches(year) {
        return ValidityState::Impossible;
    }

    if PrefixRange::single(current_year).prefix_matches(year) {
        let next_year = PrefixRange::single((current_year + 1) % 100);
        if year.len() == 1 && next_year.prefix_matches(year) {
            // Could still become next year.
            return ValidityState::Incomplete;
        }
        let month_number: u8 = month.parse().unwrap_or(0);
        if month_number < calendar.current_month() {
            return ValidityState::Impossible;
        }
    }

    if digits.len() == EXPIRATION_MAX_LENGTH {
        ValidityState::Valid
    } else {
        ValidityState::Incomplete
    }
}

/// Month and year of a complete, valid expiration field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExpirationFields {
    month: String,
    year: String,
}

impl ExpirationFields {
    /// Splits four ASCII digits into month and year.
    ///
    /// Returns `None` unless `digits` is exactly four ASCII digits with a
    /// month in `01`-`12`. Calendar checks are the classifier's job.
    pub fn from_digits(digits: &str) -> Option<Self> {
        if digits.len() != EXPIRATION_MAX_LENGTH || !digits.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        let (month, year) = digits.split_at(2);
        if !MONTHS.prefix_matches(month) {
            return None;
        }
        Some(Self {
            month: month.to_string(),
            year: year.to_string(),
        })
    }

    /// Two-digit month, e.g. `"04"`.
    pub fn month(&self) -> &str {
        &self.month
    }

    /// Two-digit year suffix, e.g. `"27"`.
    pub fn year(&self) -> &str {
        &self.year
    }

    /// Month as a number (`1..=12`).
    pub fn month_number(&self) -> u8 {
        self.month.parse().unwrap_or(0)
    }

    /// Year suffix as a number (`0..=99`).
    pub fn year_suffix(&self) -> u8 {
        self.year.parse().unwrap_or(0)
    }

    /// Resolves the two-digit year against the current four-digit year.
    ///
    /// Suffixes below the current one belong to the next century, matching
    /// the rolling window. Returns `None` if the year does not fit in a `u16`.
    ///
    /// # Example
    ///
    /// ```
    /// use card_entry::expiry::ExpirationFields;
    ///
    /// let fields = ExpirationFields::from_digits("0100").unwrap();
    /// assert_eq!(fields.resolve(2085).map(|date| date.year()), Some(2100));
    ///
    /// let fields = ExpirationFields::from_digits("0427").unwrap();
    /// assert_eq!(fields.resolve(2025).map(|date| date.year()), Some(2027));
    /// ```
    pub fn resolve(&self, current_year: u16) -> Option<ExpiryDate> {
        let current_suffix = current_year % 100;
        let century = current_year - current_suffix;
        let suffix = u16::from(self.year_suffix());
        let year = if suffix >= current_suffix {
            century.checked_add(suffix)?
        } else {
            century.checked_add(100)?.checked_add(suffix)?
        };
        Some(ExpiryDate {
            month: self.month_number(),
            year,
        })
    }
}

impl fmt::Display for ExpirationFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.month, EXPIRATION_SEPARATOR, self.year)
    }
}

/// An expiration month with a four-digit year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExpiryDate {
    /// Four-digit year (e.g., 2025)
    year: u16,
    /// Month (1-12)
    month: u8,
}

impl ExpiryDate {
    /// Creates a new expiry date.
    ///
    /// Returns `None` if the month is invalid (not 1-12).
    pub fn new(month: u8, year: u16) -> Option<Self> {
        if !(1..=12).contains(&month) {
            return None;
        }
        Some(Self { month, year })
    }

    /// Returns the month (1-12).
    #[inline]
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// Returns the four-digit year.
    #[inline]
    pub const fn year(&self) -> u16 {
        self.year
    }

    /// Returns true if the card expired before `current_month`/`current_year`.
    ///
    /// A card stays usable through the end of its expiry month.
    pub fn is_expired_at(&self, current_year: u16, current_month: u8) -> bool {
        (self.year, self.month) < (current_year, current_month)
    }

    /// Returns the number of months from the given month until expiration.
    ///
    /// Returns 0 if already expired.
    pub fn months_until_expiry_at(&self, current_year: u16, current_month: u8) -> u32 {
        let expiry_months = (self.year as u32) * 12 + (self.month as u32);
        let current_months = (current_year as u32) * 12 + (current_month as u32);

        expiry_months.saturating_sub(current_months)
    }

    /// Formats as MM/YY.
    pub fn format_short(&self) -> String {
        format!("{:02}/{:02}", self.month, self.year % 100)
    }

    /// Formats as MM/YYYY.
    pub fn format_long(&self) -> String {
        format!("{:02}/{:04}", self.month, self.year)
    }
}

impl fmt::Display for ExpiryDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}", self.month, self.year % 100)
    }
}

/// The `MM/YY` expiration field format.
///
/// Reads "today" from its calendar on every classification.
#[derive(Debug, Clone)]
pub struct ExpirationFormat<C = SystemCalendar> {
    config: FieldConfig,
    calendar: C,
}

impl Default for ExpirationFormat<SystemCalendar> {
    fn default() -> Self {
        Self::new(SystemCalendar)
    }
}

impl<C: Calendar> ExpirationFormat<C> {
    /// Expiration format with the default configuration.
    pub fn new(calendar: C) -> Self {
        Self {
            config: FieldConfig::expiration(),
            calendar,
        }
    }

    /// Expiration format with a custom configuration.
    ///
    /// The formatting set must contain `/` and `max_length` must stay 4.
    pub fn with_config(config: FieldConfig, calendar: C) -> Result<Self, ConfigError> {
        config.validate()?;
        if !config.is_formatting(EXPIRATION_SEPARATOR) {
            return Err(ConfigError::MissingSeparator {
                separator: EXPIRATION_SEPARATOR,
            });
        }
        let config = config.with_max_length(EXPIRATION_MAX_LENGTH);
        Ok(Self { config, calendar })
    }

    /// The calendar used for classification.
    pub fn calendar(&self) -> &C {
        &self.calendar
    }

    /// Accepted year window as of now.
    pub fn year_window(&self) -> YearWindow {
        YearWindow::for_calendar(&self.calendar, self.config.valid_future_year_range)
    }

    /// Month and year of `text` if it holds a complete, valid date.
    ///
    /// # Example
    ///
    /// ```
    /// use card_entry::expiry::ExpirationFormat;
    /// use card_entry::FixedCalendar;
    ///
    /// let format = ExpirationFormat::new(FixedCalendar::new(25, 3).unwrap());
    /// let fields = format.extract_fields("04/27").unwrap();
    /// assert_eq!(fields.month(), "04");
    /// assert_eq!(fields.year(), "27");
    /// assert!(format.extract_fields("04/2").is_none());
    /// ```
    pub fn extract_fields(&self, text: &str) -> Option<ExpirationFields> {
        let digits = self.unformatted(text);
        if !self.classify(&digits).is_valid() {
            return None;
        }
        ExpirationFields::from_digits(&digits)
    }
}

impl<C: Calendar> FieldFormat for ExpirationFormat<C> {
    fn config(&self) -> &FieldConfig {
        &self.config
    }

    fn placeholder(&self) -> &str {
        "MM/YY"
    }

    fn reformat(&self, unformatted: &str, cursor: usize) -> Formatted {
        reformat_expiration(unformatted, cursor, &self.year_window())
    }

    fn classify(&self, unformatted: &str) -> ValidityState {
        classify_expiration(unformatted, &self.calendar, self.config.valid_future_year_range)
    }

    /// A `/` typed right after a lone month digit pads that digit: `1/` is
    /// read as `01/`.
    fn adjust_edit<'a>(&self, edit: TentativeEdit<'a>) -> TentativeEdit<'a> {
        let lone_digit = char_len(&self.unformatted(&edit.text)) == 1;
        if edit.range.start == 1 && edit.replacement == "/" && lone_digit {
            let mut text = String::with_capacity(edit.text.len() + 1);
            text.push('0');
            text.push_str(&edit.text);
            return TentativeEdit {
                text,
                cursor: edit.cursor + 1,
                ..edit
            };
        }
        edit
    }
}
