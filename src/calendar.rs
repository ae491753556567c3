//! Sources of "today" for expiration checks.
//!
//! The expiration classifier never reads the clock itself. It asks a
//! [`Calendar`] for the current two-digit year and month, so tests can pin
//! the date with [`FixedCalendar`] while applications use
//! [`SystemCalendar`].
//!
//! # Example
//!
//! ```
//! use card_entry::{Calendar, FixedCalendar};
//!
//! let march_2025 = FixedCalendar::new(25, 3).unwrap();
//! assert_eq!(march_2025.current_year_suffix(), 25);
//! assert_eq!(march_2025.current_month(), 3);
//!
//! assert!(FixedCalendar::new(25, 13).is_none());
//! ```

use chrono::Datelike;

/// Supplies the current year suffix and month.
pub trait Calendar {
    /// The current year modulo 100 (`0..=99`).
    fn current_year_suffix(&self) -> u8;

    /// The current month (`1..=12`).
    fn current_month(&self) -> u8;
}

impl<C: Calendar + ?Sized> Calendar for &C {
    #[inline]
    fn current_year_suffix(&self) -> u8 {
        (**self).current_year_suffix()
    }

    #[inline]
    fn current_month(&self) -> u8 {
        (**self).current_month()
    }
}

/// The local system clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemCalendar;

impl Calendar for SystemCalendar {
    fn current_year_suffix(&self) -> u8 {
        chrono::Local::now().year().rem_euclid(100) as u8
    }

    fn current_month(&self) -> u8 {
        chrono::Local::now().month() as u8
    }
}

/// A calendar pinned to a single month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FixedCalendar {
    year_suffix: u8,
    month: u8,
}

impl FixedCalendar {
    /// Creates a calendar for the given year suffix and month.
    ///
    /// Returns `None` if the suffix is not `0..=99` or the month not `1..=12`.
    pub fn new(year_suffix: u8, month: u8) -> Option<Self> {
        if year_suffix > 99 || !(1..=12).contains(&month) {
            return None;
        }
        Some(Self { year_suffix, month })
    }

    /// Pins the calendar to the month containing `date`.
    pub fn from_date(date: &impl Datelike) -> Self {
        Self {
            year_suffix: date.year().rem_euclid(100) as u8,
            month: date.month() as u8,
        }
    }

    /// Snapshots another calendar.
    pub fn snapshot(calendar: &impl Calendar) -> Self {
        Self {
            year_suffix: calendar.current_year_suffix(),
            month: calendar.current_month(),
        }
    }
}

impl Calendar for FixedCalendar {
    #[inline]
    fn current_year_suffix(&self) -> u8 {
        self.year_suffix
    }

    #[inline]
    fn current_month(&self) -> u8 {
        self.month
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_fixed_calendar_bounds() {
        assert!(FixedCalendar::new(0, 1).is_some());
        assert!(FixedCalendar::new(99, 12).is_some());
        assert!(FixedCalendar::new(100, 1).is_none());
        assert!(FixedCalendar::new(25, 0).is_none());
        assert!(FixedCalendar::new(25, 13).is_none());
    }

    #[test]
    fn test_from_date() {
        let date = NaiveDate::from_ymd_opt(2085, 11, 30).unwrap();
        let calendar = FixedCalendar::from_date(&date);
        assert_eq!(calendar.current_year_suffix(), 85);
        assert_eq!(calendar.current_month(), 11);
    }

    #[test]
    fn test_system_calendar_in_range() {
        let calendar = SystemCalendar;
        assert!(calendar.current_year_suffix() < 100);
        assert!((1..=12).contains(&calendar.current_month()));
    }

    #[test]
    fn test_snapshot_and_reference() {
        let calendar = FixedCalendar::new(7, 4).unwrap();
        let by_ref: &dyn Calendar = &calendar;
        assert_eq!(FixedCalendar::snapshot(&by_ref), calendar);
    }
}
