//! Calendar dates and the clock abstraction.
//!
//! Access grants are bounded by calendar dates, not instants: a grant that
//! expires on `2024-01-31` is still valid for the whole of that day. The
//! [`CalendarDate`] wrapper keeps every comparison at day granularity.
//!
//! [`Clock`] makes "now" an injected dependency so authorization decisions
//! can be replayed deterministically in tests.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

use crate::Result;
use crate::error::CoreError;

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

// =============================================================================
// Calendar Date
// =============================================================================

/// A day-granularity date in ISO `YYYY-MM-DD` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(Date);

impl CalendarDate {
    /// Wraps a `time::Date`.
    #[must_use]
    pub const fn new(date: Date) -> Self {
        Self(date)
    }

    /// Returns the wrapped `time::Date`.
    #[must_use]
    pub const fn inner(self) -> Date {
        self.0
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let formatted = self.0.format(DATE_FORMAT).map_err(|_| fmt::Error)?;
        write!(f, "{formatted}")
    }
}

impl FromStr for CalendarDate {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        let date = Date::parse(s, DATE_FORMAT).map_err(|e| {
            CoreError::invalid_date(format!("failed to parse calendar date '{s}': {e}"))
        })?;
        Ok(CalendarDate(date))
    }
}

impl From<Date> for CalendarDate {
    fn from(date: Date) -> Self {
        Self(date)
    }
}

impl Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let formatted = self.0.format(DATE_FORMAT).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&formatted)
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        CalendarDate::from_str(&s).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Clock
// =============================================================================

/// Source of the reference time for authorization decisions.
///
/// Production code uses [`SystemClock`]; tests pin a [`FixedClock`] so that
/// grant-window checks are reproducible.
pub trait Clock: Send + Sync {
    /// The current instant.
    fn now(&self) -> OffsetDateTime;

    /// The current UTC calendar date. Grant windows are compared at this
    /// granularity.
    fn today(&self) -> CalendarDate {
        CalendarDate::new(self.now().date())
    }
}

/// Clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// Clock pinned to a fixed instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(OffsetDateTime);

impl FixedClock {
    /// Pins the clock to the given instant.
    #[must_use]
    pub const fn new(instant: OffsetDateTime) -> Self {
        Self(instant)
    }

    /// Pins the clock to midnight UTC on the given date.
    #[must_use]
    pub fn on(date: CalendarDate) -> Self {
        Self(date.inner().midnight().assume_utc())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    #[test]
    fn test_calendar_date_display() {
        let d = CalendarDate::new(date!(2024 - 01 - 31));
        assert_eq!(d.to_string(), "2024-01-31");
    }

    #[test]
    fn test_calendar_date_from_str() {
        let d = CalendarDate::from_str("2024-03-15").unwrap();
        assert_eq!(d.inner(), date!(2024 - 03 - 15));
    }

    #[test]
    fn test_calendar_date_from_str_invalid() {
        assert!(CalendarDate::from_str("not-a-date").is_err());
        assert!(CalendarDate::from_str("2024-13-01").is_err());
        assert!(CalendarDate::from_str("2024-02-30").is_err());
        assert!(CalendarDate::from_str("").is_err());
    }

    #[test]
    fn test_calendar_date_error_names_input() {
        match CalendarDate::from_str("31/01/2024") {
            Err(CoreError::InvalidDate(msg)) => assert!(msg.contains("31/01/2024")),
            other => panic!("expected InvalidDate, got {other:?}"),
        }
    }

    #[test]
    fn test_calendar_date_ordering() {
        let early = CalendarDate::new(date!(2024 - 01 - 01));
        let late = CalendarDate::new(date!(2024 - 01 - 31));
        assert!(early < late);
        assert!(early <= early);
    }

    #[test]
    fn test_calendar_date_serde() {
        let d = CalendarDate::new(date!(2024 - 03 - 15));
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, "\"2024-03-15\"");
        let back: CalendarDate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, d);
    }

    #[test]
    fn test_calendar_date_serde_invalid() {
        assert!(serde_json::from_str::<CalendarDate>("\"yesterday\"").is_err());
    }

    #[test]
    fn test_calendar_date_leap_day() {
        let d = CalendarDate::from_str("2024-02-29").unwrap();
        assert_eq!(d.to_string(), "2024-02-29");
        assert!(CalendarDate::from_str("2023-02-29").is_err());
    }

    #[test]
    fn test_system_clock_advances() {
        let clock = SystemClock;
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock::new(datetime!(2024-03-15 10:30:00 UTC));
        assert_eq!(clock.now(), datetime!(2024-03-15 10:30:00 UTC));
        assert_eq!(clock.today(), CalendarDate::new(date!(2024 - 03 - 15)));
    }

    #[test]
    fn test_fixed_clock_on_date() {
        let clock = FixedClock::on(CalendarDate::new(date!(2024 - 04 - 01)));
        assert_eq!(clock.today(), CalendarDate::new(date!(2024 - 04 - 01)));
    }
}
