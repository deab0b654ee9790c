//! Calendar and clock values.
//!
//! A date exists only if `NaiveDate::from_ymd_opt` accepts it, so an
//! overflowing day such as February 30 is rejected instead of rolling into
//! March.

use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsoDate(NaiveDate);

impl IsoDate {
    /// Build a date only if it exists on the proleptic Gregorian calendar.
    pub fn new(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for IsoDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// 24-hour wall-clock time at minute precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        NaiveTime::from_hms_opt(u32::from(hour), u32::from(minute), 0).map(Self)
    }

    pub fn hour(&self) -> u8 {
        self.0.hour() as u8
    }

    pub fn minute(&self) -> u8 {
        self.0.minute() as u8
    }

    pub fn as_naive(&self) -> NaiveTime {
        self.0
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

pub fn is_leap_year(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 2, 29).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_impossible_dates() {
        assert!(IsoDate::new(2024, 2, 29).is_some());
        assert!(IsoDate::new(2023, 2, 29).is_none());
        assert!(IsoDate::new(2024, 2, 30).is_none());
        assert!(IsoDate::new(2024, 2, 31).is_none());
        assert!(IsoDate::new(2024, 4, 31).is_none());
        assert!(IsoDate::new(1900, 2, 29).is_none());
        assert!(IsoDate::new(2000, 2, 29).is_some());
        assert!(IsoDate::new(2024, 13, 1).is_none());
        assert!(IsoDate::new(2024, 1, 0).is_none());
    }

    #[test]
    fn accessors_match_input() {
        let date = IsoDate::new(2024, 2, 29).unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2024, 2, 29));
        let time = ClockTime::new(23, 59).unwrap();
        assert_eq!((time.hour(), time.minute()), (23, 59));
    }

    #[test]
    fn leap_years() {
        assert!(is_leap_year(2024));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));
    }

    #[test]
    fn values_render_zero_padded() {
        let date = IsoDate::new(2024, 3, 5).unwrap();
        assert_eq!(date.to_string(), "2024-03-05");
        let early = IsoDate::new(1900, 1, 1).unwrap();
        assert_eq!(early.to_string(), "1900-01-01");
        let time = ClockTime::new(9, 5).unwrap();
        assert_eq!(time.to_string(), "09:05");
        assert!(ClockTime::new(24, 0).is_none());
        assert!(ClockTime::new(23, 60).is_none());
    }
}
