//! Calendar dates without a time component.
//!
//! [`CalendarDate`] wraps [`chrono::NaiveDate`] and restricts years to the four-digit range so
//! every value can be written as `YYYY-MM-DD` and typed back through the input mask.

use chrono::Datelike;
use chrono::Months;
use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const MIN_YEAR: i32 = 0;
pub const MAX_YEAR: i32 = 9999;

pub const WEEKDAY_LABELS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseDateError {
    #[error("expected a date shaped like YYYY-MM-DD, got {0:?}")]
    Shape(String),
    #[error("{year:04}-{month:02}-{day:02} is not a calendar date")]
    Invalid { year: i32, month: u32, day: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return None;
        }
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Local "today". Read it once per event/render pass and pass it down.
    pub fn today() -> Self {
        Self::from_naive(chrono::Local::now().date_naive())
    }

    /// Clamps out-of-range years into `MIN_YEAR..=MAX_YEAR`.
    pub fn from_naive(date: NaiveDate) -> Self {
        if date.year() > MAX_YEAR {
            Self::last_supported()
        } else if date.year() < MIN_YEAR {
            Self::first_supported()
        } else {
            Self(date)
        }
    }

    /// Strict `YYYY-MM-DD` parsing: exactly ten characters, ASCII digits, `-` separators.
    pub fn parse_iso(text: &str) -> Result<Self, ParseDateError> {
        let bytes = text.as_bytes();
        let shaped = bytes.len() == 10
            && bytes[4] == b'-'
            && bytes[7] == b'-'
            && bytes
                .iter()
                .enumerate()
                .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
        if !shaped {
            return Err(ParseDateError::Shape(text.to_string()));
        }

        let number = |range: std::ops::Range<usize>| {
            text[range]
                .parse::<u32>()
                .map_err(|_| ParseDateError::Shape(text.to_string()))
        };
        let year = number(0..4)? as i32;
        let month = number(5..7)?;
        let day = number(8..10)?;
        Self::from_ymd(year, month, day).ok_or(ParseDateError::Invalid { year, month, day })
    }

    pub fn naive(self) -> NaiveDate {
        self.0
    }

    pub fn year(self) -> i32 {
        self.0.year()
    }

    pub fn month(self) -> u32 {
        self.0.month()
    }

    pub fn day(self) -> u32 {
        self.0.day()
    }

    pub fn to_iso(self) -> String {
        self.to_string()
    }

    pub fn days_in_month(self) -> u32 {
        days_in_month(self.year(), self.month())
    }

    /// Weekday of the first day of this date's month, 0 = Sunday .. 6 = Saturday.
    pub fn first_weekday_of_month(self) -> u32 {
        self.first_of_month().0.weekday().num_days_from_sunday()
    }

    pub fn first_of_month(self) -> Self {
        Self(self.0.with_day(1).unwrap_or(self.0))
    }

    /// Adds `delta` months, clamping the day to the target month's length and the year to the
    /// supported range.
    pub fn add_months(self, delta: i32) -> Self {
        let months = Months::new(delta.unsigned_abs());
        let shifted = if delta >= 0 {
            self.0.checked_add_months(months)
        } else {
            self.0.checked_sub_months(months)
        };
        match shifted {
            Some(d) => Self::from_naive(d),
            None if delta >= 0 => Self::last_supported(),
            None => Self::first_supported(),
        }
    }

    pub fn add_years(self, delta: i32) -> Self {
        self.with_year(self.year().saturating_add(delta))
    }

    pub fn add_days(self, delta: i64) -> Self {
        match self.0.checked_add_signed(chrono::TimeDelta::days(delta)) {
            Some(d) => Self::from_naive(d),
            None if delta >= 0 => Self::last_supported(),
            None => Self::first_supported(),
        }
    }

    /// Same year and day in `month` (1..=12, clamped), day clamped to the month's length.
    pub fn with_month(self, month: u32) -> Self {
        let month = month.clamp(1, 12);
        clamped(self.year(), month, self.day())
    }

    /// Same month and day in `year` (clamped to the supported range), so Feb 29 becomes Feb 28
    /// in a common year.
    pub fn with_year(self, year: i32) -> Self {
        let year = year.clamp(MIN_YEAR, MAX_YEAR);
        clamped(year, self.month(), self.day())
    }

    pub fn month_name(self) -> &'static str {
        month_name(self.month())
    }

    pub fn is_same_month(self, other: Self) -> bool {
        self.year() == other.year() && self.month() == other.month()
    }

    fn first_supported() -> Self {
        Self(NaiveDate::from_ymd_opt(MIN_YEAR, 1, 1).unwrap_or(NaiveDate::MIN))
    }

    fn last_supported() -> Self {
        Self(NaiveDate::from_ymd_opt(MAX_YEAR, 12, 31).unwrap_or(NaiveDate::MAX))
    }
}

fn clamped(year: i32, month: u32, day: u32) -> CalendarDate {
    let day = day.clamp(1, days_in_month(year, month));
    CalendarDate::from_ymd(year, month, day).unwrap_or_else(CalendarDate::first_supported)
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year(), self.month(), self.day())
    }
}

impl FromStr for CalendarDate {
    type Err = ParseDateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_iso(s)
    }
}

impl From<CalendarDate> for NaiveDate {
    fn from(d: CalendarDate) -> Self {
        d.0
    }
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if NaiveDate::from_ymd_opt(year, 2, 29).is_some() => 29,
        2 => 28,
        _ => 0,
    }
}

/// Full English month name for 1..=12, empty otherwise.
pub fn month_name(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|i| MONTH_NAMES.get(i as usize))
        .copied()
        .unwrap_or("")
}

pub fn month_short_name(month: u32) -> &'static str {
    let name = month_name(month);
    name.get(..3).unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> CalendarDate {
        CalendarDate::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn parses_strict_iso() {
        assert_eq!(CalendarDate::parse_iso("2024-02-29"), Ok(d(2024, 2, 29)));
        assert_eq!("0001-01-01".parse::<CalendarDate>(), Ok(d(1, 1, 1)));
        assert!(matches!(
            CalendarDate::parse_iso("2024-2-29"),
            Err(ParseDateError::Shape(_))
        ));
        assert!(matches!(
            CalendarDate::parse_iso("2024-MM-DD"),
            Err(ParseDateError::Shape(_))
        ));
        assert!(matches!(
            CalendarDate::parse_iso(""),
            Err(ParseDateError::Shape(_))
        ));
    }

    #[test]
    fn rejects_impossible_dates() {
        assert_eq!(
            CalendarDate::parse_iso("2023-02-29"),
            Err(ParseDateError::Invalid {
                year: 2023,
                month: 2,
                day: 29
            })
        );
        assert!(CalendarDate::parse_iso("2024-13-01").is_err());
        assert!(CalendarDate::parse_iso("2024-04-31").is_err());
        assert!(CalendarDate::parse_iso("2024-00-10").is_err());
    }

    #[test]
    fn formats_zero_padded() {
        assert_eq!(d(987, 3, 4).to_iso(), "0987-03-04");
    }

    #[test]
    fn month_lengths_follow_leap_years() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2024, 11), 30);
    }

    #[test]
    fn add_months_rolls_over_years_and_clamps_days() {
        assert_eq!(d(2024, 1, 31).add_months(1), d(2024, 2, 29));
        assert_eq!(d(2024, 12, 15).add_months(1), d(2025, 1, 15));
        assert_eq!(d(2024, 1, 15).add_months(-1), d(2023, 12, 15));
        assert_eq!(d(9999, 12, 1).add_months(1), d(9999, 12, 31));
    }

    #[test]
    fn with_year_and_month_clamp_the_day() {
        assert_eq!(d(2024, 2, 29).with_year(2023), d(2023, 2, 28));
        assert_eq!(d(2024, 1, 31).with_month(4), d(2024, 4, 30));
        assert_eq!(d(2024, 1, 31).with_year(12000), d(9999, 1, 31));
    }

    #[test]
    fn first_weekday_counts_from_sunday() {
        // 2024-09-01 is a Sunday, 2024-05-01 a Wednesday.
        assert_eq!(d(2024, 9, 20).first_weekday_of_month(), 0);
        assert_eq!(d(2024, 5, 20).first_weekday_of_month(), 3);
    }

    #[test]
    fn month_names() {
        assert_eq!(month_name(1), "January");
        assert_eq!(month_short_name(9), "Sep");
        assert_eq!(month_name(13), "");
    }
}
