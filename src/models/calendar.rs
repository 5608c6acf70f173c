//! Calendar date and time window models.
//!
//! Slot dates are kept as their three syntactic components rather than a
//! calendar date: `31-02-2024` parses (day 1..=31, month 1..=12, year > 0)
//! even though February has no 31st. Use [`SlotDate::parse_strict`] to
//! reject such dates, or [`SlotDate::calendar_date`] to test them.
//!
//! Times of day are `HH:MM` values backed by [`chrono::NaiveTime`].

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// A `DD-MM-YYYY` date, validated syntactically only.
///
/// Ordered by year, then month, then day. Deserialization applies the
/// same range checks as [`SlotDate::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "SlotDateFields")]
pub struct SlotDate {
    /// Year (> 0).
    pub year: u32,
    /// Month (1..=12).
    pub month: u8,
    /// Day of month (1..=31).
    pub day: u8,
}

#[derive(Deserialize)]
struct SlotDateFields {
    year: i64,
    month: i64,
    day: i64,
}

impl TryFrom<SlotDateFields> for SlotDate {
    type Error = ValidationError;

    fn try_from(fields: SlotDateFields) -> Result<Self, Self::Error> {
        SlotDate::new(fields.day, fields.month, fields.year)
    }
}

impl SlotDate {
    /// Creates a date from its components, checking the syntactic ranges.
    pub fn new(day: i64, month: i64, year: i64) -> Result<Self, ValidationError> {
        let in_range = (1..=31).contains(&day) && (1..=12).contains(&month) && year > 0;
        let out_of_range = ValidationError::DateOutOfRange { day, month, year };
        if !in_range {
            return Err(out_of_range);
        }
        Ok(Self {
            year: u32::try_from(year).map_err(|_| out_of_range.clone())?,
            month: month as u8,
            day: day as u8,
        })
    }

    /// Parses `DD-MM-YYYY` leniently.
    ///
    /// The input must split on `-` into exactly three integers. Each
    /// component may carry surrounding whitespace.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let malformed = || ValidationError::MalformedDate {
            input: input.to_string(),
        };

        let parts: Vec<&str> = input.split('-').collect();
        let [day, month, year] = parts.as_slice() else {
            return Err(malformed());
        };

        let component = |s: &str| s.trim().parse::<i64>().map_err(|_| malformed());
        Self::new(component(*day)?, component(*month)?, component(*year)?)
    }

    /// Parses `DD-MM-YYYY` and also rejects dates missing from the calendar.
    pub fn parse_strict(input: &str) -> Result<Self, ValidationError> {
        let date = Self::parse(input)?;
        if date.calendar_date().is_none() {
            return Err(ValidationError::ImpossibleDate {
                input: input.to_string(),
            });
        }
        Ok(date)
    }

    /// The calendar date, or `None` if the components name a day that
    /// does not exist (e.g. 31 February).
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        let year = i32::try_from(self.year).ok()?;
        NaiveDate::from_ymd_opt(year, u32::from(self.month), u32::from(self.day))
    }
}

impl PartialOrd for SlotDate {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SlotDate {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.year, self.month, self.day).cmp(&(other.year, other.month, other.day))
    }
}

impl fmt::Display for SlotDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}-{:04}", self.day, self.month, self.year)
    }
}

impl FromStr for SlotDate {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A begin/end pair of times of day.
///
/// A window whose end is not after its begin runs overnight; within its
/// own date it is treated as lasting until midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Start of the window.
    pub begin: NaiveTime,
    /// End of the window.
    pub end: NaiveTime,
}

impl TimeWindow {
    /// Creates a new time window.
    pub fn new(begin: NaiveTime, end: NaiveTime) -> Self {
        Self { begin, end }
    }

    /// Parses `HH:MM` begin and end times.
    pub fn parse(begin: &str, end: &str) -> Result<Self, ValidationError> {
        Ok(Self::new(parse_time(begin)?, parse_time(end)?))
    }

    /// Whether the window wraps past midnight.
    #[inline]
    pub fn is_overnight(&self) -> bool {
        self.end <= self.begin
    }

    /// Minutes covered on the window's own date.
    pub fn minutes(&self) -> u32 {
        let (begin, end) = self.day_bounds();
        end - begin
    }

    /// Whether two windows on the same date overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        let (a_begin, a_end) = self.day_bounds();
        let (b_begin, b_end) = other.day_bounds();
        a_begin < b_end && b_begin < a_end
    }

    /// Minute-of-day bounds `[begin, end)`, with overnight windows cut at midnight.
    fn day_bounds(&self) -> (u32, u32) {
        let begin = minute_of_day(self.begin);
        let end = if self.is_overnight() {
            24 * 60
        } else {
            minute_of_day(self.end)
        };
        (begin, end)
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.begin.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

/// Parses an `HH:MM` (or `H:MM`) time of day.
pub fn parse_time(input: &str) -> Result<NaiveTime, ValidationError> {
    NaiveTime::parse_from_str(input.trim(), "%H:%M").map_err(|_| ValidationError::MalformedTime {
        input: input.to_string(),
    })
}

fn minute_of_day(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}
