use chrono::{DateTime, Datelike, Local, Months, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{GanttError, GanttResult};

const DATE_TIME_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M",
];
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

/// Calendar components of a single instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateParts {
    pub year: i32,
    /// 1..=12
    pub month: u32,
    pub day: u32,
    /// ISO numbering: Monday = 1 .. Sunday = 7.
    pub weekday: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub days_in_month: u32,
}

impl DateParts {
    #[must_use]
    pub fn is_weekend(self) -> bool {
        self.weekday >= 6
    }

    /// `(year, month, day)` key used to match an instant against laid out days.
    #[must_use]
    pub fn calendar_day(self) -> (i32, u32, u32) {
        (self.year, self.month, self.day)
    }
}

/// Splits an instant into its calendar components.
///
/// The instant is taken by value, so month-length arithmetic never touches the
/// caller's copy.
#[must_use]
pub fn decompose(instant: NaiveDateTime) -> DateParts {
    let (year, month) = (instant.year(), instant.month());
    DateParts {
        year,
        month,
        day: instant.day(),
        weekday: instant.weekday().number_from_monday(),
        hour: instant.hour(),
        minute: instant.minute(),
        second: instant.second(),
        days_in_month: days_in_month(year, month),
    }
}

/// Resolves a raw date input and decomposes it.
pub fn decompose_input(input: &DateInput) -> GanttResult<DateParts> {
    input.resolve().map(decompose)
}

#[must_use]
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

#[must_use]
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

pub fn first_day_of_month(date: NaiveDate) -> GanttResult<NaiveDate> {
    date.with_day(1).ok_or_else(|| {
        GanttError::InvalidDate(format!("cannot resolve first day of the month of {date}"))
    })
}

/// Shifts an instant by whole months, clamping the day to the target month's length.
pub fn add_months(instant: NaiveDateTime, months: i32) -> GanttResult<NaiveDateTime> {
    let shifted = if months >= 0 {
        instant.checked_add_months(Months::new(months.unsigned_abs()))
    } else {
        instant.checked_sub_months(Months::new(months.unsigned_abs()))
    };
    shifted.ok_or_else(|| {
        GanttError::InvalidDate(format!("{instant} shifted by {months} months is out of range"))
    })
}

/// Midnight of the first day of the month after `instant`'s month.
pub fn first_day_of_next_month(instant: NaiveDateTime) -> GanttResult<NaiveDateTime> {
    let first = first_day_of_month(instant.date())?.and_time(NaiveTime::MIN);
    add_months(first, 1)
}

/// The host's current local calendar day.
#[must_use]
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parses the textual date shapes accepted on chart inputs.
///
/// Date-only values resolve to midnight. RFC 3339 values keep their wall-clock
/// time; the offset is dropped.
pub fn parse_instant(raw: &str) -> GanttResult<NaiveDateTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(GanttError::InvalidDate("date input is empty".to_owned()));
    }

    for format in DATE_TIME_FORMATS {
        if let Ok(value) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(value);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Ok(date.and_time(NaiveTime::MIN));
        }
    }
    if let Ok(value) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(value.naive_local());
    }

    Err(GanttError::InvalidDate(format!(
        "unrecognized date `{trimmed}`"
    )))
}

/// Date-like value accepted from hosts: epoch milliseconds or text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateInput {
    Timestamp(i64),
    Text(String),
}

impl DateInput {
    /// Epoch milliseconds are read as UTC wall-clock time.
    pub fn resolve(&self) -> GanttResult<NaiveDateTime> {
        match self {
            Self::Timestamp(millis) => DateTime::<Utc>::from_timestamp_millis(*millis)
                .map(|value| value.naive_utc())
                .ok_or_else(|| {
                    GanttError::InvalidDate(format!("timestamp {millis} is out of range"))
                }),
            Self::Text(raw) => parse_instant(raw),
        }
    }
}

/// Serde hook for optional instants given in any [`DateInput`] shape.
///
/// Use with `#[serde(default, deserialize_with = "...")]`; `null` stays `None`.
pub fn deserialize_optional_instant<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<DateInput>::deserialize(deserializer)?
        .as_ref()
        .map(DateInput::resolve)
        .transpose()
        .map_err(serde::de::Error::custom)
}

impl From<&str> for DateInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<i64> for DateInput {
    fn from(value: i64) -> Self {
        Self::Timestamp(value)
    }
}

#[cfg(test)]
mod tests {
    use super::{days_in_month, is_leap_year};

    #[test]
    fn leap_years_follow_gregorian_rules() {
        assert!(is_leap_year(2024));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));
    }

    #[test]
    fn february_length_tracks_leap_years() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2023, 4), 30);
        assert_eq!(days_in_month(2023, 12), 31);
    }
}
