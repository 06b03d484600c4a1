use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::calendar::{decompose, days_in_month, first_day_of_month};
use crate::error::{GanttError, GanttResult};

/// One laid out calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayDescriptor {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    /// Monday = 1 .. Sunday = 7.
    pub weekday: u32,
    pub is_weekend: bool,
    pub is_today: bool,
    /// Midnight of this day.
    pub date: NaiveDateTime,
}

impl DayDescriptor {
    #[must_use]
    pub fn new(date: NaiveDate, today: NaiveDate) -> Self {
        let parts = decompose(date.and_time(NaiveTime::MIN));
        Self {
            year: parts.year,
            month: parts.month,
            day: parts.day,
            weekday: parts.weekday,
            is_weekend: parts.is_weekend(),
            is_today: date == today,
            date: date.and_time(NaiveTime::MIN),
        }
    }

    #[must_use]
    pub fn calendar_date(&self) -> NaiveDate {
        self.date.date()
    }
}

/// All days of one `(year, month)`, never split across a month boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthGroup {
    pub year: i32,
    pub month: u32,
    pub days: Vec<DayDescriptor>,
}

impl MonthGroup {
    #[must_use]
    pub fn len(&self) -> usize {
        self.days.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Header label, e.g. `2024年2月`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}年{}月", self.year, self.month)
    }
}

/// Chronological month groups covering a date span.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSet {
    pub months: Vec<MonthGroup>,
}

impl PeriodSet {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    #[must_use]
    pub fn month_count(&self) -> usize {
        self.months.len()
    }

    /// Column count of the laid out grid.
    #[must_use]
    pub fn total_days(&self) -> usize {
        self.months.iter().map(MonthGroup::len).sum()
    }

    pub fn days(&self) -> impl Iterator<Item = &DayDescriptor> {
        self.months.iter().flat_map(|month| month.days.iter())
    }

    /// Flattens the groups into the chronological day list used for column indexing.
    #[must_use]
    pub fn flatten(&self) -> Vec<DayDescriptor> {
        self.days().copied().collect()
    }
}

/// Expands the month containing `anchor` into one descriptor per day.
///
/// `today` drives the `is_today` flag; production callers pass
/// [`crate::core::local_today`].
pub fn build_month(anchor: NaiveDateTime, today: NaiveDate) -> GanttResult<MonthGroup> {
    let first = first_day_of_month(anchor.date())?;
    let length = days_in_month(first.year(), first.month()) as usize;
    let days: Vec<DayDescriptor> = first
        .iter_days()
        .take(length)
        .map(|date| DayDescriptor::new(date, today))
        .collect();

    if days.len() != length {
        return Err(GanttError::InvalidDate(format!(
            "month of {anchor} runs past the representable calendar"
        )));
    }

    Ok(MonthGroup {
        year: first.year(),
        month: first.month(),
        days,
    })
}

/// Expands `[start, end]` into whole months.
///
/// Both endpoints are required. `start` must not be after `end`; a reversed
/// range yields an empty set rather than being swapped.
pub fn build_period(
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
    today: NaiveDate,
) -> GanttResult<PeriodSet> {
    let (Some(start), Some(end)) = (start, end) else {
        return Err(GanttError::InvalidRange(format!(
            "period requires both endpoints (start present: {}, end present: {})",
            start.is_some(),
            end.is_some()
        )));
    };

    if start > end {
        debug!(%start, %end, "reversed period; returning no months");
        return Ok(PeriodSet::default());
    }

    let months = if (start.year(), start.month()) == (end.year(), end.month()) {
        vec![build_month(start, today)?]
    } else {
        let last = first_day_of_month(end.date())?;
        let mut cursor = first_day_of_month(start.date())?;
        let mut months = Vec::new();
        while cursor <= last {
            months.push(build_month(cursor.and_time(NaiveTime::MIN), today)?);
            cursor = cursor.checked_add_months(Months::new(1)).ok_or_else(|| {
                GanttError::InvalidDate(format!("no month follows {cursor}"))
            })?;
        }
        months
    };

    let period = PeriodSet { months };
    debug!(
        months = period.month_count(),
        days = period.total_days(),
        %start,
        %end,
        "built period"
    );
    Ok(period)
}
