use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::core::period::DayDescriptor;

const HOURS_PER_DAY: f64 = 24.0;

/// Outcome of placing one instant on the laid out day columns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum XResolution {
    Resolved(f64),
    /// The instant's calendar day is not part of the laid out range.
    OutOfRange,
}

impl XResolution {
    #[must_use]
    pub fn is_resolved(self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    /// Collapses to a drawable coordinate; unresolved instants sit at pixel 0.
    #[must_use]
    pub fn to_pixel(self) -> f64 {
        match self {
            Self::Resolved(x) => x,
            Self::OutOfRange => 0.0,
        }
    }
}

/// Horizontal pixel span of one task bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaskBar {
    pub x1: f64,
    pub x2: f64,
}

impl TaskBar {
    #[must_use]
    pub fn width(self) -> f64 {
        self.x2 - self.x1
    }
}

/// Both endpoint resolutions of a task, before collapsing to pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaskSpan {
    pub start: XResolution,
    pub end: XResolution,
}

impl TaskSpan {
    /// An unresolved end collapses onto the start, giving a zero-width marker.
    ///
    /// An unresolved start still lands on pixel 0, so a task starting outside
    /// the range with an end also outside it collapses to `{0, 0}`.
    #[must_use]
    pub fn to_bar(self) -> TaskBar {
        let x1 = self.start.to_pixel();
        let x2 = match self.end {
            XResolution::Resolved(x) => x.max(x1),
            XResolution::OutOfRange => x1,
        };
        TaskBar { x1, x2 }
    }
}

/// Places `instant` inside its day column.
///
/// `days` must be chronologically sorted with one entry per calendar day, as
/// produced by [`crate::core::PeriodSet::flatten`]. Positions inside a day are
/// linear in the hour; minutes and seconds are ignored.
#[must_use]
pub fn resolve_x(days: &[DayDescriptor], instant: NaiveDateTime, column_width: f64) -> XResolution {
    let target = instant.date();
    match days.binary_search_by_key(&target, DayDescriptor::calendar_date) {
        Ok(column) => {
            let day_x1 = column as f64 * column_width;
            XResolution::Resolved(day_x1 + f64::from(instant.hour()) * (column_width / HOURS_PER_DAY))
        }
        Err(_) => XResolution::OutOfRange,
    }
}

/// Like [`resolve_x`], treating a missing instant as out of range.
#[must_use]
pub fn resolve_optional_x(
    days: &[DayDescriptor],
    instant: Option<NaiveDateTime>,
    column_width: f64,
) -> XResolution {
    instant.map_or(XResolution::OutOfRange, |instant| {
        resolve_x(days, instant, column_width)
    })
}

#[must_use]
pub fn resolve_task_span(
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
    days: &[DayDescriptor],
    column_width: f64,
) -> TaskSpan {
    TaskSpan {
        start: resolve_optional_x(days, start, column_width),
        end: resolve_optional_x(days, end, column_width),
    }
}

/// Pixel span of a task; never returns `x2 < x1`.
#[must_use]
pub fn resolve_task_bar(
    start: NaiveDateTime,
    end: NaiveDateTime,
    days: &[DayDescriptor],
    column_width: f64,
) -> TaskBar {
    resolve_task_span(Some(start), Some(end), days, column_width).to_bar()
}
