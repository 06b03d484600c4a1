use serde::{Deserialize, Serialize};

use crate::core::period::{DayDescriptor, PeriodSet};

/// Label shown instead of the day number on today's column.
pub const TODAY_LABEL: &str = "今";

/// Pixel parameters of one laid out chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridMetrics {
    pub column_width: f64,
    pub row_height: f64,
    pub header_height: f64,
    pub column_count: usize,
    pub row_count: usize,
}

impl GridMetrics {
    #[must_use]
    pub fn body_width(self) -> f64 {
        self.column_count as f64 * self.column_width
    }

    #[must_use]
    pub fn body_height(self) -> f64 {
        self.row_count as f64 * self.row_height
    }
}

/// Upper header band spanning the columns of one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthBand {
    pub x1: f64,
    pub x2: f64,
    pub y1: f64,
    pub y2: f64,
    pub text_x: f64,
    pub text_y: f64,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayLabel {
    Today,
    Day(u32),
}

impl DayLabel {
    #[must_use]
    pub fn text(self) -> String {
        match self {
            Self::Today => TODAY_LABEL.to_owned(),
            Self::Day(day) => day.to_string(),
        }
    }
}

/// Lower header cell for one day column.
///
/// `day.is_weekend` and `day.is_today` are render hints only; they never
/// change the cell geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayCell {
    pub column: usize,
    pub x1: f64,
    pub x2: f64,
    pub y1: f64,
    pub y2: f64,
    pub text_x: f64,
    pub text_y: f64,
    pub label: DayLabel,
    pub day: DayDescriptor,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeaderLayout {
    pub months: Vec<MonthBand>,
    pub days: Vec<DayCell>,
}

/// Lays out the two header bands: months on top, days below.
///
/// Columns are numbered sequentially across month boundaries.
#[must_use]
pub fn layout_header(period: &PeriodSet, column_width: f64, header_height: f64) -> HeaderLayout {
    let mut layout = HeaderLayout {
        months: Vec::with_capacity(period.month_count()),
        days: Vec::with_capacity(period.total_days()),
    };
    let band_height = header_height / 2.0;
    let mut column = 0usize;

    for month in &period.months {
        let month_x1 = column as f64 * column_width;
        let month_x2 = (column + month.len()) as f64 * column_width;
        layout.months.push(MonthBand {
            x1: month_x1,
            x2: month_x2,
            y1: 0.0,
            y2: band_height,
            text_x: month_x1 + (month_x2 - month_x1) / 2.0,
            text_y: header_height / 4.0,
            text: month.label(),
        });

        for day in &month.days {
            let x1 = column as f64 * column_width;
            let label = if day.is_today {
                DayLabel::Today
            } else {
                DayLabel::Day(day.day)
            };
            layout.days.push(DayCell {
                column,
                x1,
                x2: x1 + column_width,
                y1: band_height,
                y2: header_height,
                text_x: x1 + column_width / 2.0,
                text_y: header_height * 0.75,
                label,
                day: *day,
            });
            column += 1;
        }
    }

    layout
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridLine {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GridLines {
    pub vertical: Vec<GridLine>,
    pub horizontal: Vec<GridLine>,
}

/// Body grid lines at every column and row boundary, both edges included.
///
/// The line on the header/body seam (`horizontal[0]`) is left in; callers
/// that draw a header suppress it.
#[must_use]
pub fn grid_lines(
    column_width: f64,
    column_count: usize,
    row_height: f64,
    row_count: usize,
) -> GridLines {
    let body_width = column_count as f64 * column_width;
    let body_height = row_count as f64 * row_height;

    let vertical = (0..=column_count)
        .map(|column| {
            let x = column as f64 * column_width;
            GridLine {
                x1: x,
                y1: 0.0,
                x2: x,
                y2: body_height,
            }
        })
        .collect();
    let horizontal = (0..=row_count)
        .map(|row| {
            let y = row as f64 * row_height;
            GridLine {
                x1: 0.0,
                y1: y,
                x2: body_width,
                y2: y,
            }
        })
        .collect();

    GridLines {
        vertical,
        horizontal,
    }
}
