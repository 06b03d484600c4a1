pub mod calendar;
pub mod grid;
pub mod period;
pub mod projection;
pub mod scroll;
pub mod types;

pub use calendar::{
    DateInput, DateParts, add_months, decompose, decompose_input, days_in_month,
    deserialize_optional_instant, first_day_of_month, first_day_of_next_month, is_leap_year,
    local_today, parse_instant,
};
pub use grid::{
    DayCell, DayLabel, GridLine, GridLines, GridMetrics, HeaderLayout, MonthBand, TODAY_LABEL,
    grid_lines, layout_header,
};
pub use period::{DayDescriptor, MonthGroup, PeriodSet, build_month, build_period};
pub use projection::{
    TaskBar, TaskSpan, XResolution, resolve_optional_x, resolve_task_bar, resolve_task_span,
    resolve_x,
};
pub use scroll::{
    PaginationThresholds, ScrollDecision, ScrollMetrics, ViewportState, evaluate_scroll,
};
pub use types::{DateRange, Viewport};
