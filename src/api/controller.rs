use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use crate::core::scroll::ratio;
use crate::core::{
    DateRange, DayDescriptor, GridLines, GridMetrics, HeaderLayout, PeriodSet, ScrollDecision,
    ScrollMetrics, ViewportState, build_period, evaluate_scroll, first_day_of_next_month,
    grid_lines, layout_header,
};
use crate::error::{GanttError, GanttResult};
use crate::extensions::PaginationEvent;

use super::GanttConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayoutPhase {
    /// No complete range; nothing to render.
    Empty,
    LaidOut,
}

/// Everything derived from the current range, container width and row count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarLayout {
    pub period: PeriodSet,
    pub days: Vec<DayDescriptor>,
    pub metrics: GridMetrics,
    pub visible_columns: usize,
    pub svg_width: f64,
    pub header: HeaderLayout,
    pub grid: GridLines,
}

/// Result of feeding one scroll event to the controller.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollTransition {
    pub controller: LayoutController,
    pub decision: ScrollDecision,
    pub events: SmallVec<[PaginationEvent; 2]>,
}

/// Result of a scrollbar drag or resize.
#[derive(Debug, Clone, PartialEq)]
pub struct BarTransition {
    pub controller: LayoutController,
    /// Horizontal scroll position the host should apply, if it changed.
    pub scroll_left: Option<f64>,
}

/// Per-chart layout state.
///
/// Every transition takes `&self` and returns a new controller, so a failed
/// transition leaves the caller's current geometry untouched. Derived data is
/// rebuilt wholesale on each transition.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutController {
    config: GanttConfig,
    today: NaiveDate,
    range: DateRange,
    container_width: f64,
    row_count: usize,
    zoom_width_percent: Option<f64>,
    viewport: ViewportState,
    layout: Option<CalendarLayout>,
}

impl LayoutController {
    pub fn new(config: GanttConfig, today: NaiveDate) -> GanttResult<Self> {
        Ok(Self {
            config: config.validate()?,
            today,
            range: DateRange::empty(),
            container_width: 0.0,
            row_count: 0,
            zoom_width_percent: None,
            viewport: ViewportState::default(),
            layout: None,
        })
    }

    #[must_use]
    pub fn config(&self) -> GanttConfig {
        self.config
    }

    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    #[must_use]
    pub fn range(&self) -> DateRange {
        self.range
    }

    #[must_use]
    pub fn container_width(&self) -> f64 {
        self.container_width
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    #[must_use]
    pub fn viewport(&self) -> ViewportState {
        self.viewport
    }

    #[must_use]
    pub fn layout(&self) -> Option<&CalendarLayout> {
        self.layout.as_ref()
    }

    #[must_use]
    pub fn phase(&self) -> LayoutPhase {
        if self.layout.is_some() {
            LayoutPhase::LaidOut
        } else {
            LayoutPhase::Empty
        }
    }

    #[must_use]
    pub fn days(&self) -> &[DayDescriptor] {
        self.layout
            .as_ref()
            .map_or(&[][..], |layout| layout.days.as_slice())
    }

    #[must_use]
    pub fn column_width(&self) -> f64 {
        self.layout
            .as_ref()
            .map_or(0.0, |layout| layout.metrics.column_width)
    }

    #[must_use]
    pub fn svg_width(&self) -> f64 {
        self.layout.as_ref().map_or(0.0, |layout| layout.svg_width)
    }

    pub fn on_range_changed(&self, range: DateRange) -> GanttResult<Self> {
        let mut next = self.clone();
        next.range = range;
        next.zoom_width_percent = None;
        next.relayout()?;
        Ok(next)
    }

    pub fn on_container_resized(&self, width: f64) -> GanttResult<Self> {
        if !width.is_finite() || width < 0.0 {
            return Err(GanttError::InvalidData(
                "container width must be finite and >= 0".to_owned(),
            ));
        }
        let mut next = self.clone();
        next.container_width = width;
        next.zoom_width_percent = None;
        next.relayout()?;
        Ok(next)
    }

    pub fn on_rows_changed(&self, row_count: usize) -> GanttResult<Self> {
        let mut next = self.clone();
        next.row_count = row_count;
        next.zoom_width_percent = None;
        next.relayout()?;
        Ok(next)
    }

    /// Re-evaluates `is_today` flags, e.g. after midnight.
    pub fn on_today_changed(&self, today: NaiveDate) -> GanttResult<Self> {
        let mut next = self.clone();
        next.today = today;
        next.relayout()?;
        Ok(next)
    }

    /// Records the new scroll position and reports the pagination edges reached.
    ///
    /// The right-edge event carries the first day of the month after the
    /// current range end; the controller never extends its own range.
    pub fn on_scrolled(&self, metrics: ScrollMetrics) -> GanttResult<ScrollTransition> {
        if !metrics.is_finite() {
            return Err(GanttError::InvalidData(
                "scroll metrics must be finite".to_owned(),
            ));
        }

        let decision = evaluate_scroll(
            metrics,
            self.viewport.scroll_y,
            self.config.row_height,
            self.column_width(),
            self.config.pagination,
        );
        let mut next = self.clone();
        next.viewport = ViewportState::from_metrics(metrics);

        let mut events = SmallVec::new();
        if decision.near_bottom {
            events.push(PaginationEvent::ScrollToBottom {
                row_count: self.row_count,
            });
        }
        if decision.near_right {
            match self.range.end.map(first_day_of_next_month).transpose() {
                Ok(Some(next_month_start)) => {
                    events.push(PaginationEvent::ScrollToRight { next_month_start });
                }
                Ok(None) => trace!("right edge reached without a range end"),
                Err(err) => warn!(error = %err, "skipping right-edge pagination hint"),
            }
        }

        Ok(ScrollTransition {
            controller: next,
            decision,
            events,
        })
    }

    /// Moves the viewport to `left_percent` of the body width.
    pub fn on_bar_scrolled(&self, left_percent: f64) -> GanttResult<BarTransition> {
        validate_left_percent(left_percent)?;
        let mut next = self.clone();
        next.viewport.visible_left_percent = left_percent;
        Ok(BarTransition {
            scroll_left: Some(self.svg_width() * left_percent),
            controller: next,
        })
    }

    /// Zooms so the container shows `width_percent` of the body.
    ///
    /// The zoom holds until the next range, container or row change.
    pub fn on_bar_resized(&self, width_percent: f64, left_percent: f64) -> GanttResult<BarTransition> {
        if !width_percent.is_finite() || width_percent <= 0.0 || width_percent > 1.0 {
            return Err(GanttError::InvalidData(
                "bar width percent must be finite and in (0, 1]".to_owned(),
            ));
        }
        validate_left_percent(left_percent)?;

        let scroll_left = (left_percent != self.viewport.visible_left_percent)
            .then(|| self.svg_width() * left_percent);
        let mut next = self.clone();
        next.zoom_width_percent = Some(width_percent);
        next.viewport.visible_left_percent = left_percent;
        next.relayout()?;
        Ok(BarTransition {
            controller: next,
            scroll_left,
        })
    }

    fn relayout(&mut self) -> GanttResult<()> {
        if !self.range.is_complete() {
            debug!("range incomplete; chart is empty");
            self.layout = None;
            return Ok(());
        }

        let period = build_period(self.range.start, self.range.end, self.today)?;
        let Some(first_month) = period.months.first() else {
            warn!(range = ?self.range, "range start is after its end; chart is empty");
            self.layout = None;
            return Ok(());
        };

        let column_count = period.total_days();
        let viewport_days = self
            .config
            .viewport_days
            .map_or(first_month.len(), |days| days as usize);
        let visible_columns = viewport_days.min(column_count);
        let (column_width, svg_width) = match self.zoom_width_percent {
            Some(width_percent) => {
                let svg_width = self.container_width / width_percent;
                (svg_width / column_count as f64, svg_width)
            }
            None => {
                let column_width = self.container_width / visible_columns as f64;
                (column_width, column_count as f64 * column_width)
            }
        };

        let metrics = GridMetrics {
            column_width,
            row_height: self.config.row_height,
            header_height: self.config.header_height,
            column_count,
            row_count: self.row_count,
        };
        let header = layout_header(&period, column_width, self.config.header_height);
        let grid = grid_lines(
            column_width,
            column_count,
            self.config.row_height,
            self.row_count,
        );
        self.viewport.visible_width_percent = ratio(self.container_width, svg_width);

        debug!(
            column_count,
            visible_columns,
            column_width,
            svg_width,
            rows = self.row_count,
            "laid out calendar"
        );
        self.layout = Some(CalendarLayout {
            days: period.flatten(),
            period,
            metrics,
            visible_columns,
            svg_width,
            header,
            grid,
        });
        Ok(())
    }
}

fn validate_left_percent(left_percent: f64) -> GanttResult<()> {
    if !left_percent.is_finite() || !(0.0..=1.0).contains(&left_percent) {
        return Err(GanttError::InvalidData(
            "bar left percent must be finite and in [0, 1]".to_owned(),
        ));
    }
    Ok(())
}
