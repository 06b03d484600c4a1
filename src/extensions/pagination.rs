use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::api::GanttTask;

/// Edge-proximity signals raised by a scroll event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaginationEvent {
    /// The viewport is within the bottom threshold after a vertical scroll.
    ScrollToBottom { row_count: usize },
    /// The viewport is within the right threshold. `next_month_start` is the
    /// first day of the month after the current range end.
    ScrollToRight { next_month_start: NaiveDateTime },
}

/// Host data source hook for incremental loading.
///
/// Listeners fire once per qualifying scroll event. Repeated events near the
/// same edge fire again; hosts debounce when that matters.
pub trait PaginationListener {
    fn id(&self) -> &str;

    /// Receives the rows currently loaded.
    fn on_scroll_to_bottom(&mut self, tasks: &[GanttTask]);

    fn on_scroll_to_right(&mut self, next_month_start: NaiveDateTime);
}
