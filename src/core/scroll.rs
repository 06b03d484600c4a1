use serde::{Deserialize, Serialize};
use tracing::trace;

/// Scroll container metrics as reported by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrollMetrics {
    pub scroll_left: f64,
    pub scroll_top: f64,
    pub client_width: f64,
    pub client_height: f64,
    pub scroll_width: f64,
    pub scroll_height: f64,
}

impl ScrollMetrics {
    #[must_use]
    pub fn remaining_right(self) -> f64 {
        self.scroll_width - (self.scroll_left + self.client_width)
    }

    #[must_use]
    pub fn remaining_bottom(self) -> f64 {
        self.scroll_height - (self.scroll_top + self.client_height)
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        [
            self.scroll_left,
            self.scroll_top,
            self.client_width,
            self.client_height,
            self.scroll_width,
            self.scroll_height,
        ]
        .iter()
        .all(|value| value.is_finite())
    }
}

/// Edge proximity, in rows and day columns, that requests more data.
///
/// Zero disables the corresponding trigger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationThresholds {
    #[serde(default)]
    pub bottom_limit_rows: u32,
    #[serde(default)]
    pub right_limit_columns: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrollDecision {
    /// Vertical position differs from the previous observation.
    pub vertical_moved: bool,
    pub near_bottom: bool,
    pub near_right: bool,
}

/// Decides which pagination edges a scroll event reached.
///
/// `near_bottom` only fires when the vertical position changed since
/// `previous_scroll_top`, so horizontal pans never request more rows. No state
/// is kept between calls: consecutive events near an edge fire again.
#[must_use]
pub fn evaluate_scroll(
    metrics: ScrollMetrics,
    previous_scroll_top: f64,
    row_height: f64,
    column_width: f64,
    thresholds: PaginationThresholds,
) -> ScrollDecision {
    let bottom_limit = f64::from(thresholds.bottom_limit_rows) * row_height;
    let right_limit = f64::from(thresholds.right_limit_columns) * column_width;
    let vertical_moved = metrics.scroll_top != previous_scroll_top;

    let decision = ScrollDecision {
        vertical_moved,
        near_bottom: vertical_moved && metrics.remaining_bottom() < bottom_limit,
        near_right: metrics.remaining_right() < right_limit,
    };
    trace!(
        remaining_right = metrics.remaining_right(),
        remaining_bottom = metrics.remaining_bottom(),
        right_limit,
        bottom_limit,
        near_right = decision.near_right,
        near_bottom = decision.near_bottom,
        "evaluated scroll"
    );
    decision
}

/// Viewport position derived from the latest scroll metrics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    pub scroll_x: f64,
    pub scroll_y: f64,
    /// `client_width / scroll_width`, 0 when nothing is scrollable.
    pub visible_width_percent: f64,
    pub visible_left_percent: f64,
}

impl ViewportState {
    #[must_use]
    pub fn from_metrics(metrics: ScrollMetrics) -> Self {
        Self {
            scroll_x: metrics.scroll_left,
            scroll_y: metrics.scroll_top,
            visible_width_percent: ratio(metrics.client_width, metrics.scroll_width),
            visible_left_percent: ratio(metrics.scroll_left, metrics.scroll_width),
        }
    }
}

pub(crate) fn ratio(part: f64, whole: f64) -> f64 {
    if whole > 0.0 { part / whole } else { 0.0 }
}
