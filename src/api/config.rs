use serde::{Deserialize, Serialize};

use crate::core::PaginationThresholds;
use crate::error::{GanttError, GanttResult};

pub const DEFAULT_ROW_HEIGHT: f64 = 45.0;
pub const DEFAULT_HEADER_HEIGHT: f64 = 45.0;
pub const DEFAULT_BAR_HEIGHT: f64 = 22.0;

/// Public chart configuration.
///
/// Serializable so hosts can keep chart setup next to their data; every field
/// has a default, so `{}` is a valid JSON config.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GanttConfig {
    /// Day columns visible without scrolling. `None` uses the length of the
    /// range's first month.
    #[serde(default)]
    pub viewport_days: Option<u32>,
    #[serde(default = "default_row_height")]
    pub row_height: f64,
    #[serde(default = "default_header_height")]
    pub header_height: f64,
    #[serde(default = "default_bar_height")]
    pub bar_height: f64,
    #[serde(default)]
    pub pagination: PaginationThresholds,
}

impl Default for GanttConfig {
    fn default() -> Self {
        Self {
            viewport_days: None,
            row_height: DEFAULT_ROW_HEIGHT,
            header_height: DEFAULT_HEADER_HEIGHT,
            bar_height: DEFAULT_BAR_HEIGHT,
            pagination: PaginationThresholds::default(),
        }
    }
}

impl GanttConfig {
    #[must_use]
    pub fn with_viewport_days(mut self, days: u32) -> Self {
        self.viewport_days = Some(days);
        self
    }

    #[must_use]
    pub fn with_row_height(mut self, row_height: f64) -> Self {
        self.row_height = row_height;
        self
    }

    #[must_use]
    pub fn with_header_height(mut self, header_height: f64) -> Self {
        self.header_height = header_height;
        self
    }

    #[must_use]
    pub fn with_bar_height(mut self, bar_height: f64) -> Self {
        self.bar_height = bar_height;
        self
    }

    /// Sets how many rows / day columns from the edge trigger pagination.
    #[must_use]
    pub fn with_pagination_limits(mut self, bottom_limit_rows: u32, right_limit_columns: u32) -> Self {
        self.pagination = PaginationThresholds {
            bottom_limit_rows,
            right_limit_columns,
        };
        self
    }

    pub fn validate(self) -> GanttResult<Self> {
        if self.viewport_days == Some(0) {
            return Err(GanttError::InvalidData(
                "viewport days must be >= 1".to_owned(),
            ));
        }
        for (field, value) in [
            ("row height", self.row_height),
            ("header height", self.header_height),
            ("bar height", self.bar_height),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(GanttError::InvalidData(format!(
                    "{field} must be finite and > 0"
                )));
            }
        }
        Ok(self)
    }

    pub fn from_json_str(input: &str) -> GanttResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| GanttError::InvalidData(format!("failed to parse gantt config: {e}")))?;
        config.validate()
    }

    pub fn to_json_pretty(&self) -> GanttResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            GanttError::InvalidData(format!("failed to serialize gantt config: {e}"))
        })
    }
}

fn default_row_height() -> f64 {
    DEFAULT_ROW_HEIGHT
}

fn default_header_height() -> f64 {
    DEFAULT_HEADER_HEIGHT
}

fn default_bar_height() -> f64 {
    DEFAULT_BAR_HEIGHT
}
