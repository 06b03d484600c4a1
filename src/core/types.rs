use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::core::calendar::DateInput;
use crate::error::GanttResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Requested chart span. Either endpoint may still be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}

impl DateRange {
    #[must_use]
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Resolves host date inputs; a `None` input stays missing.
    pub fn from_inputs(start: Option<&DateInput>, end: Option<&DateInput>) -> GanttResult<Self> {
        Ok(Self {
            start: start.map(DateInput::resolve).transpose()?,
            end: end.map(DateInput::resolve).transpose()?,
        })
    }

    #[must_use]
    pub fn is_complete(self) -> bool {
        self.start.is_some() && self.end.is_some()
    }
}
