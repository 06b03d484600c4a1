use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::core::deserialize_optional_instant;
use crate::render::Color;

/// Default bar fill (tomato).
pub const DEFAULT_BAR_COLOR: Color = Color::rgb8(0xff, 0x63, 0x47);
pub const DEFAULT_TEXT_COLOR: Color = Color::WHITE;
pub const DEFAULT_TITLE_COLOR: Color = Color::rgb8(0x5a, 0x6c, 0x84);

/// Optional colors passed through to the renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskStyle {
    #[serde(default)]
    pub background_color: Option<Color>,
    #[serde(default)]
    pub color: Option<Color>,
    #[serde(default)]
    pub title_color: Option<Color>,
}

impl TaskStyle {
    /// Fills unset colors from `fallback`.
    #[must_use]
    pub fn or(self, fallback: TaskStyle) -> Self {
        Self {
            background_color: self.background_color.or(fallback.background_color),
            color: self.color.or(fallback.color),
            title_color: self.title_color.or(fallback.title_color),
        }
    }

    #[must_use]
    pub fn resolved(self) -> ResolvedTaskStyle {
        ResolvedTaskStyle {
            background_color: self.background_color.unwrap_or(DEFAULT_BAR_COLOR),
            color: self.color.unwrap_or(DEFAULT_TEXT_COLOR),
            title_color: self.title_color.unwrap_or(DEFAULT_TITLE_COLOR),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedTaskStyle {
    pub background_color: Color,
    pub color: Color,
    pub title_color: Color,
}

/// Sub-item of a task; each node gets its own bar on the parent's row.
///
/// Dates deserialize from any [`crate::core::DateInput`] shape: text or epoch
/// milliseconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskNode {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_instant")]
    pub start_date: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "deserialize_optional_instant")]
    pub end_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub style: TaskStyle,
}

impl TaskNode {
    #[must_use]
    pub fn new(start_date: NaiveDateTime, end_date: NaiveDateTime) -> Self {
        Self {
            start_date: Some(start_date),
            end_date: Some(end_date),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: TaskStyle) -> Self {
        self.style = style;
        self
    }
}

/// One chart row.
///
/// When `nodes` is non-empty the task is only a title for its nodes and its
/// own dates are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GanttTask {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_instant")]
    pub start_date: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "deserialize_optional_instant")]
    pub end_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub style: TaskStyle,
    #[serde(default)]
    pub nodes: Vec<TaskNode>,
}

impl GanttTask {
    #[must_use]
    pub fn new(title: impl Into<String>, start_date: NaiveDateTime, end_date: NaiveDateTime) -> Self {
        Self {
            title: title.into(),
            start_date: Some(start_date),
            end_date: Some(end_date),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn grouped(title: impl Into<String>, nodes: Vec<TaskNode>) -> Self {
        Self {
            title: title.into(),
            nodes,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: TaskStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn has_nodes(&self) -> bool {
        !self.nodes.is_empty()
    }
}
