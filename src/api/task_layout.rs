#[cfg(feature = "parallel-layout")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::{DayDescriptor, TaskBar, TaskSpan, resolve_task_span};
use crate::render::Color;

use super::task::{GanttTask, ResolvedTaskStyle, TaskStyle};

/// Gap between a row title's baseline and the top of its bars.
pub const TITLE_GAP_PX: f64 = 5.0;
const BAR_TOP_RATIO: f64 = 0.85;

/// Vertical placement shared by every bar of one row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RowMetrics {
    pub row_height: f64,
    pub column_width: f64,
    pub bar_height: f64,
}

/// Body-space geometry of one task bar (y is relative to the body top).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskBarLayout {
    /// Position inside the parent's `nodes`; `None` for a leaf task.
    pub node_index: Option<usize>,
    pub span: TaskSpan,
    pub bar: TaskBar,
    pub rect_y: f64,
    pub rect_height: f64,
    pub text_x: f64,
    pub text_y: f64,
    pub content: Option<String>,
    pub style: ResolvedTaskStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRow {
    pub index: usize,
    pub title: String,
    pub title_x: f64,
    pub title_y: f64,
    pub title_color: Color,
    pub bars: Vec<TaskBarLayout>,
}

/// Lays out one row per task, in input order.
#[must_use]
pub fn layout_task_rows(
    tasks: &[GanttTask],
    days: &[DayDescriptor],
    metrics: RowMetrics,
) -> Vec<TaskRow> {
    #[cfg(feature = "parallel-layout")]
    {
        tasks
            .par_iter()
            .enumerate()
            .map(|(index, task)| layout_task_row(index, task, days, metrics))
            .collect()
    }

    #[cfg(not(feature = "parallel-layout"))]
    {
        tasks
            .iter()
            .enumerate()
            .map(|(index, task)| layout_task_row(index, task, days, metrics))
            .collect()
    }
}

/// A task with nodes only contributes its title, anchored at the first node.
#[must_use]
pub fn layout_task_row(
    index: usize,
    task: &GanttTask,
    days: &[DayDescriptor],
    metrics: RowMetrics,
) -> TaskRow {
    let rect_y = metrics.row_height * index as f64 + metrics.bar_height * BAR_TOP_RATIO;
    let text_y = rect_y + metrics.bar_height / 2.0;
    let place = |node_index, start, end, content: &Option<String>, style: TaskStyle| {
        let span = resolve_task_span(start, end, days, metrics.column_width);
        let bar = span.to_bar();
        TaskBarLayout {
            node_index,
            span,
            bar,
            rect_y,
            rect_height: metrics.bar_height,
            text_x: bar.x1 + bar.width() / 2.0,
            text_y,
            content: content.clone(),
            style: style.resolved(),
        }
    };

    let bars: Vec<TaskBarLayout> = if task.has_nodes() {
        task.nodes
            .iter()
            .enumerate()
            .map(|(node_index, node)| {
                place(
                    Some(node_index),
                    node.start_date,
                    node.end_date,
                    &node.content,
                    node.style.or(task.style),
                )
            })
            .collect()
    } else {
        vec![place(
            None,
            task.start_date,
            task.end_date,
            &task.content,
            task.style,
        )]
    };

    let (title_x, title_color) = bars
        .first()
        .map_or((0.0, task.style.resolved().title_color), |bar| {
            (bar.bar.x1, bar.style.title_color)
        });

    TaskRow {
        index,
        title: task.title.clone(),
        title_x,
        title_y: rect_y - TITLE_GAP_PX,
        title_color,
        bars,
    }
}
