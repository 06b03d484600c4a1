mod chart;
mod config;
mod controller;
mod json_contract;
mod render_frame_builder;
mod task;
mod task_layout;

pub use chart::GanttChart;
pub use config::{DEFAULT_BAR_HEIGHT, DEFAULT_HEADER_HEIGHT, DEFAULT_ROW_HEIGHT, GanttConfig};
pub use controller::{
    BarTransition, CalendarLayout, LayoutController, LayoutPhase, ScrollTransition,
};
pub use json_contract::{
    LAYOUT_SNAPSHOT_JSON_SCHEMA_V1, LayoutSnapshot, LayoutSnapshotJsonContractV1,
};
pub use render_frame_builder::EMPTY_CHART_LABEL;
pub use task::{
    DEFAULT_BAR_COLOR, DEFAULT_TEXT_COLOR, DEFAULT_TITLE_COLOR, GanttTask, ResolvedTaskStyle,
    TaskNode, TaskStyle,
};
pub use task_layout::{
    RowMetrics, TITLE_GAP_PX, TaskBarLayout, TaskRow, layout_task_row, layout_task_rows,
};
