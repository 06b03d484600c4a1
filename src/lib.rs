//! gantt-rs: date-to-coordinate layout engine for horizontally scrollable
//! Gantt timelines.
//!
//! `core` holds the pure calendar and pixel math, `api` the per-chart state
//! machine and host facade, `render` the backend-agnostic draw primitives.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod render;
pub mod telemetry;

pub use api::{GanttChart, GanttConfig, LayoutController};
pub use error::{GanttError, GanttResult};
