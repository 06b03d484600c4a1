use chrono::NaiveDate;
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::core::{DateInput, DateRange, ScrollMetrics};
use crate::error::GanttResult;
use crate::extensions::{PaginationEvent, PaginationListener};
use crate::render::Renderer;

use super::task_layout::{RowMetrics, TaskRow, layout_task_rows};
use super::{GanttConfig, GanttTask, LayoutController, LayoutPhase};

/// Main facade consumed by host UI layers.
///
/// `GanttChart` owns the layout controller, the loaded tasks, pagination
/// listeners and the renderer. Hosts forward range, resize and scroll events;
/// throttling those events is the host's job.
pub struct GanttChart<R: Renderer> {
    pub(super) renderer: R,
    pub(super) controller: LayoutController,
    pub(super) tasks: Vec<GanttTask>,
    listeners: Vec<Box<dyn PaginationListener>>,
}

impl<R: Renderer> GanttChart<R> {
    /// `today` drives the today markers; pass [`crate::core::local_today`] in production.
    pub fn new(renderer: R, config: GanttConfig, today: NaiveDate) -> GanttResult<Self> {
        Ok(Self {
            renderer,
            controller: LayoutController::new(config, today)?,
            tasks: Vec::new(),
            listeners: Vec::new(),
        })
    }

    #[must_use]
    pub fn controller(&self) -> &LayoutController {
        &self.controller
    }

    #[must_use]
    pub fn phase(&self) -> LayoutPhase {
        self.controller.phase()
    }

    #[must_use]
    pub fn tasks(&self) -> &[GanttTask] {
        &self.tasks
    }

    pub fn set_range(&mut self, range: DateRange) -> GanttResult<()> {
        self.apply("range change", |controller| {
            controller.on_range_changed(range)
        })
    }

    /// Parses host date inputs, then applies them as the new range.
    pub fn set_range_inputs(
        &mut self,
        start: Option<&DateInput>,
        end: Option<&DateInput>,
    ) -> GanttResult<()> {
        let range = DateRange::from_inputs(start, end).inspect_err(|err| {
            warn!(error = %err, "rejecting range input; keeping previous layout");
        })?;
        self.set_range(range)
    }

    pub fn resize(&mut self, container_width: f64) -> GanttResult<()> {
        self.apply("container resize", |controller| {
            controller.on_container_resized(container_width)
        })
    }

    pub fn set_today(&mut self, today: NaiveDate) -> GanttResult<()> {
        self.apply("today change", |controller| controller.on_today_changed(today))
    }

    /// Replaces the loaded rows.
    pub fn set_tasks(&mut self, tasks: Vec<GanttTask>) -> GanttResult<()> {
        let row_count = tasks.len();
        self.apply("task change", |controller| {
            controller.on_rows_changed(row_count)
        })?;
        debug!(row_count, "set tasks");
        self.tasks = tasks;
        Ok(())
    }

    /// Appends rows delivered by a data source after a bottom-edge event.
    pub fn append_tasks(&mut self, tasks: Vec<GanttTask>) -> GanttResult<()> {
        let row_count = self.tasks.len() + tasks.len();
        self.apply("task append", |controller| {
            controller.on_rows_changed(row_count)
        })?;
        debug!(appended = tasks.len(), row_count, "append tasks");
        self.tasks.extend(tasks);
        Ok(())
    }

    /// Feeds one scroll event and dispatches the resulting pagination events.
    pub fn on_scroll(
        &mut self,
        metrics: ScrollMetrics,
    ) -> GanttResult<SmallVec<[PaginationEvent; 2]>> {
        let transition = self.controller.on_scrolled(metrics)?;
        self.controller = transition.controller;

        for event in &transition.events {
            for listener in &mut self.listeners {
                match *event {
                    PaginationEvent::ScrollToBottom { .. } => {
                        listener.on_scroll_to_bottom(&self.tasks);
                    }
                    PaginationEvent::ScrollToRight { next_month_start } => {
                        listener.on_scroll_to_right(next_month_start);
                    }
                }
            }
        }
        Ok(transition.events)
    }

    /// Returns the horizontal scroll position the host should apply.
    pub fn scroll_bar(&mut self, left_percent: f64) -> GanttResult<Option<f64>> {
        let transition = self.controller.on_bar_scrolled(left_percent)?;
        self.controller = transition.controller;
        Ok(transition.scroll_left)
    }

    /// Zooms from a scrollbar thumb resize; returns a scroll position when it moved.
    pub fn resize_bar(&mut self, width_percent: f64, left_percent: f64) -> GanttResult<Option<f64>> {
        let transition = self
            .controller
            .on_bar_resized(width_percent, left_percent)?;
        self.controller = transition.controller;
        Ok(transition.scroll_left)
    }

    pub fn add_listener(&mut self, listener: Box<dyn PaginationListener>) {
        self.listeners.push(listener);
    }

    /// Removes every listener registered under `id`; returns whether any was removed.
    pub fn remove_listener(&mut self, id: &str) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|listener| listener.id() != id);
        self.listeners.len() != before
    }

    /// Bar geometry for every loaded task. Empty while the chart is empty.
    #[must_use]
    pub fn task_rows(&self) -> Vec<TaskRow> {
        let Some(layout) = self.controller.layout() else {
            return Vec::new();
        };
        let config = self.controller.config();
        layout_task_rows(
            &self.tasks,
            &layout.days,
            RowMetrics {
                row_height: config.row_height,
                column_width: layout.metrics.column_width,
                bar_height: config.bar_height,
            },
        )
    }

    pub fn render(&mut self) -> GanttResult<()> {
        let frame = self.build_render_frame()?;
        self.renderer.render(&frame)
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    fn apply(
        &mut self,
        action: &'static str,
        transition: impl FnOnce(&LayoutController) -> GanttResult<LayoutController>,
    ) -> GanttResult<()> {
        match transition(&self.controller) {
            Ok(next) => {
                self.controller = next;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, action, "transition failed; keeping previous layout");
                Err(err)
            }
        }
    }
}
