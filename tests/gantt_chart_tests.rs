use std::cell::RefCell;
use std::rc::Rc;

use approx::assert_relative_eq;
use chrono::{NaiveDate, NaiveDateTime};
use gantt_rs::api::{
    DEFAULT_BAR_COLOR, DEFAULT_TITLE_COLOR, EMPTY_CHART_LABEL, GanttChart, GanttConfig, GanttTask,
    LayoutPhase, LayoutSnapshot, TaskNode, TaskStyle,
};
use gantt_rs::core::{DateInput, DateRange, ScrollMetrics};
use gantt_rs::extensions::{PaginationEvent, PaginationListener};
use gantt_rs::render::{Color, NullRenderer};
use gantt_rs::GanttError;

fn at(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .expect("valid date")
        .and_hms_opt(0, 0, 0)
        .expect("valid time")
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 2, 14).expect("valid date")
}

fn february_chart(config: GanttConfig) -> GanttChart<NullRenderer> {
    let mut chart = GanttChart::new(NullRenderer::default(), config, today()).expect("chart");
    chart
        .set_range(DateRange::new(at(2024, 2, 1), at(2024, 2, 29)))
        .expect("range");
    chart.resize(870.0).expect("resize");
    chart
}

#[derive(Default)]
struct Recorded {
    bottom_calls: Vec<usize>,
    right_calls: Vec<NaiveDateTime>,
}

struct RecordingListener {
    id: &'static str,
    recorded: Rc<RefCell<Recorded>>,
}

impl PaginationListener for RecordingListener {
    fn id(&self) -> &str {
        self.id
    }

    fn on_scroll_to_bottom(&mut self, tasks: &[GanttTask]) {
        self.recorded.borrow_mut().bottom_calls.push(tasks.len());
    }

    fn on_scroll_to_right(&mut self, next_month_start: NaiveDateTime) {
        self.recorded.borrow_mut().right_calls.push(next_month_start);
    }
}

fn edge_metrics(scroll_top: f64) -> ScrollMetrics {
    ScrollMetrics {
        scroll_left: 800.0,
        scroll_top,
        client_width: 80.0,
        client_height: 100.0,
        scroll_width: 870.0,
        scroll_height: 180.0,
    }
}

#[test]
fn listeners_receive_pagination_events() {
    let mut chart = february_chart(GanttConfig::default().with_pagination_limits(1, 2));
    chart
        .set_tasks(vec![
            GanttTask::new("a", at(2024, 2, 2), at(2024, 2, 4)),
            GanttTask::new("b", at(2024, 2, 5), at(2024, 2, 9)),
        ])
        .expect("tasks");

    let recorded = Rc::new(RefCell::new(Recorded::default()));
    chart.add_listener(Box::new(RecordingListener {
        id: "loader",
        recorded: Rc::clone(&recorded),
    }));

    let events = chart.on_scroll(edge_metrics(60.0)).expect("scroll");
    assert_eq!(events.len(), 2);
    assert!(matches!(
        events[0],
        PaginationEvent::ScrollToBottom { row_count: 2 }
    ));

    let recorded_now = recorded.borrow();
    assert_eq!(recorded_now.bottom_calls, vec![2]);
    assert_eq!(recorded_now.right_calls, vec![at(2024, 3, 1)]);
}

#[test]
fn removed_listeners_stop_receiving_events() {
    let mut chart = february_chart(GanttConfig::default().with_pagination_limits(0, 2));
    let recorded = Rc::new(RefCell::new(Recorded::default()));
    chart.add_listener(Box::new(RecordingListener {
        id: "loader",
        recorded: Rc::clone(&recorded),
    }));

    assert!(chart.remove_listener("loader"));
    assert!(!chart.remove_listener("loader"));

    let events = chart.on_scroll(edge_metrics(0.0)).expect("scroll");
    assert_eq!(events.len(), 1);
    assert!(recorded.borrow().right_calls.is_empty());
}

#[test]
fn appended_tasks_extend_the_rows() {
    let mut chart = february_chart(GanttConfig::default());
    chart
        .set_tasks(vec![GanttTask::new("a", at(2024, 2, 2), at(2024, 2, 4))])
        .expect("tasks");
    chart
        .append_tasks(vec![GanttTask::new("b", at(2024, 2, 6), at(2024, 2, 7))])
        .expect("append");

    assert_eq!(chart.tasks().len(), 2);
    assert_eq!(chart.controller().row_count(), 2);
    assert_eq!(chart.task_rows()[1].title, "b");
}

#[test]
fn task_rows_stack_by_row_height() {
    let mut chart = february_chart(GanttConfig::default());
    chart
        .set_tasks(vec![
            GanttTask::new("a", at(2024, 2, 5), at(2024, 2, 8)).with_content("design"),
            GanttTask::new("b", at(2024, 2, 10), at(2024, 2, 12)),
        ])
        .expect("tasks");

    let rows = chart.task_rows();
    assert_eq!(rows.len(), 2);

    let first = &rows[0].bars[0];
    assert_relative_eq!(first.bar.x1, 120.0);
    assert_relative_eq!(first.bar.x2, 210.0);
    assert_relative_eq!(first.rect_y, 18.7, epsilon = 1e-9);
    assert_relative_eq!(first.text_y, 29.7, epsilon = 1e-9);
    assert_relative_eq!(first.text_x, 165.0);
    assert_eq!(first.content.as_deref(), Some("design"));
    assert_eq!(first.style.background_color, DEFAULT_BAR_COLOR);

    let second = &rows[1];
    assert_relative_eq!(second.bars[0].rect_y, 63.7, epsilon = 1e-9);
    assert_relative_eq!(second.title_y, 58.7, epsilon = 1e-9);
    assert_relative_eq!(second.title_x, 270.0);
    assert_eq!(second.title_color, DEFAULT_TITLE_COLOR);
}

#[test]
fn grouped_tasks_draw_each_node_on_the_parent_row() {
    let red = Color::rgb8(0xff, 0, 0);
    let blue = Color::rgb8(0, 0, 0xff);
    let task = GanttTask::grouped(
        "release",
        vec![
            TaskNode::new(at(2024, 2, 5), at(2024, 2, 8)).with_content("build"),
            TaskNode::new(at(2024, 2, 10), at(2024, 2, 12)).with_style(TaskStyle {
                background_color: Some(blue),
                ..TaskStyle::default()
            }),
        ],
    )
    .with_style(TaskStyle {
        background_color: Some(red),
        ..TaskStyle::default()
    });

    let mut chart = february_chart(GanttConfig::default());
    chart.set_tasks(vec![task]).expect("tasks");
    let rows = chart.task_rows();
    let row = &rows[0];

    assert_eq!(row.bars.len(), 2);
    assert_eq!(row.bars[0].node_index, Some(0));
    assert_eq!(row.bars[0].style.background_color, red);
    assert_eq!(row.bars[1].style.background_color, blue);
    assert_relative_eq!(row.title_x, 120.0);
    assert_relative_eq!(row.bars[1].bar.x1, 270.0);
}

#[test]
fn render_emits_grid_header_and_bars() {
    let mut chart = february_chart(GanttConfig::default());
    chart
        .set_tasks(vec![
            GanttTask::new("a", at(2024, 2, 5), at(2024, 2, 8)).with_content("design"),
        ])
        .expect("tasks");
    chart.render().expect("render");

    let renderer = chart.into_renderer();
    assert_eq!(renderer.frames_rendered, 1);
    // 30 vertical + 1 row line, header mid line, 1 month and 29 day separators
    assert_eq!(renderer.last_line_count, 62);
    // header background, task bar, today highlight
    assert_eq!(renderer.last_rect_count, 3);
    // title, content, month label, 29 day labels
    assert_eq!(renderer.last_text_count, 32);
}

#[test]
fn frame_marks_today_and_pins_the_header() {
    let mut chart = february_chart(GanttConfig::default());
    chart.on_scroll(edge_metrics(90.0)).expect("scroll");
    let frame = chart.build_render_frame().expect("frame");

    assert!(frame.texts.iter().any(|text| text.text == "今"));
    assert!(frame.texts.iter().any(|text| text.text == "2024年2月"));
    let header_background = &frame.rects[0];
    assert_relative_eq!(header_background.y, 90.0);
    assert_relative_eq!(header_background.width, 870.0);
    assert_eq!(frame.viewport.width, 870);
    assert_eq!(frame.viewport.height, 45);
}

#[test]
fn empty_chart_renders_a_placeholder() {
    let mut chart =
        GanttChart::new(NullRenderer::default(), GanttConfig::default(), today()).expect("chart");
    assert_eq!(chart.phase(), LayoutPhase::Empty);

    let frame = chart.build_render_frame().expect("frame");
    assert_eq!(frame.texts.len(), 1);
    assert_eq!(frame.texts[0].text, EMPTY_CHART_LABEL);
    assert!(frame.rects.is_empty());
    assert_eq!(frame.viewport.width, 400);

    chart.render().expect("render");
    assert!(chart.task_rows().is_empty());
}

#[test]
fn failed_transitions_keep_the_previous_layout() {
    let mut chart = february_chart(GanttConfig::default());
    let before = chart.controller().clone();

    assert!(chart.resize(f64::NAN).is_err());
    assert_eq!(chart.controller(), &before);

    let result = chart.set_range_inputs(
        Some(&DateInput::from("2024-02-01")),
        Some(&DateInput::from("garbage")),
    );
    assert!(matches!(result, Err(GanttError::InvalidDate(_))));
    assert_eq!(chart.controller(), &before);
}

#[test]
fn range_inputs_accept_strings_and_timestamps() {
    let mut chart =
        GanttChart::new(NullRenderer::default(), GanttConfig::default(), today()).expect("chart");
    chart
        .set_range_inputs(
            Some(&DateInput::from("2024-02-01")),
            Some(&DateInput::from(1_708_128_000_000_i64)),
        )
        .expect("range");
    chart.resize(870.0).expect("resize");

    assert_eq!(chart.phase(), LayoutPhase::LaidOut);
    assert_eq!(chart.controller().range().end, Some(at(2024, 2, 17)));
}

#[test]
fn scrollbar_drag_and_resize_round_trip_through_the_chart() {
    let mut chart = february_chart(GanttConfig::default());
    assert_eq!(chart.scroll_bar(0.5).expect("drag"), Some(435.0));
    assert_eq!(chart.resize_bar(0.5, 0.5).expect("zoom"), None);
    assert_relative_eq!(chart.controller().svg_width(), 1740.0);
    assert!(chart.scroll_bar(2.0).is_err());
}

#[test]
fn snapshot_contract_round_trips() {
    let mut chart = february_chart(GanttConfig::default());
    chart
        .set_tasks(vec![GanttTask::new("a", at(2024, 2, 5), at(2024, 2, 8))])
        .expect("tasks");

    let snapshot = chart.snapshot();
    let json = snapshot.to_json_contract_v1_pretty().expect("json");
    assert!(json.contains("\"schema_version\": 1"));

    let parsed = LayoutSnapshot::from_json_compat_str(&json).expect("parse");
    assert_eq!(parsed.phase, LayoutPhase::LaidOut);
    assert_eq!(parsed.range, snapshot.range);
    assert_eq!(parsed.rows.len(), 1);
    assert_eq!(parsed.rows[0].bars[0].bar, snapshot.rows[0].bars[0].bar);
    let layout = parsed.layout.expect("layout");
    assert_eq!(layout.days.len(), 29);
    assert_relative_eq!(layout.svg_width, 870.0);

    let bare = serde_json::to_string(&snapshot).expect("bare json");
    let parsed_bare = LayoutSnapshot::from_json_compat_str(&bare).expect("bare parse");
    assert_eq!(parsed_bare.range, snapshot.range);
}

#[test]
fn snapshot_contract_rejects_unknown_schema_versions() {
    let chart = february_chart(GanttConfig::default());
    let json = chart
        .snapshot()
        .to_json_contract_v1_pretty()
        .expect("json")
        .replace("\"schema_version\": 1", "\"schema_version\": 9");

    assert!(matches!(
        LayoutSnapshot::from_json_compat_str(&json),
        Err(GanttError::InvalidData(_))
    ));
}

#[test]
fn config_json_fills_defaults() {
    let config = GanttConfig::from_json_str("{}").expect("config");
    assert_eq!(config, GanttConfig::default());

    let custom = GanttConfig::from_json_str(
        r#"{"viewport_days": 14, "pagination": {"right_limit_columns": 3}}"#,
    )
    .expect("custom config");
    assert_eq!(custom.viewport_days, Some(14));
    assert_eq!(custom.pagination.right_limit_columns, 3);
    assert_eq!(custom.pagination.bottom_limit_rows, 0);

    assert!(GanttConfig::from_json_str(r#"{"viewport_days": 0}"#).is_err());
}

#[test]
fn task_json_accepts_date_text_and_timestamps() {
    let tasks: Vec<GanttTask> = serde_json::from_str(
        r#"[
            {"title": "a", "start_date": "2024-02-05", "end_date": "2024/2/8 12:00"},
            {"title": "b", "start_date": 1707091200000, "end_date": 1707350400000},
            {"title": "c", "nodes": [{"start_date": "2024-02-10T06:00:00", "end_date": null}]}
        ]"#,
    )
    .expect("tasks");

    assert_eq!(tasks[0].start_date, Some(at(2024, 2, 5)));
    assert_eq!(
        tasks[0].end_date,
        Some(at(2024, 2, 8) + chrono::Duration::hours(12))
    );
    assert_eq!(tasks[1].start_date, Some(at(2024, 2, 5)));
    assert_eq!(tasks[1].end_date, Some(at(2024, 2, 8)));
    assert_eq!(
        tasks[2].nodes[0].start_date,
        Some(at(2024, 2, 10) + chrono::Duration::hours(6))
    );
    assert_eq!(tasks[2].nodes[0].end_date, None);
    assert_eq!(tasks[2].start_date, None);

    let mut chart = february_chart(GanttConfig::default());
    chart.set_tasks(tasks).expect("tasks");
    let rows = chart.task_rows();
    assert_relative_eq!(rows[0].bars[0].bar.x1, 120.0);
    assert_relative_eq!(rows[1].bars[0].bar.x2, 210.0);
}

#[test]
fn task_json_rejects_unparseable_dates() {
    let result = serde_json::from_str::<GanttTask>(r#"{"title": "a", "start_date": "soon"}"#);
    assert!(result.is_err());
}

#[test]
fn task_json_round_trips_through_serialization() {
    let task = GanttTask::new("a", at(2024, 2, 5), at(2024, 2, 8)).with_content("design");
    let json = serde_json::to_string(&task).expect("json");
    let parsed: GanttTask = serde_json::from_str(&json).expect("parse");
    assert_eq!(parsed, task);
}
