use approx::assert_relative_eq;
use chrono::{NaiveDate, NaiveDateTime};
use gantt_rs::core::{
    DayDescriptor, DayLabel, PeriodSet, TODAY_LABEL, XResolution, build_period, grid_lines,
    layout_header, resolve_task_bar, resolve_task_span, resolve_x,
};

fn at(year: i32, month: u32, day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .expect("valid date")
        .and_hms_opt(hour, 0, 0)
        .expect("valid time")
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 2, 14).expect("valid date")
}

fn february() -> PeriodSet {
    build_period(Some(at(2024, 2, 1, 0)), Some(at(2024, 2, 29, 0)), today()).expect("period")
}

fn february_days() -> Vec<DayDescriptor> {
    february().flatten()
}

#[test]
fn header_assigns_sequential_columns_across_months() {
    let period =
        build_period(Some(at(2024, 1, 15, 0)), Some(at(2024, 3, 10, 0)), today()).expect("period");
    let header = layout_header(&period, 30.0, 46.0);

    assert_eq!(header.months.len(), 3);
    assert_eq!(header.days.len(), 91);

    let february = &header.months[1];
    assert_relative_eq!(february.x1, 31.0 * 30.0);
    assert_relative_eq!(february.x2, 60.0 * 30.0);
    assert_relative_eq!(february.text_x, (31.0 + 60.0) / 2.0 * 30.0);
    assert_relative_eq!(february.y2, 23.0);
    assert_relative_eq!(february.text_y, 11.5);
    assert_eq!(february.text, "2024年2月");

    let first_of_march = &header.days[60];
    assert_eq!(first_of_march.column, 60);
    assert_eq!((first_of_march.day.month, first_of_march.day.day), (3, 1));
    assert_relative_eq!(first_of_march.x1, 1800.0);
    assert_relative_eq!(first_of_march.x2, 1830.0);
    assert_relative_eq!(first_of_march.y1, 23.0);
    assert_relative_eq!(first_of_march.y2, 46.0);
    assert_relative_eq!(first_of_march.text_y, 34.5);
}

#[test]
fn header_marks_today_with_sentinel_label() {
    let header = layout_header(&february(), 30.0, 45.0);

    let today_cell = &header.days[13];
    assert_eq!(today_cell.label, DayLabel::Today);
    assert_eq!(today_cell.label.text(), TODAY_LABEL);
    assert_eq!(header.days[12].label, DayLabel::Day(13));

    let weekend_cell = &header.days[2];
    assert!(weekend_cell.day.is_weekend);
    assert_relative_eq!(weekend_cell.x2 - weekend_cell.x1, 30.0);
}

#[test]
fn header_layout_is_idempotent() {
    let period = february();
    assert_eq!(layout_header(&period, 31.5, 45.0), layout_header(&period, 31.5, 45.0));
    assert_eq!(grid_lines(31.5, 29, 45.0, 4), grid_lines(31.5, 29, 45.0, 4));
}

#[test]
fn grid_lines_span_the_full_body() {
    let lines = grid_lines(30.0, 29, 45.0, 4);

    assert_eq!(lines.vertical.len(), 30);
    assert_eq!(lines.horizontal.len(), 5);
    assert_relative_eq!(lines.vertical[29].x1, 870.0);
    assert_relative_eq!(lines.vertical[0].y2, 180.0);
    assert_relative_eq!(lines.horizontal[0].y1, 0.0);
    assert_relative_eq!(lines.horizontal[4].y1, 180.0);
    assert_relative_eq!(lines.horizontal[4].x2, 870.0);
}

#[test]
fn grid_lines_without_rows_keep_the_top_edge() {
    let lines = grid_lines(30.0, 29, 45.0, 0);
    assert_eq!(lines.horizontal.len(), 1);
    assert_relative_eq!(lines.vertical[3].y2, 0.0);
}

#[test]
fn resolve_x_places_hours_linearly_inside_the_day() {
    let days = february_days();
    let resolution = resolve_x(&days, at(2024, 2, 14, 6), 30.0);

    assert_eq!(resolution, XResolution::Resolved(397.5));
}

#[test]
fn resolve_x_ignores_minutes_and_seconds() {
    let days = february_days();
    let instant = NaiveDate::from_ymd_opt(2024, 2, 14)
        .expect("valid date")
        .and_hms_opt(6, 59, 59)
        .expect("valid time");
    assert_eq!(resolve_x(&days, instant, 30.0), XResolution::Resolved(397.5));
}

#[test]
fn resolve_x_distinguishes_pixel_zero_from_out_of_range() {
    let days = february_days();

    let first = resolve_x(&days, at(2024, 2, 1, 0), 30.0);
    assert_eq!(first, XResolution::Resolved(0.0));
    assert!(first.is_resolved());

    let outside = resolve_x(&days, at(2024, 3, 1, 0), 30.0);
    assert_eq!(outside, XResolution::OutOfRange);
    assert_eq!(outside.to_pixel(), 0.0);
}

#[test]
fn task_bar_spans_start_to_end() {
    let days = february_days();
    let bar = resolve_task_bar(at(2024, 2, 5, 0), at(2024, 2, 8, 12), &days, 30.0);

    assert_relative_eq!(bar.x1, 120.0);
    assert_relative_eq!(bar.x2, 225.0);
    assert_relative_eq!(bar.width(), 105.0);
}

#[test]
fn task_bar_with_end_out_of_range_collapses_to_start() {
    let days = february_days();
    let bar = resolve_task_bar(at(2024, 2, 5, 0), at(2024, 4, 1, 0), &days, 30.0);

    assert_relative_eq!(bar.x1, 120.0);
    assert_relative_eq!(bar.x2, 120.0);
}

#[test]
fn task_bar_starting_at_pixel_zero_with_end_out_of_range_collapses_at_zero() {
    let days = february_days();
    let span = resolve_task_span(
        Some(at(2024, 2, 1, 0)),
        Some(at(2024, 5, 1, 0)),
        &days,
        30.0,
    );

    assert_eq!(span.start, XResolution::Resolved(0.0));
    assert_eq!(span.end, XResolution::OutOfRange);
    let bar = span.to_bar();
    assert_eq!((bar.x1, bar.x2), (0.0, 0.0));
}

#[test]
fn task_bar_with_start_out_of_range_starts_at_zero() {
    let days = february_days();
    let bar = resolve_task_bar(at(2024, 1, 20, 0), at(2024, 2, 3, 0), &days, 30.0);

    assert_relative_eq!(bar.x1, 0.0);
    assert_relative_eq!(bar.x2, 60.0);
}

#[test]
fn task_bar_never_has_negative_width() {
    let days = february_days();
    let bar = resolve_task_bar(at(2024, 2, 10, 0), at(2024, 2, 2, 0), &days, 30.0);
    assert!(bar.x2 >= bar.x1);
    assert_relative_eq!(bar.width(), 0.0);
}

#[test]
fn missing_dates_resolve_out_of_range() {
    let days = february_days();
    let span = resolve_task_span(None, None, &days, 30.0);
    assert_eq!(span.start, XResolution::OutOfRange);
    assert_eq!(span.to_bar().width(), 0.0);
}
