use crate::core::{DayLabel, Viewport};
use crate::error::GanttResult;
use crate::render::{
    Color, LinePrimitive, RectPrimitive, RenderFrame, Renderer, TextHAlign, TextPrimitive,
};

use super::GanttChart;
use super::controller::CalendarLayout;
use super::task_layout::TaskRow;

pub const EMPTY_CHART_LABEL: &str = "没有数据";

const GRID_LINE_COLOR: Color = Color::BLACK.with_alpha(0.09);
const HEADER_BACKGROUND: Color = Color::rgb8(0xe9, 0xed, 0xf2);
const HEADER_TEXT_COLOR: Color = Color::rgb8(0x5a, 0x6c, 0x84);
const WEEKEND_TEXT_COLOR: Color = Color::rgb8(0xff, 0xa5, 0x00);
const EMPTY_TEXT_COLOR: Color = Color::rgb8(0xcc, 0xcc, 0xcc);
const TODAY_HIGHLIGHT: Color = Color::rgb8(0xee, 0xf8, 0xff).with_alpha(0.5);
const TODAY_HIGHLIGHT_HEIGHT_PX: f64 = 18.0;
const LINE_WIDTH_PX: f64 = 1.0;
const FONT_SIZE_PX: f64 = 12.0;
const EMPTY_MIN_WIDTH_PX: f64 = 400.0;
const EMPTY_MIN_HEIGHT_PX: f64 = 200.0;

impl<R: Renderer> GanttChart<R> {
    /// Materializes the current layout into draw primitives.
    ///
    /// Body geometry is shifted below the header; the header is pinned at the
    /// current vertical scroll offset.
    pub fn build_render_frame(&self) -> GanttResult<RenderFrame> {
        let Some(layout) = self.controller.layout() else {
            return self.build_empty_frame();
        };

        let header_height = layout.metrics.header_height;
        let viewport = Viewport::new(
            pixel_extent(layout.svg_width),
            pixel_extent(header_height + layout.metrics.body_height()),
        );
        let mut frame = RenderFrame::new(viewport);

        push_body_grid(&mut frame, layout);
        for row in self.task_rows() {
            push_task_row(&mut frame, &row, header_height);
        }
        push_header(&mut frame, layout, self.controller.viewport().scroll_y);

        frame.validate()?;
        Ok(frame)
    }

    fn build_empty_frame(&self) -> GanttResult<RenderFrame> {
        let width = self.controller.container_width().max(EMPTY_MIN_WIDTH_PX);
        let frame = RenderFrame::new(Viewport::new(
            pixel_extent(width),
            pixel_extent(EMPTY_MIN_HEIGHT_PX),
        ))
        .with_text(TextPrimitive::new(
            EMPTY_CHART_LABEL,
            width / 2.0,
            EMPTY_MIN_HEIGHT_PX / 2.0,
            FONT_SIZE_PX,
            EMPTY_TEXT_COLOR,
            TextHAlign::Center,
        ));
        frame.validate()?;
        Ok(frame)
    }
}

fn pixel_extent(value: f64) -> u32 {
    value.ceil().clamp(0.0, f64::from(u32::MAX)) as u32
}

fn grid_line(x1: f64, y1: f64, x2: f64, y2: f64) -> LinePrimitive {
    LinePrimitive::new(x1, y1, x2, y2, LINE_WIDTH_PX, GRID_LINE_COLOR)
}

fn push_body_grid(frame: &mut RenderFrame, layout: &CalendarLayout) {
    let offset = layout.metrics.header_height;
    for line in &layout.grid.vertical {
        frame.push_line(grid_line(line.x1, line.y1 + offset, line.x2, line.y2 + offset));
    }
    // The first horizontal line coincides with the header's bottom edge.
    for line in layout.grid.horizontal.iter().skip(1) {
        frame.push_line(grid_line(line.x1, line.y1 + offset, line.x2, line.y2 + offset));
    }
}

fn push_task_row(frame: &mut RenderFrame, row: &TaskRow, offset: f64) {
    if !row.title.is_empty() && !row.bars.is_empty() {
        frame.push_text(TextPrimitive::new(
            row.title.as_str(),
            row.title_x,
            row.title_y + offset,
            FONT_SIZE_PX,
            row.title_color,
            TextHAlign::Left,
        ));
    }

    for bar in &row.bars {
        frame.push_rect(RectPrimitive::new(
            bar.bar.x1,
            bar.rect_y + offset,
            bar.bar.width(),
            bar.rect_height,
            bar.style.background_color,
        ));
        if let Some(content) = bar.content.as_deref().filter(|content| !content.is_empty()) {
            frame.push_text(TextPrimitive::new(
                content,
                bar.text_x,
                bar.text_y + offset,
                FONT_SIZE_PX,
                bar.style.color,
                TextHAlign::Center,
            ));
        }
    }
}

fn push_header(frame: &mut RenderFrame, layout: &CalendarLayout, top: f64) {
    let header_height = layout.metrics.header_height;
    let width = layout.svg_width;

    frame.push_rect(RectPrimitive::new(0.0, top, width, header_height, HEADER_BACKGROUND));
    frame.push_line(grid_line(0.0, top + header_height / 2.0, width, top + header_height / 2.0));

    for month in &layout.header.months {
        frame.push_text(TextPrimitive::new(
            month.text.as_str(),
            month.text_x,
            top + month.text_y,
            FONT_SIZE_PX,
            HEADER_TEXT_COLOR,
            TextHAlign::Center,
        ));
        frame.push_line(grid_line(month.x2, top + month.y1, month.x2, top + month.y2));
    }

    for cell in &layout.header.days {
        let color = if cell.day.is_weekend {
            WEEKEND_TEXT_COLOR
        } else {
            HEADER_TEXT_COLOR
        };
        frame.push_text(TextPrimitive::new(
            cell.label.text(),
            cell.text_x,
            top + cell.text_y,
            FONT_SIZE_PX,
            color,
            TextHAlign::Center,
        ));
        frame.push_line(grid_line(cell.x2, top + cell.y1, cell.x2, top + cell.y2));

        if cell.label == DayLabel::Today {
            let cell_height = cell.y2 - cell.y1;
            let highlight_height = TODAY_HIGHLIGHT_HEIGHT_PX.min(cell_height);
            frame.push_rect(RectPrimitive::new(
                cell.x1,
                top + cell.y1 + (cell_height - highlight_height) / 2.0,
                cell.x2 - cell.x1,
                highlight_height,
                TODAY_HIGHLIGHT,
            ));
        }
    }
}
