mod frame;
mod null_renderer;
mod primitives;

pub use frame::RenderFrame;
pub use null_renderer::NullRenderer;
pub use primitives::{Color, LinePrimitive, RectPrimitive, TextHAlign, TextPrimitive};

use crate::error::GanttResult;

/// Contract implemented by any drawing surface.
///
/// Backends receive a fully materialized `RenderFrame`, so drawing code never
/// sees dates, periods or scroll state.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> GanttResult<()>;
}
