mod frame;
mod null_renderer;
mod primitives;

pub use frame::RenderFrame;
pub use null_renderer::NullRenderer;
pub use primitives::{Color, LinePrimitive, RectPrimitive, TextHAlign, TextPrimitive};

use crate::error::RulerResult;

/// Contract implemented by any drawing backend.
///
/// Backends receive a fully materialized `RenderFrame`, so drawing code stays
/// isolated from tick selection and zoom logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> RulerResult<()>;
}
