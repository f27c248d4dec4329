use crate::error::RulerResult;
use crate::render::{RenderFrame, Renderer};

/// No-op renderer for tests and headless use.
///
/// It still validates frame content and keeps the last frame around so tests
/// can inspect what would have been drawn.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_frame: Option<RenderFrame>,
}

impl NullRenderer {
    #[must_use]
    pub fn last_line_count(&self) -> usize {
        self.last_frame.as_ref().map_or(0, |frame| frame.lines.len())
    }

    #[must_use]
    pub fn last_text_count(&self) -> usize {
        self.last_frame.as_ref().map_or(0, |frame| frame.texts.len())
    }
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> RulerResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_frame = Some(frame.clone());
        Ok(())
    }
}
