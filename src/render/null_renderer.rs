use crate::error::ChartResult;
use crate::render::reconcile::TransitionPhase;
use crate::render::{RenderFrame, Renderer};

/// No-op renderer used by tests and headless engine usage.
///
/// It still validates frame content so tests can catch invalid geometry before
/// a real backend is involved.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_entered: usize,
    pub last_updated: usize,
    pub last_exited: usize,
    /// Elements left on screen after the last frame settles.
    pub last_settled_count: usize,
    pub last_caption: String,
    pub last_frame: Option<RenderFrame>,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_entered = frame.count(TransitionPhase::Enter);
        self.last_updated = frame.count(TransitionPhase::Update);
        self.last_exited = frame.count(TransitionPhase::Exit);
        self.last_settled_count = self.last_entered + self.last_updated;
        self.last_caption.clone_from(&frame.caption);
        self.last_frame = Some(frame.clone());
        Ok(())
    }
}
