use tracing::error;

use crate::core::ChartLayout;
use crate::error::{ChartError, ChartResult};
use crate::render::{
    Element, ElementKey, LayerKind, RectPrimitive, RenderFrame, Renderer, Scene, Shape,
    TextHAlign, TextPrimitive,
};

use super::ChartStyle;

/// Visible error state shown instead of the chart when the dataset cannot be
/// loaded or parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailureView {
    message: String,
}

impl LoadFailureView {
    #[must_use]
    pub fn from_error(err: &ChartError) -> Self {
        Self {
            message: format!("Unable to load data: {err}"),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Plot panel with the message centered inside it.
    #[must_use]
    pub fn scene(&self, layout: ChartLayout, style: &ChartStyle) -> Scene {
        let mut scene = Scene::new(layout.viewport, self.message.as_str());
        let panel = RectPrimitive::new(
            layout.margin.left,
            layout.margin.top,
            layout.inner_width(),
            layout.inner_height(),
            style.plot_background,
        )
        .with_corner_radius(style.plot_corner_radius);
        scene.insert(
            LayerKind::Background,
            ElementKey::Background,
            Element::new(Shape::Rect(panel)),
        );

        let text = TextPrimitive::new(
            self.message.as_str(),
            layout.margin.left + layout.inner_width() / 2.0,
            layout.margin.top + layout.inner_height() / 2.0,
            style.axis_title_font_px,
            style.message_color,
            TextHAlign::Center,
        )
        .bold();
        scene.insert(
            LayerKind::Overlay,
            ElementKey::Message,
            Element::new(Shape::Text(text)),
        );
        scene
    }

    /// Draws the error state without transitions.
    pub fn render<R: Renderer>(
        &self,
        renderer: &mut R,
        layout: ChartLayout,
        style: &ChartStyle,
    ) -> ChartResult<()> {
        error!(message = %self.message, "showing data load failure");
        renderer.render(&RenderFrame::snapshot_of(&self.scene(layout, style)))
    }
}
