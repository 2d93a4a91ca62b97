mod curve;
mod frame;
mod null_renderer;
mod primitives;
mod reconcile;
mod scene;
mod svg_backend;

pub use curve::{CubicSegment, catmull_rom_segments, path_data};
pub use frame::{LayerFrame, RenderFrame};
pub use null_renderer::NullRenderer;
pub use primitives::{
    CirclePrimitive, Color, Element, LinePrimitive, LineStrokeStyle, PathCurve, PathPrimitive,
    RectPrimitive, Shape, TextHAlign, TextPrimitive,
};
pub use reconcile::{
    ElementTransition, KeyDiff, LayerTiming, SceneReconciler, TransitionPhase, TransitionTiming,
    diff_keys, ease_cubic_in_out,
};
pub use scene::{ElementKey, LayerKind, Scene, SceneLayer};
pub use svg_backend::{SvgRenderer, escape_xml};

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized `RenderFrame` (targets plus
/// transitions) so drawing code stays isolated from filter state and data.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}
