use std::fmt;

use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::primitives::Element;

/// Drawing layers, back to front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayerKind {
    Background,
    Grid,
    Series,
    Points,
    Axis,
    Legend,
    Overlay,
}

impl LayerKind {
    pub const ALL: [Self; 7] = [
        Self::Background,
        Self::Grid,
        Self::Series,
        Self::Points,
        Self::Axis,
        Self::Legend,
        Self::Overlay,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Grid => "grid",
            Self::Series => "series",
            Self::Points => "points",
            Self::Axis => "axis",
            Self::Legend => "legend",
            Self::Overlay => "overlay",
        }
    }
}

/// Stable identity of a drawn element across redraws.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKey {
    Background,
    GridLine(OrderedFloat<f64>),
    SeriesLine(String),
    Point { site: String, month_index: usize },
    XDomain,
    YDomain,
    XTickLabel(String),
    YTickMark(OrderedFloat<f64>),
    YTickLabel(OrderedFloat<f64>),
    AxisTitle,
    LegendSwatch(String),
    LegendLabel(String),
    TooltipPanel,
    TooltipLine(usize),
    Message,
    /// Free-form key used by static gallery charts.
    Mark(String),
}

impl ElementKey {
    #[must_use]
    pub fn point(site: impl Into<String>, month_index: usize) -> Self {
        Self::Point {
            site: site.into(),
            month_index,
        }
    }
}

impl fmt::Display for ElementKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Background => f.write_str("background"),
            Self::GridLine(value) => write!(f, "grid:{value}"),
            Self::SeriesLine(site) => write!(f, "line:{site}"),
            Self::Point { site, month_index } => write!(f, "point:{site}:{month_index}"),
            Self::XDomain => f.write_str("x-domain"),
            Self::YDomain => f.write_str("y-domain"),
            Self::XTickLabel(month) => write!(f, "x-tick:{month}"),
            Self::YTickMark(value) => write!(f, "y-tick-mark:{value}"),
            Self::YTickLabel(value) => write!(f, "y-tick:{value}"),
            Self::AxisTitle => f.write_str("axis-title"),
            Self::LegendSwatch(site) => write!(f, "legend-swatch:{site}"),
            Self::LegendLabel(site) => write!(f, "legend-label:{site}"),
            Self::TooltipPanel => f.write_str("tooltip"),
            Self::TooltipLine(index) => write!(f, "tooltip-line:{index}"),
            Self::Message => f.write_str("message"),
            Self::Mark(name) => write!(f, "mark:{name}"),
        }
    }
}

/// Keyed elements of one layer, in paint order.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneLayer {
    pub kind: LayerKind,
    pub elements: IndexMap<ElementKey, Element>,
}

impl SceneLayer {
    #[must_use]
    pub fn new(kind: LayerKind) -> Self {
        Self {
            kind,
            elements: IndexMap::new(),
        }
    }
}

/// Target state of every drawn element for one redraw cycle.
///
/// A scene describes where things should end up; the reconciler turns the
/// difference between two scenes into transitions.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub viewport: Viewport,
    /// Accessible caption, usually the summary sentence.
    pub caption: String,
    layers: Vec<SceneLayer>,
}

impl Scene {
    #[must_use]
    pub fn new(viewport: Viewport, caption: impl Into<String>) -> Self {
        Self {
            viewport,
            caption: caption.into(),
            layers: LayerKind::ALL.into_iter().map(SceneLayer::new).collect(),
        }
    }

    #[must_use]
    pub fn layers(&self) -> &[SceneLayer] {
        &self.layers
    }

    #[must_use]
    pub fn layer(&self, kind: LayerKind) -> &SceneLayer {
        &self.layers[layer_slot(kind)]
    }

    pub fn layer_mut(&mut self, kind: LayerKind) -> &mut SceneLayer {
        &mut self.layers[layer_slot(kind)]
    }

    /// Adds or replaces the element stored under `key`.
    pub fn insert(&mut self, kind: LayerKind, key: ElementKey, element: Element) {
        self.layer_mut(kind).elements.insert(key, element);
    }

    #[must_use]
    pub fn get(&self, kind: LayerKind, key: &ElementKey) -> Option<&Element> {
        self.layer(kind).elements.get(key)
    }

    pub fn clear_layer(&mut self, kind: LayerKind) {
        self.layer_mut(kind).elements.clear();
    }

    #[must_use]
    pub fn element_count(&self) -> usize {
        self.layers.iter().map(|layer| layer.elements.len()).sum()
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.viewport.validate()?;
        for layer in &self.layers {
            for (key, element) in &layer.elements {
                element.validate().map_err(|err| {
                    ChartError::InvalidData(format!(
                        "element `{key}` in {}: {err}",
                        layer.kind.name()
                    ))
                })?;
            }
        }
        Ok(())
    }
}

fn layer_slot(kind: LayerKind) -> usize {
    match kind {
        LayerKind::Background => 0,
        LayerKind::Grid => 1,
        LayerKind::Series => 2,
        LayerKind::Points => 3,
        LayerKind::Axis => 4,
        LayerKind::Legend => 5,
        LayerKind::Overlay => 6,
    }
}

#[cfg(test)]
mod tests {
    use ordered_float::OrderedFloat;

    use super::{ElementKey, LayerKind, Scene};
    use crate::core::Viewport;

    #[test]
    fn new_scene_has_every_layer_in_paint_order() {
        let scene = Scene::new(Viewport::new(10, 10), "");
        let kinds: Vec<LayerKind> = scene.layers().iter().map(|layer| layer.kind).collect();
        assert_eq!(kinds, LayerKind::ALL.to_vec());
        assert_eq!(scene.element_count(), 0);
    }

    #[test]
    fn keys_render_as_stable_identifiers() {
        assert_eq!(ElementKey::point("Tromsø", 5).to_string(), "point:Tromsø:5");
        assert_eq!(ElementKey::GridLine(OrderedFloat(20.0)).to_string(), "grid:20");
    }
}
