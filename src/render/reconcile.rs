use std::hash::Hash;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::render::frame::{LayerFrame, RenderFrame};
use crate::render::primitives::Element;
use crate::render::scene::{ElementKey, LayerKind, Scene};

/// Result of matching two keyed collections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyDiff<K> {
    /// Keys only in the next collection, in next order.
    pub entered: Vec<K>,
    /// Keys in both, in next order.
    pub retained: Vec<K>,
    /// Keys only in the previous collection, in previous order.
    pub exited: Vec<K>,
}

/// Three-way diff of `previous` against `next` by key.
#[must_use]
pub fn diff_keys<K, V>(previous: &IndexMap<K, V>, next: &IndexMap<K, V>) -> KeyDiff<K>
where
    K: Hash + Eq + Clone,
{
    let (retained, entered): (Vec<K>, Vec<K>) = next
        .keys()
        .cloned()
        .partition(|key| previous.contains_key(key));
    let exited = previous
        .keys()
        .filter(|key| !next.contains_key(*key))
        .cloned()
        .collect();
    KeyDiff {
        entered,
        retained,
        exited,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransitionPhase {
    Enter,
    Update,
    Exit,
}

/// Animation of one keyed element from `from` to `to`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementTransition {
    pub key: ElementKey,
    pub phase: TransitionPhase,
    pub from: Element,
    pub to: Element,
    pub duration_ms: u32,
}

impl ElementTransition {
    /// State at `elapsed_ms`, eased with a cubic in-out curve.
    #[must_use]
    pub fn sample(&self, elapsed_ms: u32) -> Element {
        if self.duration_ms == 0 || elapsed_ms >= self.duration_ms {
            return self.to.clone();
        }
        let t = f64::from(elapsed_ms) / f64::from(self.duration_ms);
        Element::interpolate(&self.from, &self.to, ease_cubic_in_out(t))
    }

    #[must_use]
    pub fn is_animated(&self) -> bool {
        self.duration_ms > 0 && self.from != self.to
    }
}

#[must_use]
pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0) * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

/// Durations for one layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerTiming {
    pub enter_ms: u32,
    pub update_ms: u32,
    pub exit_ms: u32,
}

impl LayerTiming {
    #[must_use]
    pub const fn uniform(duration_ms: u32) -> Self {
        Self {
            enter_ms: duration_ms,
            update_ms: duration_ms,
            exit_ms: duration_ms,
        }
    }

    #[must_use]
    pub fn for_phase(self, phase: TransitionPhase) -> u32 {
        match phase {
            TransitionPhase::Enter => self.enter_ms,
            TransitionPhase::Update => self.update_ms,
            TransitionPhase::Exit => self.exit_ms,
        }
    }
}

/// Per-layer transition durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionTiming {
    #[serde(default = "default_grid_timing")]
    pub grid: LayerTiming,
    #[serde(default = "default_series_timing")]
    pub series: LayerTiming,
    #[serde(default = "default_points_timing")]
    pub points: LayerTiming,
    #[serde(default = "default_axis_timing")]
    pub axis: LayerTiming,
    #[serde(default = "default_legend_timing")]
    pub legend: LayerTiming,
    /// Radius change of a hovered point.
    #[serde(default = "default_hover_ms")]
    pub hover_ms: u32,
    /// Every layer but points appears without animation on the first draw.
    #[serde(default = "default_snap_first_draw")]
    pub snap_first_draw: bool,
}

impl Default for TransitionTiming {
    fn default() -> Self {
        Self {
            grid: default_grid_timing(),
            series: default_series_timing(),
            points: default_points_timing(),
            axis: default_axis_timing(),
            legend: default_legend_timing(),
            hover_ms: default_hover_ms(),
            snap_first_draw: default_snap_first_draw(),
        }
    }
}

impl TransitionTiming {
    /// No animation at all.
    #[must_use]
    pub const fn immediate() -> Self {
        Self {
            grid: LayerTiming::uniform(0),
            series: LayerTiming::uniform(0),
            points: LayerTiming::uniform(0),
            axis: LayerTiming::uniform(0),
            legend: LayerTiming::uniform(0),
            hover_ms: 0,
            snap_first_draw: true,
        }
    }

    /// Timing for hover redraws: only the points layer animates.
    #[must_use]
    pub fn hover(self) -> Self {
        Self {
            points: LayerTiming::uniform(self.hover_ms),
            ..Self::immediate()
        }
    }

    #[must_use]
    pub fn for_layer(self, kind: LayerKind) -> LayerTiming {
        match kind {
            LayerKind::Grid => self.grid,
            LayerKind::Series => self.series,
            LayerKind::Points => self.points,
            LayerKind::Axis => self.axis,
            LayerKind::Legend => self.legend,
            LayerKind::Background | LayerKind::Overlay => LayerTiming::uniform(0),
        }
    }
}

fn default_grid_timing() -> LayerTiming {
    LayerTiming::uniform(400)
}

fn default_series_timing() -> LayerTiming {
    LayerTiming::uniform(500)
}

fn default_points_timing() -> LayerTiming {
    LayerTiming {
        enter_ms: 350,
        update_ms: 350,
        exit_ms: 200,
    }
}

fn default_axis_timing() -> LayerTiming {
    LayerTiming::uniform(400)
}

fn default_legend_timing() -> LayerTiming {
    LayerTiming::uniform(200)
}

fn default_hover_ms() -> u32 {
    150
}

fn default_snap_first_draw() -> bool {
    true
}

/// Remembers the last drawn scene and turns the next one into a frame of
/// keyed enter/update/exit transitions.
#[derive(Debug, Clone, Default)]
pub struct SceneReconciler {
    previous: Option<Scene>,
}

impl SceneReconciler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_first_draw(&self) -> bool {
        self.previous.is_none()
    }

    /// Settled target of the last reconciled scene.
    #[must_use]
    pub fn previous(&self) -> Option<&Scene> {
        self.previous.as_ref()
    }

    /// Forgets the drawn state so the next scene is treated as a first draw.
    pub fn reset(&mut self) {
        self.previous = None;
    }

    /// Diffs `next` against the previous scene layer by layer.
    ///
    /// Retained elements animate from the previous target; a redraw never
    /// starts from a half-finished state.
    pub fn reconcile(&mut self, next: Scene, timing: &TransitionTiming) -> RenderFrame {
        let first_draw = self.previous.is_none();
        let mut layers = Vec::with_capacity(LayerKind::ALL.len());

        for next_layer in next.layers() {
            let kind = next_layer.kind;
            let empty = IndexMap::new();
            let previous_elements = self
                .previous
                .as_ref()
                .map_or(&empty, |scene| &scene.layer(kind).elements);
            let layer_timing = timing.for_layer(kind);
            let snap = first_draw && timing.snap_first_draw && kind != LayerKind::Points;
            let diff = diff_keys(previous_elements, &next_layer.elements);

            let mut items = Vec::with_capacity(next_layer.elements.len() + diff.exited.len());
            for (key, target) in &next_layer.elements {
                let (phase, from) = match previous_elements.get(key) {
                    Some(previous) => (TransitionPhase::Update, previous.clone()),
                    None if snap => (TransitionPhase::Enter, target.clone()),
                    None => (TransitionPhase::Enter, target.faded()),
                };
                items.push(ElementTransition {
                    key: key.clone(),
                    phase,
                    from,
                    to: target.clone(),
                    duration_ms: if snap { 0 } else { layer_timing.for_phase(phase) },
                });
            }
            for key in diff.exited {
                if let Some(previous) = previous_elements.get(&key) {
                    items.push(ElementTransition {
                        key,
                        phase: TransitionPhase::Exit,
                        from: previous.clone(),
                        to: previous.faded(),
                        duration_ms: layer_timing.exit_ms,
                    });
                }
            }

            trace!(
                layer = kind.name(),
                entered = diff.entered.len(),
                retained = diff.retained.len(),
                exited = items.len() - next_layer.elements.len(),
                "reconciled layer"
            );
            layers.push(LayerFrame { kind, items });
        }

        let frame = RenderFrame {
            viewport: next.viewport,
            caption: next.caption.clone(),
            layers,
        };
        self.previous = Some(next);
        frame
    }
}
