use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::reconcile::{ElementTransition, TransitionPhase};
use crate::render::scene::{LayerKind, Scene};

/// Transitions of one layer in paint order; exiting items come last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerFrame {
    pub kind: LayerKind,
    pub items: Vec<ElementTransition>,
}

/// Backend-agnostic description of one redraw: every keyed element with
/// where it starts, where it ends, and how long it takes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub caption: String,
    pub layers: Vec<LayerFrame>,
}

impl RenderFrame {
    /// Frame without transitions that draws `scene` as-is.
    #[must_use]
    pub fn snapshot_of(scene: &Scene) -> Self {
        let layers = scene
            .layers()
            .iter()
            .map(|layer| LayerFrame {
                kind: layer.kind,
                items: layer
                    .elements
                    .iter()
                    .map(|(key, element)| ElementTransition {
                        key: key.clone(),
                        phase: TransitionPhase::Enter,
                        from: element.clone(),
                        to: element.clone(),
                        duration_ms: 0,
                    })
                    .collect(),
            })
            .collect();
        Self {
            viewport: scene.viewport,
            caption: scene.caption.clone(),
            layers,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.viewport.validate()?;
        for layer in &self.layers {
            for item in &layer.items {
                for element in [&item.from, &item.to] {
                    element.validate().map_err(|err| {
                        ChartError::InvalidData(format!(
                            "element `{}` in {}: {err}",
                            item.key,
                            layer.kind.name()
                        ))
                    })?;
                }
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn layer(&self, kind: LayerKind) -> Option<&LayerFrame> {
        self.layers.iter().find(|layer| layer.kind == kind)
    }

    #[must_use]
    pub fn count(&self, phase: TransitionPhase) -> usize {
        self.layers
            .iter()
            .flat_map(|layer| layer.items.iter())
            .filter(|item| item.phase == phase)
            .count()
    }

    /// Longest transition in the frame.
    #[must_use]
    pub fn duration_ms(&self) -> u32 {
        self.layers
            .iter()
            .flat_map(|layer| layer.items.iter())
            .map(|item| item.duration_ms)
            .max()
            .unwrap_or(0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.iter().all(|layer| layer.items.is_empty())
    }

    /// Interpolated scene after `elapsed_ms`. Exiting items are dropped once
    /// their transition has finished.
    #[must_use]
    pub fn sample(&self, elapsed_ms: u32) -> Scene {
        let mut scene = Scene::new(self.viewport, self.caption.clone());
        for layer in &self.layers {
            for item in &layer.items {
                if item.phase == TransitionPhase::Exit && elapsed_ms >= item.duration_ms {
                    continue;
                }
                scene.insert(layer.kind, item.key.clone(), item.sample(elapsed_ms));
            }
        }
        scene
    }

    /// Scene once every transition has completed.
    #[must_use]
    pub fn settled(&self) -> Scene {
        self.sample(u32::MAX)
    }
}
