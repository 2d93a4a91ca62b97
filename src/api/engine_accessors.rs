use crate::core::{ChartScales, Dataset, FilterState, SiteSeries};
use crate::interaction::{HoverCandidate, InteractionState};
use crate::render::{Renderer, Scene};

use super::scene_builder::hover_candidates;
use super::{ExplorerConfig, ExplorerEngine, RedrawCycle};

impl<R: Renderer> ExplorerEngine<R> {
    #[must_use]
    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    #[must_use]
    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// Series of the active sites from the last redraw.
    #[must_use]
    pub fn series(&self) -> &[SiteSeries] {
        &self.series
    }

    /// Scales of the last redraw; `None` while nothing is visible.
    #[must_use]
    pub fn scales(&self) -> Option<&ChartScales> {
        self.scales.as_ref()
    }

    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    #[must_use]
    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    #[must_use]
    pub fn last_cycle(&self) -> Option<RedrawCycle> {
        self.last_cycle
    }

    /// Settled target of the last drawn frame.
    #[must_use]
    pub fn current_scene(&self) -> Option<&Scene> {
        self.reconciler.previous()
    }

    /// Hoverable points in viewport coordinates.
    #[must_use]
    pub fn hover_candidates(&self) -> Vec<HoverCandidate> {
        hover_candidates(
            self.config.layout,
            self.filter.metric().descriptor(),
            &self.series,
            self.scales.as_ref(),
        )
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
