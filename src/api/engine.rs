use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::core::{
    ChartScales, Dataset, FilterState, MetricKey, SeasonFilter, SiteSeries, ToggleOutcome,
    build_scales, build_series, build_summary,
};
use crate::error::ChartResult;
use crate::interaction::{HoverChange, HoverRadii, InteractionState};
use crate::render::{Renderer, SceneReconciler, TransitionPhase, TransitionTiming};

use super::scene_builder::{SceneInput, build_scene, hover_candidates};
use super::ExplorerConfig;

/// What triggered a redraw cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RedrawReason {
    Initial,
    Season,
    Metric,
    SiteToggle,
    Reset,
    Hover,
}

/// Outcome of the most recent redraw cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedrawCycle {
    pub reason: RedrawReason,
    pub entered: usize,
    pub updated: usize,
    pub exited: usize,
    pub duration_ms: u32,
    pub visible_points: usize,
}

/// Interactive explorer facade consumed by host applications.
///
/// Owns the only `FilterState`. Every mutator recomputes series, scales and
/// summary and pushes one reconciled frame to the renderer before returning.
pub struct ExplorerEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) config: ExplorerConfig,
    pub(super) dataset: Dataset,
    pub(super) filter: FilterState,
    pub(super) reconciler: SceneReconciler,
    pub(super) interaction: InteractionState,
    pub(super) series: Vec<SiteSeries>,
    pub(super) scales: Option<ChartScales>,
    pub(super) summary: String,
    pub(super) last_cycle: Option<RedrawCycle>,
}

impl<R: Renderer> ExplorerEngine<R> {
    /// Wires the engine to a loaded dataset and performs the first draw.
    pub fn new(renderer: R, config: ExplorerConfig, dataset: Dataset) -> ChartResult<Self> {
        config.validate()?;
        let filter = FilterState::new(dataset.sites().clone(), config.default_metric)?;
        let interaction = InteractionState::new(config.style.tooltip_offset);
        info!(
            records = dataset.records().len(),
            sites = dataset.sites().len(),
            metric = %config.default_metric,
            "explorer engine initialized"
        );

        let mut engine = Self {
            renderer,
            config,
            dataset,
            filter,
            reconciler: SceneReconciler::new(),
            interaction,
            series: Vec::new(),
            scales: None,
            summary: String::new(),
            last_cycle: None,
        };
        engine.redraw(RedrawReason::Initial)?;
        Ok(engine)
    }

    pub fn set_season(&mut self, season: SeasonFilter) -> ChartResult<()> {
        debug!(%season, "season selected");
        self.filter.set_season(season);
        self.redraw(RedrawReason::Season)
    }

    pub fn set_metric(&mut self, metric: MetricKey) -> ChartResult<()> {
        debug!(%metric, "metric selected");
        self.filter.set_metric(metric);
        self.redraw(RedrawReason::Metric)
    }

    /// Toggles one site. Rejected toggles leave the chart untouched.
    pub fn toggle_site(&mut self, site: &str) -> ChartResult<ToggleOutcome> {
        let outcome = self.filter.toggle_site(site);
        match outcome {
            ToggleOutcome::RejectedLastActive => {
                warn!(site, "ignoring toggle of the last active site");
            }
            ToggleOutcome::UnknownSite => warn!(site, "ignoring toggle of an unknown site"),
            ToggleOutcome::Activated | ToggleOutcome::Deactivated => {
                debug!(site, ?outcome, active = self.filter.active_count(), "site toggled");
                self.redraw(RedrawReason::SiteToggle)?;
            }
        }
        Ok(outcome)
    }

    /// Restores season, metric and site selection to their defaults.
    pub fn reset(&mut self) -> ChartResult<()> {
        debug!("filters reset");
        self.filter.reset();
        self.redraw(RedrawReason::Reset)
    }

    /// Pointer moved to `(x, y)` in viewport coordinates.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> ChartResult<HoverChange> {
        let candidates = hover_candidates(
            self.config.layout,
            self.filter.metric().descriptor(),
            &self.series,
            self.scales.as_ref(),
        );
        let radii = HoverRadii {
            rest: self.config.style.point_radius,
            hovered: self.config.style.point_hover_radius,
        };
        let change = self.interaction.pointer_move(x, y, &candidates, radii);
        if change != HoverChange::Unchanged {
            self.draw(RedrawReason::Hover, self.config.timing.hover())?;
        }
        Ok(change)
    }

    pub fn pointer_leave(&mut self) -> ChartResult<HoverChange> {
        let change = self.interaction.pointer_leave();
        if change != HoverChange::Unchanged {
            self.draw(RedrawReason::Hover, self.config.timing.hover())?;
        }
        Ok(change)
    }

    /// Full recompute: series, scales, summary, then a reconciled draw.
    fn redraw(&mut self, reason: RedrawReason) -> ChartResult<()> {
        self.interaction.clear();
        let metric = self.filter.metric().descriptor();
        self.series = build_series(&self.dataset, &self.filter);
        self.scales = build_scales(&self.series, self.filter.season(), self.config.layout);
        self.summary = build_summary(
            metric,
            self.filter.season(),
            self.filter.active_count(),
            &self.series,
            self.config.cycle_year,
        );

        let timing = if self.scales.is_some() {
            self.config.timing
        } else {
            debug!(season = %self.filter.season(), "no visible data, clearing chart");
            TransitionTiming::immediate()
        };
        self.draw(reason, timing)
    }

    fn draw(&mut self, reason: RedrawReason, timing: TransitionTiming) -> ChartResult<()> {
        let scene = build_scene(&SceneInput {
            layout: self.config.layout,
            style: &self.config.style,
            dataset: &self.dataset,
            filter: &self.filter,
            series: &self.series,
            scales: self.scales.as_ref(),
            hovered: self.interaction.hovered(),
            tooltip: self.interaction.tooltip(),
            caption: &self.summary,
        });
        let frame = self.reconciler.reconcile(scene, &timing);
        self.renderer.render(&frame)?;

        let cycle = RedrawCycle {
            reason,
            entered: frame.count(TransitionPhase::Enter),
            updated: frame.count(TransitionPhase::Update),
            exited: frame.count(TransitionPhase::Exit),
            duration_ms: frame.duration_ms(),
            visible_points: self.series.iter().map(|entry| entry.values.len()).sum(),
        };
        debug!(
            ?reason,
            entered = cycle.entered,
            updated = cycle.updated,
            exited = cycle.exited,
            duration_ms = cycle.duration_ms,
            "redraw cycle complete"
        );
        self.last_cycle = Some(cycle);
        Ok(())
    }
}
