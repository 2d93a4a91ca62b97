use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{MetricKey, SeasonFilter, SiteSeries};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{PointKey, TooltipState};
use crate::render::Renderer;

use super::ExplorerEngine;

/// Serializable explorer state used by regression tests and debugging tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplorerSnapshot {
    pub season: SeasonFilter,
    pub metric: MetricKey,
    pub all_sites: Vec<String>,
    pub active_sites: Vec<String>,
    pub x_domain: Vec<String>,
    pub y_domain: Option<(f64, f64)>,
    pub y_ticks: Vec<f64>,
    pub series: Vec<SiteSeries>,
    pub summary: String,
    pub hovered: Option<PointKey>,
    pub tooltip: TooltipState,
    /// Settled element count per layer, in paint order.
    pub layer_element_counts: IndexMap<String, usize>,
}

impl<R: Renderer> ExplorerEngine<R> {
    #[must_use]
    pub fn snapshot(&self) -> ExplorerSnapshot {
        let layer_element_counts = self
            .reconciler
            .previous()
            .map(|scene| {
                scene
                    .layers()
                    .iter()
                    .map(|layer| (layer.kind.name().to_owned(), layer.elements.len()))
                    .collect()
            })
            .unwrap_or_default();

        ExplorerSnapshot {
            season: self.filter.season(),
            metric: self.filter.metric(),
            all_sites: self.filter.all_sites().iter().cloned().collect(),
            active_sites: self.filter.active_sites().map(str::to_owned).collect(),
            x_domain: self
                .scales
                .as_ref()
                .map(|scales| scales.x.domain().to_vec())
                .unwrap_or_default(),
            y_domain: self.scales.as_ref().map(|scales| scales.y.domain()),
            y_ticks: self
                .scales
                .as_ref()
                .map(|scales| scales.y.ticks(self.config.style.y_tick_count))
                .unwrap_or_default(),
            series: self.series.clone(),
            summary: self.summary.clone(),
            hovered: self.interaction.hovered().cloned(),
            tooltip: self.interaction.tooltip().clone(),
            layer_element_counts,
        }
    }

    pub fn snapshot_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self.snapshot())
            .map_err(|err| ChartError::InvalidData(format!("failed to serialize snapshot: {err}")))
    }
}
