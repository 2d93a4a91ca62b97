use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::core::metric::MetricKey;
use crate::core::season::SeasonFilter;
use crate::error::{ChartError, ChartResult};

/// Result of a site toggle request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToggleOutcome {
    Activated,
    Deactivated,
    /// The site is the last active one; the set is left unchanged.
    RejectedLastActive,
    /// The site was not discovered at load time; the set is left unchanged.
    UnknownSite,
}

impl ToggleOutcome {
    /// Whether the filter changed and a redraw is due.
    #[must_use]
    pub fn changed(self) -> bool {
        matches!(self, Self::Activated | Self::Deactivated)
    }
}

/// Current user selection: season, metric, and the active site subset.
///
/// `active_sites` is always a non-empty subset of `all_sites`; every mutator
/// preserves that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "FilterStateRepr")]
pub struct FilterState {
    season: SeasonFilter,
    metric: MetricKey,
    default_metric: MetricKey,
    all_sites: IndexSet<String>,
    active_sites: IndexSet<String>,
}

/// Unchecked wire form of [`FilterState`].
#[derive(Deserialize)]
struct FilterStateRepr {
    #[serde(default)]
    season: SeasonFilter,
    #[serde(default)]
    metric: MetricKey,
    #[serde(default)]
    default_metric: MetricKey,
    all_sites: IndexSet<String>,
    active_sites: IndexSet<String>,
}

impl TryFrom<FilterStateRepr> for FilterState {
    type Error = ChartError;

    fn try_from(repr: FilterStateRepr) -> ChartResult<Self> {
        let mut state = Self::new(repr.all_sites, repr.default_metric)?;
        if repr.active_sites.is_empty() {
            return Err(ChartError::InvalidData(
                "filter state has no active sites".to_owned(),
            ));
        }
        if let Some(unknown) = repr
            .active_sites
            .iter()
            .find(|site| !state.all_sites.contains(site.as_str()))
        {
            return Err(ChartError::InvalidData(format!(
                "active site `{unknown}` is not a known site"
            )));
        }
        state.season = repr.season;
        state.metric = repr.metric;
        state.active_sites = repr.active_sites;
        Ok(state)
    }
}

impl FilterState {
    /// Initial state: every site active, season `All`, the default metric.
    pub fn new(all_sites: IndexSet<String>, default_metric: MetricKey) -> ChartResult<Self> {
        if all_sites.is_empty() {
            return Err(ChartError::EmptyDataset);
        }
        Ok(Self {
            season: SeasonFilter::All,
            metric: default_metric,
            default_metric,
            active_sites: all_sites.clone(),
            all_sites,
        })
    }

    #[must_use]
    pub fn season(&self) -> SeasonFilter {
        self.season
    }

    #[must_use]
    pub fn metric(&self) -> MetricKey {
        self.metric
    }

    #[must_use]
    pub fn default_metric(&self) -> MetricKey {
        self.default_metric
    }

    #[must_use]
    pub fn all_sites(&self) -> &IndexSet<String> {
        &self.all_sites
    }

    /// Active site ids in discovery order.
    pub fn active_sites(&self) -> impl Iterator<Item = &str> + '_ {
        self.all_sites
            .iter()
            .filter(|site| self.active_sites.contains(site.as_str()))
            .map(String::as_str)
    }

    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active_sites.len()
    }

    #[must_use]
    pub fn is_active(&self, site: &str) -> bool {
        self.active_sites.contains(site)
    }

    pub fn set_season(&mut self, season: SeasonFilter) {
        self.season = season;
    }

    pub fn set_metric(&mut self, metric: MetricKey) {
        self.metric = metric;
    }

    pub fn toggle_site(&mut self, site: &str) -> ToggleOutcome {
        if !self.all_sites.contains(site) {
            return ToggleOutcome::UnknownSite;
        }
        if self.active_sites.contains(site) {
            if self.active_sites.len() == 1 {
                return ToggleOutcome::RejectedLastActive;
            }
            self.active_sites.shift_remove(site);
            ToggleOutcome::Deactivated
        } else {
            self.active_sites.insert(site.to_owned());
            ToggleOutcome::Activated
        }
    }

    pub fn reset(&mut self) {
        self.season = SeasonFilter::All;
        self.metric = self.default_metric;
        self.active_sites = self.all_sites.clone();
    }
}
