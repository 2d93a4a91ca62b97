use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::{ChartLayout, MetricKey};
use crate::error::{ChartError, ChartResult};
use crate::render::TransitionTiming;

use super::ChartStyle;

/// Serializable explorer setup.
///
/// Every field is optional in JSON so a host can override only what it
/// needs, e.g. `{"default_metric": "cloudCover"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplorerConfig {
    #[serde(default)]
    pub layout: ChartLayout,
    #[serde(default)]
    pub style: ChartStyle,
    #[serde(default)]
    pub timing: TransitionTiming,
    #[serde(default)]
    pub default_metric: MetricKey,
    /// Year named by the summary for the full-year view.
    #[serde(default = "default_cycle_year")]
    pub cycle_year: Option<i32>,
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            layout: ChartLayout::default(),
            style: ChartStyle::default(),
            timing: TransitionTiming::default(),
            default_metric: MetricKey::default(),
            cycle_year: default_cycle_year(),
            data_path: default_data_path(),
        }
    }
}

fn default_cycle_year() -> Option<i32> {
    Some(2023)
}

fn default_data_path() -> PathBuf {
    PathBuf::from("data/modis_arctic_2023.json")
}

impl ExplorerConfig {
    #[must_use]
    pub fn with_default_metric(mut self, metric: MetricKey) -> Self {
        self.default_metric = metric;
        self
    }

    #[must_use]
    pub fn with_timing(mut self, timing: TransitionTiming) -> Self {
        self.timing = timing;
        self
    }

    #[must_use]
    pub fn with_cycle_year(mut self, cycle_year: Option<i32>) -> Self {
        self.cycle_year = cycle_year;
        self
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|err| ChartError::InvalidConfig(format!("failed to parse config: {err}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> ChartResult<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|err| ChartError::DataLoad {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        Self::from_json_str(&raw)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|err| ChartError::InvalidConfig(format!("failed to serialize config: {err}")))
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.layout.validate()?;
        self.style.validate()
    }
}
