use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::season::{Season, month_name};
use crate::error::{ChartError, ChartResult};

/// One monthly observation for one site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub site: String,
    /// 1-based calendar month.
    pub month: u8,
    pub month_name: String,
    pub season: Season,
    pub region: String,
    #[serde(default)]
    pub brightness_index: Option<f64>,
    #[serde(default)]
    pub daylight_hours: Option<f64>,
    #[serde(default)]
    pub cloud_cover: Option<f64>,
}

impl Record {
    /// Zero-based month index.
    #[must_use]
    pub fn month_index(&self) -> usize {
        usize::from(self.month.saturating_sub(1))
    }
}

/// Immutable record set plus the site registry discovered at load time.
///
/// Sites keep first-appearance ("discovery") order; every per-site iteration in
/// the crate follows it.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
    sites: IndexSet<String>,
}

impl Dataset {
    /// Validates and indexes a record set.
    ///
    /// Records with a month outside `1..=12` are rejected. A `monthName` that
    /// disagrees with `month` is replaced with the canonical name.
    pub fn from_records(mut records: Vec<Record>) -> ChartResult<Self> {
        if records.is_empty() {
            return Err(ChartError::EmptyDataset);
        }

        let mut sites = IndexSet::new();
        for (position, record) in records.iter_mut().enumerate() {
            if !(1..=12).contains(&record.month) {
                return Err(ChartError::InvalidData(format!(
                    "record #{position} for site `{}` has month {} outside 1..=12",
                    record.site, record.month
                )));
            }
            let canonical = month_name(record.month_index()).unwrap_or_default();
            if record.month_name != canonical {
                warn!(
                    site = %record.site,
                    month = record.month,
                    month_name = %record.month_name,
                    canonical,
                    "normalizing month name"
                );
                record.month_name = canonical.to_owned();
            }
            if !sites.contains(record.site.as_str()) {
                sites.insert(record.site.clone());
            }
        }

        debug!(
            record_count = records.len(),
            site_count = sites.len(),
            "dataset indexed"
        );
        Ok(Self { records, sites })
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let records: Vec<Record> = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse records json: {e}")))?;
        Self::from_records(records)
    }

    pub fn from_reader(reader: impl Read) -> ChartResult<Self> {
        let records: Vec<Record> = serde_json::from_reader(BufReader::new(reader))
            .map_err(|e| ChartError::InvalidData(format!("failed to parse records json: {e}")))?;
        Self::from_records(records)
    }

    /// Reads the static dataset file.
    pub fn from_path(path: impl AsRef<Path>) -> ChartResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| ChartError::DataLoad {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_reader(file).map_err(|e| match e {
            ChartError::InvalidData(message) => ChartError::DataLoad {
                path: path.display().to_string(),
                message,
            },
            other => other,
        })
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Distinct site ids in discovery order.
    #[must_use]
    pub fn sites(&self) -> &IndexSet<String> {
        &self.sites
    }

    #[must_use]
    pub fn site_index(&self, site: &str) -> Option<usize> {
        self.sites.get_index_of(site)
    }

    /// Region of the first record seen for `site`.
    #[must_use]
    pub fn region_of(&self, site: &str) -> Option<&str> {
        self.records
            .iter()
            .find(|record| record.site == site)
            .map(|record| record.region.as_str())
    }
}
