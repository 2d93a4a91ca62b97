use serde::{Deserialize, Serialize};

use crate::core::filter::FilterState;
use crate::core::metric::MetricDescriptor;
use crate::core::record::Dataset;
use crate::core::season::{Season, SeasonFilter};

/// One visible observation after filtering and metric projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub site: String,
    /// Zero-based month index.
    pub month_index: usize,
    pub month_name: String,
    pub season: Season,
    pub region: String,
    pub value: f64,
}

/// Ordered values of one site under the current filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteSeries {
    pub site: String,
    pub values: Vec<SeriesPoint>,
}

impl SiteSeries {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Builds one series per active site, in discovery order.
///
/// Sites without any surviving observation are still present with an empty
/// value list.
#[must_use]
pub fn build_series(dataset: &Dataset, filter: &FilterState) -> Vec<SiteSeries> {
    let metric = filter.metric().descriptor();
    filter
        .active_sites()
        .map(|site| build_site_series(dataset, filter.season(), metric, site))
        .collect()
}

/// Builds the ordered series of a single site, active or not.
///
/// Points are ordered by the month's position inside the season's canonical
/// month list, so Winter reads Dec, Jan, Feb.
#[must_use]
pub fn build_site_series(
    dataset: &Dataset,
    season: SeasonFilter,
    metric: &MetricDescriptor,
    site: &str,
) -> SiteSeries {
    let mut keyed: Vec<(usize, SeriesPoint)> = dataset
        .records()
        .iter()
        .filter(|record| record.site == site)
        .filter(|record| season.contains_month_index(record.month_index()))
        .filter_map(|record| {
            let value = metric.value_of(record)?;
            let order = season.position_of(&record.month_name)?;
            Some((
                order,
                SeriesPoint {
                    site: site.to_owned(),
                    month_index: record.month_index(),
                    month_name: record.month_name.clone(),
                    season: record.season,
                    region: record.region.clone(),
                    value,
                },
            ))
        })
        .collect();

    // Stable so duplicate months keep record order.
    keyed.sort_by_key(|(order, _)| *order);

    SiteSeries {
        site: site.to_owned(),
        values: keyed.into_iter().map(|(_, point)| point).collect(),
    }
}

/// Flattens series in builder order.
#[must_use]
pub fn flatten_series(series: &[SiteSeries]) -> Vec<&SeriesPoint> {
    series.iter().flat_map(|entry| entry.values.iter()).collect()
}

/// Observed `(min, max)` over every visible value, `None` when nothing is visible.
#[must_use]
pub fn value_extent(series: &[SiteSeries]) -> Option<(f64, f64)> {
    series
        .iter()
        .flat_map(|entry| entry.values.iter().map(|point| point.value))
        .fold(None, |extent, value| match extent {
            None => Some((value, value)),
            Some((min, max)) => Some((min.min(value), max.max(value))),
        })
}
