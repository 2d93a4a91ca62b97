use serde::{Deserialize, Serialize};

use crate::core::metric::MetricDescriptor;
use crate::core::season::SeasonFilter;
use crate::core::series::{SeriesPoint, SiteSeries, flatten_series};

pub const NO_DATA_SUMMARY: &str = "No data available for the selected filters.";

/// Highest and lowest visible observations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueRecords {
    pub max: SeriesPoint,
    pub min: SeriesPoint,
}

/// Scans points in builder order; the first occurrence wins ties.
#[must_use]
pub fn value_records(series: &[SiteSeries]) -> Option<ValueRecords> {
    let points = flatten_series(series);
    let first = *points.first()?;
    let mut max = first;
    let mut min = first;
    for point in points.into_iter().skip(1) {
        if point.value > max.value {
            max = point;
        }
        if point.value < min.value {
            min = point;
        }
    }
    Some(ValueRecords {
        max: max.clone(),
        min: min.clone(),
    })
}

/// Phrase naming the displayed period.
#[must_use]
pub fn season_copy(season: SeasonFilter, cycle_year: Option<i32>) -> String {
    match (season, cycle_year) {
        (SeasonFilter::All, Some(year)) => format!("the full {year} cycle"),
        (SeasonFilter::All, None) => "the full annual cycle".to_owned(),
        (season, _) => format!("{} months", season.name().to_lowercase()),
    }
}

/// Caption describing the visible selection and its extreme values.
#[must_use]
pub fn build_summary(
    metric: &MetricDescriptor,
    season: SeasonFilter,
    active_site_count: usize,
    series: &[SiteSeries],
    cycle_year: Option<i32>,
) -> String {
    let Some(records) = value_records(series) else {
        return NO_DATA_SUMMARY.to_owned();
    };

    let plural = if active_site_count > 1 { "s" } else { "" };
    format!(
        "Viewing {label} across {period} for {active_site_count} site{plural}. \
         Highest value: {max_site} in {max_month} ({max_value}). \
         Lowest value: {min_site} in {min_month} ({min_value}).",
        label = metric.label.to_lowercase(),
        period = season_copy(season, cycle_year),
        max_site = records.max.site,
        max_month = records.max.month_name,
        max_value = metric.format_with_suffix(records.max.value),
        min_site = records.min.site,
        min_month = records.min.month_name,
        min_value = metric.format_with_suffix(records.min.value),
    )
}
