use serde::{Deserialize, Serialize};

use crate::core::season::SeasonFilter;
use crate::core::series::{SiteSeries, value_extent};
use crate::core::ticks::{nice_domain, ticks};
use crate::core::types::ChartLayout;
use crate::error::{ChartError, ChartResult};

/// Tick count requested from `nice()` when none is given.
pub const DEFAULT_NICE_COUNT: usize = 10;

/// Continuous linear mapping from a value domain onto a pixel range.
///
/// The range may be inverted (`range_start > range_end`), which is how the
/// vertical axis maps larger values to smaller y coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> ChartResult<Self> {
        let (domain_start, domain_end) = domain;
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }
        let (range_start, range_end) = range;
        if !range_start.is_finite() || !range_end.is_finite() {
            return Err(ChartError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            range_start,
            range_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    /// Returns a copy whose domain is extended to round tick boundaries.
    #[must_use]
    pub fn nice(self, count: usize) -> Self {
        let (start, end) = nice_domain(self.domain_start, self.domain_end, count);
        if start.is_finite() && end.is_finite() && start != end {
            Self {
                domain_start: start,
                domain_end: end,
                ..self
            }
        } else {
            self
        }
    }

    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        self.range_start + normalized * (self.range_end - self.range_start)
    }

    /// Maps and clamps the result into the range bounds.
    #[must_use]
    pub fn map_clamped(self, value: f64) -> f64 {
        let low = self.range_start.min(self.range_end);
        let high = self.range_start.max(self.range_end);
        self.map(value).clamp(low, high)
    }

    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let normalized = (pixel - self.range_start) / (self.range_end - self.range_start);
        self.domain_start + normalized * (self.domain_end - self.domain_start)
    }

    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<f64> {
        ticks(self.domain_start, self.domain_end, count)
    }
}

/// Discrete positional scale: evenly spaced points for an ordered domain.
///
/// `padding` is the outer gap in multiples of the step; points are centered
/// inside the range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointScale {
    domain: Vec<String>,
    range_start: f64,
    range_end: f64,
    padding: f64,
}

impl PointScale {
    #[must_use]
    pub fn new(domain: Vec<String>, range: (f64, f64), padding: f64) -> Self {
        Self {
            domain,
            range_start: range.0,
            range_end: range.1,
            padding: padding.max(0.0),
        }
    }

    #[must_use]
    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    /// Distance between adjacent points.
    #[must_use]
    pub fn step(&self) -> f64 {
        let n = self.domain.len() as f64;
        let span = self.range_end - self.range_start;
        span / (n - 1.0 + self.padding * 2.0).max(1.0)
    }

    /// Position of the first point.
    fn offset(&self) -> f64 {
        let n = self.domain.len() as f64;
        let span = self.range_end - self.range_start;
        self.range_start + (span - self.step() * (n - 1.0).max(0.0)) * 0.5
    }

    #[must_use]
    pub fn position_at(&self, index: usize) -> Option<f64> {
        (index < self.domain.len()).then(|| self.offset() + self.step() * index as f64)
    }

    #[must_use]
    pub fn position(&self, value: &str) -> Option<f64> {
        let index = self.domain.iter().position(|entry| entry == value)?;
        self.position_at(index)
    }

    /// `(label, position)` for every domain entry.
    #[must_use]
    pub fn positions(&self) -> Vec<(&str, f64)> {
        self.domain
            .iter()
            .enumerate()
            .map(|(index, value)| (value.as_str(), self.offset() + self.step() * index as f64))
            .collect()
    }
}

/// Discrete band scale: one band per domain entry with inner/outer padding
/// expressed as fractions of the step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandScale {
    domain: Vec<String>,
    range_start: f64,
    range_end: f64,
    padding_inner: f64,
    padding_outer: f64,
}

impl BandScale {
    #[must_use]
    pub fn new(domain: Vec<String>, range: (f64, f64)) -> Self {
        Self {
            domain,
            range_start: range.0,
            range_end: range.1,
            padding_inner: 0.0,
            padding_outer: 0.0,
        }
    }

    /// Sets both paddings; the inner one is clamped to `[0, 1]`.
    #[must_use]
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding_inner = padding.clamp(0.0, 1.0);
        self.padding_outer = padding.max(0.0);
        self
    }

    #[must_use]
    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    #[must_use]
    pub fn step(&self) -> f64 {
        let n = self.domain.len() as f64;
        let span = self.range_end - self.range_start;
        span / (n - self.padding_inner + self.padding_outer * 2.0).max(1.0)
    }

    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        self.step() * (1.0 - self.padding_inner)
    }

    /// Start of the band at `index`.
    #[must_use]
    pub fn position_at(&self, index: usize) -> Option<f64> {
        if index >= self.domain.len() {
            return None;
        }
        let n = self.domain.len() as f64;
        let span = self.range_end - self.range_start;
        let step = self.step();
        let start = self.range_start + (span - step * (n - self.padding_inner)) * 0.5;
        Some(start + step * index as f64)
    }

    #[must_use]
    pub fn position(&self, value: &str) -> Option<f64> {
        let index = self.domain.iter().position(|entry| entry == value)?;
        self.position_at(index)
    }
}

/// Coordinate scales of one redraw cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartScales {
    pub x: PointScale,
    pub y: LinearScale,
}

/// Derives fresh scales from the visible series.
///
/// Returns `None` when no value is visible, so callers clear the chart rather
/// than scaling an empty domain. The vertical domain always includes zero for
/// non-negative data.
#[must_use]
pub fn build_scales(
    series: &[SiteSeries],
    season: SeasonFilter,
    layout: ChartLayout,
) -> Option<ChartScales> {
    let (min_value, max_value) = value_extent(series)?;

    let x = PointScale::new(
        season
            .month_names()
            .into_iter()
            .map(str::to_owned)
            .collect(),
        (0.0, layout.inner_width()),
        0.5,
    );

    let lower = min_value.min(0.0);
    let upper = if max_value > lower { max_value } else { lower + 1.0 };
    let y = LinearScale::new((lower, upper), (layout.inner_height(), 0.0))
        .ok()?
        .nice(DEFAULT_NICE_COUNT);

    Some(ChartScales { x, y })
}
