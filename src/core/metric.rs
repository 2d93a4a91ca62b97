use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::record::Record;
use crate::error::{ChartError, ChartResult};

/// Observation type selectable for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MetricKey {
    #[default]
    BrightnessIndex,
    DaylightHours,
    CloudCover,
}

/// Display and formatting rules for one metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricDescriptor {
    pub key: MetricKey,
    pub label: &'static str,
    pub decimals: usize,
    pub suffix: &'static str,
    /// Accent color as `#rrggbb`.
    pub color: &'static str,
    pub y_label: &'static str,
}

const BRIGHTNESS_INDEX: MetricDescriptor = MetricDescriptor {
    key: MetricKey::BrightnessIndex,
    label: "Surface brightness index",
    decimals: 0,
    suffix: " idx",
    color: "#0f8cc6",
    y_label: "Brightness index (0–100)",
};

const DAYLIGHT_HOURS: MetricDescriptor = MetricDescriptor {
    key: MetricKey::DaylightHours,
    label: "Daylight hours",
    decimals: 1,
    suffix: " h",
    color: "#f6b93b",
    y_label: "Daylight duration (hours)",
};

const CLOUD_COVER: MetricDescriptor = MetricDescriptor {
    key: MetricKey::CloudCover,
    label: "Cloud cover",
    decimals: 0,
    suffix: "%",
    color: "#6c7a89",
    y_label: "Cloud cover (%)",
};

impl MetricKey {
    /// Every registered metric in dropdown order.
    pub const ALL: [Self; 3] = [Self::BrightnessIndex, Self::DaylightHours, Self::CloudCover];

    #[must_use]
    pub fn descriptor(self) -> &'static MetricDescriptor {
        match self {
            Self::BrightnessIndex => &BRIGHTNESS_INDEX,
            Self::DaylightHours => &DAYLIGHT_HOURS,
            Self::CloudCover => &CLOUD_COVER,
        }
    }

    /// JSON field name of the metric inside a record.
    #[must_use]
    pub fn field_name(self) -> &'static str {
        match self {
            Self::BrightnessIndex => "brightnessIndex",
            Self::DaylightHours => "daylightHours",
            Self::CloudCover => "cloudCover",
        }
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

impl FromStr for MetricKey {
    type Err = ChartError;

    fn from_str(input: &str) -> ChartResult<Self> {
        Self::ALL
            .into_iter()
            .find(|key| key.field_name().eq_ignore_ascii_case(input.trim()))
            .ok_or_else(|| ChartError::InvalidData(format!("unknown metric `{input}`")))
    }
}

impl MetricDescriptor {
    /// Numeric accessor. Missing and NaN observations both read as `None`.
    #[must_use]
    pub fn value_of(&self, record: &Record) -> Option<f64> {
        let raw = match self.key {
            MetricKey::BrightnessIndex => record.brightness_index,
            MetricKey::DaylightHours => record.daylight_hours,
            MetricKey::CloudCover => record.cloud_cover,
        };
        raw.filter(|value| !value.is_nan())
    }

    /// Fixed-precision number without suffix. Negatives carry a U+2212 minus sign.
    #[must_use]
    pub fn format(&self, value: f64) -> String {
        let text = format!("{value:.prec$}", prec = self.decimals);
        if let Some(digits) = text.strip_prefix('-') {
            // Rounding small negatives yields "-0"; show plain zero instead.
            if digits.chars().all(|c| c == '0' || c == '.') {
                return digits.to_owned();
            }
            return format!("\u{2212}{digits}");
        }
        text
    }

    /// Formatted number followed by the metric suffix.
    #[must_use]
    pub fn format_with_suffix(&self, value: f64) -> String {
        format!("{}{}", self.format(value), self.suffix)
    }
}
