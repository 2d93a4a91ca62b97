use std::fmt;
use std::str::FromStr;

use chrono::Month;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Calendar season attached to every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl Season {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Winter => "Winter",
            Self::Spring => "Spring",
            Self::Summer => "Summer",
            Self::Fall => "Fall",
        }
    }

    /// Season a zero-based month index falls into.
    #[must_use]
    pub fn for_month_index(month_index: usize) -> Option<Self> {
        match month_index {
            11 | 0 | 1 => Some(Self::Winter),
            2..=4 => Some(Self::Spring),
            5..=7 => Some(Self::Summer),
            8..=10 => Some(Self::Fall),
            _ => None,
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Season restriction applied to the displayed months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SeasonFilter {
    #[default]
    All,
    Winter,
    Spring,
    Summer,
    Fall,
}

const ALL_MONTHS: [usize; 12] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11];
const WINTER_MONTHS: [usize; 3] = [11, 0, 1];
const SPRING_MONTHS: [usize; 3] = [2, 3, 4];
const SUMMER_MONTHS: [usize; 3] = [5, 6, 7];
const FALL_MONTHS: [usize; 3] = [8, 9, 10];

impl SeasonFilter {
    /// Every filter in toggle-button order.
    pub const ALL: [Self; 5] = [
        Self::All,
        Self::Winter,
        Self::Spring,
        Self::Summer,
        Self::Fall,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Winter => "Winter",
            Self::Spring => "Spring",
            Self::Summer => "Summer",
            Self::Fall => "Fall",
        }
    }

    /// Zero-based month indices covered by the filter, in canonical order.
    ///
    /// Winter crosses the year boundary and is ordered Dec, Jan, Feb.
    #[must_use]
    pub fn month_indices(self) -> &'static [usize] {
        match self {
            Self::All => &ALL_MONTHS,
            Self::Winter => &WINTER_MONTHS,
            Self::Spring => &SPRING_MONTHS,
            Self::Summer => &SUMMER_MONTHS,
            Self::Fall => &FALL_MONTHS,
        }
    }

    #[must_use]
    pub fn contains_month_index(self, month_index: usize) -> bool {
        self.month_indices().contains(&month_index)
    }

    /// Month names in the filter's canonical order.
    #[must_use]
    pub fn month_names(self) -> Vec<&'static str> {
        self.month_indices()
            .iter()
            .filter_map(|index| month_name(*index))
            .collect()
    }

    /// Position of a month name inside the canonical order, if covered.
    #[must_use]
    pub fn position_of(self, month_name_value: &str) -> Option<usize> {
        self.month_indices()
            .iter()
            .position(|index| month_name(*index) == Some(month_name_value))
    }

    #[must_use]
    pub fn season(self) -> Option<Season> {
        match self {
            Self::All => None,
            Self::Winter => Some(Season::Winter),
            Self::Spring => Some(Season::Spring),
            Self::Summer => Some(Season::Summer),
            Self::Fall => Some(Season::Fall),
        }
    }
}

impl From<Season> for SeasonFilter {
    fn from(season: Season) -> Self {
        match season {
            Season::Winter => Self::Winter,
            Season::Spring => Self::Spring,
            Season::Summer => Self::Summer,
            Season::Fall => Self::Fall,
        }
    }
}

impl fmt::Display for SeasonFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SeasonFilter {
    type Err = ChartError;

    fn from_str(input: &str) -> ChartResult<Self> {
        Self::ALL
            .into_iter()
            .find(|filter| filter.name().eq_ignore_ascii_case(input.trim()))
            .ok_or_else(|| ChartError::InvalidData(format!("unknown season filter `{input}`")))
    }
}

/// Canonical three-letter English name of a zero-based month index.
#[must_use]
pub fn month_name(month_index: usize) -> Option<&'static str> {
    let number = u8::try_from(month_index + 1).ok()?;
    let month = Month::try_from(number).ok()?;
    Some(&month.name()[..3])
}
