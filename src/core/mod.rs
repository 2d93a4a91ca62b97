pub mod filter;
pub mod metric;
pub mod record;
pub mod scale;
pub mod season;
pub mod series;
pub mod stats;
pub mod summary;
pub mod ticks;
pub mod types;

pub use filter::{FilterState, ToggleOutcome};
pub use metric::{MetricDescriptor, MetricKey};
pub use record::{Dataset, Record};
pub use scale::{BandScale, ChartScales, DEFAULT_NICE_COUNT, LinearScale, PointScale, build_scales};
pub use season::{Season, SeasonFilter, month_name};
pub use series::{SeriesPoint, SiteSeries, build_series, build_site_series, flatten_series};
pub use stats::{BoxSummary, mean, quantile_sorted};
pub use summary::{NO_DATA_SUMMARY, ValueRecords, build_summary, value_records};
pub use types::{ChartLayout, Margins, Viewport};
