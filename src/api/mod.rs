//! Host-facing explorer API: engine facade, configuration, scene assembly
//! and the static gallery charts.

mod engine;
mod engine_accessors;
mod engine_config;
mod engine_snapshot;
mod gallery;
mod load_failure;
mod render_style;
mod scene_builder;

pub use engine::{ExplorerEngine, RedrawCycle, RedrawReason};
pub use engine_config::ExplorerConfig;
pub use engine_snapshot::ExplorerSnapshot;
pub use gallery::{
    GalleryChart, monthly_means, seasonal_values, sequential_color, site_month_values,
};
pub use load_failure::LoadFailureView;
pub use render_style::{ChartStyle, TABLEAU10};
pub use scene_builder::{
    SceneInput, build_scene, estimate_text_width, hover_candidates, tooltip_lines,
};
