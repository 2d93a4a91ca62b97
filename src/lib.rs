//! arctic-sky: seasonal Arctic daylight and brightness explorer.
//!
//! Filter state drives a pure pipeline (series, scales, summary) whose output
//! is assembled into a keyed scene, reconciled against the previous one and
//! handed to a `Renderer` backend as a frame of enter/update/exit transitions.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ExplorerConfig, ExplorerEngine};
pub use error::{ChartError, ChartResult};
