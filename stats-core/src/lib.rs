//! Core of the repository statistics dashboard.
//!
//! Everything here is free of DOM and network code so it runs the same in
//! the WASM dashboard, in the CLI and under `cargo test`:
//! - `chart`: chart kinds, options and the fetch/render seams
//! - `dataset`: endpoint payloads and the tables fed to the charting library
//! - `filters`: filter forms bound to a chart
//! - `dashboard`: the `StatisticsView` controller
//! - `contribution`: checks run on the contribution form
//! - `config`: dashboard configuration

pub mod chart;
pub mod config;
pub mod contribution;
pub mod dashboard;
pub mod dataset;
pub mod error;
pub mod filters;

#[cfg(test)]
mod testing;

pub use chart::{Chart, ChartBackend, ChartBuilder, ChartKind, ChartOptions, DataSource, RenderStrategy};
pub use config::DashboardConfig;
pub use dashboard::{DrawRequest, FilterRejected, StatisticsView, ViewState};
pub use dataset::{format_data, DataTable, Dataset};
pub use error::{ErrorOrigin, ErrorReport, Result, StatsError};
pub use filters::{ChartFilters, DateRangeFilter, FilterParams, FilterSet};
