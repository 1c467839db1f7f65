//! Reusable Dioxus RSX components for the statistics dashboard.

mod chart_container;
mod chart_selector;
mod error_display;
mod filter_form;
mod loading_spinner;

pub use chart_container::ChartContainer;
pub use chart_selector::ChartSelector;
pub use error_display::ErrorDisplay;
pub use filter_form::FilterForm;
pub use loading_spinner::LoadingSpinner;
