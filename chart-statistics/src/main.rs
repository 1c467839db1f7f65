//! Repository Statistics Dashboard
//!
//! A dropdown picks one of the statistics charts (resources per data size,
//! per group, per domain, per creation date). The selected chart's data is
//! fetched from the repository's chart endpoints and drawn with Google
//! Charts. The creation-date chart adds a start/end date filter.
//!
//! Data flow:
//! 1. On mount: read the optional inline config and wait for Google Charts.
//! 2. Once the library is ready, load the default chart.
//! 3. On dropdown change: tear down the current chart and load the new one.
//! 4. On filter submit: validate the dates and redraw with them as query
//!    parameters; on reset, reload the chart unfiltered.

use dioxus::prelude::*;
use stats_chart_ui::components::{
    ChartContainer, ChartSelector, ErrorDisplay, FilterForm, LoadingSpinner,
};
use stats_chart_ui::js_bridge;
use stats_chart_ui::state::AppState;
use stats_core::{DashboardConfig, ErrorOrigin, ErrorReport};

/// Id of the inline `<script type="application/json">` config element.
const CONFIG_ELEMENT_ID: &str = "statistics-config";

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("statistics-root"))
        .launch(App);
}

/// Read overrides from the hosting page, falling back to defaults.
fn read_config() -> DashboardConfig {
    let json = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|el| el.text_content());

    match json {
        Some(json) => DashboardConfig::from_json(&json).unwrap_or_else(|e| {
            log::warn!("Ignoring invalid statistics config: {}", e);
            DashboardConfig::default()
        }),
        None => DashboardConfig::default(),
    }
}

#[component]
fn App() -> Element {
    let state = use_context_provider(|| AppState::new(read_config()));
    let mut library_ready = use_signal(|| false);

    // ─── Wait for Google Charts once on mount, then load the default chart ───
    use_effect(move || {
        spawn(async move {
            match js_bridge::charts_loaded().await {
                Ok(()) => {
                    library_ready.set(true);
                    state.library_ready();
                }
                Err(e) => {
                    log::error!("Google Charts failed to load: {:?}", e);
                    let mut error = state.error;
                    error.set(Some(ErrorReport::new(
                        ErrorOrigin::Dashboard,
                        "Google Charts library is not loaded.",
                    )));
                    let mut loading = state.loading;
                    loading.set(false);
                }
            }
        });
    });

    // ─── Render ───
    rsx! {
        div {
            style: "max-width: 900px; margin: 0 auto; padding: 8px; font-family: system-ui, -apple-system, sans-serif;",

            ChartSelector {}

            if let Some(report) = state.error.read().clone() {
                ErrorDisplay {
                    report,
                    on_retry: move |_| state.retry(),
                }
            }

            if !library_ready() {
                LoadingSpinner {}
            }

            FilterForm {}

            ChartContainer { min_height: 450 }
        }
    }
}
