//! Application state managed via Dioxus context.
//!
//! `AppState` bundles the dashboard controller and the reactive signals the
//! components read into a single struct provided via `use_context_provider`.
//! Child components retrieve it with `use_context::<AppState>()`.

use crate::fetch::BrowserSource;
use crate::js_bridge::GoogleCharts;
use dioxus::prelude::*;
use stats_core::{
    DashboardConfig, DataSource, DrawRequest, ErrorReport, FilterParams, StatisticsView,
};

/// Shared application state for the statistics dashboard.
#[derive(Clone, Copy)]
pub struct AppState {
    /// Controller owning the active chart and its filters
    pub view: Signal<StatisticsView>,
    /// Whether a chart fetch is in flight
    pub loading: Signal<bool>,
    /// Why the last load failed, if it did
    pub error: Signal<Option<ErrorReport>>,
    /// The request that failed, kept for a retry
    pub failed_request: Signal<Option<DrawRequest>>,
    /// Rejected filter message, shown next to the filter form
    pub filter_error: Signal<Option<String>>,
    /// Current value of the chart kind dropdown
    pub selected_chart: Signal<String>,
    /// Values typed into the active chart's filter form
    pub filter_values: Signal<FilterParams>,
}

impl AppState {
    /// Create a new AppState with default signal values.
    pub fn new(config: DashboardConfig) -> Self {
        let selected = config.default_chart.key().to_string();
        Self {
            view: Signal::new(StatisticsView::new(config)),
            loading: Signal::new(true),
            error: Signal::new(None),
            failed_request: Signal::new(None),
            filter_error: Signal::new(None),
            selected_chart: Signal::new(selected),
            filter_values: Signal::new(FilterParams::new()),
        }
    }

    /// The charting library is ready: load the default chart.
    pub fn library_ready(mut self) {
        let request = self.view.write().on_library_ready(&mut GoogleCharts);
        self.dispatch(request);
    }

    /// The dropdown changed.
    pub fn select_chart(mut self, key: String) {
        self.selected_chart.set(key.clone());
        self.reset_form();
        let request = self.view.write().select_changed(&key, &mut GoogleCharts);
        self.dispatch(request);
    }

    /// Send the failed request again, filters included.
    ///
    /// Its generation is still current unless the user moved on, in which
    /// case the controller drops the answer.
    pub fn retry(mut self) {
        let request = self.failed_request.write().take();
        self.dispatch(request);
    }

    /// Validate the filter form and redraw on success.
    pub fn submit_filters(mut self) {
        let fields = self.filter_values.read().clone();
        let outcome = self.view.write().submit_filters(fields);
        match outcome {
            Ok(request) => {
                self.filter_error.set(None);
                self.dispatch(request);
            }
            Err(rejected) => self.filter_error.set(Some(rejected.message)),
        }
    }

    /// The reset control fired: reload the active chart without filters.
    pub fn reset_filters(mut self) {
        self.reset_form();
        let request = self.view.write().reset_filters(&mut GoogleCharts);
        self.dispatch(request);
    }

    fn reset_form(mut self) {
        self.filter_values.set(FilterParams::new());
        self.filter_error.set(None);
    }

    /// Fetch the data for `request` and hand it back to the controller.
    pub fn dispatch(mut self, request: Option<DrawRequest>) {
        let Some(request) = request else {
            self.loading.set(false);
            return;
        };
        self.loading.set(true);
        self.error.set(None);
        self.failed_request.set(None);

        spawn(async move {
            let response = BrowserSource.get_json(&request.url, &request.params).await;
            let outcome = self
                .view
                .write()
                .complete(&request, response, &mut GoogleCharts);
            match outcome {
                Ok(true) => self.loading.set(false),
                // A newer request owns the loading flag.
                Ok(false) => {}
                Err(e) => {
                    log::error!("Chart {} failed: {}", request.kind, e);
                    self.error.set(Some(ErrorReport::from(&e)));
                    self.failed_request.set(Some(request));
                    self.loading.set(false);
                }
            }
        });
    }
}
