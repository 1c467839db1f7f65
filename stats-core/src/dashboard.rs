//! The statistics dashboard controller.
//!
//! `StatisticsView` holds at most one active chart. Every load, filter
//! submission or reset produces a [`DrawRequest`]; the host performs the
//! fetch asynchronously and hands the response back through
//! [`StatisticsView::complete`]. Requests carry a generation number, and a
//! response whose generation is no longer current is dropped, so a late
//! answer for a chart the user already switched away from is never drawn.

use crate::chart::{Chart, ChartBackend, ChartKind};
use crate::config::DashboardConfig;
use crate::error::Result;
use crate::filters::{ChartFilters, FilterParams, FilterSet};
use log::{debug, error, info, warn};
use serde_json::Value;
use thiserror::Error;

/// A fetch the host has to perform for the active chart.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawRequest {
    pub generation: u64,
    pub kind: ChartKind,
    pub url: String,
    pub params: FilterParams,
}

/// Submitted filter values that cannot be sent to the chart endpoint.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct FilterRejected {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActiveChart {
    pub kind: ChartKind,
    pub chart: Chart,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState {
    #[default]
    Uninitialized,
    ChartLoaded(ActiveChart),
}

#[derive(Debug, Clone)]
pub struct StatisticsView {
    config: DashboardConfig,
    state: ViewState,
    generation: u64,
}

impl StatisticsView {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config,
            state: ViewState::Uninitialized,
            generation: 0,
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn active_kind(&self) -> Option<ChartKind> {
        match &self.state {
            ViewState::ChartLoaded(active) => Some(active.kind),
            ViewState::Uninitialized => None,
        }
    }

    pub fn active_chart(&self) -> Option<&Chart> {
        match &self.state {
            ViewState::ChartLoaded(active) => Some(&active.chart),
            ViewState::Uninitialized => None,
        }
    }

    /// Filters of the active chart, if it has any.
    pub fn filters(&self) -> Option<&FilterSet> {
        self.active_chart().and_then(Chart::filters)
    }

    /// The charting library finished loading: show the default chart.
    pub fn on_library_ready<B: ChartBackend>(&mut self, backend: &mut B) -> Option<DrawRequest> {
        let kind = self.config.default_chart;
        self.reload(Some(kind), FilterParams::new(), backend)
    }

    /// The dropdown changed to `key`. Unknown keys leave no chart loaded.
    pub fn select_changed<B: ChartBackend>(&mut self, key: &str, backend: &mut B) -> Option<DrawRequest> {
        let kind = ChartKind::from_key(key);
        if kind.is_none() {
            info!("No chart for selection '{}'", key);
        }
        self.reload(kind, FilterParams::new(), backend)
    }

    /// Capture a filter form submission and redraw when it validates.
    ///
    /// Returns `Ok(None)` when the active chart has no filters.
    pub fn submit_filters(&mut self, fields: FilterParams) -> std::result::Result<Option<DrawRequest>, FilterRejected> {
        let ViewState::ChartLoaded(active) = &mut self.state else {
            return Ok(None);
        };
        let Some(filters) = active.chart.filters_mut() else {
            return Ok(None);
        };

        filters.consume_submission(fields);
        if !filters.is_valid() {
            let message = filters.error_message().to_string();
            info!("Rejected filters for {}: {}", active.kind, message);
            return Err(FilterRejected { message });
        }

        let params = filters.params().clone();
        let kind = active.kind;
        Ok(Some(self.request(kind, params)))
    }

    /// The filter reset control fired: reload the active chart unfiltered.
    pub fn reset_filters<B: ChartBackend>(&mut self, backend: &mut B) -> Option<DrawRequest> {
        let kind = self.active_kind()?;
        self.reload(Some(kind), FilterParams::new(), backend)
    }

    /// Render the response to `request`.
    ///
    /// Returns `Ok(false)` when the request is stale and nothing was drawn.
    pub fn complete<B: ChartBackend>(
        &mut self,
        request: &DrawRequest,
        response: Result<Value>,
        backend: &mut B,
    ) -> Result<bool> {
        let chart = match &self.state {
            ViewState::ChartLoaded(active) if request.generation == self.generation => &active.chart,
            _ => {
                debug!(
                    "Dropping stale response for {} (generation {}, current {})",
                    request.kind, request.generation, self.generation
                );
                return Ok(false);
            }
        };

        let payload = response.inspect_err(|e| error!("Fetching {} failed: {}", request.url, e))?;
        chart.render_payload(&payload, backend)?;
        Ok(true)
    }

    /// Tear down the active chart, then load `kind` if there is one.
    fn reload<B: ChartBackend>(
        &mut self,
        kind: Option<ChartKind>,
        params: FilterParams,
        backend: &mut B,
    ) -> Option<DrawRequest> {
        self.teardown(backend);
        self.load(kind?, params)
    }

    fn teardown<B: ChartBackend>(&mut self, backend: &mut B) {
        if let ViewState::ChartLoaded(active) = std::mem::take(&mut self.state) {
            debug!("Tearing down {}", active.kind);
            if let Some(container) = active.chart.container() {
                backend.clear(container);
            }
        }
        self.generation += 1;
    }

    fn load(&mut self, kind: ChartKind, params: FilterParams) -> Option<DrawRequest> {
        if self.config.chart_container_id.trim().is_empty() {
            warn!("No chart container configured, not loading {}", kind);
            return None;
        }

        let mut chart = match kind.chart(&self.config.api_base) {
            Ok(chart) => chart,
            Err(e) => {
                error!("Cannot build {} chart: {}", kind, e);
                return None;
            }
        };
        chart.attach(&self.config.chart_container_id);

        info!("Loading {} chart", kind);
        self.state = ViewState::ChartLoaded(ActiveChart { kind, chart });
        Some(self.request(kind, params))
    }

    fn request(&mut self, kind: ChartKind, params: FilterParams) -> DrawRequest {
        self.generation += 1;
        DrawRequest {
            generation: self.generation,
            kind,
            url: kind.endpoint_url(&self.config.api_base),
            params,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::RenderStrategy;
    use crate::filters::{END_BEFORE_START_MESSAGE, END_DATE_FIELD, START_DATE_FIELD};
    use crate::testing::{RecordingBackend, Rendered};
    use serde_json::json;

    fn view() -> StatisticsView {
        StatisticsView::new(DashboardConfig::default())
    }

    fn dates(start: &str, end: &str) -> FilterParams {
        [(START_DATE_FIELD, start), (END_DATE_FIELD, end)]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_library_ready_loads_default_chart() {
        let mut view = view();
        let mut backend = RecordingBackend::default();
        assert_eq!(view.state(), &ViewState::Uninitialized);

        let request = view.on_library_ready(&mut backend).unwrap();
        assert_eq!(request.kind, ChartKind::TranslationUnits);
        assert_eq!(request.url, "charts/tu/");
        assert!(request.params.is_empty());
        assert_eq!(view.active_kind(), Some(ChartKind::TranslationUnits));
        assert!(view.filters().is_none());
        assert!(backend.calls.is_empty());
    }

    #[test]
    fn test_every_kind_mounts_exactly_one_chart() {
        let mut view = view();
        let mut backend = RecordingBackend::default();
        view.on_library_ready(&mut backend);

        for kind in ChartKind::ALL {
            let request = view.select_changed(kind.key(), &mut backend).unwrap();
            assert_eq!(request.kind, kind);
            assert_eq!(view.active_kind(), Some(kind));
            assert_eq!(
                view.filters().is_some(),
                kind == ChartKind::CreationDate
            );
        }
    }

    #[test]
    fn test_switch_tears_down_before_loading() {
        let mut view = view();
        let mut backend = RecordingBackend::default();
        let first = view.select_changed("creation-date-data", &mut backend).unwrap();
        view.complete(&first, Ok(json!({"2023": 4})), &mut backend).unwrap();
        assert!(view.filters().is_some());

        view.select_changed("domains-data", &mut backend).unwrap();
        assert_eq!(
            backend.calls,
            vec![
                Rendered::Chart {
                    container: "chart-container".to_string(),
                    strategy: RenderStrategy::Line,
                    rows: 1,
                },
                Rendered::Cleared("chart-container".to_string()),
            ]
        );
        assert!(view.filters().is_none());
        assert_eq!(view.active_kind(), Some(ChartKind::Domains));
    }

    #[test]
    fn test_unknown_selection_tears_down_and_loads_nothing() {
        let mut view = view();
        let mut backend = RecordingBackend::default();
        view.on_library_ready(&mut backend);

        assert!(view.select_changed("nonexistent", &mut backend).is_none());
        assert_eq!(view.state(), &ViewState::Uninitialized);
        assert_eq!(
            backend.calls,
            vec![Rendered::Cleared("chart-container".to_string())]
        );

        // Nothing to reset or filter either.
        assert!(view.reset_filters(&mut backend).is_none());
        assert_eq!(view.submit_filters(FilterParams::new()), Ok(None));
    }

    #[test]
    fn test_missing_container_is_a_no_op_load() {
        let config = DashboardConfig {
            chart_container_id: String::new(),
            ..DashboardConfig::default()
        };
        let mut view = StatisticsView::new(config);
        let mut backend = RecordingBackend::default();
        assert!(view.on_library_ready(&mut backend).is_none());
        assert_eq!(view.state(), &ViewState::Uninitialized);
    }

    #[test]
    fn test_valid_filters_redraw_with_params() {
        let mut view = view();
        let mut backend = RecordingBackend::default();
        view.select_changed("creation-date-data", &mut backend);

        let request = view
            .submit_filters(dates("01-01-2023", "01-02-2023"))
            .unwrap()
            .unwrap();
        assert_eq!(request.kind, ChartKind::CreationDate);
        assert_eq!(request.params.get(START_DATE_FIELD), Some("01-01-2023"));
        assert!(view.complete(&request, Ok(json!({"jan": 1, "feb": 2})), &mut backend).unwrap());
    }

    #[test]
    fn test_invalid_filters_do_not_redraw() {
        let mut view = view();
        let mut backend = RecordingBackend::default();
        let load = view.select_changed("creation-date-data", &mut backend).unwrap();

        let rejected = view.submit_filters(dates("01-02-2023", "01-01-2023")).unwrap_err();
        assert_eq!(rejected.message, END_BEFORE_START_MESSAGE);

        // The first load is still current and can be drawn.
        assert!(view.complete(&load, Ok(json!({})), &mut backend).unwrap());
    }

    #[test]
    fn test_filters_on_chart_without_filters() {
        let mut view = view();
        let mut backend = RecordingBackend::default();
        view.on_library_ready(&mut backend);
        assert_eq!(view.submit_filters(dates("01-01-2023", "01-02-2023")), Ok(None));
    }

    #[test]
    fn test_reset_reloads_unfiltered() {
        let mut view = view();
        let mut backend = RecordingBackend::default();
        view.select_changed("creation-date-data", &mut backend);
        view.submit_filters(dates("01-01-2023", "01-02-2023")).unwrap();

        let request = view.reset_filters(&mut backend).unwrap();
        assert_eq!(request.kind, ChartKind::CreationDate);
        assert!(request.params.is_empty());
        assert!(view.filters().unwrap().params().is_empty());
        assert_eq!(
            backend.calls,
            vec![Rendered::Cleared("chart-container".to_string())]
        );
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let mut view = view();
        let mut backend = RecordingBackend::default();
        let stale = view.select_changed("group-data", &mut backend).unwrap();
        let current = view.select_changed("domains-data", &mut backend).unwrap();

        assert!(!view.complete(&stale, Ok(json!({"a": 1})), &mut backend).unwrap());
        assert!(view.complete(&current, Ok(json!({"a": 1})), &mut backend).unwrap());
        assert_eq!(
            backend.calls.last(),
            Some(&Rendered::Chart {
                container: "chart-container".to_string(),
                strategy: RenderStrategy::Pie,
                rows: 1,
            })
        );
    }

    #[test]
    fn test_errors_payload_surfaces_without_rendering() {
        let mut view = view();
        let mut backend = RecordingBackend::default();
        let request = view.on_library_ready(&mut backend).unwrap();

        let result = view.complete(&request, Ok(json!({"errors": ["no data"]})), &mut backend);
        assert!(result.is_err());
        assert!(backend.calls.is_empty());
        assert_eq!(view.active_kind(), Some(ChartKind::TranslationUnits));
    }

    #[test]
    fn test_failed_request_can_be_sent_again() {
        let mut view = view();
        let mut backend = RecordingBackend::default();
        view.select_changed("creation-date-data", &mut backend).unwrap();
        let request = view
            .submit_filters(dates("01-01-2023", "02-01-2023"))
            .unwrap()
            .unwrap();

        let failure = Err(crate::StatsError::Transport("connection reset".to_string()));
        assert!(view.complete(&request, failure, &mut backend).is_err());
        assert!(view
            .complete(&request, Ok(json!({"2023-01-01": 2})), &mut backend)
            .unwrap());
        assert_eq!(request.params.get(START_DATE_FIELD), Some("01-01-2023"));
    }
}
