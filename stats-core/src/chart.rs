//! Chart kinds and the generic chart that fetches and renders them.
//!
//! Every chart kind is plain configuration (endpoint, rendering strategy,
//! header pair, display options, optional filters) consumed by one
//! [`Chart`]. Fetching goes through a [`DataSource`] and drawing through a
//! [`ChartBackend`], so the same chart runs in the browser and in the CLI.

use crate::dataset::{format_data, DataTable, Dataset};
use crate::error::{Result, StatsError};
use crate::filters::{DateRangeFilter, FilterParams, FilterSet};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::future::Future;

/// The charts offered in the statistics dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ChartKind {
    #[default]
    #[serde(rename = "translation-units")]
    TranslationUnits,
    #[serde(rename = "group-data")]
    Groups,
    #[serde(rename = "domains-data")]
    Domains,
    #[serde(rename = "creation-date-data")]
    CreationDate,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [
        ChartKind::TranslationUnits,
        ChartKind::Groups,
        ChartKind::Domains,
        ChartKind::CreationDate,
    ];

    /// Look up a dropdown value. Unknown values map to no chart.
    pub fn from_key(key: &str) -> Option<ChartKind> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }

    /// Value of the dropdown option for this kind.
    pub fn key(self) -> &'static str {
        match self {
            ChartKind::TranslationUnits => "translation-units",
            ChartKind::Groups => "group-data",
            ChartKind::Domains => "domains-data",
            ChartKind::CreationDate => "creation-date-data",
        }
    }

    /// Text of the dropdown option for this kind.
    pub fn label(self) -> &'static str {
        match self {
            ChartKind::TranslationUnits => "Resources per data size",
            ChartKind::Groups => "Data per groups",
            ChartKind::Domains => "Data per domains",
            ChartKind::CreationDate => "Data per dates",
        }
    }

    /// Endpoint path, relative to the API base.
    pub fn endpoint(self) -> &'static str {
        match self {
            ChartKind::TranslationUnits => "charts/tu/",
            ChartKind::Groups => "charts/groups/",
            ChartKind::Domains => "charts/domains/",
            ChartKind::CreationDate => "charts/creation-date/",
        }
    }

    /// Full endpoint url under `api_base`.
    pub fn endpoint_url(self, api_base: &str) -> String {
        join_url(api_base, self.endpoint())
    }

    /// Preconfigured builder for this kind.
    pub fn builder(self) -> ChartBuilder {
        let builder = ChartBuilder::new().endpoint(self.endpoint());
        match self {
            ChartKind::TranslationUnits => builder
                .strategy(RenderStrategy::Column)
                .headers("TU", "Total")
                .options(ChartOptions::titled("Resources per data size")),
            ChartKind::Groups => builder
                .strategy(RenderStrategy::Column)
                .headers("Group", "Resources number")
                .options(ChartOptions::titled("Data per groups")),
            ChartKind::Domains => builder
                .strategy(RenderStrategy::Pie)
                .headers("Domains", "Total")
                .options(ChartOptions {
                    is_3d: Some(true),
                    ..ChartOptions::titled("Data per domains")
                }),
            ChartKind::CreationDate => builder
                .strategy(RenderStrategy::Line)
                .headers("Date", "Resources")
                .options(ChartOptions::titled("Data per dates"))
                .filters(FilterSet::DateRange(DateRangeFilter::new())),
        }
    }

    /// Build the chart for this kind against `api_base`.
    pub fn chart(self, api_base: &str) -> Result<Chart> {
        self.builder().api_base(api_base).build()
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Charting library drawing routine used for a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderStrategy {
    Column,
    Pie,
    Line,
}

impl RenderStrategy {
    /// Name of the `google.visualization` constructor.
    pub fn constructor(self) -> &'static str {
        match self {
            RenderStrategy::Column => "ColumnChart",
            RenderStrategy::Pie => "PieChart",
            RenderStrategy::Line => "LineChart",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RenderStrategy::Column => "Column chart",
            RenderStrategy::Pie => "Pie chart",
            RenderStrategy::Line => "Line chart",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartArea {
    pub left: u32,
    pub height: String,
    pub width: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Animation {
    pub startup: bool,
    pub duration: u32,
    pub easing: String,
}

/// Options object passed to the charting library's `draw`.
///
/// Unset fields are left out of the serialized object.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "is3D", skip_serializing_if = "Option::is_none")]
    pub is_3d: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_area: Option<ChartArea>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animation: Option<Animation>,
}

impl ChartOptions {
    /// Layout shared by every chart.
    pub fn base() -> Self {
        Self {
            chart_area: Some(ChartArea {
                left: 0,
                height: "80%".to_string(),
                width: "100%".to_string(),
            }),
            animation: Some(Animation {
                startup: true,
                duration: 1000,
                easing: "out".to_string(),
            }),
            ..Self::default()
        }
    }

    pub fn titled(title: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            ..Self::default()
        }
    }

    /// Overlay `overrides` on top of `self`; fields set in `overrides` win.
    pub fn merged(&self, overrides: &ChartOptions) -> ChartOptions {
        ChartOptions {
            title: overrides.title.clone().or_else(|| self.title.clone()),
            is_3d: overrides.is_3d.or(self.is_3d),
            chart_area: overrides.chart_area.clone().or_else(|| self.chart_area.clone()),
            animation: overrides.animation.clone().or_else(|| self.animation.clone()),
        }
    }
}

/// Fetches chart data. Implemented over browser `fetch` and over `reqwest`.
pub trait DataSource {
    /// GET `url` with `params` as the query string and decode the JSON body.
    fn get_json(&self, url: &str, params: &FilterParams) -> impl Future<Output = Result<Value>>;
}

/// Draws tables with a charting library.
pub trait ChartBackend {
    fn render(
        &mut self,
        container: &str,
        strategy: RenderStrategy,
        table: &DataTable,
        options: &ChartOptions,
    );

    /// Remove whatever was rendered into `container`.
    fn clear(&mut self, container: &str);
}

/// Collects and validates chart configuration.
#[derive(Debug, Clone, Default)]
pub struct ChartBuilder {
    api_base: String,
    endpoint: Option<String>,
    strategy: Option<RenderStrategy>,
    headers: Vec<String>,
    options: ChartOptions,
    filters: Option<FilterSet>,
}

impl ChartBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn api_base(mut self, api_base: &str) -> Self {
        self.api_base = api_base.to_string();
        self
    }

    pub fn endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = Some(endpoint.to_string());
        self
    }

    pub fn strategy(mut self, strategy: RenderStrategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    pub fn headers(self, category: &str, value: &str) -> Self {
        self.header_labels(&[category, value])
    }

    pub fn header_labels(mut self, labels: &[&str]) -> Self {
        self.headers = labels.iter().map(|l| l.to_string()).collect();
        self
    }

    pub fn options(mut self, options: ChartOptions) -> Self {
        self.options = options;
        self
    }

    pub fn filters(mut self, filters: FilterSet) -> Self {
        self.filters = Some(filters);
        self
    }

    /// Fails before any request is made when the endpoint, strategy or
    /// header pair is missing.
    pub fn build(self) -> Result<Chart> {
        let endpoint = self
            .endpoint
            .filter(|e| !e.trim().is_empty())
            .ok_or(StatsError::MissingEndpoint)?;
        let strategy = self.strategy.ok_or(StatsError::MissingChartType)?;
        let headers: [String; 2] = self
            .headers
            .try_into()
            .map_err(|_| StatsError::MissingHeaders)?;
        if headers.iter().any(|h| h.is_empty()) {
            return Err(StatsError::MissingHeaders);
        }

        Ok(Chart {
            url: join_url(&self.api_base, &endpoint),
            strategy,
            headers,
            options: ChartOptions::base().merged(&self.options),
            filters: self.filters,
            container: None,
        })
    }
}

fn join_url(base: &str, endpoint: &str) -> String {
    if base.is_empty() {
        endpoint.to_string()
    } else {
        format!("{}/{}", base.trim_end_matches('/'), endpoint.trim_start_matches('/'))
    }
}

/// A configured chart, optionally mounted into a container.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    url: String,
    strategy: RenderStrategy,
    headers: [String; 2],
    options: ChartOptions,
    filters: Option<FilterSet>,
    container: Option<String>,
}

impl Chart {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn strategy(&self) -> RenderStrategy {
        self.strategy
    }

    pub fn headers(&self) -> &[String; 2] {
        &self.headers
    }

    /// Base layout merged with the kind's own options.
    pub fn options(&self) -> &ChartOptions {
        &self.options
    }

    pub fn filters(&self) -> Option<&FilterSet> {
        self.filters.as_ref()
    }

    pub fn filters_mut(&mut self) -> Option<&mut FilterSet> {
        self.filters.as_mut()
    }

    pub fn container(&self) -> Option<&str> {
        self.container.as_deref()
    }

    /// Record the target container without drawing.
    pub fn attach(&mut self, container: &str) {
        self.container = Some(container.to_string());
    }

    /// Attach to `container` and draw with `params`.
    pub async fn mount<S: DataSource, B: ChartBackend>(
        &mut self,
        container: &str,
        source: &S,
        backend: &mut B,
        params: &FilterParams,
    ) -> Result<DataTable> {
        self.attach(container);
        self.draw(source, backend, params).await
    }

    /// Fetch the endpoint with `params` and render the result.
    ///
    /// Transport failures are returned to the caller as-is; nothing is retried.
    pub async fn draw<S: DataSource, B: ChartBackend>(
        &self,
        source: &S,
        backend: &mut B,
        params: &FilterParams,
    ) -> Result<DataTable> {
        if self.container.is_none() {
            return Err(StatsError::NotMounted);
        }
        info!("Fetching chart data from {}", self.url);
        let payload = source.get_json(&self.url, params).await?;
        self.render_payload(&payload, backend)
    }

    /// Render an already fetched payload. An `errors` payload never reaches
    /// the backend.
    pub fn render_payload<B: ChartBackend>(&self, payload: &Value, backend: &mut B) -> Result<DataTable> {
        let container = self.container.as_deref().ok_or(StatsError::NotMounted)?;
        let dataset = Dataset::from_json(payload)
            .inspect_err(|e| warn!("Not rendering {}: {}", self.url, e))?;
        let table = format_data(&self.headers, &dataset);
        backend.render(container, self.strategy, &table, &self.options);
        Ok(table)
    }
}
