//! Dashboard configuration.
//!
//! The hosting page may override any field with an inline JSON document;
//! missing fields keep their defaults.

use crate::chart::ChartKind;
use crate::error::Result;
use serde::Deserialize;

/// DOM anchors and API location used by the statistics dashboard.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Prefix prepended to every chart endpoint path
    pub api_base: String,
    /// Chart loaded once the charting library is ready
    pub default_chart: ChartKind,
    /// Id of the chart kind dropdown
    pub select_id: String,
    /// Id of the element charts are rendered into
    pub chart_container_id: String,
    /// Id of the element filter forms are mounted into
    pub filters_container_id: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            default_chart: ChartKind::default(),
            select_id: "statistics-choice".to_string(),
            chart_container_id: "chart-container".to_string(),
            filters_container_id: "chart-filters".to_string(),
        }
    }
}

impl DashboardConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_api_base(mut self, api_base: &str) -> Self {
        self.api_base = api_base.to_string();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override() {
        let config =
            DashboardConfig::from_json(r#"{"api_base": "/stats/", "default_chart": "domains-data"}"#)
                .unwrap();
        assert_eq!(config.api_base, "/stats/");
        assert_eq!(config.default_chart, ChartKind::Domains);
        assert_eq!(config.chart_container_id, "chart-container");
    }

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(DashboardConfig::from_json("{}").unwrap(), DashboardConfig::default());
    }

    #[test]
    fn test_unknown_chart_kind_is_rejected() {
        assert!(DashboardConfig::from_json(r#"{"default_chart": "pie"}"#).is_err());
    }
}
