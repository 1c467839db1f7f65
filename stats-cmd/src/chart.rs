//! Print a statistics chart as a text table.

use crate::http::HttpSource;
use crate::table::TextTable;
use anyhow::{anyhow, bail};
use log::info;
use stats_core::filters::{END_DATE_FIELD, START_DATE_FIELD};
use stats_core::{ChartFilters, ChartKind, FilterParams};
use std::fmt::Write;

/// Container name reported to the backend for terminal output.
const STDOUT_CONTAINER: &str = "stdout";

/// One line per chart kind: key and title.
pub fn list_kinds() -> String {
    let mut out = String::new();
    for kind in ChartKind::ALL {
        let _ = writeln!(out, "{:<20} {}", kind.key(), kind.label());
    }
    out
}

/// Query parameters for `kind`, validated by its filters.
///
/// Dates are only accepted for kinds that own a date filter.
pub fn filter_params(kind: ChartKind, dates: Option<(String, String)>) -> anyhow::Result<FilterParams> {
    let Some((start, end)) = dates else {
        return Ok(FilterParams::new());
    };

    let mut filters = kind
        .builder()
        .build()?
        .filters()
        .cloned()
        .ok_or_else(|| anyhow!("Chart '{}' has no date filters", kind))?;

    filters.consume_submission(
        [(START_DATE_FIELD, start), (END_DATE_FIELD, end)]
            .into_iter()
            .collect(),
    );
    if !filters.is_valid() {
        bail!("{}", filters.error_message());
    }
    Ok(filters.params().clone())
}

/// Fetch chart `key` from `base_url` and return it rendered as text.
pub async fn run_chart(
    key: &str,
    base_url: &str,
    dates: Option<(String, String)>,
) -> anyhow::Result<String> {
    let Some(kind) = ChartKind::from_key(key) else {
        bail!("Unknown chart kind '{}'. Available kinds:\n{}", key, list_kinds());
    };
    let params = filter_params(kind, dates)?;
    let mut chart = kind.chart(base_url)?;

    info!("Fetching {} from {}", kind, chart.url());
    let source = HttpSource::new(reqwest::Client::new());
    let mut backend = TextTable::new();
    chart
        .mount(STDOUT_CONTAINER, &source, &mut backend, &params)
        .await?;
    Ok(backend.into_output())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dates(start: &str, end: &str) -> Option<(String, String)> {
        Some((start.to_string(), end.to_string()))
    }

    #[test]
    fn test_list_kinds() {
        let listing = list_kinds();
        assert_eq!(listing.lines().count(), 4);
        assert!(listing.starts_with("translation-units"));
        assert!(listing.contains("creation-date-data"));
    }

    #[test]
    fn test_filter_params_for_date_chart() {
        let params = filter_params(ChartKind::CreationDate, dates("01-01-2023", "31-01-2023")).unwrap();
        assert_eq!(params.get(START_DATE_FIELD), Some("01-01-2023"));
        assert_eq!(params.get(END_DATE_FIELD), Some("31-01-2023"));
    }

    #[test]
    fn test_filter_params_rejects_reversed_dates() {
        let err = filter_params(ChartKind::CreationDate, dates("01-02-2023", "01-01-2023")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid filters, end date is lower than start date."
        );
    }

    #[test]
    fn test_filter_params_on_chart_without_filters() {
        assert!(filter_params(ChartKind::Domains, dates("01-01-2023", "02-01-2023")).is_err());
        assert!(filter_params(ChartKind::Domains, None).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_kind_fails_before_fetching() {
        let err = run_chart("nonexistent", "http://127.0.0.1:9/", None)
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("Unknown chart kind 'nonexistent'"));
    }
}
