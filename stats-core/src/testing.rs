//! Recording fakes for the fetch and render seams.

use crate::chart::{ChartBackend, ChartOptions, DataSource, RenderStrategy};
use crate::dataset::DataTable;
use crate::error::{Result, StatsError};
use crate::filters::FilterParams;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;

/// Answers from a fixed url -> payload table; unknown urls fail like a
/// dropped connection.
#[derive(Default)]
pub struct FakeSource {
    responses: HashMap<String, Value>,
    requests: RefCell<Vec<(String, FilterParams)>>,
}

impl FakeSource {
    pub fn with_response(url: &str, payload: Value) -> Self {
        let mut source = Self::default();
        source.responses.insert(url.to_string(), payload);
        source
    }

    pub fn requests(&self) -> Vec<(String, FilterParams)> {
        self.requests.borrow().clone()
    }
}

impl DataSource for FakeSource {
    async fn get_json(&self, url: &str, params: &FilterParams) -> Result<Value> {
        self.requests
            .borrow_mut()
            .push((url.to_string(), params.clone()));
        self.responses
            .get(url)
            .cloned()
            .ok_or_else(|| StatsError::Transport(format!("connection refused: {}", url)))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    Chart {
        container: String,
        strategy: RenderStrategy,
        rows: usize,
    },
    Cleared(String),
}

#[derive(Default)]
pub struct RecordingBackend {
    pub calls: Vec<Rendered>,
}

impl ChartBackend for RecordingBackend {
    fn render(
        &mut self,
        container: &str,
        strategy: RenderStrategy,
        table: &DataTable,
        _options: &ChartOptions,
    ) {
        self.calls.push(Rendered::Chart {
            container: container.to_string(),
            strategy,
            rows: table.rows.len(),
        });
    }

    fn clear(&mut self, container: &str) {
        self.calls.push(Rendered::Cleared(container.to_string()));
    }
}
