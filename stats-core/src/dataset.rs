//! Remote chart payloads and their conversion into chart tables.
//!
//! Chart endpoints answer either `{ "<category>": <number>, ... }` or
//! `{ "errors": [...] }`. The category order of the JSON object is kept
//! (`serde_json` is built with `preserve_order`) so that the rendered
//! table follows the order the server chose.

use crate::error::{Result, StatsError};
use serde::Serialize;
use serde_json::Value;

/// Key carrying server-side failures in a chart payload.
pub const ERRORS_KEY: &str = "errors";

/// Ordered category -> value pairs fetched from a chart endpoint.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset(Vec<(String, f64)>);

impl Dataset {
    pub fn new(points: Vec<(String, f64)>) -> Self {
        Self(points)
    }

    /// Parse a chart endpoint response.
    ///
    /// A payload carrying an `errors` field becomes [`StatsError::Remote`];
    /// anything that is not an object of numbers is an
    /// [`StatsError::InvalidPayload`].
    pub fn from_json(payload: &Value) -> Result<Self> {
        let object = payload
            .as_object()
            .ok_or_else(|| StatsError::InvalidPayload(format!("expected an object, got {}", payload)))?;

        if let Some(errors) = object.get(ERRORS_KEY) {
            return Err(StatsError::Remote(error_messages(errors)));
        }

        object
            .iter()
            .map(|(key, value)| {
                value
                    .as_f64()
                    .map(|number| (key.clone(), number))
                    .ok_or_else(|| {
                        StatsError::InvalidPayload(format!("value for '{}' is not a number: {}", key, value))
                    })
            })
            .collect::<Result<Vec<_>>>()
            .map(Self)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, f64)> {
        self.0.iter()
    }
}

fn error_messages(errors: &Value) -> Vec<String> {
    match errors {
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
        Value::String(s) => vec![s.clone()],
        other => vec![other.to_string()],
    }
}

/// Capitalize a label: first character upper case, the rest lower case.
pub fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// A header row followed by (label, value) rows, ready for the charting library.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataTable {
    pub headers: [String; 2],
    pub rows: Vec<(String, f64)>,
}

impl DataTable {
    /// Row arrays in the `[[h1, h2], [label, value], ...]` shape expected by
    /// `google.visualization.arrayToDataTable`.
    pub fn to_rows(&self) -> Value {
        let mut rows = Vec::with_capacity(self.rows.len() + 1);
        rows.push(serde_json::json!([self.headers[0], self.headers[1]]));
        rows.extend(
            self.rows
                .iter()
                .map(|(label, value)| serde_json::json!([label, value])),
        );
        Value::Array(rows)
    }
}

/// Turn a dataset into a table whose row 0 is the header pair.
pub fn format_data(headers: &[String; 2], dataset: &Dataset) -> DataTable {
    DataTable {
        headers: headers.clone(),
        rows: dataset
            .iter()
            .map(|(label, value)| (capitalize(label), *value))
            .collect(),
    }
}
