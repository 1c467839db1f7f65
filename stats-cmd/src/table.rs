//! Plain-text rendering of chart tables for the terminal.

use stats_core::{ChartBackend, ChartOptions, DataTable, RenderStrategy};
use std::fmt::Write;

/// `ChartBackend` that writes each rendered table into a text buffer.
#[derive(Debug, Default)]
pub struct TextTable {
    output: String,
}

impl TextTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_output(self) -> String {
        self.output
    }
}

fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

impl ChartBackend for TextTable {
    fn render(
        &mut self,
        _container: &str,
        strategy: RenderStrategy,
        table: &DataTable,
        options: &ChartOptions,
    ) {
        let values: Vec<String> = table.rows.iter().map(|(_, v)| format_value(*v)).collect();
        let label_width = table
            .rows
            .iter()
            .map(|(label, _)| label.chars().count())
            .chain(std::iter::once(table.headers[0].chars().count()))
            .max()
            .unwrap_or(0);

        if let Some(title) = &options.title {
            let _ = writeln!(self.output, "{} ({})", title, strategy.constructor());
        }
        let _ = writeln!(
            self.output,
            "{:<width$}  {}",
            table.headers[0],
            table.headers[1],
            width = label_width
        );
        for ((label, _), value) in table.rows.iter().zip(values) {
            let _ = writeln!(self.output, "{:<width$}  {}", label, value, width = label_width);
        }
    }

    fn clear(&mut self, _container: &str) {
        self.output.clear();
    }
}
