//! Typed wrappers around Google Charts interop via `js_sys::eval()`.
//!
//! The hosting page includes the Google Charts loader script. This module
//! loads the `corechart` package, waits for it, and draws tables with the
//! `google.visualization` constructor chosen by each chart.

use stats_core::{ChartBackend, ChartOptions, DataTable, RenderStrategy};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

/// Resolves once `corechart` is loaded; rejects after ~10s without the loader.
static LOAD_CHARTS_JS: &str = r#"
    new Promise(function(resolve, reject) {
        var attempts = 0;
        var poll = setInterval(function() {
            if (typeof google !== 'undefined' && google.charts) {
                clearInterval(poll);
                google.charts.load('current', { packages: ['corechart'] });
                google.charts.setOnLoadCallback(function() {
                    window.__statsChartsReady = true;
                    console.log('Statistics charts initialized');
                    resolve();
                });
            } else if (++attempts > 100) {
                clearInterval(poll);
                reject(new Error('Google Charts library is not loaded.'));
            }
        }, 100);
    })
"#;

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('Statistics JS call failed:', e); }}",
        code
    );
    let _ = js_sys::eval(&wrapped);
}

/// Load the charting library and wait until it can draw.
pub async fn charts_loaded() -> Result<(), JsValue> {
    let promise = js_sys::eval(LOAD_CHARTS_JS)?.dyn_into::<js_sys::Promise>()?;
    JsFuture::from(promise).await?;
    Ok(())
}

/// Render row arrays with a `google.visualization` chart constructor.
///
/// Uses a polling loop to wait for the library and the container DOM
/// element to exist before rendering.
pub fn render_chart(container_id: &str, constructor: &str, rows_json: &str, options_json: &str) {
    let id = serde_json::to_string(container_id).unwrap_or_default();
    let ctor = serde_json::to_string(constructor).unwrap_or_default();
    call_js(&format!(
        r#"
        (function() {{
            var poll = setInterval(function() {{
                var el = document.getElementById({id});
                if (window.__statsChartsReady && el) {{
                    clearInterval(poll);
                    try {{
                        var data = google.visualization.arrayToDataTable({rows_json});
                        var chart = new google.visualization[{ctor}](el);
                        chart.draw(data, {options_json});
                    }} catch(e) {{ console.error('[Stats] render error:', e); }}
                }}
            }}, 100);
        }})();
        "#,
    ));
}

/// Destroy/clean up a chart in the given container.
pub fn destroy_chart(container_id: &str) {
    let id = serde_json::to_string(container_id).unwrap_or_default();
    call_js(&format!(
        "var el = document.getElementById({}); if (el) el.innerHTML = '';",
        id
    ));
}

/// `ChartBackend` drawing through Google Charts.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoogleCharts;

impl ChartBackend for GoogleCharts {
    fn render(
        &mut self,
        container: &str,
        strategy: RenderStrategy,
        table: &DataTable,
        options: &ChartOptions,
    ) {
        let rows_json = table.to_rows().to_string();
        let options_json = serde_json::to_string(options).unwrap_or_else(|_| "{}".to_string());
        render_chart(container, strategy.constructor(), &rows_json, &options_json);
    }

    fn clear(&mut self, container: &str) {
        destroy_chart(container);
    }
}
