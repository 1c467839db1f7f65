//! Chart data over the browser `fetch` API.

use stats_core::{DataSource, FilterParams, Result, StatsError};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

fn transport(err: JsValue) -> StatsError {
    StatsError::Transport(
        err.as_string()
            .or_else(|| js_sys::JSON::stringify(&err).ok().and_then(|s| s.as_string()))
            .unwrap_or_else(|| "fetch failed".to_string()),
    )
}

/// `DataSource` issuing same-origin GET requests from the page.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserSource;

impl DataSource for BrowserSource {
    async fn get_json(&self, url: &str, params: &FilterParams) -> Result<serde_json::Value> {
        let window = web_sys::window().ok_or_else(|| StatsError::Transport("no window".to_string()))?;

        let opts = RequestInit::new();
        opts.set_method("GET");
        opts.set_mode(RequestMode::SameOrigin);
        let request = Request::new_with_str_and_init(&params.append_to(url), &opts).map_err(transport)?;
        request
            .headers()
            .set("Accept", "application/json")
            .map_err(transport)?;

        let response: Response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(transport)?
            .dyn_into()
            .map_err(transport)?;
        if !response.ok() {
            return Err(StatsError::Transport(format!(
                "{} answered {}",
                url,
                response.status()
            )));
        }

        let body = JsFuture::from(response.text().map_err(transport)?)
            .await
            .map_err(transport)?
            .as_string()
            .unwrap_or_default();
        serde_json::from_str(&body).map_err(|e| StatsError::InvalidPayload(e.to_string()))
    }
}
