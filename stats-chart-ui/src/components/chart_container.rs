//! The element Google Charts draws the active chart into.

use crate::state::AppState;
use dioxus::prelude::*;

/// Draw target of the active chart, captioned with its kind and chart type.
///
/// The target div keeps the configured container id whatever chart is
/// active, so a teardown followed by a load reuses the same element.
#[component]
pub fn ChartContainer(#[props(default = 400)] min_height: u32) -> Element {
    let state = use_context::<AppState>();
    let view = state.view.read();
    let container_id = view.config().chart_container_id.clone();
    let caption = view
        .active_kind()
        .zip(view.active_chart())
        .map(|(kind, chart)| {
            let strategy = chart.strategy();
            (kind.label(), strategy.constructor(), strategy.label())
        });
    drop(view);
    let loading = (state.loading)();

    rsx! {
        section {
            style: "position: relative; width: 100%; min-height: {min_height}px;",
            if let Some((label, constructor, kind_of_chart)) = caption {
                header {
                    style: "display: flex; justify-content: space-between; align-items: baseline; margin: 8px 0;",
                    h3 { style: "margin: 0;", "{label}" }
                    span {
                        style: "font-size: 12px; color: #666;",
                        "data-strategy": constructor,
                        "{kind_of_chart}"
                    }
                }
                if loading {
                    p {
                        style: "position: absolute; top: 50%; left: 50%; transform: translate(-50%, -50%); color: #666;",
                        "Loading {label}..."
                    }
                }
            }
            div {
                id: "{container_id}",
                style: "width: 100%; min-height: {min_height}px;",
            }
        }
    }
}
