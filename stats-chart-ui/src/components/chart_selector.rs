//! Dropdown selector for choosing a chart kind.

use crate::state::AppState;
use dioxus::prelude::*;
use stats_core::ChartKind;

/// Chart kind dropdown.
/// Every change tears down the current chart and loads the selected one.
#[component]
pub fn ChartSelector() -> Element {
    let state = use_context::<AppState>();
    let selected = (state.selected_chart)();
    let select_id = state.view.read().config().select_id.clone();

    let on_change = move |evt: Event<FormData>| {
        state.select_chart(evt.value());
    };

    rsx! {
        form {
            id: "statistics-form",
            style: "margin: 8px 0;",
            onsubmit: move |evt: Event<FormData>| evt.prevent_default(),
            label {
                r#for: "{select_id}",
                style: "font-weight: bold; margin-right: 8px;",
                "Statistics: "
            }
            select {
                id: "{select_id}",
                onchange: on_change,
                for (key, label) in ChartKind::ALL.map(|kind| (kind.key(), kind.label())) {
                    option {
                        value: key,
                        selected: key == selected,
                        "{label}"
                    }
                }
            }
        }
    }
}
