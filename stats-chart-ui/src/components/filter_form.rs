//! Filter form of the active chart.
//!
//! The container is always present; the form inside it exists only while
//! the active chart owns filters, so switching charts drops the old form
//! and its handlers with it.

use crate::state::AppState;
use dioxus::prelude::*;
use stats_core::filters::FilterTemplate;
use stats_core::ChartFilters;

#[component]
pub fn FilterForm() -> Element {
    let state = use_context::<AppState>();
    let view = state.view.read();
    let container_id = view.config().filters_container_id.clone();
    let template = view.filters().map(|filters| filters.template());
    drop(view);

    let values = state.filter_values.read().clone();
    let filter_error = (state.filter_error)();

    let Some(FilterTemplate { fields, reset_id }) = template else {
        return rsx! {
            div { id: "{container_id}" }
        };
    };

    rsx! {
        div {
            id: "{container_id}",
            form {
                style: "margin: 8px 0; display: flex; gap: 12px; align-items: center;",
                onsubmit: move |evt: Event<FormData>| {
                    evt.prevent_default();
                    state.submit_filters();
                },
                for field in fields {
                    label {
                        key: "{field.name}",
                        style: "font-weight: bold;",
                        "{field.label}: "
                        input {
                            r#type: "text",
                            id: field.input_id,
                            name: field.name,
                            placeholder: field.placeholder,
                            value: values.get(field.name).unwrap_or_default().to_string(),
                            oninput: move |evt: Event<FormData>| {
                                let mut filter_values = state.filter_values;
                                filter_values.write().insert(field.name, evt.value());
                            },
                        }
                    }
                }
                button { r#type: "submit", "Apply" }
                if let Some(reset_id) = reset_id {
                    button {
                        r#type: "button",
                        id: reset_id,
                        onclick: move |_| state.reset_filters(),
                        "Reset"
                    }
                }
            }
            if let Some(message) = filter_error {
                p {
                    style: "margin: 0; font-size: 12px; color: #C62828;",
                    "{message}"
                }
            }
        }
    }
}
