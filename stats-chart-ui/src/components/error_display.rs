//! Failed chart loads.
//!
//! Errors the statistics endpoint reported are listed one per line; an
//! unreachable endpoint gets a retry button instead.

use dioxus::prelude::*;
use stats_core::{ErrorOrigin, ErrorReport};

fn palette(origin: ErrorOrigin) -> (&'static str, &'static str, &'static str) {
    // background, text, border
    match origin {
        ErrorOrigin::Server => ("#FFF8E1", "#8D6E00", "#FFE082"),
        ErrorOrigin::Network => ("#FFEBEE", "#C62828", "#EF9A9A"),
        ErrorOrigin::Dashboard => ("#ECEFF1", "#37474F", "#B0BEC5"),
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct ErrorDisplayProps {
    pub report: ErrorReport,
    /// Shown as a "Try again" button for failures worth retrying
    pub on_retry: Option<EventHandler<()>>,
}

#[component]
pub fn ErrorDisplay(props: ErrorDisplayProps) -> Element {
    let ErrorReport { origin, details } = props.report;
    let heading = origin.heading();
    let (background, color, border) = palette(origin);
    let retry = props.on_retry.filter(|_| origin.is_retryable());

    rsx! {
        div {
            role: "alert",
            style: "padding: 12px 16px; margin: 8px 0; border-radius: 4px; background: {background}; color: {color}; border: 1px solid {border};",
            strong { "{heading}" }
            ul {
                style: "margin: 6px 0 0; padding-left: 20px;",
                for (i, detail) in details.into_iter().enumerate() {
                    li { key: "{i}", "{detail}" }
                }
            }
            if let Some(retry) = retry {
                button {
                    r#type: "button",
                    style: "margin-top: 8px;",
                    onclick: move |_| retry.call(()),
                    "Try again"
                }
            }
        }
    }
}
