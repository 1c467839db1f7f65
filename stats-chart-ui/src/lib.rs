//! Shared Dioxus components and Google Charts bridge for the statistics dashboard.
//!
//! This crate provides:
//! - `js_bridge`: Rust wrappers for Google Charts calls via `js_sys::eval()`
//! - `fetch`: a `DataSource` over the browser `fetch` API
//! - `state`: Reactive AppState with Dioxus Signals
//! - `components`: Reusable RSX components (chart selector, filters, etc.)

pub mod components;
pub mod fetch;
pub mod js_bridge;
pub mod state;
