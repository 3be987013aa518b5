//! Case-record dashboard.
//!
//! Loads epidemiological case rows from delimited text or JSON, computes
//! descriptive aggregates and shapes them into summary cards, chart models
//! and a filterable table model. The [`server`] module serves the result
//! as an HTML page.

pub mod app;
pub mod constants;
pub mod data;
pub mod data_table;
pub mod render;
pub mod server;
pub mod settings;
pub mod transport;
pub mod types;
