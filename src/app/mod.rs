//! Application module - the dashboard orchestrator.
//!
//! This module is organized into several submodules:
//! - `state` - The EpiBoard struct definition, its sub-structs and `LoadState`
//! - `lifecycle` - Construction and the fetch → parse → aggregate → render cycle
//! - `search` - The table filter wired up by a successful load
//! - `view` - Accessors and the page snapshot

mod lifecycle;
mod search;
mod state;
mod view;

pub use state::{DataState, EpiBoard, LoadState, RenderState, StatusState};
