//! Error types for data loading
//!
//! Every failure of a load cycle is a [`LoadError`]. The orchestrator turns
//! it into the user-visible failure state; nothing is rendered past it.

use thiserror::Error;

/// Errors that can occur while fetching, parsing or rendering a dataset
#[derive(Error, Debug)]
pub enum LoadError {
    /// The data source answered with a non-success status
    #[error("Fetch failed: {status}")]
    Transport { status: u16 },

    /// The request could not be completed at all
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// IO error from a local source
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The payload carried an explicit server-side error
    #[error("{0}")]
    Payload(String),

    /// Malformed text or JSON structure
    #[error("Parse error: {0}")]
    Parse(String),

    /// JSON syntax error from serde_json
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A render target is unusable, e.g. a missing chart surface
    #[error("Render error: {0}")]
    Render(String),

    /// The configured source is not a usable path or URL
    #[error("Invalid source: {0}")]
    Source(String),
}

/// Result type alias for load operations
pub type LoadResult<T> = Result<T, LoadError>;

/// Coarse classification used for logging and status reporting
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadErrorKind {
    Transport,
    Payload,
    Parse,
    Render,
}

impl LoadError {
    pub fn kind(&self) -> LoadErrorKind {
        match self {
            LoadError::Transport { .. }
            | LoadError::Request(_)
            | LoadError::Io(_)
            | LoadError::Source(_) => LoadErrorKind::Transport,
            LoadError::Payload(_) => LoadErrorKind::Payload,
            LoadError::Parse(_) | LoadError::Json(_) => LoadErrorKind::Parse,
            LoadError::Render(_) => LoadErrorKind::Render,
        }
    }
}
