//! Application-wide constants.
//!
//! Centralizes labels, identifiers and defaults so the parser, the
//! aggregators and the page agree on them.

// ============================================================================
// Data Source Defaults
// ============================================================================

/// Data location used when no settings file names one
pub const DEFAULT_SOURCE: &str = "datasets/data.csv";

/// Keys under which a JSON object may wrap its row array
pub const JSON_WRAPPER_KEYS: &[&str] = &["data", "rows", "items", "records", "results"];

/// Key a JSON endpoint uses to signal a server-side failure
pub const JSON_ERROR_KEY: &str = "error";

// ============================================================================
// Aggregation
// ============================================================================

/// Bucket label for missing or unrecognized values
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Sex labels in display order
pub const SEX_LABELS: &[&str] = &["Male", "Female"];

/// Canonical age-group buckets in display order
pub const AGE_GROUPS: &[&str] = &["<15", "15-24", "25-34", "35-49", "50+"];

/// Number of leading characters of a diagnosis date that form the year
pub const YEAR_PREFIX_LEN: usize = 4;

/// Placeholder shown when a card has no value
pub const NO_VALUE: &str = "—";

// ============================================================================
// Status Messages
// ============================================================================

pub const STATUS_IDLE: &str = "Idle";
pub const STATUS_LOADING: &str = "Loading data…";
pub const STATUS_FAILED: &str = "Failed to load data";

// ============================================================================
// Page Element Identifiers
// ============================================================================

pub const STATUS_ELEMENT: &str = "status";
pub const ERROR_ELEMENT: &str = "error";
pub const TABLE_ELEMENT: &str = "table-container";
pub const SEARCH_ELEMENT: &str = "search";
pub const CARDS_ELEMENT: &str = "cards";

// ============================================================================
// Server & Settings
// ============================================================================

pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port, overridable with the `PORT` environment variable
pub const DEFAULT_PORT: u16 = 8000;

pub const PORT_ENV_VAR: &str = "PORT";

/// Directory name under the user's config directory
pub const APP_DIR_NAME: &str = "epiboard";

pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Poll interval for the server's shutdown flag, in milliseconds
pub const SERVER_POLL_MS: u64 = 100;
