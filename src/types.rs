//! Core types for the case dashboard.
//!
//! This module defines the row and dataset structures produced by the
//! parsers, the field-resolution table used to read case fields, and the
//! chart types handed to the presentation layer.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Field Resolution
// ============================================================================

/// Logical case-record fields read by the aggregators.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum Field {
    Region,
    Sex,
    AgeGroup,
    RiskCategory,
    Transmission,
    DiagnosisDate,
}

impl Field {
    pub const COUNT: usize = 6;

    pub fn all() -> &'static [Field] {
        &[
            Field::Region,
            Field::Sex,
            Field::AgeGroup,
            Field::RiskCategory,
            Field::Transmission,
            Field::DiagnosisDate,
        ]
    }

    /// Accepted source keys for this field, in priority order.
    pub fn keys(&self) -> &'static [&'static str] {
        match self {
            Field::Region => &["Region", "region"],
            Field::Sex => &["Sex", "sex"],
            Field::AgeGroup => &["Age_Group", "age_group"],
            Field::RiskCategory => &["Risk_Category", "risk_category"],
            Field::Transmission => &["Mode_of_Transmission", "mode_of_transmission"],
            Field::DiagnosisDate => &["Diagnosis_Date", "diagnosis_date"],
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Case fields resolved from a row's raw key/value pairs.
///
/// Resolution runs once while the parser builds the row: for each field
/// the first accepted key with a non-empty trimmed value wins.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CaseFields {
    values: [Option<String>; Field::COUNT],
}

impl CaseFields {
    /// Resolve every field through `lookup`, which maps a source key to
    /// its raw value when the row has one.
    pub fn resolve<'a>(lookup: impl Fn(&str) -> Option<&'a str>) -> Self {
        let mut values: [Option<String>; Field::COUNT] = Default::default();
        for field in Field::all() {
            values[field.index()] = field
                .keys()
                .iter()
                .filter_map(|key| lookup(key))
                .map(str::trim)
                .find(|value| !value.is_empty())
                .map(str::to_string);
        }
        Self { values }
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.values[field.index()].as_deref()
    }
}

// ============================================================================
// Rows & Datasets
// ============================================================================

/// One case record.
///
/// `cells` is aligned with the owning dataset's header; a key the record
/// did not supply is an empty string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Row {
    pub cells: Vec<String>,
    fields: CaseFields,
}

impl Row {
    pub fn new(cells: Vec<String>, fields: CaseFields) -> Self {
        Self { cells, fields }
    }

    /// Resolved value of a case field, `None` when missing or blank
    pub fn field(&self, field: Field) -> Option<&str> {
        self.fields.get(field)
    }

    pub fn cell(&self, index: usize) -> &str {
        self.cells.get(index).map(String::as_str).unwrap_or("")
    }
}

/// Where a dataset came from
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataOrigin {
    /// Built in memory
    #[default]
    Inline,
    /// Read from a local file
    File { path: PathBuf },
    /// Fetched over HTTP
    Api { url: String },
}

impl std::fmt::Display for DataOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataOrigin::Inline => write!(f, "inline"),
            DataOrigin::File { path } => write!(f, "{}", path.display()),
            DataOrigin::Api { url } => write!(f, "{url}"),
        }
    }
}

/// The full ordered collection of rows for one load cycle.
///
/// Immutable once loaded; a reload builds a new one.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Dataset {
    pub header: Vec<String>,
    pub rows: Vec<Row>,
    pub origin: DataOrigin,
}

impl Dataset {
    pub fn empty(origin: DataOrigin) -> Self {
        Self {
            header: Vec::new(),
            rows: Vec::new(),
            origin,
        }
    }

    /// Build a dataset from flat key/value records.
    ///
    /// The header is the key sequence of the first record. Keys a later
    /// record lacks become empty cells; keys outside the header still take
    /// part in field resolution.
    pub fn from_records<R, K, V>(records: impl IntoIterator<Item = R>, origin: DataOrigin) -> Self
    where
        R: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut header: Option<Vec<String>> = None;
        let mut rows = Vec::new();

        for record in records {
            let pairs: Vec<(String, String)> = record
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect();
            let header = header.get_or_insert_with(|| pairs.iter().map(|(k, _)| k.clone()).collect());

            let lookup = |key: &str| {
                pairs
                    .iter()
                    .find(|(k, _)| k == key)
                    .map(|(_, v)| v.as_str())
            };
            let cells = header
                .iter()
                .map(|name| lookup(name).unwrap_or_default().to_string())
                .collect();
            rows.push(Row::new(cells, CaseFields::resolve(lookup)));
        }

        Self {
            header: header.unwrap_or_default(),
            rows,
            origin,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.header.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ============================================================================
// Chart Types
// ============================================================================

/// How a chart model is drawn by the plotting library
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Bar,
    HorizontalBar,
    Line,
    Pie,
    Doughnut,
}

/// Labels paired positionally with values, ready for plotting
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartModel {
    pub labels: Vec<String>,
    pub values: Vec<u64>,
}

impl ChartModel {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
