//! Case aggregation engine
//!
//! Pure single-pass reducers over a [`Dataset`]. Grouping, counting and
//! ordering happen here rather than in the render path; the presentation
//! layer only reshapes the results.
//!
//! ## Ordering
//!
//! Every [`Aggregate`] is ordered. Dynamic categories keep first-seen
//! order, years are chronological, fixed label sets follow their canonical
//! sequence and ranked aggregates sort by count descending. The ranking
//! sort is stable, so ties keep first-seen order.

use crate::constants::{AGE_GROUPS, SEX_LABELS, UNKNOWN_LABEL, YEAR_PREFIX_LEN};
use crate::types::{ChartModel, Dataset, Field};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// What an aggregate does with a missing or unrecognized value
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnknownPolicy {
    /// Count it under [`UNKNOWN_LABEL`]
    #[default]
    Bucket,
    /// Leave it out of the aggregate
    Ignore,
}

/// Ordered label → count summary
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Aggregate {
    entries: Vec<(String, u64)>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl Aggregate {
    pub fn new() -> Self {
        Self::default()
    }

    fn increment(&mut self, label: &str) {
        match self.index.get(label) {
            Some(&i) => self.entries[i].1 += 1,
            None => {
                self.index.insert(label.to_string(), self.entries.len());
                self.entries.push((label.to_string(), 1));
            }
        }
    }

    fn push(&mut self, label: &str, count: u64) {
        self.index.insert(label.to_string(), self.entries.len());
        self.entries.push((label.to_string(), count));
    }

    /// Count for `label`, zero when absent
    pub fn get(&self, label: &str) -> u64 {
        self.index
            .get(label)
            .map(|&i| self.entries[i].1)
            .unwrap_or(0)
    }

    pub fn entries(&self) -> &[(String, u64)] {
        &self.entries
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(label, _)| label.as_str())
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry in the aggregate's order
    pub fn top(&self) -> Option<(&str, u64)> {
        self.entries
            .first()
            .map(|(label, count)| (label.as_str(), *count))
    }

    /// Re-order by count descending; ties keep their current order
    pub fn ranked(mut self) -> Self {
        self.entries.sort_by(|a, b| b.1.cmp(&a.1));
        self.rebuild_index();
        self
    }

    fn rebuild_index(&mut self) {
        self.index = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, (label, _))| (label.clone(), i))
            .collect();
    }

    /// Labels and values in aggregate order
    pub fn to_chart_model(&self) -> ChartModel {
        ChartModel {
            labels: self.entries.iter().map(|(l, _)| l.clone()).collect(),
            values: self.entries.iter().map(|(_, c)| *c).collect(),
        }
    }
}

/// Count rows by a field's value, in first-seen order
pub fn count_by(dataset: &Dataset, field: Field, policy: UnknownPolicy) -> Aggregate {
    let mut aggregate = Aggregate::new();
    for row in &dataset.rows {
        match (row.field(field), policy) {
            (Some(value), _) => aggregate.increment(value),
            (None, UnknownPolicy::Bucket) => aggregate.increment(UNKNOWN_LABEL),
            (None, UnknownPolicy::Ignore) => {}
        }
    }
    aggregate
}

/// Count rows into a closed label set
///
/// Values match labels case-insensitively. Output follows `labels` order,
/// omitting labels no row carried; with [`UnknownPolicy::Bucket`] the
/// unmatched rows follow as a trailing [`UNKNOWN_LABEL`] entry.
pub fn count_fixed(
    dataset: &Dataset,
    field: Field,
    labels: &[&str],
    policy: UnknownPolicy,
) -> Aggregate {
    let mut counts = vec![0u64; labels.len()];
    let mut unknown = 0u64;

    for row in &dataset.rows {
        let slot = row
            .field(field)
            .and_then(|value| labels.iter().position(|l| l.eq_ignore_ascii_case(value)));
        match slot {
            Some(i) => counts[i] += 1,
            None => unknown += 1,
        }
    }

    let mut aggregate = Aggregate::new();
    for (label, count) in labels.iter().zip(counts) {
        if count > 0 {
            aggregate.push(label, count);
        }
    }
    if policy == UnknownPolicy::Bucket && unknown > 0 {
        aggregate.push(UNKNOWN_LABEL, unknown);
    }
    aggregate
}

/// Count rows by the year prefix of a date field, chronologically
///
/// Rows without the field, or whose first four characters are not all
/// ASCII digits, are skipped.
pub fn count_by_year(dataset: &Dataset, field: Field) -> Aggregate {
    let mut years: BTreeMap<&str, u64> = BTreeMap::new();
    for row in &dataset.rows {
        if let Some(year) = row.field(field).and_then(year_prefix) {
            *years.entry(year).or_default() += 1;
        }
    }

    let mut aggregate = Aggregate::new();
    for (year, count) in years {
        aggregate.push(year, count);
    }
    aggregate
}

fn year_prefix(date: &str) -> Option<&str> {
    let prefix = date.get(..YEAR_PREFIX_LEN)?;
    prefix
        .bytes()
        .all(|b| b.is_ascii_digit())
        .then_some(prefix)
}

/// Count by a field, then rank by count descending
pub fn rank_by(dataset: &Dataset, field: Field, policy: UnknownPolicy) -> Aggregate {
    count_by(dataset, field, policy).ranked()
}

/// Format `count` as a share of `total`, one decimal place
///
/// A zero total yields `"0.0%"`.
pub fn percentage(count: u64, total: u64) -> String {
    if total == 0 {
        return "0.0%".to_string();
    }
    // Halves round away from zero
    let tenths = (count as f64 * 1000.0 / total as f64).round();
    format!("{:.1}%", tenths / 10.0)
}

// ============================================================================
// Case Summary
// ============================================================================

/// Every aggregate the dashboard shows, computed from one dataset
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CaseSummary {
    pub total: u64,
    /// Regions ranked by count, unknown values bucketed
    pub regions: Aggregate,
    /// Male/Female in that order, others bucketed
    pub sex: Aggregate,
    /// Risk categories in first-seen order, unknown values bucketed
    pub risk: Aggregate,
    /// Transmission modes in first-seen order, missing values ignored
    pub transmission: Aggregate,
    /// Canonical age groups present in the data
    pub age_groups: Aggregate,
    /// Diagnoses per year
    pub yearly: Aggregate,
}

impl CaseSummary {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        Self {
            total: dataset.row_count() as u64,
            regions: rank_by(dataset, Field::Region, UnknownPolicy::Bucket),
            sex: count_fixed(dataset, Field::Sex, SEX_LABELS, UnknownPolicy::Bucket),
            risk: count_by(dataset, Field::RiskCategory, UnknownPolicy::Bucket),
            transmission: count_by(dataset, Field::Transmission, UnknownPolicy::Ignore),
            age_groups: count_fixed(dataset, Field::AgeGroup, AGE_GROUPS, UnknownPolicy::Ignore),
            yearly: count_by_year(dataset, Field::DiagnosisDate),
        }
    }

    /// Share of all cases carrying `label` in the sex aggregate
    pub fn sex_share(&self, label: &str) -> String {
        percentage(self.sex.get(label), self.total)
    }
}
