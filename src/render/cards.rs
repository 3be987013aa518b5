//! Summary cards shown above the charts.

use crate::constants::NO_VALUE;
use crate::data::CaseSummary;
use serde::Serialize;

/// A titled headline figure
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SummaryCard {
    pub title: String,
    pub value: String,
    /// Secondary line, e.g. a share of the total
    pub detail: Option<String>,
}

impl SummaryCard {
    fn new(title: &str, value: impl Into<String>) -> Self {
        Self {
            title: title.to_string(),
            value: value.into(),
            detail: None,
        }
    }

    fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Total, Male, Female and Top Region cards
pub fn build_summary_cards(summary: &CaseSummary) -> Vec<SummaryCard> {
    let top_region = summary
        .regions
        .top()
        .map(|(label, count)| format!("{label} ({count})"))
        .unwrap_or_else(|| NO_VALUE.to_string());

    vec![
        SummaryCard::new("Total Cases", summary.total.to_string()),
        SummaryCard::new("Male", summary.sex.get("Male").to_string())
            .with_detail(summary.sex_share("Male")),
        SummaryCard::new("Female", summary.sex.get("Female").to_string())
            .with_detail(summary.sex_share("Female")),
        SummaryCard::new("Top Region", top_region),
    ]
}
