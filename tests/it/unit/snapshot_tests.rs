//! Snapshot tests using the insta crate.
//!
//! Inline snapshots pin the JSON shapes the dashboard API serves.
//!
//! To update snapshots after intentional changes:
//! ```sh
//! cargo insta test --accept
//! ```

use crate::helpers::three_cases;
use epiboard::app::LoadState;
use epiboard::data::{CaseSummary, LoadErrorKind};
use epiboard::render::{ChartId, build_summary_cards};

#[test]
fn snapshot_region_chart_model() {
    let summary = CaseSummary::from_dataset(&three_cases().build());
    insta::assert_json_snapshot!(ChartId::Region.model(&summary), @r#"
    {
      "labels": [
        "A",
        "B"
      ],
      "values": [
        2,
        1
      ]
    }
    "#);
}

#[test]
fn snapshot_summary_cards() {
    let summary = CaseSummary::from_dataset(&three_cases().build());
    insta::assert_json_snapshot!(build_summary_cards(&summary), @r#"
    [
      {
        "title": "Total Cases",
        "value": "3",
        "detail": null
      },
      {
        "title": "Male",
        "value": "2",
        "detail": "66.7%"
      },
      {
        "title": "Female",
        "value": "1",
        "detail": "33.3%"
      },
      {
        "title": "Top Region",
        "value": "A (2)",
        "detail": null
      }
    ]
    "#);
}

#[test]
fn snapshot_load_states() {
    insta::assert_json_snapshot!(LoadState::Ready { rows: 3 }, @r#"
    {
      "state": "ready",
      "rows": 3
    }
    "#);

    let failed = LoadState::Failed {
        kind: LoadErrorKind::Transport,
        message: "Fetch failed: 500".to_string(),
    };
    insta::assert_json_snapshot!(failed, @r#"
    {
      "state": "failed",
      "kind": "transport",
      "message": "Fetch failed: 500"
    }
    "#);
}
