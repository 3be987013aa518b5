//! Delimited and JSON parsing into datasets.

use epiboard::data::{LoadError, LoadErrorKind, parse_csv_content, parse_json_content};
use epiboard::transport::{Payload, PayloadFormat};
use epiboard::types::{DataOrigin, Field};

// ============================================================================
// Delimited Text
// ============================================================================

#[test]
fn test_csv_header_and_rows() {
    let content = " Region , Sex ,Age_Group\nNCR,Male,25-34\nCalabarzon,Female,15-24\n";
    let dataset = parse_csv_content(content, DataOrigin::Inline);

    assert_eq!(dataset.header, vec!["Region", "Sex", "Age_Group"]);
    assert_eq!(dataset.row_count(), 2);
    assert_eq!(dataset.rows[0].cells, vec!["NCR", "Male", "25-34"]);
    assert_eq!(dataset.rows[1].field(Field::Sex), Some("Female"));
    assert_eq!(dataset.rows[1].field(Field::AgeGroup), Some("15-24"));
}

#[test]
fn test_csv_blank_lines_are_ignored() {
    let content = "\n\nRegion,Sex\n\nA,Male\n   \nB,Female\n\n";
    let dataset = parse_csv_content(content, DataOrigin::Inline);

    assert_eq!(dataset.header, vec!["Region", "Sex"]);
    assert_eq!(dataset.row_count(), 2);
}

#[test]
fn test_csv_mismatched_rows_are_dropped() {
    let content = "Region,Sex\nA,Male\nB\nC,Female,extra\nD,Female";
    let dataset = parse_csv_content(content, DataOrigin::Inline);

    let regions: Vec<_> = dataset
        .rows
        .iter()
        .filter_map(|r| r.field(Field::Region))
        .collect();
    assert_eq!(regions, vec!["A", "D"]);
}

#[test]
fn test_csv_cells_keep_surrounding_spaces() {
    let content = "Region , Sex\nNorth ,  Female";
    let dataset = parse_csv_content(content, DataOrigin::Inline);

    assert_eq!(dataset.header, vec!["Region", "Sex"]);
    assert_eq!(dataset.rows[0].cells, vec!["North ", "  Female"]);
    assert_eq!(dataset.rows[0].field(Field::Sex), Some("Female"));
}

#[test]
fn test_csv_empty_content() {
    let dataset = parse_csv_content("", DataOrigin::Inline);
    assert!(dataset.header.is_empty());
    assert!(dataset.is_empty());

    let header_only = parse_csv_content("Region,Sex\n", DataOrigin::Inline);
    assert_eq!(header_only.column_count(), 2);
    assert!(header_only.is_empty());
}

#[test]
fn test_csv_lowercase_keys_resolve() {
    let content = "region,sex,mode_of_transmission\nA,Male,Sexual";
    let dataset = parse_csv_content(content, DataOrigin::Inline);

    assert_eq!(dataset.rows[0].field(Field::Region), Some("A"));
    assert_eq!(dataset.rows[0].field(Field::Transmission), Some("Sexual"));
}

#[test]
fn test_csv_empty_cell_is_missing_field() {
    let dataset = parse_csv_content("Region,Sex\n,Male", DataOrigin::Inline);
    assert_eq!(dataset.rows[0].field(Field::Region), None);
    assert_eq!(dataset.rows[0].cells[0], "");
}

// ============================================================================
// JSON
// ============================================================================

#[test]
fn test_json_array_of_objects() {
    let json = r#"[
        {"Region": "A", "Sex": "Male", "Count": 3},
        {"Region": "B", "Sex": null}
    ]"#;
    let dataset = parse_json_content(json, DataOrigin::Inline).unwrap();

    assert_eq!(dataset.header, vec!["Region", "Sex", "Count"]);
    assert_eq!(dataset.rows[0].cells, vec!["A", "Male", "3"]);
    assert_eq!(dataset.rows[1].cells, vec!["B", "", ""]);
    assert_eq!(dataset.rows[1].field(Field::Sex), None);
}

#[test]
fn test_json_wrapper_keys() {
    for key in ["data", "rows", "items", "records", "results"] {
        let json = format!(r#"{{"{key}": [{{"Region": "A"}}]}}"#);
        let dataset = parse_json_content(&json, DataOrigin::Inline).unwrap();
        assert_eq!(dataset.row_count(), 1, "wrapper key {key}");
    }
}

#[test]
fn test_json_error_object_is_payload_error() {
    let err = parse_json_content(r#"{"error": "quota exceeded"}"#, DataOrigin::Inline).unwrap_err();

    assert!(matches!(err, LoadError::Payload(ref msg) if msg == "quota exceeded"));
    assert_eq!(err.kind(), LoadErrorKind::Payload);
    assert_eq!(err.to_string(), "quota exceeded");
}

#[test]
fn test_json_non_object_elements_skipped() {
    let json = r#"[1, "two", {"Region": "A"}, null, {"Region": "B"}]"#;
    let dataset = parse_json_content(json, DataOrigin::Inline).unwrap();
    assert_eq!(dataset.row_count(), 2);
}

#[test]
fn test_json_invalid_shapes() {
    assert_eq!(
        parse_json_content("not json", DataOrigin::Inline)
            .unwrap_err()
            .kind(),
        LoadErrorKind::Parse
    );
    assert_eq!(
        parse_json_content(r#"{"meta": 1}"#, DataOrigin::Inline)
            .unwrap_err()
            .kind(),
        LoadErrorKind::Parse
    );
    assert_eq!(
        parse_json_content("42", DataOrigin::Inline)
            .unwrap_err()
            .kind(),
        LoadErrorKind::Parse
    );
}

#[test]
fn test_json_empty_array() {
    let dataset = parse_json_content("[]", DataOrigin::Inline).unwrap();
    assert!(dataset.is_empty());
    assert!(dataset.header.is_empty());
}

// ============================================================================
// Payload dispatch
// ============================================================================

#[test]
fn test_payload_dispatches_on_format() {
    let csv = Payload {
        body: "Region\nA".to_string(),
        format: PayloadFormat::Delimited,
        origin: DataOrigin::Inline,
    };
    assert_eq!(csv.into_dataset().unwrap().row_count(), 1);

    let json = Payload {
        body: r#"[{"Region": "A"}, {"Region": "B"}]"#.to_string(),
        format: PayloadFormat::Json,
        origin: DataOrigin::Inline,
    };
    assert_eq!(json.into_dataset().unwrap().row_count(), 2);
}
