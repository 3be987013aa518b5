//! Delimited text parsing
//!
//! Parses comma-separated case records into a [`Dataset`].
//!
//! ## Limitations
//!
//! Fields are split on every comma: quoted fields and embedded commas are
//! not supported. A line whose field count differs from the header's is
//! dropped rather than padded or truncated.

use crate::types::{CaseFields, DataOrigin, Dataset, Row};
use tracing::debug;

/// Field delimiter for case files
pub const DELIMITER: char = ',';

/// Parse delimited content from a string
///
/// Blank lines are discarded, the first remaining line is the header and
/// every other line becomes a row when its field count matches the header.
/// Empty content yields an empty header and no rows.
pub fn parse_csv_content(content: &str, origin: DataOrigin) -> Dataset {
    let mut lines = content.lines().filter(|line| !line.trim().is_empty());

    let Some(header_line) = lines.next() else {
        return Dataset::empty(origin);
    };
    let header: Vec<String> = split_line(header_line)
        .into_iter()
        .map(|name| name.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    let mut dropped = 0usize;
    for (line_no, line) in lines.enumerate() {
        let values = split_line(line);
        if values.len() != header.len() {
            debug!(
                line = line_no + 2,
                fields = values.len(),
                expected = header.len(),
                "dropping line with mismatched field count"
            );
            dropped += 1;
            continue;
        }

        let fields = CaseFields::resolve(|key| {
            header
                .iter()
                .position(|name| name == key)
                .map(|i| values[i])
        });
        let cells = values.iter().map(|v| v.to_string()).collect();
        rows.push(Row::new(cells, fields));
    }

    if dropped > 0 {
        debug!(dropped, kept = rows.len(), "parsed delimited content");
    }

    Dataset {
        header,
        rows,
        origin,
    }
}

/// Split a line on the delimiter; values are kept as written
fn split_line(line: &str) -> Vec<&str> {
    line.split(DELIMITER).collect()
}
