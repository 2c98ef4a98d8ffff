//! Minimal CSV log parser for uploaded sensor logs.
//!
//! The contract is deliberately small: a literal comma-separated header
//! naming the active schema's features (plus an optional `timestamp`
//! column), then one reading per line. No quoting, no escapes; cells are
//! trimmed. Anything fancier belongs to the exporting side.

use std::collections::BTreeMap;

// ---

/// One data row: header name -> raw cell text. Cells missing at the end of
/// a short line are present with an empty value.
pub type Record = BTreeMap<String, String>;

/// Split a CSV log into its header and data records. Blank input yields an
/// empty header and no records; CRLF line endings are accepted.
pub fn parse(text: &str) -> (Vec<String>, Vec<Record>) {
    // ---
    let mut lines = text.trim().lines();

    let header: Vec<String> = match lines.next() {
        Some(line) => line.split(',').map(|h| h.trim().to_string()).collect(),
        None => return (Vec::new(), Vec::new()),
    };

    let records = lines
        .map(|line| {
            let cols: Vec<&str> = line.split(',').collect();
            header
                .iter()
                .enumerate()
                .map(|(i, name)| {
                    let cell = cols.get(i).map(|c| c.trim()).unwrap_or("");
                    (name.clone(), cell.to_string())
                })
                .collect::<Record>()
        })
        .collect();

    (header, records)
}
