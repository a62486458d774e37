//! System B reader: delimited tabular text with a header row.
//!
//! Streams data rows into [`RawOrderB`] values via the `csv` crate. The
//! header must name every required column; a data row whose column count
//! mismatches the header is a structural error. Type coercion of `total` and
//! `date_placed` happens later, in the normalizer (per-record policy).
//!
//! ## Column contract (exact names, order-independent)
//!
//! | Column         | Example      |
//! |----------------|--------------|
//! | `order_num`    | `B1`         |
//! | `client_name`  | `Bob`        |
//! | `date_placed`  | `2024-02-10` |
//! | `total`        | `50`         |
//! | `order_status` | `4`          |

use std::io;
use std::path::Path;

use serde::Deserialize;

use crate::IngestError;

/// Columns the header row must name.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    "order_num",
    "client_name",
    "date_placed",
    "total",
    "order_status",
];

// ---------------------------------------------------------------------------
// Raw record
// ---------------------------------------------------------------------------

/// One order exactly as emitted by System B. Transient, same lifecycle as
/// [`crate::json_reader::RawOrderA`].
///
/// `total` stays a string so the normalizer can convert it to integer micros
/// without floating point.
#[derive(Debug, Clone, Deserialize)]
pub struct RawOrderB {
    pub order_num: String,
    pub client_name: String,
    pub date_placed: String,
    pub total: String,
    /// Raw status digit (`"1"`..`"5"`). Empty maps to Unknown.
    #[serde(default)]
    pub order_status: Option<String>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Read the System B export at `path`.
///
/// A missing file is "nothing to ingest": returns an empty `Vec` and logs a
/// warning (same silent-skip policy as the System A reader). An existing file
/// must carry the full header; header or row-shape problems are structural
/// errors that fail the whole load for this source.
pub fn read_csv_file(path: &Path) -> Result<Vec<RawOrderB>, IngestError> {
    if !path.exists() {
        tracing::warn!(
            path = %path.display(),
            "system B export not found; ingesting zero records"
        );
        return Ok(Vec::new());
    }

    let file = std::fs::File::open(path)
        .map_err(|e| IngestError::Io(format!("open '{}': {e}", path.display())))?;
    parse_csv_reader(file)
}

/// Parse a System B export from any reader (useful for tests with in-memory
/// CSV text).
pub fn parse_csv_reader<R: io::Read>(rdr: R) -> Result<Vec<RawOrderB>, IngestError> {
    let mut csv = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(rdr);

    let headers = csv
        .headers()
        .map_err(|e| IngestError::Io(format!("read csv header: {e}")))?
        .clone();
    for required in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == required) {
            return Err(IngestError::MissingHeader(required.to_string()));
        }
    }

    let mut out = Vec::new();
    for (i, record) in csv.deserialize::<RawOrderB>().enumerate() {
        // Header is line 1; first data row is line 2.
        let row = i + 2;
        out.push(record.map_err(|e| IngestError::Row {
            row,
            msg: e.to_string(),
        })?);
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "order_num,client_name,date_placed,total,order_status";

    #[test]
    fn rows_parse_in_file_order() {
        let csv = format!("{HEADER}\nB1,Bob,2024-02-10,50,4\nB2,Cara,2024-02-12,75.25,1");
        let records = parse_csv_reader(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].order_num, "B1");
        assert_eq!(records[0].client_name, "Bob");
        assert_eq!(records[0].date_placed, "2024-02-10");
        assert_eq!(records[0].total, "50");
        assert_eq!(records[0].order_status.as_deref(), Some("4"));
        assert_eq!(records[1].order_num, "B2");
    }

    #[test]
    fn header_only_returns_empty_vec() {
        assert!(parse_csv_reader(HEADER.as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn missing_required_header_is_structural_error() {
        // 'total' column stripped out.
        let csv = "order_num,client_name,date_placed,order_status\nB1,Bob,2024-02-10,4";
        let err = parse_csv_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, IngestError::MissingHeader(col) if col == "total"));
    }

    #[test]
    fn empty_input_is_missing_header() {
        let err = parse_csv_reader("".as_bytes()).unwrap_err();
        assert!(matches!(err, IngestError::MissingHeader(_)));
    }

    #[test]
    fn short_row_is_structural_error() {
        let csv = format!("{HEADER}\nB1,Bob,2024-02-10,50,4\nB2,Cara");
        let err = parse_csv_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, IngestError::Row { row: 3, .. }));
    }

    #[test]
    fn columns_may_appear_in_any_order() {
        let csv = "total,order_num,order_status,client_name,date_placed\n50,B1,4,Bob,2024-02-10";
        let records = parse_csv_reader(csv.as_bytes()).unwrap();
        assert_eq!(records[0].order_num, "B1");
        assert_eq!(records[0].total, "50");
    }

    #[test]
    fn quoted_field_with_comma_is_one_column() {
        let csv = format!("{HEADER}\nB1,\"Bob, Jr.\",2024-02-10,50,4");
        let records = parse_csv_reader(csv.as_bytes()).unwrap();
        assert_eq!(records[0].client_name, "Bob, Jr.");
    }

    #[test]
    fn padded_fields_are_trimmed() {
        let csv = format!("{HEADER}\n B1 , Bob , 2024-02-10 , 50 , 4 ");
        let records = parse_csv_reader(csv.as_bytes()).unwrap();
        assert_eq!(records[0].order_num, "B1");
        assert_eq!(records[0].order_status.as_deref(), Some("4"));
    }

    #[test]
    fn unparseable_total_passes_through_raw() {
        // Coercion is the normalizer's job; the reader keeps the raw text.
        let csv = format!("{HEADER}\nB1,Bob,2024-02-10,not-a-number,4");
        let records = parse_csv_reader(csv.as_bytes()).unwrap();
        assert_eq!(records[0].total, "not-a-number");
    }

    #[test]
    fn missing_file_ingests_zero_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_such_export.csv");
        assert!(read_csv_file(&path).unwrap().is_empty());
    }

    #[test]
    fn file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("system_b_orders.csv");
        std::fs::write(&path, format!("{HEADER}\nB1,Bob,2024-02-10,50,4\n")).unwrap();
        let records = read_csv_file(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].order_num, "B1");
    }
}
