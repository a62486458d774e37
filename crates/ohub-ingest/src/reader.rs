//! Source reader boundary.
//!
//! This module defines the tagged raw-record type and the object-safe reader
//! trait over it. Concrete parsing lives in `json_reader` / `csv_reader`;
//! normalization lives in `normalizer`. Supporting a new source system means
//! one more [`SourceReader`] impl plus a status table entry; the repository
//! never branches on the pair.

use std::path::Path;

use ohub_schemas::SourceSystem;

use crate::csv_reader::{self, RawOrderB};
use crate::json_reader::{self, RawOrderA};
use crate::IngestError;

// ---------------------------------------------------------------------------
// Tagged raw record
// ---------------------------------------------------------------------------

/// A source-shaped order record prior to normalization.
#[derive(Debug, Clone)]
pub enum RawRecord {
    SystemA(RawOrderA),
    SystemB(RawOrderB),
}

impl RawRecord {
    pub fn system(&self) -> SourceSystem {
        match self {
            RawRecord::SystemA(_) => SourceSystem::SystemA,
            RawRecord::SystemB(_) => SourceSystem::SystemB,
        }
    }
}

// ---------------------------------------------------------------------------
// Reader trait
// ---------------------------------------------------------------------------

/// Upstream source reader contract.
///
/// Implementations must be object-safe so the repository can hold a
/// `Box<dyn SourceReader>` per configured source without knowing the concrete
/// type, and `Send + Sync` so a hosting process can share the repository.
pub trait SourceReader: Send + Sync {
    /// Which source system this reader ingests.
    fn system(&self) -> SourceSystem;

    /// Produce all raw records from the export at `path`.
    ///
    /// A missing file yields `Ok(empty)`; structural problems in an existing
    /// file yield `Err` and fail the load for this source only.
    fn produce(&self, path: &Path) -> Result<Vec<RawRecord>, IngestError>;
}

/// Reader for the System A JSON export.
#[derive(Debug, Default)]
pub struct JsonOrderReader;

impl SourceReader for JsonOrderReader {
    fn system(&self) -> SourceSystem {
        SourceSystem::SystemA
    }

    fn produce(&self, path: &Path) -> Result<Vec<RawRecord>, IngestError> {
        Ok(json_reader::read_json_file(path)?
            .into_iter()
            .map(RawRecord::SystemA)
            .collect())
    }
}

/// Reader for the System B CSV export.
#[derive(Debug, Default)]
pub struct CsvOrderReader;

impl SourceReader for CsvOrderReader {
    fn system(&self) -> SourceSystem {
        SourceSystem::SystemB
    }

    fn produce(&self, path: &Path) -> Result<Vec<RawRecord>, IngestError> {
        Ok(csv_reader::read_csv_file(path)?
            .into_iter()
            .map(RawRecord::SystemB)
            .collect())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readers_are_object_safe_via_box() {
        let readers: Vec<Box<dyn SourceReader>> =
            vec![Box::new(JsonOrderReader), Box::new(CsvOrderReader)];
        assert_eq!(readers[0].system(), SourceSystem::SystemA);
        assert_eq!(readers[1].system(), SourceSystem::SystemB);
    }

    #[test]
    fn json_reader_tags_records_system_a() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("system_a_orders.json");
        std::fs::write(
            &path,
            r#"[{"orderID": "A1", "customer": "Jane", "orderDate": "2024-01-05",
                "totalAmount": 100.0, "status": "SHIP"}]"#,
        )
        .unwrap();

        let records = JsonOrderReader.produce(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].system(), SourceSystem::SystemA);
    }

    #[test]
    fn csv_reader_tags_records_system_b() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("system_b_orders.csv");
        std::fs::write(
            &path,
            "order_num,client_name,date_placed,total,order_status\nB1,Bob,2024-02-10,50,4\n",
        )
        .unwrap();

        let records = CsvOrderReader.produce(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].system(), SourceSystem::SystemB);
    }

    #[test]
    fn both_readers_skip_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let gone = dir.path().join("gone");
        assert!(JsonOrderReader.produce(&gone).unwrap().is_empty());
        assert!(CsvOrderReader.produce(&gone).unwrap().is_empty());
    }
}
