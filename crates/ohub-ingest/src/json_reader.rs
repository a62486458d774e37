//! System A reader: a JSON array of order objects.
//!
//! This module is the **read** side only: it deserializes the export into
//! [`RawOrderA`] values verbatim. Date strings and amounts pass through
//! untouched; the normalizer owns per-record coercion.
//!
//! ## Export shape
//!
//! ```json
//! [
//!   {"orderID": "A1", "customer": "Jane", "orderDate": "2024-01-05",
//!    "totalAmount": 100.0, "status": "SHIP"}
//! ]
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::IngestError;

// ---------------------------------------------------------------------------
// Raw record
// ---------------------------------------------------------------------------

/// One order exactly as emitted by System A. Transient; exists only during
/// the parsing of one export file.
///
/// `total_amount` stays a [`serde_json::Number`] so the normalizer can coerce
/// its exact textual form to integer micros without a float round-trip.
#[derive(Debug, Clone, Deserialize)]
pub struct RawOrderA {
    #[serde(rename = "orderID")]
    pub order_id: String,
    pub customer: String,
    #[serde(rename = "orderDate")]
    pub order_date: String,
    #[serde(rename = "totalAmount")]
    pub total_amount: serde_json::Number,
    /// Raw status code (`"PEND"`, `"PROC"`, ...). Absent maps to Unknown.
    #[serde(default)]
    pub status: Option<String>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Read the System A export at `path`.
///
/// A missing file is "nothing to ingest": returns an empty `Vec` and logs a
/// warning. An existing file must be a valid JSON array of the expected
/// shape; anything else is a structural [`IngestError::Json`] that fails the
/// whole load for this source.
pub fn read_json_file(path: &Path) -> Result<Vec<RawOrderA>, IngestError> {
    if !path.exists() {
        tracing::warn!(
            path = %path.display(),
            "system A export not found; ingesting zero records"
        );
        return Ok(Vec::new());
    }

    let raw = std::fs::read_to_string(path)
        .map_err(|e| IngestError::Io(format!("read '{}': {e}", path.display())))?;
    parse_json_str(&raw)
}

/// Parse a System A export from a string slice (useful for tests without
/// touching the filesystem).
pub fn parse_json_str(src: &str) -> Result<Vec<RawOrderA>, IngestError> {
    serde_json::from_str(src).map_err(|e| IngestError::Json(e.to_string()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
