//! Test fixtures for the order hub.
//!
//! Writes realistic System A / System B export files into a directory so
//! scenario tests can drive the real readers end to end instead of mocking
//! them.

use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Header row of a System B export.
pub const SYSTEM_B_HEADER: [&str; 5] = [
    "order_num",
    "client_name",
    "date_placed",
    "total",
    "order_status",
];

/// A fresh temp directory for fixture files; removed on drop.
pub fn fixture_dir() -> Result<tempfile::TempDir> {
    tempfile::tempdir().context("create fixture dir")
}

/// One System A export record in wire shape.
pub fn system_a_record(
    order_id: &str,
    customer: &str,
    order_date: &str,
    total_amount: f64,
    status: &str,
) -> Value {
    json!({
        "orderID": order_id,
        "customer": customer,
        "orderDate": order_date,
        "totalAmount": total_amount,
        "status": status,
    })
}

/// Write a System A JSON export into `dir` and return its path.
pub fn write_system_a_json(dir: &Path, records: &[Value]) -> Result<PathBuf> {
    let path = dir.join("system_a_orders.json");
    let body = serde_json::to_string_pretty(records).context("serialize system A fixture")?;
    fs::write(&path, body).with_context(|| format!("write {}", path.display()))?;
    Ok(path)
}

/// Write a System B CSV export into `dir` and return its path.
///
/// Rows are `[order_num, client_name, date_placed, total, order_status]`.
pub fn write_system_b_csv(dir: &Path, rows: &[[&str; 5]]) -> Result<PathBuf> {
    let path = dir.join("system_b_orders.csv");
    let mut writer =
        csv::Writer::from_path(&path).with_context(|| format!("open {}", path.display()))?;
    writer
        .write_record(SYSTEM_B_HEADER)
        .context("write system B header")?;
    for row in rows {
        writer.write_record(row).context("write system B row")?;
    }
    writer.flush().context("flush system B fixture")?;
    Ok(path)
}

/// Write arbitrary file contents into `dir` (for malformed-export fixtures).
pub fn write_file(dir: &Path, name: &str, contents: &str) -> Result<PathBuf> {
    let path = dir.join(name);
    fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
    Ok(path)
}
