//! Load-quality report builder for canonicalized orders.
//!
//! Accepts the staged collection of a load pass and produces a [`LoadReport`]
//! covering:
//! - total record count
//! - per-source record counts and degraded fields (absent dates/amounts)
//! - per-source `Unknown` status counts
//! - order ids that appear more than once across the collection
//!
//! Collisions are *reported*, never resolved: id uniqueness across sources is
//! deliberately unenforced, and lookups stay first-match.
//!
//! This module does **not** read files or normalize records.

use std::collections::BTreeMap;
use std::fmt;

use ohub_schemas::{CanonicalOrder, CanonicalStatus, SourceSystem};

// ---------------------------------------------------------------------------
// Report types
// ---------------------------------------------------------------------------

/// Per-source ingestion tally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceTally {
    pub system: SourceSystem,
    /// Records ingested from this source.
    pub records: usize,
    /// Records whose order date failed coercion (left absent).
    pub missing_dates: usize,
    /// Records whose total amount failed coercion (left absent).
    pub missing_amounts: usize,
    /// Records whose raw status mapped to `Unknown`.
    pub unknown_statuses: usize,
}

/// An order id appearing more than once in the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdCollision {
    pub order_id: String,
    /// How many records carry the id (always >= 2).
    pub count: usize,
}

/// Summary statistics produced by [`build_load_report`].
#[derive(Debug, Clone)]
pub struct LoadReport {
    /// Total records across all sources.
    pub total_records: usize,
    /// Per-source tallies, ordered SystemA then SystemB (collection order).
    pub per_source: Vec<SourceTally>,
    /// Colliding order ids, sorted by id.
    pub id_collisions: Vec<IdCollision>,
}

impl LoadReport {
    /// Returns `true` when no field was degraded, no status fell back to
    /// `Unknown`, and no id collides.
    pub fn is_clean(&self) -> bool {
        self.id_collisions.is_empty()
            && self
                .per_source
                .iter()
                .all(|t| t.missing_dates == 0 && t.missing_amounts == 0 && t.unknown_statuses == 0)
    }
}

impl fmt::Display for LoadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "LoadReport {{")?;
        writeln!(f, "  total_records: {}", self.total_records)?;
        for t in &self.per_source {
            writeln!(
                f,
                "  {}: records={} missing_dates={} missing_amounts={} unknown_statuses={}",
                t.system, t.records, t.missing_dates, t.missing_amounts, t.unknown_statuses
            )?;
        }
        if self.id_collisions.is_empty() {
            writeln!(f, "  id_collisions: none")?;
        } else {
            writeln!(f, "  id_collisions:")?;
            for c in &self.id_collisions {
                writeln!(f, "    '{}' x{}", c.order_id, c.count)?;
            }
        }
        write!(f, "}}")
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Build a [`LoadReport`] over a staged collection.
pub fn build_load_report(orders: &[CanonicalOrder]) -> LoadReport {
    // Tally per source, keyed by wire name for deterministic ordering
    // (SystemA sorts before SystemB).
    let mut tallies: BTreeMap<&'static str, SourceTally> = BTreeMap::new();
    let mut id_counts: BTreeMap<&str, usize> = BTreeMap::new();

    for order in orders {
        let tally = tallies
            .entry(order.source_system.as_str())
            .or_insert_with(|| SourceTally {
                system: order.source_system,
                records: 0,
                missing_dates: 0,
                missing_amounts: 0,
                unknown_statuses: 0,
            });
        tally.records += 1;
        if order.order_date.is_none() {
            tally.missing_dates += 1;
        }
        if order.total_amount_micros.is_none() {
            tally.missing_amounts += 1;
        }
        if order.status == CanonicalStatus::Unknown {
            tally.unknown_statuses += 1;
        }

        *id_counts.entry(order.order_id.as_str()).or_insert(0) += 1;
    }

    let id_collisions = id_counts
        .into_iter()
        .filter(|(_, count)| *count >= 2)
        .map(|(order_id, count)| IdCollision {
            order_id: order_id.to_string(),
            count,
        })
        .collect();

    LoadReport {
        total_records: orders.len(),
        per_source: tallies.into_values().collect(),
        id_collisions,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
