//! Load orchestration and the query surface.
//!
//! The repository owns the only mutable handle to the order collection.
//! `load()` stages a fresh collection privately and publishes it with a
//! single atomic swap, so queries observe either the previous collection or
//! the new one, never a partially-rebuilt mix. Published snapshots are
//! shared as `Arc` and treated as immutable by every consumer.

use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};

use ohub_ingest::normalizer;
use ohub_ingest::reader::{CsvOrderReader, JsonOrderReader, SourceReader};
use ohub_ingest::report::{build_load_report, LoadReport};
use ohub_schemas::CanonicalOrder;
use tracing::{info, warn};
use uuid::Uuid;

use crate::types::{LoadError, SearchFilter, SourceFailure};

// ---------------------------------------------------------------------------
// Source wiring
// ---------------------------------------------------------------------------

/// One configured source: a reader plus the (optional) export location.
///
/// `path: None` behaves exactly like a missing file (zero records), so a
/// one-source deployment needs no dummy file on disk.
pub struct ConfiguredSource {
    pub reader: Box<dyn SourceReader>,
    pub path: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Repository
// ---------------------------------------------------------------------------

/// In-memory, reloadable repository over the canonical order collection.
pub struct OrderRepository {
    sources: Vec<ConfiguredSource>,
    collection: RwLock<Arc<Vec<CanonicalOrder>>>,
}

impl OrderRepository {
    /// Standard two-source wiring: System A (JSON) before System B (CSV).
    /// Source order defines collection order.
    pub fn new(system_a: Option<PathBuf>, system_b: Option<PathBuf>) -> Self {
        Self::with_sources(vec![
            ConfiguredSource {
                reader: Box::new(JsonOrderReader),
                path: system_a,
            },
            ConfiguredSource {
                reader: Box::new(CsvOrderReader),
                path: system_b,
            },
        ])
    }

    /// Custom source wiring, for tests and future source systems.
    pub fn with_sources(sources: Vec<ConfiguredSource>) -> Self {
        OrderRepository {
            sources,
            collection: RwLock::new(Arc::new(Vec::new())),
        }
    }

    /// Run a full load pass and atomically replace the published collection.
    ///
    /// Sources are independent: a structural failure in one does not prevent
    /// the others from being ingested. Surviving records are published first,
    /// then the failures (if any) are propagated so the caller can retry or
    /// report. Missing export files contribute zero records and are not
    /// failures.
    pub fn load(&self) -> Result<LoadReport, LoadError> {
        let load_id = Uuid::new_v4();
        let mut staged: Vec<CanonicalOrder> = Vec::new();
        let mut failures: Vec<SourceFailure> = Vec::new();

        for source in &self.sources {
            let system = source.reader.system();
            let Some(path) = &source.path else {
                info!(%load_id, %system, "no export path configured; skipping source");
                continue;
            };
            match source.reader.produce(path) {
                Ok(raw) => {
                    info!(%load_id, %system, records = raw.len(), "source ingested");
                    staged.extend(raw.into_iter().map(normalizer::canonicalize));
                }
                Err(error) => {
                    warn!(%load_id, %system, %error, "source failed; its records are absent");
                    failures.push(SourceFailure { system, error });
                }
            }
        }

        let report = build_load_report(&staged);

        *self
            .collection
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Arc::new(staged);

        info!(%load_id, total = report.total_records, "order collection published");
        if !report.is_clean() {
            info!(%load_id, report = %report, "load completed with degradations");
        }

        if failures.is_empty() {
            Ok(report)
        } else {
            Err(LoadError::Sources(failures))
        }
    }

    fn snapshot(&self) -> Arc<Vec<CanonicalOrder>> {
        Arc::clone(&self.collection.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// The full collection, in insertion order.
    pub fn get_all(&self) -> Arc<Vec<CanonicalOrder>> {
        self.snapshot()
    }

    /// The first record (in collection order) whose id matches, or `None`.
    ///
    /// Ids are not guaranteed globally unique across sources, so this is
    /// explicitly first-match, not unique-match.
    pub fn get_by_id(&self, order_id: &str) -> Option<CanonicalOrder> {
        self.snapshot()
            .iter()
            .find(|order| order.order_id == order_id)
            .cloned()
    }

    /// The subsequence matching all supplied filters, in collection order.
    ///
    /// Records with no parsed order date are excluded from date-ranged
    /// searches but included in unfiltered and status-only searches.
    pub fn search(&self, filter: &SearchFilter) -> Vec<CanonicalOrder> {
        self.snapshot()
            .iter()
            .filter(|order| matches(order, filter))
            .cloned()
            .collect()
    }
}

fn matches(order: &CanonicalOrder, filter: &SearchFilter) -> bool {
    if let Some(status) = &filter.status {
        if !order.status.as_str().eq_ignore_ascii_case(status.trim()) {
            return false;
        }
    }
    if let Some((start, end)) = filter.date_range() {
        match order.order_date {
            Some(date) => {
                if date < start || date > end {
                    return false;
                }
            }
            None => return false,
        }
    }
    true
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
