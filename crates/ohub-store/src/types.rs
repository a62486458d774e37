use std::fmt;

use chrono::NaiveDate;
use ohub_ingest::IngestError;
use ohub_schemas::SourceSystem;

// ---------------------------------------------------------------------------
// Search filter
// ---------------------------------------------------------------------------

/// Query filters for [`crate::OrderRepository::search`].
///
/// All fields are optional and combine with AND. With no fields set, the
/// search returns the full collection.
#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    /// Canonical status name, matched case-insensitively.
    pub status: Option<String>,
    /// Inclusive range start; only applied together with `end_date`.
    pub start_date: Option<NaiveDate>,
    /// Inclusive range end; only applied together with `start_date`.
    pub end_date: Option<NaiveDate>,
}

impl SearchFilter {
    /// The date range to apply, present only when BOTH bounds are supplied.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Load errors
// ---------------------------------------------------------------------------

/// A structural ingestion failure for one source during a load pass.
#[derive(Debug)]
pub struct SourceFailure {
    pub system: SourceSystem,
    pub error: IngestError,
}

impl fmt::Display for SourceFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.system, self.error)
    }
}

/// Error returned by [`crate::OrderRepository::load`].
///
/// Sources are independent: by the time this is returned, every source that
/// read cleanly has already been published. The failures listed here name the
/// sources whose records are absent from the published collection.
#[derive(Debug)]
pub enum LoadError {
    Sources(Vec<SourceFailure>),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Sources(failures) => {
                write!(f, "load failed for {} source(s): ", failures.len())?;
                for (i, failure) in failures.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{failure}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for LoadError {}
