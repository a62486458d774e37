//! Canonical normalization for raw order records.
//!
//! This module converts tagged raw records (`reader::RawRecord`) into
//! [`CanonicalOrder`] values: status codes are mapped through fixed per-source
//! tables, dates are parsed with a locale-independent chain, and amounts are
//! converted to integer micros with no floating point involved.
//!
//! It does **not**:
//! - read files (no readers)
//! - own the published collection (that is ohub-store)
//! - produce quality reporting (that is `report.rs`)
//!
//! Status normalization is total: an unmapped or absent code degrades to
//! `Unknown`, never an error. Date/amount coercion failures degrade the field
//! to `None` and keep the record.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use ohub_schemas::{CanonicalOrder, CanonicalStatus, SourceSystem};

use crate::reader::RawRecord;

// ---------------------------------------------------------------------------
// Status tables
// ---------------------------------------------------------------------------

/// Raw-code to canonical-status table for System A.
const SYSTEM_A_STATUS: &[(&str, CanonicalStatus)] = &[
    ("PEND", CanonicalStatus::Pending),
    ("PROC", CanonicalStatus::Processing),
    ("SHIP", CanonicalStatus::Shipped),
    ("COMP", CanonicalStatus::Completed),
    ("CANC", CanonicalStatus::Cancelled),
];

/// Raw-code to canonical-status table for System B.
const SYSTEM_B_STATUS: &[(&str, CanonicalStatus)] = &[
    ("1", CanonicalStatus::Pending),
    ("2", CanonicalStatus::Processing),
    ("3", CanonicalStatus::Shipped),
    ("4", CanonicalStatus::Completed),
    ("5", CanonicalStatus::Cancelled),
];

/// The status table for one source system.
///
/// Tables are static configuration data, not control flow: a new source
/// system adds a table here and nothing else changes in the mapping path.
pub fn status_table(system: SourceSystem) -> &'static [(&'static str, CanonicalStatus)] {
    match system {
        SourceSystem::SystemA => SYSTEM_A_STATUS,
        SourceSystem::SystemB => SYSTEM_B_STATUS,
    }
}

/// Map a raw source status code onto the canonical vocabulary.
///
/// Total function: any code outside the source's table (including an absent
/// one) is `Unknown`. Status fidelity is best-effort across heterogeneous
/// sources.
pub fn normalize_status(system: SourceSystem, raw: Option<&str>) -> CanonicalStatus {
    let Some(raw) = raw else {
        return CanonicalStatus::Unknown;
    };
    let raw = raw.trim();
    status_table(system)
        .iter()
        .find(|(code, _)| *code == raw)
        .map(|(_, status)| *status)
        .unwrap_or(CanonicalStatus::Unknown)
}

// ---------------------------------------------------------------------------
// Field coercion errors
// ---------------------------------------------------------------------------

/// Errors produced by per-record field coercion.
///
/// These never abort a load: `canonicalize` logs them and leaves the
/// offending field absent. They are public so the coercion rules can be
/// tested directly.
#[derive(Debug, PartialEq, Eq)]
pub enum CoercionError {
    /// The amount string was empty.
    EmptyAmount,
    /// The amount string could not be parsed as a decimal number.
    InvalidAmount { raw: String },
    /// The amount had more than 6 decimal places (ambiguous micro conversion).
    TooManyDecimalPlaces { raw: String },
    /// The amount does not fit in i64 micros.
    AmountOverflow { raw: String },
    /// The date string matched none of the accepted formats.
    UnparsableDate { raw: String },
}

impl fmt::Display for CoercionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoercionError::EmptyAmount => write!(f, "amount is empty"),
            CoercionError::InvalidAmount { raw } => {
                write!(f, "amount could not be parsed: '{raw}'")
            }
            CoercionError::TooManyDecimalPlaces { raw } => {
                write!(
                    f,
                    "amount has more than 6 decimal places \
                     (ambiguous micro conversion): '{raw}'"
                )
            }
            CoercionError::AmountOverflow { raw } => {
                write!(f, "amount does not fit in i64 micros: '{raw}'")
            }
            CoercionError::UnparsableDate { raw } => {
                write!(f, "date matched no accepted format: '{raw}'")
            }
        }
    }
}

impl std::error::Error for CoercionError {}

// ---------------------------------------------------------------------------
// Amount conversion
// ---------------------------------------------------------------------------

/// Convert a decimal amount string to integer micros deterministically.
///
/// Rules:
/// - Accepts optional leading `+` or `-`.
/// - Accepts an optional fractional part separated by `.`.
/// - Rejects strings with more than 6 decimal places (would require rounding).
/// - Rejects empty strings, non-numeric characters, or multiple `.` separators.
/// - Does **not** use floating-point at any stage.
pub fn amount_to_micros(s: &str) -> Result<i64, CoercionError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(CoercionError::EmptyAmount);
    }

    // Handle optional sign.
    let (negative, digits) = if let Some(rest) = s.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = s.strip_prefix('+') {
        (false, rest)
    } else {
        (false, s)
    };

    if digits.is_empty() {
        return Err(CoercionError::InvalidAmount { raw: s.to_string() });
    }

    // Split on '.'.
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, f),
        None => (digits, ""),
    };

    let all_digits = |p: &str| p.chars().all(|c| c.is_ascii_digit());
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(CoercionError::InvalidAmount { raw: s.to_string() });
    }
    if !all_digits(int_part) || !all_digits(frac_part) {
        return Err(CoercionError::InvalidAmount { raw: s.to_string() });
    }

    if frac_part.len() > 6 {
        return Err(CoercionError::TooManyDecimalPlaces { raw: s.to_string() });
    }

    let int_val: i64 = if int_part.is_empty() {
        0
    } else {
        int_part
            .parse::<i64>()
            .map_err(|_| CoercionError::AmountOverflow { raw: s.to_string() })?
    };

    // Pad fractional part to exactly 6 digits, then parse.
    let mut frac_padded = frac_part.to_string();
    while frac_padded.len() < 6 {
        frac_padded.push('0');
    }
    let frac_val: i64 = frac_padded
        .parse::<i64>()
        .map_err(|_| CoercionError::InvalidAmount { raw: s.to_string() })?;

    let micros = int_val
        .checked_mul(1_000_000)
        .and_then(|v| v.checked_add(frac_val))
        .ok_or_else(|| CoercionError::AmountOverflow { raw: s.to_string() })?;

    Ok(if negative { -micros } else { micros })
}

// ---------------------------------------------------------------------------
// Date parsing
// ---------------------------------------------------------------------------

/// Parse an order date with a locale-independent chain.
///
/// Accepted forms, tried in order:
/// 1. RFC 3339 (`2024-01-05T08:30:00Z`)
/// 2. `YYYY-MM-DD HH:MM:SS`
/// 3. `YYYY-MM-DD`
pub fn parse_order_date(raw: &str) -> Result<NaiveDate, CoercionError> {
    let s = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Ok(dt.date());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| CoercionError::UnparsableDate {
        raw: raw.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Canonicalization
// ---------------------------------------------------------------------------

/// Convert one raw record into a [`CanonicalOrder`].
///
/// Total: structural validity was already settled by the reader, and field
/// coercion failures degrade to `None` (the record is kept for maximum data
/// visibility).
pub fn canonicalize(record: RawRecord) -> CanonicalOrder {
    match record {
        RawRecord::SystemA(raw) => {
            let status = normalize_status(SourceSystem::SystemA, raw.status.as_deref());
            let order_date = coerce_date(SourceSystem::SystemA, &raw.order_id, &raw.order_date);
            let total_amount_micros = coerce_amount(
                SourceSystem::SystemA,
                &raw.order_id,
                &raw.total_amount.to_string(),
            );
            CanonicalOrder {
                order_id: raw.order_id,
                source_system: SourceSystem::SystemA,
                customer_name: raw.customer,
                order_date,
                total_amount_micros,
                status,
            }
        }
        RawRecord::SystemB(raw) => {
            let status = normalize_status(SourceSystem::SystemB, raw.order_status.as_deref());
            let order_date = coerce_date(SourceSystem::SystemB, &raw.order_num, &raw.date_placed);
            let total_amount_micros =
                coerce_amount(SourceSystem::SystemB, &raw.order_num, &raw.total);
            CanonicalOrder {
                order_id: raw.order_num,
                source_system: SourceSystem::SystemB,
                customer_name: raw.client_name,
                order_date,
                total_amount_micros,
                status,
            }
        }
    }
}

fn coerce_date(system: SourceSystem, order_id: &str, raw: &str) -> Option<NaiveDate> {
    match parse_order_date(raw) {
        Ok(date) => Some(date),
        Err(err) => {
            tracing::warn!(%system, order_id, %err, "order date left absent");
            None
        }
    }
}

fn coerce_amount(system: SourceSystem, order_id: &str, raw: &str) -> Option<i64> {
    match amount_to_micros(raw) {
        Ok(micros) => Some(micros),
        Err(err) => {
            tracing::warn!(%system, order_id, %err, "total amount left absent");
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
