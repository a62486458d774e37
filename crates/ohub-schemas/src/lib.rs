//! Shared canonical order model for the order hub.
//!
//! Types here are `Serialize + Deserialize` so they can be JSON-encoded at the
//! presentation boundary and decoded by tests. No ingestion or query logic
//! lives in this crate.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Source system
// ---------------------------------------------------------------------------

/// Upstream system an order record was ingested from.
///
/// The string forms (`"SystemA"`, `"SystemB"`) are the wire values carried in
/// the canonical representation; adding a source means adding a variant here
/// plus a status table entry in the ingest crate, with no control-flow edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceSystem {
    SystemA,
    SystemB,
}

impl SourceSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceSystem::SystemA => "SystemA",
            SourceSystem::SystemB => "SystemB",
        }
    }
}

impl fmt::Display for SourceSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Canonical status
// ---------------------------------------------------------------------------

/// Unified status vocabulary all raw source codes map onto.
///
/// Invariant: a published [`CanonicalOrder`] always carries one of these six
/// values, never an unmapped raw code. Unmapped codes degrade to `Unknown`
/// at normalization time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CanonicalStatus {
    Pending,
    Processing,
    Shipped,
    Completed,
    Cancelled,
    Unknown,
}

impl CanonicalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalStatus::Pending => "Pending",
            CanonicalStatus::Processing => "Processing",
            CanonicalStatus::Shipped => "Shipped",
            CanonicalStatus::Completed => "Completed",
            CanonicalStatus::Cancelled => "Cancelled",
            CanonicalStatus::Unknown => "Unknown",
        }
    }

    /// Case-insensitive lookup by canonical name, for query filters.
    ///
    /// Returns `None` for anything that is not one of the six canonical names;
    /// callers decide whether that means "matches nothing" or "bad input".
    pub fn from_name_ci(s: &str) -> Option<Self> {
        let s = s.trim();
        [
            CanonicalStatus::Pending,
            CanonicalStatus::Processing,
            CanonicalStatus::Shipped,
            CanonicalStatus::Completed,
            CanonicalStatus::Cancelled,
            CanonicalStatus::Unknown,
        ]
        .into_iter()
        .find(|status| status.as_str().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for CanonicalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Canonical order
// ---------------------------------------------------------------------------

/// The unified order entity produced by a load pass.
///
/// Immutable once published. `order_id` is unique within a source but NOT
/// across sources; the model does not deduplicate colliding ids.
///
/// Amounts are integer micros (1 unit = 1_000_000 micros) so no floating
/// point is involved after the ingest boundary. A field is `None` when the
/// raw value failed per-record coercion; the record itself is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalOrder {
    pub order_id: String,
    pub source_system: SourceSystem,
    pub customer_name: String,
    pub order_date: Option<NaiveDate>,
    pub total_amount_micros: Option<i64>,
    pub status: CanonicalStatus,
}

impl CanonicalOrder {
    /// Total amount rendered back to a decimal string for the presentation
    /// boundary, or `None` when coercion left the field absent.
    pub fn total_amount(&self) -> Option<String> {
        self.total_amount_micros.map(micros_to_decimal)
    }
}

/// Render integer micros as a canonical decimal string.
///
/// Trailing fractional zeros are trimmed: `100_000_000` becomes `"100"`,
/// `1_500_000` becomes `"1.5"`, `-250_000` becomes `"-0.25"`.
pub fn micros_to_decimal(micros: i64) -> String {
    let negative = micros < 0;
    let abs = micros.unsigned_abs();
    let int_part = abs / 1_000_000;
    let frac_part = abs % 1_000_000;

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&int_part.to_string());

    if frac_part != 0 {
        let mut frac = format!("{frac_part:06}");
        while frac.ends_with('0') {
            frac.pop();
        }
        out.push('.');
        out.push_str(&frac);
    }
    out
}

// ---------------------------------------------------------------------------
// Presentation shape
// ---------------------------------------------------------------------------

/// The order representation exchanged with the presentation layer.
///
/// Field names follow the original export vocabulary (camelCase); amounts are
/// decimal strings, nullable where per-record coercion left a field absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentationOrder {
    pub order_id: String,
    pub source_system: String,
    pub customer_name: String,
    pub order_date: Option<NaiveDate>,
    pub total_amount: Option<String>,
    pub status: String,
}

impl From<&CanonicalOrder> for PresentationOrder {
    fn from(order: &CanonicalOrder) -> Self {
        PresentationOrder {
            order_id: order.order_id.clone(),
            source_system: order.source_system.as_str().to_string(),
            customer_name: order.customer_name.clone(),
            order_date: order.order_date,
            total_amount: order.total_amount(),
            status: order.status.as_str().to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_from_name_ci_accepts_any_casing() {
        assert_eq!(
            CanonicalStatus::from_name_ci("shipped"),
            Some(CanonicalStatus::Shipped)
        );
        assert_eq!(
            CanonicalStatus::from_name_ci("SHIPPED"),
            Some(CanonicalStatus::Shipped)
        );
        assert_eq!(
            CanonicalStatus::from_name_ci(" Pending "),
            Some(CanonicalStatus::Pending)
        );
        assert_eq!(CanonicalStatus::from_name_ci("SHIP"), None);
        assert_eq!(CanonicalStatus::from_name_ci(""), None);
    }

    #[test]
    fn micros_to_decimal_rendering() {
        assert_eq!(micros_to_decimal(100_000_000), "100");
        assert_eq!(micros_to_decimal(1_500_000), "1.5");
        assert_eq!(micros_to_decimal(182_340_000), "182.34");
        assert_eq!(micros_to_decimal(-250_000), "-0.25");
        assert_eq!(micros_to_decimal(0), "0");
        assert_eq!(micros_to_decimal(1), "0.000001");
    }

    #[test]
    fn presentation_order_uses_wire_names() {
        let order = CanonicalOrder {
            order_id: "A1".to_string(),
            source_system: SourceSystem::SystemA,
            customer_name: "Jane".to_string(),
            order_date: NaiveDate::from_ymd_opt(2024, 1, 5),
            total_amount_micros: Some(100_000_000),
            status: CanonicalStatus::Shipped,
        };

        let json = serde_json::to_value(PresentationOrder::from(&order)).unwrap();
        assert_eq!(json["orderId"], "A1");
        assert_eq!(json["sourceSystem"], "SystemA");
        assert_eq!(json["customerName"], "Jane");
        assert_eq!(json["orderDate"], "2024-01-05");
        assert_eq!(json["totalAmount"], "100");
        assert_eq!(json["status"], "Shipped");
    }

    #[test]
    fn presentation_order_nullable_fields() {
        let order = CanonicalOrder {
            order_id: "B9".to_string(),
            source_system: SourceSystem::SystemB,
            customer_name: "Bob".to_string(),
            order_date: None,
            total_amount_micros: None,
            status: CanonicalStatus::Unknown,
        };

        let json = serde_json::to_value(PresentationOrder::from(&order)).unwrap();
        assert!(json["orderDate"].is_null());
        assert!(json["totalAmount"].is_null());
    }
}
