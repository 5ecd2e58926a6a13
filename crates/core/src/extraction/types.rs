//! Lead extraction domain types.

use chrono::{DateTime, NaiveDate, Utc};
use kabadi_shared::types::{CustomerId, LeadExtractionId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::customer::CustomerRef;

/// A lead extraction record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadExtraction {
    /// Record ID.
    pub id: LeadExtractionId,
    /// Owning customer, when the batch belongs to one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<CustomerId>,
    /// Business date.
    pub date: NaiveDate,
    /// What the batch is.
    pub description: String,
    /// Input battery weight in kilograms.
    pub battery_weight: Decimal,
    /// Assumed lead yield percentage, in (0, 100].
    pub lead_percentage: Decimal,
    /// Expected lead: `round2(battery_weight * lead_percentage / 100)`.
    pub lead_weight: Decimal,
    /// Lead received back so far.
    pub lead_received: Decimal,
    /// Outstanding lead: `round2(lead_weight - lead_received)`.
    pub lead_pending: Decimal,
    /// Completion percentage, 0 when no lead is expected.
    pub percentage: Decimal,
    /// Optional free-text notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// True for a standalone lead receipt not tied to an extraction batch.
    pub is_lead_received_only: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Raw input for creating or re-deriving a lead extraction record.
#[derive(Debug, Clone)]
pub struct LeadExtractionInput {
    /// Owning customer, if any.
    pub customer: Option<CustomerRef>,
    /// Business date.
    pub date: NaiveDate,
    /// What the batch is.
    pub description: String,
    /// Input battery weight; required unless received-only.
    pub battery_weight: Option<Decimal>,
    /// Assumed yield percentage; out-of-range or absent values fall back to
    /// the configured default.
    pub lead_percentage: Option<Decimal>,
    /// Lead received so far. `None` defaults to 0 on normal entries; an
    /// explicit 0 is legitimate and means the same thing.
    pub lead_received: Option<Decimal>,
    /// Optional notes.
    pub notes: Option<String>,
    /// True for a standalone lead receipt.
    pub is_lead_received_only: bool,
}

/// The derived numeric fields of a lead extraction record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionDerived {
    /// Validated battery weight (zero on received-only entries).
    pub battery_weight: Decimal,
    /// Effective yield percentage after the default fallback.
    pub lead_percentage: Decimal,
    /// Expected lead weight.
    pub lead_weight: Decimal,
    /// Validated lead received.
    pub lead_received: Decimal,
    /// Outstanding lead.
    pub lead_pending: Decimal,
    /// Completion percentage.
    pub percentage: Decimal,
}
