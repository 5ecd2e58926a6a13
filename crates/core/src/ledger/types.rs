//! Ledger entry domain types.

use chrono::{DateTime, NaiveDate, Utc};
use kabadi_shared::types::{CustomerId, LedgerEntryId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::balance::BalanceSource;
use crate::customer::CustomerRef;

/// The kind of scrap battery a ledger entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatteryType {
    /// Whole scrap batteries.
    Battery,
    /// Broken battery plates ("gutka").
    Gutka,
}

/// One weighing in an entry's append-only weight log.
///
/// Each add-weight action appends exactly one log, timestamped at insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightLog {
    /// Weight added by this action, in kilograms.
    pub weight: Decimal,
    /// When the weighing was recorded.
    pub time: DateTime<Utc>,
}

/// A daily ledger entry for one customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    /// Entry ID.
    pub id: LedgerEntryId,
    /// Owning customer.
    pub customer_id: CustomerId,
    /// Business date of the entry.
    pub date: NaiveDate,
    /// Battery type; absent on payment-only entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battery_type: Option<BatteryType>,
    /// Total weight in kilograms.
    pub total_weight: Decimal,
    /// Purchase rate per kilogram.
    pub rate_per_kg: Decimal,
    /// Amount owed to the business: `total_weight * rate_per_kg`.
    pub credit: Decimal,
    /// Amount paid out against this entry.
    pub debit: Decimal,
    /// Stored balance snapshot at write time. Not a source of truth: reads
    /// recompute the running balance and this value may drift between
    /// writes.
    pub balance: Decimal,
    /// Append-only weight log; once non-empty, `total_weight` is its sum.
    #[serde(default)]
    pub weight_logs: Vec<WeightLog>,
    /// Optional free-text notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// True for standalone cash receipts with no priced transaction.
    pub is_payment_only: bool,
    /// Creation timestamp; the same-date tie-break in ledger order.
    pub created_at: DateTime<Utc>,
}

impl BalanceSource for LedgerEntry {
    fn entry_date(&self) -> NaiveDate {
        self.date
    }

    fn recorded_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn credit(&self) -> Decimal {
        self.credit
    }

    fn debit(&self) -> Decimal {
        self.debit
    }
}

/// Raw input for creating or re-deriving a ledger entry.
#[derive(Debug, Clone)]
pub struct LedgerEntryInput {
    /// The owning customer.
    pub customer: CustomerRef,
    /// Business date.
    pub date: NaiveDate,
    /// Battery type; required unless payment-only.
    pub battery_type: Option<BatteryType>,
    /// Total weight in kilograms; required unless payment-only.
    pub total_weight: Option<Decimal>,
    /// Rate per kilogram; required unless payment-only.
    pub rate_per_kg: Option<Decimal>,
    /// Amount paid out; defaults to 0, required positive when payment-only.
    pub debit: Option<Decimal>,
    /// Optional notes.
    pub notes: Option<String>,
    /// True for a standalone cash receipt.
    pub is_payment_only: bool,
}

/// The derived numeric fields of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerDerived {
    /// Battery type; `None` on payment-only entries.
    pub battery_type: Option<BatteryType>,
    /// Validated total weight (zero on payment-only entries).
    pub total_weight: Decimal,
    /// Validated rate (zero on payment-only entries).
    pub rate_per_kg: Decimal,
    /// `round2(total_weight * rate_per_kg)`, zero on payment-only entries.
    pub credit: Decimal,
    /// Validated debit.
    pub debit: Decimal,
}
