//! Lead selling domain types.

use chrono::{DateTime, NaiveDate, Utc};
use kabadi_shared::types::{CustomerId, LeadSellingId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::balance::BalanceSource;
use crate::customer::CustomerRef;

/// A lead selling record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadSelling {
    /// Record ID.
    pub id: LeadSellingId,
    /// The buyer.
    pub customer_id: CustomerId,
    /// Business date.
    pub date: NaiveDate,
    /// Transport charge added on top of the sale.
    pub commute_rent: Decimal,
    /// Lead weight sold, in kilograms.
    pub weight: Decimal,
    /// Sale rate per kilogram.
    pub rate: Decimal,
    /// Payment received against this record.
    pub debit: Decimal,
    /// `round2(weight * rate + commute_rent)`.
    pub credit: Decimal,
    /// Per-record balance: `round2(credit - debit)`. The running view
    /// across records is recomputed on read.
    pub balance: Decimal,
    /// Optional free-text notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// True for standalone payment receipts.
    pub is_payment_only: bool,
    /// Creation timestamp; the same-date tie-break in ledger order.
    pub created_at: DateTime<Utc>,
}

impl BalanceSource for LeadSelling {
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

/// Raw input for creating or re-deriving a lead selling record.
#[derive(Debug, Clone)]
pub struct LeadSellingInput {
    /// The buyer.
    pub customer: CustomerRef,
    /// Business date.
    pub date: NaiveDate,
    /// Transport charge; defaults to 0.
    pub commute_rent: Option<Decimal>,
    /// Lead weight; required unless payment-only.
    pub weight: Option<Decimal>,
    /// Rate per kilogram; required unless payment-only.
    pub rate: Option<Decimal>,
    /// Payment received; defaults to 0, required positive when
    /// payment-only.
    pub debit: Option<Decimal>,
    /// Optional notes.
    pub notes: Option<String>,
    /// True for a standalone payment receipt.
    pub is_payment_only: bool,
}

/// The derived numeric fields of a lead selling record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SellingDerived {
    /// Validated commute rent (zero on payment-only records).
    pub commute_rent: Decimal,
    /// Validated weight (zero on payment-only records).
    pub weight: Decimal,
    /// Validated rate (zero on payment-only records).
    pub rate: Decimal,
    /// Validated debit.
    pub debit: Decimal,
    /// Derived credit.
    pub credit: Decimal,
    /// Derived per-record balance.
    pub balance: Decimal,
}
