//! Summary data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Summary over a selection of ledger entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSummary {
    /// Number of entries in the selection.
    pub total_entries: usize,
    /// Sum of entry weights.
    pub total_weight: Decimal,
    /// Sum of credits.
    pub total_credit: Decimal,
    /// Sum of debits.
    pub total_debit: Decimal,
    /// `total_credit - total_debit` over the selection.
    pub closing_balance: Decimal,
}

/// Summary over a selection of lead extraction records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionSummary {
    /// Number of records in the selection.
    pub total_entries: usize,
    /// Sum of input battery weights.
    pub total_battery_weight: Decimal,
    /// Sum of expected lead weights.
    pub total_lead_weight: Decimal,
    /// Sum of lead received.
    pub total_lead_received: Decimal,
    /// Sum of lead still pending.
    pub total_lead_pending: Decimal,
    /// `total_lead_received / total_lead_weight * 100`, 0 when nothing is
    /// expected.
    pub average_completion: Decimal,
}

/// Summary over a selection of lead selling records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellingSummary {
    /// Number of records in the selection.
    pub total_entries: usize,
    /// Sum of lead weights sold.
    pub total_weight: Decimal,
    /// Sum of credits.
    pub total_credit: Decimal,
    /// Sum of debits.
    pub total_debit: Decimal,
    /// `total_credit - total_debit` over the selection.
    pub closing_balance: Decimal,
}

/// Summary over a customer-name search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSummary {
    /// Number of matched entries.
    pub total_entries: usize,
    /// Number of distinct customers among the matches.
    pub unique_customers: usize,
}
