//! Summary computation service.

use std::collections::HashSet;

use rust_decimal::Decimal;

use kabadi_shared::types::{CustomerId, round_percent};

use super::types::{ExtractionSummary, LedgerSummary, SearchSummary, SellingSummary};
use crate::extraction::LeadExtraction;
use crate::ledger::LedgerEntry;
use crate::selling::LeadSelling;

/// Service computing aggregate summaries over record selections.
pub struct SummaryService;

impl SummaryService {
    /// Summarizes a selection of ledger entries.
    #[must_use]
    pub fn ledger_summary(entries: &[LedgerEntry]) -> LedgerSummary {
        let total_weight: Decimal = entries.iter().map(|e| e.total_weight).sum();
        let total_credit: Decimal = entries.iter().map(|e| e.credit).sum();
        let total_debit: Decimal = entries.iter().map(|e| e.debit).sum();

        LedgerSummary {
            total_entries: entries.len(),
            total_weight,
            total_credit,
            total_debit,
            closing_balance: total_credit - total_debit,
        }
    }

    /// Summarizes a selection of lead extraction records.
    ///
    /// `average_completion` is 0 when no lead is expected over the
    /// selection; the ratio never divides by zero.
    #[must_use]
    pub fn extraction_summary(records: &[LeadExtraction]) -> ExtractionSummary {
        let total_battery_weight: Decimal = records.iter().map(|r| r.battery_weight).sum();
        let total_lead_weight: Decimal = records.iter().map(|r| r.lead_weight).sum();
        let total_lead_received: Decimal = records.iter().map(|r| r.lead_received).sum();
        let total_lead_pending: Decimal = records.iter().map(|r| r.lead_pending).sum();

        let average_completion = if total_lead_weight > Decimal::ZERO {
            round_percent(total_lead_received / total_lead_weight * Decimal::ONE_HUNDRED)
        } else {
            Decimal::ZERO
        };

        ExtractionSummary {
            total_entries: records.len(),
            total_battery_weight,
            total_lead_weight,
            total_lead_received,
            total_lead_pending,
            average_completion,
        }
    }

    /// Summarizes a selection of lead selling records.
    #[must_use]
    pub fn selling_summary(records: &[LeadSelling]) -> SellingSummary {
        let total_weight: Decimal = records.iter().map(|r| r.weight).sum();
        let total_credit: Decimal = records.iter().map(|r| r.credit).sum();
        let total_debit: Decimal = records.iter().map(|r| r.debit).sum();

        SellingSummary {
            total_entries: records.len(),
            total_weight,
            total_credit,
            total_debit,
            closing_balance: total_credit - total_debit,
        }
    }

    /// Summarizes a name-search result from the matched entries' customer
    /// ids.
    #[must_use]
    pub fn search_summary(customer_ids: &[CustomerId]) -> SearchSummary {
        let unique: HashSet<CustomerId> = customer_ids.iter().copied().collect();

        SearchSummary {
            total_entries: customer_ids.len(),
            unique_customers: unique.len(),
        }
    }
}
