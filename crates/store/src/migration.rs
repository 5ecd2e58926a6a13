//! Re-runnable derived-field backfill.
//!
//! Legacy documents predate parts of the derivation rules: credits written
//! before weight logs existed, balances that drifted from the replay, yield
//! fields never computed. The backfill recomputes every derived field and
//! rewrites only the documents that differ, so a second run after a
//! successful pass reports everything skipped.
//!
//! Failures are collected per item; the batch never aborts on the first bad
//! document.

use std::collections::HashMap;

use serde_json::Value;
use uuid::Uuid;

use kabadi_core::balance;
use kabadi_core::extraction::{LeadExtraction, LeadExtractionInput, derive_extraction_fields};
use kabadi_core::ledger::{LedgerEntry, LedgerEntryInput, apply_weight_logs, derive_entry_fields};
use kabadi_core::selling::{LeadSelling, LeadSellingInput, derive_selling_fields};
use kabadi_shared::config::LedgerConfig;
use kabadi_shared::types::CustomerId;

use crate::document::{Document, DocumentStore};
use crate::error::StoreError;

/// One document the backfill could not process.
#[derive(Debug, Clone)]
pub struct MigrationFailure {
    /// Collection the document lives in.
    pub collection: &'static str,
    /// Document id.
    pub id: Uuid,
    /// Why it was left untouched.
    pub reason: String,
}

/// Partial-success summary of a backfill run.
#[derive(Debug, Clone, Default)]
pub struct MigrationReport {
    /// Documents rewritten with recomputed fields.
    pub updated: usize,
    /// Documents already consistent with the derivation rules.
    pub skipped: usize,
    /// Documents left untouched because they could not be processed.
    pub errors: Vec<MigrationFailure>,
}

impl MigrationReport {
    /// Returns true if every document was processed without failures.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    fn absorb(&mut self, other: Self) {
        self.updated += other.updated;
        self.skipped += other.skipped;
        self.errors.extend(other.errors);
    }
}

/// Recomputes derived fields across all three entry collections.
///
/// Idempotent: running it again after a successful pass rewrites nothing.
///
/// # Errors
///
/// Returns a store error only when a collection cannot be loaded at all;
/// per-document problems land in the report instead.
pub async fn backfill_derived_fields<S: DocumentStore>(
    store: &S,
    config: &LedgerConfig,
) -> Result<MigrationReport, StoreError> {
    let mut report = MigrationReport::default();
    report.absorb(backfill_ledger(store).await?);
    report.absorb(backfill_extractions(store, config).await?);
    report.absorb(backfill_sellings(store).await?);

    tracing::info!(
        updated = report.updated,
        skipped = report.skipped,
        failures = report.errors.len(),
        "derived-field backfill finished",
    );
    Ok(report)
}

async fn backfill_ledger<S: DocumentStore>(store: &S) -> Result<MigrationReport, StoreError> {
    let mut report = MigrationReport::default();
    let (mut entries, originals) =
        load_collection::<LedgerEntry, S>(store, &mut report).await?;

    // First correct each entry's own derived fields; entries that fail
    // validation keep their stored values and are reported, but still take
    // part in the balance replay like any other record.
    let mut failed: Vec<Uuid> = Vec::new();
    for entry in &mut entries {
        match recompute_ledger_entry(entry) {
            Ok(()) => {}
            Err(reason) => {
                push_failure(&mut report, LedgerEntry::COLLECTION, entry.id.into_inner(), reason);
                failed.push(entry.id.into_inner());
            }
        }
    }

    // Then realign the stored balance snapshots with the replay over the
    // corrected history, per customer.
    let mut by_customer: HashMap<CustomerId, Vec<LedgerEntry>> = HashMap::new();
    for entry in entries {
        by_customer.entry(entry.customer_id).or_default().push(entry);
    }

    for history in by_customer.into_values() {
        for line in balance::replay(history) {
            let mut entry = line.record;
            let id = entry.id.into_inner();
            if failed.contains(&id) {
                continue;
            }
            entry.balance = line.running_balance;

            let original = &originals[&id];
            if serde_json::to_value(&entry)? == *original {
                report.skipped += 1;
            } else {
                store.update_by_id(id, &entry).await?;
                report.updated += 1;
            }
        }
    }

    Ok(report)
}

async fn backfill_extractions<S: DocumentStore>(
    store: &S,
    config: &LedgerConfig,
) -> Result<MigrationReport, StoreError> {
    let mut report = MigrationReport::default();
    let (records, originals) =
        load_collection::<LeadExtraction, S>(store, &mut report).await?;

    for mut record in records {
        let input = LeadExtractionInput {
            customer: record.customer_id.map(Into::into),
            date: record.date,
            description: record.description.clone(),
            battery_weight: if record.is_lead_received_only {
                None
            } else {
                Some(record.battery_weight)
            },
            lead_percentage: Some(record.lead_percentage),
            lead_received: Some(record.lead_received),
            notes: record.notes.clone(),
            is_lead_received_only: record.is_lead_received_only,
        };

        let id = record.id.into_inner();
        match derive_extraction_fields(&input, config.default_lead_percentage) {
            Ok(derived) => {
                record.battery_weight = derived.battery_weight;
                record.lead_percentage = derived.lead_percentage;
                record.lead_weight = derived.lead_weight;
                record.lead_received = derived.lead_received;
                record.lead_pending = derived.lead_pending;
                record.percentage = derived.percentage;

                if serde_json::to_value(&record)? == originals[&id] {
                    report.skipped += 1;
                } else {
                    store.update_by_id(id, &record).await?;
                    report.updated += 1;
                }
            }
            Err(err) => {
                push_failure(&mut report, LeadExtraction::COLLECTION, id, err.to_string());
            }
        }
    }

    Ok(report)
}

async fn backfill_sellings<S: DocumentStore>(store: &S) -> Result<MigrationReport, StoreError> {
    let mut report = MigrationReport::default();
    let (records, originals) = load_collection::<LeadSelling, S>(store, &mut report).await?;

    for mut record in records {
        let input = LeadSellingInput {
            customer: record.customer_id.into(),
            date: record.date,
            commute_rent: if record.is_payment_only {
                None
            } else {
                Some(record.commute_rent)
            },
            weight: if record.is_payment_only {
                None
            } else {
                Some(record.weight)
            },
            rate: if record.is_payment_only {
                None
            } else {
                Some(record.rate)
            },
            debit: Some(record.debit),
            notes: record.notes.clone(),
            is_payment_only: record.is_payment_only,
        };

        let id = record.id.into_inner();
        match derive_selling_fields(&input) {
            Ok(derived) => {
                record.commute_rent = derived.commute_rent;
                record.weight = derived.weight;
                record.rate = derived.rate;
                record.debit = derived.debit;
                record.credit = derived.credit;
                record.balance = derived.balance;

                if serde_json::to_value(&record)? == originals[&id] {
                    report.skipped += 1;
                } else {
                    store.update_by_id(id, &record).await?;
                    report.updated += 1;
                }
            }
            Err(err) => {
                push_failure(&mut report, LeadSelling::COLLECTION, id, err.to_string());
            }
        }
    }

    Ok(report)
}

/// Recomputes a ledger entry's derived fields in place.
fn recompute_ledger_entry(entry: &mut LedgerEntry) -> Result<(), String> {
    let input = LedgerEntryInput {
        customer: entry.customer_id.into(),
        date: entry.date,
        battery_type: entry.battery_type,
        total_weight: if entry.is_payment_only {
            None
        } else {
            Some(entry.total_weight)
        },
        rate_per_kg: if entry.is_payment_only {
            None
        } else {
            Some(entry.rate_per_kg)
        },
        debit: Some(entry.debit),
        notes: entry.notes.clone(),
        is_payment_only: entry.is_payment_only,
    };

    let derived = derive_entry_fields(&input).map_err(|e| e.to_string())?;
    entry.battery_type = derived.battery_type;
    entry.total_weight = derived.total_weight;
    entry.rate_per_kg = derived.rate_per_kg;
    entry.credit = derived.credit;
    entry.debit = derived.debit;

    if !entry.weight_logs.is_empty() {
        let (total_weight, credit) =
            apply_weight_logs(&entry.weight_logs, entry.rate_per_kg).map_err(|e| e.to_string())?;
        entry.total_weight = total_weight;
        entry.credit = credit;
    }

    Ok(())
}

/// Loads a collection item by item, reporting documents that no longer
/// deserialize instead of failing the whole pass.
async fn load_collection<T: Document, S: DocumentStore>(
    store: &S,
    report: &mut MigrationReport,
) -> Result<(Vec<T>, HashMap<Uuid, Value>), StoreError> {
    let raw = store.find_all_raw(T::COLLECTION).await?;

    let mut docs = Vec::with_capacity(raw.len());
    let mut originals = HashMap::with_capacity(raw.len());
    for item in raw {
        match serde_json::from_value::<T>(item.body.clone()) {
            Ok(doc) => {
                docs.push(doc);
                originals.insert(item.id, item.body);
            }
            Err(err) => {
                push_failure(report, T::COLLECTION, item.id, format!("malformed document: {err}"));
            }
        }
    }

    Ok((docs, originals))
}

fn push_failure(
    report: &mut MigrationReport,
    collection: &'static str,
    id: Uuid,
    reason: String,
) {
    tracing::warn!(%id, collection, %reason, "backfill left document untouched");
    report.errors.push(MigrationFailure {
        collection,
        id,
        reason,
    });
}
