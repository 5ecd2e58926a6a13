//! Ledger entry repository.
//!
//! Writes derive every dependent field before persisting; reads replay the
//! running balance from history rather than trusting the stored snapshot.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

use kabadi_core::ValidationError;
use kabadi_core::balance::{self, BalanceLine};
use kabadi_core::customer::Customer;
use kabadi_core::ledger::{
    BatteryType, LedgerEntry, LedgerEntryInput, WeightLog, apply_weight_logs, derive_entry_fields,
};
use kabadi_core::query::{DateRange, NameQuery};
use kabadi_core::summary::{LedgerSummary, SearchSummary, SummaryService};
use kabadi_shared::types::{CustomerId, LedgerEntryId};

use crate::document::DocumentStore;
use crate::error::StoreError;

/// Errors raised by ledger entry operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Ledger entry not found.
    #[error("Ledger entry not found: {0}")]
    EntryNotFound(LedgerEntryId),

    /// Referenced customer not found.
    #[error("Customer not found: {0}")]
    CustomerNotFound(CustomerId),

    /// Input validation failed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Store error.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Patch for updating a ledger entry; `None` leaves the field unchanged.
#[derive(Debug, Clone, Default)]
pub struct LedgerEntryUpdate {
    /// New business date.
    pub date: Option<NaiveDate>,
    /// New battery type.
    pub battery_type: Option<BatteryType>,
    /// New total weight. Ignored once weight-log appends exist; the log sum
    /// is authoritative then.
    pub total_weight: Option<Decimal>,
    /// New rate per kilogram.
    pub rate_per_kg: Option<Decimal>,
    /// New debit amount.
    pub debit: Option<Decimal>,
    /// New notes.
    pub notes: Option<String>,
}

/// One day of a customer's ledger with true cumulative balances.
#[derive(Debug, Clone)]
pub struct DailyView {
    /// The day's entries with running balances replayed from the beginning
    /// of history.
    pub lines: Vec<BalanceLine<LedgerEntry>>,
    /// Cumulative balance through the end of the day, not the day's net
    /// change.
    pub closing_balance: Decimal,
}

/// Result of a customer-name search over the ledger.
#[derive(Debug, Clone)]
pub struct LedgerSearchResult {
    /// Customers whose names matched the query.
    pub customers: Vec<Customer>,
    /// The matched customers' entries in ledger order.
    pub entries: Vec<LedgerEntry>,
    /// Aggregate over the matched entries.
    pub summary: SearchSummary,
}

/// Ledger entry repository.
#[derive(Debug, Clone)]
pub struct LedgerRepository<S> {
    store: S,
}

impl<S: DocumentStore> LedgerRepository<S> {
    /// Creates a new ledger repository.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Creates a ledger entry, deriving all dependent fields first.
    ///
    /// # Errors
    ///
    /// Returns an error if the customer does not exist or a driver field
    /// fails validation.
    pub async fn create_entry(&self, input: LedgerEntryInput) -> Result<LedgerEntry, LedgerError> {
        let customer_id = input.customer.id();
        self.ensure_customer_exists(customer_id).await?;

        let derived = derive_entry_fields(&input)?;

        let mut entry = LedgerEntry {
            id: LedgerEntryId::new(),
            customer_id,
            date: input.date,
            battery_type: derived.battery_type,
            total_weight: derived.total_weight,
            rate_per_kg: derived.rate_per_kg,
            credit: derived.credit,
            debit: derived.debit,
            balance: Decimal::ZERO,
            weight_logs: Vec::new(),
            notes: input.notes,
            is_payment_only: input.is_payment_only,
            created_at: Utc::now(),
        };
        entry.balance = self.snapshot_balance(&entry).await?;

        self.store.create(&entry).await?;
        Ok(entry)
    }

    /// Fetches an entry by id.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::EntryNotFound`] if no such entry exists.
    pub async fn get_entry(&self, id: LedgerEntryId) -> Result<LedgerEntry, LedgerError> {
        self.store
            .find_by_id(id.into_inner())
            .await?
            .ok_or(LedgerError::EntryNotFound(id))
    }

    /// Applies a patch to an entry and recomputes every derived field.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry is missing or the merged drivers fail
    /// validation.
    pub async fn update_entry(
        &self,
        id: LedgerEntryId,
        patch: LedgerEntryUpdate,
    ) -> Result<LedgerEntry, LedgerError> {
        let mut entry = self.get_entry(id).await?;

        let merged = LedgerEntryInput {
            customer: entry.customer_id.into(),
            date: patch.date.unwrap_or(entry.date),
            battery_type: patch.battery_type.or(entry.battery_type),
            total_weight: if entry.is_payment_only {
                None
            } else {
                patch.total_weight.or(Some(entry.total_weight))
            },
            rate_per_kg: if entry.is_payment_only {
                None
            } else {
                patch.rate_per_kg.or(Some(entry.rate_per_kg))
            },
            debit: patch.debit.or(Some(entry.debit)),
            notes: patch.notes.clone().or(entry.notes.clone()),
            is_payment_only: entry.is_payment_only,
        };
        let derived = derive_entry_fields(&merged)?;

        entry.date = merged.date;
        entry.battery_type = derived.battery_type;
        entry.total_weight = derived.total_weight;
        entry.rate_per_kg = derived.rate_per_kg;
        entry.credit = derived.credit;
        entry.debit = derived.debit;
        entry.notes = merged.notes;

        // The weight log stays authoritative for the total once appends
        // have happened.
        if !entry.weight_logs.is_empty() {
            let (total_weight, credit) =
                apply_weight_logs(&entry.weight_logs, entry.rate_per_kg)?;
            entry.total_weight = total_weight;
            entry.credit = credit;
        }

        entry.balance = self.snapshot_balance(&entry).await?;
        self.store.update_by_id(id.into_inner(), &entry).await?;
        Ok(entry)
    }

    /// Appends one weighing to an entry's weight log and recomputes the
    /// total weight and credit from the log sum.
    ///
    /// # Errors
    ///
    /// Returns an error for payment-only entries or a negative weight.
    pub async fn add_weight_log(
        &self,
        id: LedgerEntryId,
        weight: Decimal,
    ) -> Result<LedgerEntry, LedgerError> {
        let mut entry = self.get_entry(id).await?;
        if entry.is_payment_only {
            return Err(ValidationError::Missing("batteryType").into());
        }

        entry.weight_logs.push(WeightLog {
            weight,
            time: Utc::now(),
        });

        let (total_weight, credit) = apply_weight_logs(&entry.weight_logs, entry.rate_per_kg)?;
        entry.total_weight = total_weight;
        entry.credit = credit;
        entry.balance = self.snapshot_balance(&entry).await?;

        self.store.update_by_id(id.into_inner(), &entry).await?;
        Ok(entry)
    }

    /// Deletes an entry; a missing entry is a no-op reported as `false`.
    ///
    /// # Errors
    ///
    /// Returns a store error if the delete fails.
    pub async fn delete_entry(&self, id: LedgerEntryId) -> Result<bool, LedgerError> {
        Ok(self
            .store
            .delete_by_id::<LedgerEntry>(id.into_inner())
            .await?)
    }

    /// Returns a customer's entries within the range, each with its running
    /// balance replayed from the beginning of history.
    ///
    /// Stored snapshots that drifted from the replay are logged and
    /// overridden by the recomputed value.
    ///
    /// # Errors
    ///
    /// Returns a store error if the load fails.
    pub async fn entries_for_customer(
        &self,
        customer_id: CustomerId,
        range: DateRange,
    ) -> Result<Vec<BalanceLine<LedgerEntry>>, LedgerError> {
        let history = self.customer_history(customer_id).await?;
        let lines = balance::replay(history);

        for line in &lines {
            warn_on_drift(&line.record, line.running_balance);
        }

        Ok(lines
            .into_iter()
            .filter(|line| range.contains(line.record.date))
            .collect())
    }

    /// Returns one day of a customer's ledger with the cumulative balance
    /// through the end of that day.
    ///
    /// # Errors
    ///
    /// Returns a store error if the load fails.
    pub async fn daily_view(
        &self,
        customer_id: CustomerId,
        day: NaiveDate,
    ) -> Result<DailyView, LedgerError> {
        let history = self.customer_history(customer_id).await?;
        let closing_balance = balance::balance_through(&history, day);

        let lines = balance::replay(history)
            .into_iter()
            .filter(|line| line.record.date == day)
            .collect();

        Ok(DailyView {
            lines,
            closing_balance,
        })
    }

    /// Returns the persisted balance snapshot of one entry.
    ///
    /// This is the write-time cache, allowed to drift between writes; use
    /// [`Self::computed_running_balance`] for the authoritative figure.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::EntryNotFound`] if no such entry exists.
    pub async fn stored_balance(&self, id: LedgerEntryId) -> Result<Decimal, LedgerError> {
        Ok(self.get_entry(id).await?.balance)
    }

    /// Recomputes a customer's closing balance by replaying the full
    /// history.
    ///
    /// # Errors
    ///
    /// Returns a store error if the load fails.
    pub async fn computed_running_balance(
        &self,
        customer_id: CustomerId,
    ) -> Result<Decimal, LedgerError> {
        let history = self.customer_history(customer_id).await?;
        Ok(balance::closing_balance(history.iter()))
    }

    /// Searches the ledger by customer name: resolves the customer
    /// relation, filters in memory, and aggregates the matches.
    ///
    /// # Errors
    ///
    /// Returns a validation error for queries under two characters.
    pub async fn search(&self, raw_query: &str) -> Result<LedgerSearchResult, LedgerError> {
        let query = NameQuery::parse(raw_query)?;

        let mut customers: Vec<Customer> = self
            .store
            .find_all::<Customer>()
            .await?
            .into_iter()
            .filter(|c| query.matches(&c.name))
            .collect();
        customers.sort_by_key(Customer::normalized_name);

        let mut entries: Vec<LedgerEntry> = self.store.find_all().await?;
        entries.retain(|e| customers.iter().any(|c| c.id == e.customer_id));
        balance::sort_into_ledger_order(&mut entries);

        let customer_ids: Vec<CustomerId> = entries.iter().map(|e| e.customer_id).collect();
        let summary = SummaryService::search_summary(&customer_ids);

        Ok(LedgerSearchResult {
            customers,
            entries,
            summary,
        })
    }

    /// Summarizes entries, optionally restricted to one customer and a date
    /// range. Recomputed fresh per call from the records selected.
    ///
    /// # Errors
    ///
    /// Returns a store error if the load fails.
    pub async fn summary(
        &self,
        customer_id: Option<CustomerId>,
        range: DateRange,
    ) -> Result<LedgerSummary, LedgerError> {
        let entries: Vec<LedgerEntry> = self.store.find_all().await?;
        let selected: Vec<LedgerEntry> = entries
            .into_iter()
            .filter(|e| customer_id.is_none_or(|id| e.customer_id == id))
            .filter(|e| range.contains(e.date))
            .collect();

        Ok(SummaryService::ledger_summary(&selected))
    }

    /// Computes the running balance this entry would display, replaying the
    /// customer's history with the entry's new values in place.
    async fn snapshot_balance(&self, entry: &LedgerEntry) -> Result<Decimal, LedgerError> {
        let mut history = self.customer_history(entry.customer_id).await?;
        history.retain(|e| e.id != entry.id);
        history.push(entry.clone());

        let lines = balance::replay(history);
        Ok(lines
            .iter()
            .find(|line| line.record.id == entry.id)
            .map_or(Decimal::ZERO, |line| line.running_balance))
    }

    async fn customer_history(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<LedgerEntry>, LedgerError> {
        let mut entries: Vec<LedgerEntry> = self.store.find_all().await?;
        entries.retain(|e| e.customer_id == customer_id);
        Ok(entries)
    }

    async fn ensure_customer_exists(&self, id: CustomerId) -> Result<(), LedgerError> {
        self.store
            .find_by_id::<Customer>(id.into_inner())
            .await?
            .map(|_| ())
            .ok_or(LedgerError::CustomerNotFound(id))
    }
}

fn warn_on_drift(entry: &LedgerEntry, computed: Decimal) {
    if entry.balance != computed {
        tracing::warn!(
            entry_id = %entry.id,
            stored = %entry.balance,
            computed = %computed,
            "stored balance drifted from replay; recomputed value wins",
        );
    }
}
