//! Lead selling repository.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

use kabadi_core::ValidationError;
use kabadi_core::balance::{self, BalanceLine};
use kabadi_core::customer::Customer;
use kabadi_core::query::DateRange;
use kabadi_core::selling::{LeadSelling, LeadSellingInput, derive_selling_fields};
use kabadi_core::summary::{SellingSummary, SummaryService};
use kabadi_shared::types::{CustomerId, LeadSellingId, round2};

use crate::document::DocumentStore;
use crate::error::StoreError;

/// Errors raised by lead selling operations.
#[derive(Debug, Error)]
pub enum SellingError {
    /// Selling record not found.
    #[error("Lead selling record not found: {0}")]
    RecordNotFound(LeadSellingId),

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

/// Patch for updating a selling record; `None` leaves the field unchanged.
#[derive(Debug, Clone, Default)]
pub struct SellingUpdate {
    /// New business date.
    pub date: Option<NaiveDate>,
    /// New commute rent.
    pub commute_rent: Option<Decimal>,
    /// New lead weight.
    pub weight: Option<Decimal>,
    /// New rate.
    pub rate: Option<Decimal>,
    /// New debit amount.
    pub debit: Option<Decimal>,
    /// New notes.
    pub notes: Option<String>,
}

/// Lead selling repository.
#[derive(Debug, Clone)]
pub struct LeadSellingRepository<S> {
    store: S,
}

impl<S: DocumentStore> LeadSellingRepository<S> {
    /// Creates a new selling repository.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Creates a selling record, deriving the credit and balance first.
    ///
    /// # Errors
    ///
    /// Returns an error if the buyer does not exist or a driver field fails
    /// validation.
    pub async fn create(&self, input: LeadSellingInput) -> Result<LeadSelling, SellingError> {
        let customer_id = input.customer.id();
        self.ensure_customer_exists(customer_id).await?;

        let derived = derive_selling_fields(&input)?;

        let record = LeadSelling {
            id: LeadSellingId::new(),
            customer_id,
            date: input.date,
            commute_rent: derived.commute_rent,
            weight: derived.weight,
            rate: derived.rate,
            debit: derived.debit,
            credit: derived.credit,
            balance: derived.balance,
            notes: input.notes,
            is_payment_only: input.is_payment_only,
            created_at: Utc::now(),
        };
        self.store.create(&record).await?;
        Ok(record)
    }

    /// Fetches a record by id.
    ///
    /// # Errors
    ///
    /// Returns [`SellingError::RecordNotFound`] if no such record exists.
    pub async fn get(&self, id: LeadSellingId) -> Result<LeadSelling, SellingError> {
        self.store
            .find_by_id(id.into_inner())
            .await?
            .ok_or(SellingError::RecordNotFound(id))
    }

    /// Applies a patch and recomputes every derived field.
    ///
    /// # Errors
    ///
    /// Returns an error if the record is missing or the merged drivers fail
    /// validation.
    pub async fn update(
        &self,
        id: LeadSellingId,
        patch: SellingUpdate,
    ) -> Result<LeadSelling, SellingError> {
        let mut record = self.get(id).await?;

        let merged = LeadSellingInput {
            customer: record.customer_id.into(),
            date: patch.date.unwrap_or(record.date),
            commute_rent: if record.is_payment_only {
                None
            } else {
                patch.commute_rent.or(Some(record.commute_rent))
            },
            weight: if record.is_payment_only {
                None
            } else {
                patch.weight.or(Some(record.weight))
            },
            rate: if record.is_payment_only {
                None
            } else {
                patch.rate.or(Some(record.rate))
            },
            debit: patch.debit.or(Some(record.debit)),
            notes: patch.notes.clone().or(record.notes.clone()),
            is_payment_only: record.is_payment_only,
        };
        let derived = derive_selling_fields(&merged)?;

        record.date = merged.date;
        record.commute_rent = derived.commute_rent;
        record.weight = derived.weight;
        record.rate = derived.rate;
        record.debit = derived.debit;
        record.credit = derived.credit;
        record.balance = derived.balance;
        record.notes = merged.notes;

        self.store.update_by_id(id.into_inner(), &record).await?;
        Ok(record)
    }

    /// Deletes a record; a missing record is a no-op reported as `false`.
    ///
    /// # Errors
    ///
    /// Returns a store error if the delete fails.
    pub async fn delete(&self, id: LeadSellingId) -> Result<bool, SellingError> {
        Ok(self
            .store
            .delete_by_id::<LeadSelling>(id.into_inner())
            .await?)
    }

    /// Returns a buyer's records within the range, each with its running
    /// balance replayed from the beginning of history.
    ///
    /// Per-record balances that drifted from `credit - debit` are logged
    /// and do not affect the replayed view.
    ///
    /// # Errors
    ///
    /// Returns a store error if the load fails.
    pub async fn records_for_customer(
        &self,
        customer_id: CustomerId,
        range: DateRange,
    ) -> Result<Vec<BalanceLine<LeadSelling>>, SellingError> {
        let history = self.customer_history(customer_id).await?;

        for record in &history {
            warn_on_drift(record);
        }

        Ok(balance::replay(history)
            .into_iter()
            .filter(|line| range.contains(line.record.date))
            .collect())
    }

    /// Returns the persisted per-record balance (`credit - debit` at write
    /// time).
    ///
    /// # Errors
    ///
    /// Returns [`SellingError::RecordNotFound`] if no such record exists.
    pub async fn stored_balance(&self, id: LeadSellingId) -> Result<Decimal, SellingError> {
        Ok(self.get(id).await?.balance)
    }

    /// Recomputes a buyer's closing balance by replaying the full history.
    ///
    /// # Errors
    ///
    /// Returns a store error if the load fails.
    pub async fn computed_running_balance(
        &self,
        customer_id: CustomerId,
    ) -> Result<Decimal, SellingError> {
        let history = self.customer_history(customer_id).await?;
        Ok(balance::closing_balance(history.iter()))
    }

    /// Summarizes records, optionally restricted to one buyer and a date
    /// range. Recomputed fresh per call from the records selected.
    ///
    /// # Errors
    ///
    /// Returns a store error if the load fails.
    pub async fn summary(
        &self,
        customer_id: Option<CustomerId>,
        range: DateRange,
    ) -> Result<SellingSummary, SellingError> {
        let records: Vec<LeadSelling> = self.store.find_all().await?;
        let selected: Vec<LeadSelling> = records
            .into_iter()
            .filter(|r| customer_id.is_none_or(|id| r.customer_id == id))
            .filter(|r| range.contains(r.date))
            .collect();

        Ok(SummaryService::selling_summary(&selected))
    }

    async fn customer_history(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<LeadSelling>, SellingError> {
        let mut records: Vec<LeadSelling> = self.store.find_all().await?;
        records.retain(|r| r.customer_id == customer_id);
        Ok(records)
    }

    async fn ensure_customer_exists(&self, id: CustomerId) -> Result<(), SellingError> {
        self.store
            .find_by_id::<Customer>(id.into_inner())
            .await?
            .map(|_| ())
            .ok_or(SellingError::CustomerNotFound(id))
    }
}

fn warn_on_drift(record: &LeadSelling) {
    let expected = round2(record.credit - record.debit);
    if record.balance != expected {
        tracing::warn!(
            record_id = %record.id,
            stored = %record.balance,
            expected = %expected,
            "stored balance drifted from credit - debit; replay ignores it",
        );
    }
}
