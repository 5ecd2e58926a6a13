//! Lead extraction repository.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

use kabadi_core::ValidationError;
use kabadi_core::customer::Customer;
use kabadi_core::extraction::{LeadExtraction, LeadExtractionInput, derive_extraction_fields};
use kabadi_core::query::DateRange;
use kabadi_core::summary::{ExtractionSummary, SummaryService};
use kabadi_shared::config::LedgerConfig;
use kabadi_shared::types::{CustomerId, LeadExtractionId};

use crate::document::DocumentStore;
use crate::error::StoreError;

/// Errors raised by lead extraction operations.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// Extraction record not found.
    #[error("Lead extraction not found: {0}")]
    RecordNotFound(LeadExtractionId),

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

/// Patch for updating an extraction record; `None` leaves the field
/// unchanged.
#[derive(Debug, Clone, Default)]
pub struct ExtractionUpdate {
    /// New business date.
    pub date: Option<NaiveDate>,
    /// New description.
    pub description: Option<String>,
    /// New battery weight.
    pub battery_weight: Option<Decimal>,
    /// New yield percentage.
    pub lead_percentage: Option<Decimal>,
    /// New received amount.
    pub lead_received: Option<Decimal>,
    /// New notes.
    pub notes: Option<String>,
}

/// Lead extraction repository.
#[derive(Debug, Clone)]
pub struct LeadExtractionRepository<S> {
    store: S,
    config: LedgerConfig,
}

impl<S: DocumentStore> LeadExtractionRepository<S> {
    /// Creates a new extraction repository with the given ledger defaults.
    pub const fn new(store: S, config: LedgerConfig) -> Self {
        Self { store, config }
    }

    /// Creates an extraction record, deriving the yield fields first.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced customer does not exist or a driver
    /// field fails validation.
    pub async fn create(
        &self,
        input: LeadExtractionInput,
    ) -> Result<LeadExtraction, ExtractionError> {
        let customer_id = match &input.customer {
            Some(reference) => {
                let id = reference.id();
                self.ensure_customer_exists(id).await?;
                Some(id)
            }
            None => None,
        };

        let derived = derive_extraction_fields(&input, self.config.default_lead_percentage)?;

        let record = LeadExtraction {
            id: LeadExtractionId::new(),
            customer_id,
            date: input.date,
            description: input.description,
            battery_weight: derived.battery_weight,
            lead_percentage: derived.lead_percentage,
            lead_weight: derived.lead_weight,
            lead_received: derived.lead_received,
            lead_pending: derived.lead_pending,
            percentage: derived.percentage,
            notes: input.notes,
            is_lead_received_only: input.is_lead_received_only,
            created_at: Utc::now(),
        };
        self.store.create(&record).await?;
        Ok(record)
    }

    /// Fetches a record by id.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractionError::RecordNotFound`] if no such record
    /// exists.
    pub async fn get(&self, id: LeadExtractionId) -> Result<LeadExtraction, ExtractionError> {
        self.store
            .find_by_id(id.into_inner())
            .await?
            .ok_or(ExtractionError::RecordNotFound(id))
    }

    /// Applies a patch and recomputes every derived field.
    ///
    /// # Errors
    ///
    /// Returns an error if the record is missing or the merged drivers fail
    /// validation.
    pub async fn update(
        &self,
        id: LeadExtractionId,
        patch: ExtractionUpdate,
    ) -> Result<LeadExtraction, ExtractionError> {
        let mut record = self.get(id).await?;

        let merged = LeadExtractionInput {
            customer: record.customer_id.map(Into::into),
            date: patch.date.unwrap_or(record.date),
            description: patch.description.unwrap_or_else(|| record.description.clone()),
            battery_weight: if record.is_lead_received_only {
                None
            } else {
                patch.battery_weight.or(Some(record.battery_weight))
            },
            lead_percentage: patch.lead_percentage.or(Some(record.lead_percentage)),
            lead_received: patch.lead_received.or(Some(record.lead_received)),
            notes: patch.notes.clone().or(record.notes.clone()),
            is_lead_received_only: record.is_lead_received_only,
        };
        let derived = derive_extraction_fields(&merged, self.config.default_lead_percentage)?;

        record.date = merged.date;
        record.description = merged.description;
        record.battery_weight = derived.battery_weight;
        record.lead_percentage = derived.lead_percentage;
        record.lead_weight = derived.lead_weight;
        record.lead_received = derived.lead_received;
        record.lead_pending = derived.lead_pending;
        record.percentage = derived.percentage;
        record.notes = merged.notes;

        self.store.update_by_id(id.into_inner(), &record).await?;
        Ok(record)
    }

    /// Deletes a record; a missing record is a no-op reported as `false`.
    ///
    /// # Errors
    ///
    /// Returns a store error if the delete fails.
    pub async fn delete(&self, id: LeadExtractionId) -> Result<bool, ExtractionError> {
        Ok(self
            .store
            .delete_by_id::<LeadExtraction>(id.into_inner())
            .await?)
    }

    /// Lists records within the range, ordered by date then creation time.
    ///
    /// # Errors
    ///
    /// Returns a store error if the load fails.
    pub async fn list(&self, range: DateRange) -> Result<Vec<LeadExtraction>, ExtractionError> {
        let mut records: Vec<LeadExtraction> = self.store.find_all().await?;
        records.retain(|r| range.contains(r.date));
        records.sort_by_key(|r| (r.date, r.created_at));
        Ok(records)
    }

    /// Summarizes records within the range, recomputed fresh per call.
    ///
    /// # Errors
    ///
    /// Returns a store error if the load fails.
    pub async fn summary(&self, range: DateRange) -> Result<ExtractionSummary, ExtractionError> {
        let records = self.list(range).await?;
        Ok(SummaryService::extraction_summary(&records))
    }

    async fn ensure_customer_exists(&self, id: CustomerId) -> Result<(), ExtractionError> {
        self.store
            .find_by_id::<Customer>(id.into_inner())
            .await?
            .map(|_| ())
            .ok_or(ExtractionError::CustomerNotFound(id))
    }
}
