//! Customer repository.

use chrono::Utc;
use thiserror::Error;

use kabadi_core::ValidationError;
use kabadi_core::customer::{Customer, CustomerRef, normalize_name};
use kabadi_core::query::NameQuery;
use kabadi_shared::types::{CustomerId, PageRequest, PageResponse};

use crate::document::DocumentStore;
use crate::error::StoreError;

/// Errors raised by customer operations.
#[derive(Debug, Error)]
pub enum CustomerError {
    /// Customer not found.
    #[error("Customer not found: {0}")]
    NotFound(CustomerId),

    /// Another customer already uses this name (case-insensitive).
    #[error("Customer name '{0}' is already taken")]
    DuplicateName(String),

    /// Input validation failed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Store error.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Input for creating a customer.
#[derive(Debug, Clone)]
pub struct CreateCustomerInput {
    /// Display name; must be unique case-insensitively.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional address.
    pub address: Option<String>,
    /// Optional phone number.
    pub phone: Option<String>,
}

/// Patch for updating a customer; `None` leaves the field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateCustomerInput {
    /// New display name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New address.
    pub address: Option<String>,
    /// New phone number.
    pub phone: Option<String>,
}

/// Customer repository for CRUD, search, and reference resolution.
#[derive(Debug, Clone)]
pub struct CustomerRepository<S> {
    store: S,
}

impl<S: DocumentStore> CustomerRepository<S> {
    /// Creates a new customer repository.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Creates a customer, enforcing the case-insensitive unique name.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank or already taken.
    pub async fn create(&self, input: CreateCustomerInput) -> Result<Customer, CustomerError> {
        let name = input.name.trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::Missing("name").into());
        }

        self.ensure_name_free(&name, None).await?;

        let customer = Customer {
            id: CustomerId::new(),
            name,
            description: input.description,
            address: input.address,
            phone: input.phone,
            created_at: Utc::now(),
        };
        self.store.create(&customer).await?;
        Ok(customer)
    }

    /// Fetches a customer by id.
    ///
    /// # Errors
    ///
    /// Returns [`CustomerError::NotFound`] if no such customer exists.
    pub async fn get(&self, id: CustomerId) -> Result<Customer, CustomerError> {
        self.store
            .find_by_id(id.into_inner())
            .await?
            .ok_or(CustomerError::NotFound(id))
    }

    /// Applies a patch to a customer, re-checking name uniqueness on
    /// rename.
    ///
    /// # Errors
    ///
    /// Returns an error if the customer is missing or the new name is
    /// taken.
    pub async fn update(
        &self,
        id: CustomerId,
        patch: UpdateCustomerInput,
    ) -> Result<Customer, CustomerError> {
        let mut customer = self.get(id).await?;

        if let Some(name) = patch.name {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(ValidationError::Missing("name").into());
            }
            if normalize_name(&name) != customer.normalized_name() {
                self.ensure_name_free(&name, Some(id)).await?;
            }
            customer.name = name;
        }
        if let Some(description) = patch.description {
            customer.description = Some(description);
        }
        if let Some(address) = patch.address {
            customer.address = Some(address);
        }
        if let Some(phone) = patch.phone {
            customer.phone = Some(phone);
        }

        self.store.update_by_id(id.into_inner(), &customer).await?;
        Ok(customer)
    }

    /// Deletes a customer. Entries referencing it are left untouched; the
    /// stale reference is tolerated on read.
    ///
    /// # Errors
    ///
    /// Returns a store error if the delete fails; a missing customer is a
    /// no-op reported as `false`.
    pub async fn delete(&self, id: CustomerId) -> Result<bool, CustomerError> {
        Ok(self.store.delete_by_id::<Customer>(id.into_inner()).await?)
    }

    /// Lists customers sorted by name.
    ///
    /// # Errors
    ///
    /// Returns a store error if the load fails.
    pub async fn list(&self, page: PageRequest) -> Result<PageResponse<Customer>, CustomerError> {
        let mut customers: Vec<Customer> = self.store.find_all().await?;
        customers.sort_by_key(Customer::normalized_name);

        let total = customers.len() as u64;
        let data: Vec<Customer> = customers
            .into_iter()
            .skip(page.offset())
            .take(page.limit())
            .collect();

        Ok(PageResponse::new(data, page.page, page.per_page, total))
    }

    /// Searches customers by case-insensitive substring, loading the
    /// candidate set and filtering in memory.
    ///
    /// # Errors
    ///
    /// Returns a validation error for queries under two characters.
    pub async fn search(&self, raw_query: &str) -> Result<Vec<Customer>, CustomerError> {
        let query = NameQuery::parse(raw_query)?;

        let mut matches: Vec<Customer> = self
            .store
            .find_all::<Customer>()
            .await?
            .into_iter()
            .filter(|c| query.matches(&c.name))
            .collect();
        matches.sort_by_key(Customer::normalized_name);
        Ok(matches)
    }

    /// Resolves a customer reference to the full record.
    ///
    /// # Errors
    ///
    /// Returns [`CustomerError::NotFound`] if a bare reference points at a
    /// customer that no longer exists.
    pub async fn resolve(&self, reference: &CustomerRef) -> Result<Customer, CustomerError> {
        match reference {
            CustomerRef::Resolved(customer) => Ok(customer.clone()),
            CustomerRef::Reference(id) => self.get(*id).await,
        }
    }

    async fn ensure_name_free(
        &self,
        name: &str,
        besides: Option<CustomerId>,
    ) -> Result<(), CustomerError> {
        let normalized = normalize_name(name);
        let customers: Vec<Customer> = self.store.find_all().await?;

        let taken = customers
            .iter()
            .any(|c| Some(c.id) != besides && c.normalized_name() == normalized);
        if taken {
            return Err(CustomerError::DuplicateName(name.to_string()));
        }
        Ok(())
    }
}
