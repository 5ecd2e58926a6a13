//! Customer domain types.

use chrono::{DateTime, Utc};
use kabadi_shared::types::CustomerId;
use serde::{Deserialize, Serialize};

/// A customer of the trade.
///
/// Identity is the unique name, compared case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Customer ID.
    pub id: CustomerId,
    /// Display name, unique across customers (case-insensitive).
    pub name: String,
    /// Optional free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Optional address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Optional phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Customer {
    /// Returns the name normalized for uniqueness comparison.
    #[must_use]
    pub fn normalized_name(&self) -> String {
        normalize_name(&self.name)
    }
}

/// Normalizes a customer name for case-insensitive comparison.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// A customer reference at the boundary.
///
/// Stored documents carry only the id; some callers hand over the populated
/// customer. The two shapes are kept explicit so core computation can demand
/// a fully resolved input instead of duck-typing on the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CustomerRef {
    /// Only the customer id is known; resolution is the caller's job.
    Reference(CustomerId),
    /// The full customer record has already been resolved.
    Resolved(Customer),
}

impl CustomerRef {
    /// Returns the referenced customer id.
    #[must_use]
    pub fn id(&self) -> CustomerId {
        match self {
            Self::Reference(id) => *id,
            Self::Resolved(customer) => customer.id,
        }
    }

    /// Returns the resolved customer, if this reference carries one.
    #[must_use]
    pub fn resolved(&self) -> Option<&Customer> {
        match self {
            Self::Reference(_) => None,
            Self::Resolved(customer) => Some(customer),
        }
    }
}

impl From<CustomerId> for CustomerRef {
    fn from(id: CustomerId) -> Self {
        Self::Reference(id)
    }
}

impl From<Customer> for CustomerRef {
    fn from(customer: Customer) -> Self {
        Self::Resolved(customer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_customer(name: &str) -> Customer {
        Customer {
            id: CustomerId::new(),
            name: name.to_string(),
            description: None,
            address: None,
            phone: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_normalize_name_is_case_insensitive() {
        assert_eq!(normalize_name("Acme"), normalize_name("  ACME "));
        assert_ne!(normalize_name("Acme"), normalize_name("Acme Co"));
    }

    #[test]
    fn test_ref_id_for_both_shapes() {
        let customer = sample_customer("Acme");
        let id = customer.id;

        assert_eq!(CustomerRef::Reference(id).id(), id);
        assert_eq!(CustomerRef::Resolved(customer).id(), id);
    }

    #[test]
    fn test_resolved_accessor() {
        let customer = sample_customer("Acme");
        let reference = CustomerRef::Reference(customer.id);
        assert!(reference.resolved().is_none());

        let resolved = CustomerRef::Resolved(customer.clone());
        assert_eq!(resolved.resolved(), Some(&customer));
    }

    #[test]
    fn test_untagged_serde_accepts_bare_id() {
        let customer = sample_customer("Acme");
        let as_id = serde_json::to_string(&CustomerRef::Reference(customer.id)).unwrap();
        let parsed: CustomerRef = serde_json::from_str(&as_id).unwrap();
        assert_eq!(parsed.id(), customer.id);

        let as_doc = serde_json::to_string(&CustomerRef::Resolved(customer.clone())).unwrap();
        let parsed: CustomerRef = serde_json::from_str(&as_doc).unwrap();
        assert_eq!(parsed.resolved(), Some(&customer));
    }
}
