//! Validation errors shared by the derived-field calculators.
//!
//! Every error names the offending input field so the caller can surface it
//! against the right form control.

use thiserror::Error;

/// Errors raised while validating the driver fields of an entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required driver field was absent.
    #[error("'{0}' is required")]
    Missing(&'static str),

    /// An amount field was negative.
    #[error("'{0}' must be a non-negative amount")]
    Negative(&'static str),

    /// An amount field was zero or negative where a positive value is
    /// required.
    #[error("'{0}' must be greater than zero")]
    NotPositive(&'static str),

    /// One field exceeded the bound set by another.
    #[error("'{field}' must not exceed '{limit}'")]
    ExceedsLimit {
        /// The offending field.
        field: &'static str,
        /// The field providing the upper bound.
        limit: &'static str,
    },

    /// A free-text search query was too short to run.
    #[error("search query must be at least {min} characters")]
    QueryTooShort {
        /// Minimum accepted query length.
        min: usize,
    },
}

impl ValidationError {
    /// Returns the name of the offending field.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::Missing(field)
            | Self::Negative(field)
            | Self::NotPositive(field)
            | Self::ExceedsLimit { field, .. } => field,
            Self::QueryTooShort { .. } => "query",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_field() {
        assert_eq!(
            ValidationError::Missing("totalWeight").to_string(),
            "'totalWeight' is required"
        );
        assert_eq!(
            ValidationError::NotPositive("ratePerKg").to_string(),
            "'ratePerKg' must be greater than zero"
        );
        assert_eq!(
            ValidationError::ExceedsLimit {
                field: "leadReceived",
                limit: "leadWeight",
            }
            .to_string(),
            "'leadReceived' must not exceed 'leadWeight'"
        );
    }

    #[test]
    fn test_field_accessor() {
        assert_eq!(ValidationError::Negative("debit").field(), "debit");
        assert_eq!(ValidationError::QueryTooShort { min: 2 }.field(), "query");
    }
}
