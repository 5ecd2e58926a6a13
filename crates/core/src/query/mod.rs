//! Date ranges and customer-name search matching.
//!
//! Selection semantics shared by the repositories. Entries carry plain
//! business dates in naive server time, so selecting a day means the
//! half-open 24-hour window `[start_of_day, start_of_day + 1 day)`, which
//! for stored dates reduces to date equality; no timezone normalization
//! happens beyond that. Name search is a case-insensitive substring match
//! with a minimum query length.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Minimum accepted length of a name-search query.
pub const MIN_QUERY_LEN: usize = 2;

/// An inclusive date-range filter; either bound may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// Earliest date to include.
    pub from: Option<NaiveDate>,
    /// Latest date to include.
    pub to: Option<NaiveDate>,
}

impl DateRange {
    /// A range covering all of history.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            from: None,
            to: None,
        }
    }

    /// A range covering a single day's half-open window.
    #[must_use]
    pub const fn single_day(date: NaiveDate) -> Self {
        Self {
            from: Some(date),
            to: Some(date),
        }
    }

    /// Returns true if the date falls inside the range.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }
}

/// A validated case-insensitive substring query over customer names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameQuery {
    needle: String,
}

impl NameQuery {
    /// Parses and validates a raw query string.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::QueryTooShort`] for queries under
    /// [`MIN_QUERY_LEN`] characters after trimming.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.chars().count() < MIN_QUERY_LEN {
            return Err(ValidationError::QueryTooShort { min: MIN_QUERY_LEN });
        }
        Ok(Self {
            needle: trimmed.to_lowercase(),
        })
    }

    /// Returns true if the customer name contains the query, ignoring case.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        name.to_lowercase().contains(&self.needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_range_bounds_are_inclusive() {
        let range = DateRange {
            from: Some(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
            to: Some(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()),
        };

        assert!(range.contains(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()));
        assert!(range.contains(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()));
        assert!(!range.contains(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()));
        assert!(!range.contains(NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()));
    }

    #[test]
    fn test_open_range_contains_everything() {
        let range = DateRange::all();
        assert!(range.contains(NaiveDate::from_ymd_opt(1990, 6, 15).unwrap()));
        assert!(range.contains(NaiveDate::from_ymd_opt(2090, 6, 15).unwrap()));
    }

    #[test]
    fn test_single_day_range() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let range = DateRange::single_day(date);
        assert!(range.contains(date));
        assert!(!range.contains(date.succ_opt().unwrap()));
        assert!(!range.contains(date.pred_opt().unwrap()));
    }

    #[test]
    fn test_name_query_case_insensitive_substring() {
        let query = NameQuery::parse("ac").unwrap();
        assert!(query.matches("Acme"));
        assert!(query.matches("Mac Co"));
        assert!(!query.matches("Bharat Metals"));
    }

    #[test]
    fn test_name_query_minimum_length() {
        assert_eq!(
            NameQuery::parse("a"),
            Err(ValidationError::QueryTooShort { min: 2 })
        );
        assert_eq!(
            NameQuery::parse("  a  "),
            Err(ValidationError::QueryTooShort { min: 2 })
        );
        assert!(NameQuery::parse("  ab ").is_ok());
    }
}
