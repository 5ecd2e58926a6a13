//! Property tests for ledger derived-field calculation.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use kabadi_shared::types::{CustomerId, round2};

use super::derive::derive_entry_fields;
use super::types::{BatteryType, LedgerEntryInput};
use crate::customer::CustomerRef;

/// Strategy for positive cent-denominated amounts.
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for positive rates with up to three decimal places.
fn rate_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|millis| Decimal::new(millis, 3))
}

fn purchase_input(weight: Decimal, rate: Decimal, debit: Option<Decimal>) -> LedgerEntryInput {
    LedgerEntryInput {
        customer: CustomerRef::Reference(CustomerId::new()),
        date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        battery_type: Some(BatteryType::Gutka),
        total_weight: Some(weight),
        rate_per_kg: Some(rate),
        debit,
        notes: None,
        is_payment_only: false,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Deriving twice from the same drivers yields identical outputs.
    #[test]
    fn prop_derivation_is_idempotent(
        weight in positive_amount(),
        rate in rate_strategy(),
        debit in proptest::option::of(positive_amount()),
    ) {
        let input = purchase_input(weight, rate, debit);
        let first = derive_entry_fields(&input).unwrap();
        let second = derive_entry_fields(&input).unwrap();
        prop_assert_eq!(first, second);
    }

    /// The derived credit always equals the rounded product of its drivers,
    /// and re-rounding it changes nothing.
    #[test]
    fn prop_credit_is_rounded_product(
        weight in positive_amount(),
        rate in rate_strategy(),
    ) {
        let derived = derive_entry_fields(&purchase_input(weight, rate, None)).unwrap();
        prop_assert_eq!(derived.credit, round2(weight * rate));
        prop_assert_eq!(round2(derived.credit), derived.credit);
    }

    /// Derived amounts are never negative for valid inputs.
    #[test]
    fn prop_derived_amounts_non_negative(
        weight in positive_amount(),
        rate in rate_strategy(),
        debit in proptest::option::of(positive_amount()),
    ) {
        let derived = derive_entry_fields(&purchase_input(weight, rate, debit)).unwrap();
        prop_assert!(derived.credit >= Decimal::ZERO);
        prop_assert!(derived.debit >= Decimal::ZERO);
        prop_assert!(derived.total_weight > Decimal::ZERO);
    }
}
