//! Derived-field calculation for ledger entries.
//!
//! Pure functions of their inputs: no side effects, and re-deriving an
//! already-derived record with unchanged inputs yields identical outputs.

use rust_decimal::Decimal;

use kabadi_shared::types::round2;

use super::types::{LedgerDerived, LedgerEntryInput, WeightLog};
use crate::error::ValidationError;

/// Computes the derived fields of a ledger entry from its driver fields.
///
/// # Errors
///
/// Returns a [`ValidationError`] naming the offending field when a required
/// driver is absent, zero where a positive value is required, or negative.
pub fn derive_entry_fields(input: &LedgerEntryInput) -> Result<LedgerDerived, ValidationError> {
    if input.is_payment_only {
        // A payment-only entry is a standalone cash receipt: no battery,
        // no weight, no rate, and a positive payout.
        let debit = input.debit.ok_or(ValidationError::Missing("debit"))?;
        ensure_positive(debit, "debit")?;

        return Ok(LedgerDerived {
            battery_type: None,
            total_weight: Decimal::ZERO,
            rate_per_kg: Decimal::ZERO,
            credit: Decimal::ZERO,
            debit,
        });
    }

    let battery_type = input
        .battery_type
        .ok_or(ValidationError::Missing("batteryType"))?;
    let total_weight = input
        .total_weight
        .ok_or(ValidationError::Missing("totalWeight"))?;
    let rate_per_kg = input
        .rate_per_kg
        .ok_or(ValidationError::Missing("ratePerKg"))?;

    ensure_positive(total_weight, "totalWeight")?;
    ensure_positive(rate_per_kg, "ratePerKg")?;

    let debit = input.debit.unwrap_or(Decimal::ZERO);
    ensure_non_negative(debit, "debit")?;

    Ok(LedgerDerived {
        battery_type: Some(battery_type),
        total_weight,
        rate_per_kg,
        credit: round2(total_weight * rate_per_kg),
        debit,
    })
}

/// Recomputes `total_weight` and `credit` from an entry's weight log.
///
/// Once weight-log appends occur, the log is the source of truth for the
/// total: `total_weight = sum(weight_logs[].weight)` and the credit follows
/// from the new total.
///
/// # Errors
///
/// Returns a [`ValidationError`] if any logged weight is negative.
pub fn apply_weight_logs(
    logs: &[WeightLog],
    rate_per_kg: Decimal,
) -> Result<(Decimal, Decimal), ValidationError> {
    let mut total_weight = Decimal::ZERO;
    for log in logs {
        ensure_non_negative(log.weight, "weight")?;
        total_weight += log.weight;
    }

    Ok((total_weight, round2(total_weight * rate_per_kg)))
}

pub(crate) fn ensure_positive(value: Decimal, field: &'static str) -> Result<(), ValidationError> {
    if value <= Decimal::ZERO {
        return Err(ValidationError::NotPositive(field));
    }
    Ok(())
}

pub(crate) fn ensure_non_negative(
    value: Decimal,
    field: &'static str,
) -> Result<(), ValidationError> {
    if value < Decimal::ZERO {
        return Err(ValidationError::Negative(field));
    }
    Ok(())
}
