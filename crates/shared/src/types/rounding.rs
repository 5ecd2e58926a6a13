//! Rounding rules for amounts and percentages.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! All amounts are `rust_decimal::Decimal`; rounding is half-up at the cent
//! (the book's convention, equivalent to `round(x * 100) / 100`).

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds an amount half-up to two decimal places (the cent level).
#[must_use]
pub fn round2(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a percentage half-up to the nearest whole number.
#[must_use]
pub fn round_percent(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}
