//! Derived-field calculation for lead extraction records.

use rust_decimal::Decimal;

use kabadi_shared::types::{round2, round_percent};

use super::types::{ExtractionDerived, LeadExtractionInput};
use crate::error::ValidationError;
use crate::ledger::derive::{ensure_non_negative, ensure_positive};

/// Upper bound of the valid yield percentage range.
const MAX_PERCENTAGE: Decimal = Decimal::ONE_HUNDRED;

/// Computes the derived fields of a lead extraction record.
///
/// `default_lead_percentage` is applied when the input omits a yield
/// percentage or supplies one outside (0, 100]; the fallback is a clamp on
/// write, not a validation error.
///
/// # Errors
///
/// Returns a [`ValidationError`] naming the offending field.
pub fn derive_extraction_fields(
    input: &LeadExtractionInput,
    default_lead_percentage: Decimal,
) -> Result<ExtractionDerived, ValidationError> {
    if input.is_lead_received_only {
        // A received-only entry records lead coming in with no batch
        // behind it; only the received amount is meaningful.
        let lead_received = input
            .lead_received
            .ok_or(ValidationError::Missing("leadReceived"))?;
        ensure_positive(lead_received, "leadReceived")?;

        return Ok(ExtractionDerived {
            battery_weight: Decimal::ZERO,
            lead_percentage: Decimal::ZERO,
            lead_weight: Decimal::ZERO,
            lead_received,
            lead_pending: Decimal::ZERO,
            percentage: Decimal::ZERO,
        });
    }

    let battery_weight = input
        .battery_weight
        .ok_or(ValidationError::Missing("batteryWeight"))?;
    ensure_positive(battery_weight, "batteryWeight")?;

    let lead_percentage = effective_lead_percentage(input.lead_percentage, default_lead_percentage);

    let lead_received = input.lead_received.unwrap_or(Decimal::ZERO);
    ensure_non_negative(lead_received, "leadReceived")?;

    let lead_weight = round2(battery_weight * lead_percentage / MAX_PERCENTAGE);
    if lead_received > lead_weight {
        return Err(ValidationError::ExceedsLimit {
            field: "leadReceived",
            limit: "leadWeight",
        });
    }

    let lead_pending = round2(lead_weight - lead_received);
    let percentage = if lead_weight > Decimal::ZERO {
        round_percent(lead_received / lead_weight * MAX_PERCENTAGE)
    } else {
        Decimal::ZERO
    };

    Ok(ExtractionDerived {
        battery_weight,
        lead_percentage,
        lead_weight,
        lead_received,
        lead_pending,
        percentage,
    })
}

/// Resolves the yield percentage to use, falling back to the default when
/// the supplied value is absent or outside (0, 100].
fn effective_lead_percentage(supplied: Option<Decimal>, default: Decimal) -> Decimal {
    match supplied {
        Some(pct) if pct > Decimal::ZERO && pct <= MAX_PERCENTAGE => pct,
        _ => default,
    }
}
