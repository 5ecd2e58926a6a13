//! Derived-field calculation for lead selling records.

use rust_decimal::Decimal;

use kabadi_shared::types::round2;

use super::types::{LeadSellingInput, SellingDerived};
use crate::error::ValidationError;
use crate::ledger::derive::{ensure_non_negative, ensure_positive};

/// Computes the derived fields of a lead selling record.
///
/// # Errors
///
/// Returns a [`ValidationError`] naming the offending field.
pub fn derive_selling_fields(input: &LeadSellingInput) -> Result<SellingDerived, ValidationError> {
    if input.is_payment_only {
        let debit = input.debit.ok_or(ValidationError::Missing("debit"))?;
        ensure_positive(debit, "debit")?;

        return Ok(SellingDerived {
            commute_rent: Decimal::ZERO,
            weight: Decimal::ZERO,
            rate: Decimal::ZERO,
            debit,
            credit: Decimal::ZERO,
            balance: -debit,
        });
    }

    let weight = input.weight.ok_or(ValidationError::Missing("weight"))?;
    let rate = input.rate.ok_or(ValidationError::Missing("rate"))?;
    ensure_positive(weight, "weight")?;
    ensure_positive(rate, "rate")?;

    let commute_rent = input.commute_rent.unwrap_or(Decimal::ZERO);
    ensure_non_negative(commute_rent, "commuteRent")?;

    let debit = input.debit.unwrap_or(Decimal::ZERO);
    ensure_non_negative(debit, "debit")?;

    let credit = round2(weight * rate + commute_rent);
    let balance = round2(credit - debit);

    Ok(SellingDerived {
        commute_rent,
        weight,
        rate,
        debit,
        credit,
        balance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::customer::CustomerRef;
    use chrono::NaiveDate;
    use kabadi_shared::types::CustomerId;
    use rust_decimal_macros::dec;

    fn sale_input(
        weight: Option<Decimal>,
        rate: Option<Decimal>,
        commute_rent: Option<Decimal>,
        debit: Option<Decimal>,
    ) -> LeadSellingInput {
        LeadSellingInput {
            customer: CustomerRef::Reference(CustomerId::new()),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            commute_rent,
            weight,
            rate,
            debit,
            notes: None,
            is_payment_only: false,
        }
    }

    fn payment_input(debit: Option<Decimal>) -> LeadSellingInput {
        LeadSellingInput {
            customer: CustomerRef::Reference(CustomerId::new()),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            commute_rent: None,
            weight: None,
            rate: None,
            debit,
            notes: None,
            is_payment_only: true,
        }
    }

    #[test]
    fn test_credit_includes_commute_rent() {
        let derived = sale(&sale_input(
            Some(dec!(200)),
            Some(dec!(85.50)),
            Some(dec!(1200)),
            None,
        ));
        // 200 * 85.50 + 1200 = 18300
        assert_eq!(derived.credit, dec!(18300.00));
        assert_eq!(derived.balance, dec!(18300.00));
    }

    #[test]
    fn test_balance_is_credit_minus_debit() {
        let derived = sale(&sale_input(
            Some(dec!(100)),
            Some(dec!(90)),
            None,
            Some(dec!(4000)),
        ));
        assert_eq!(derived.credit, dec!(9000.00));
        assert_eq!(derived.balance, dec!(5000.00));
    }

    #[test]
    fn test_payment_only_record() {
        let derived = derive_selling_fields(&payment_input(Some(dec!(1000)))).unwrap();
        assert_eq!(derived.credit, Decimal::ZERO);
        assert_eq!(derived.balance, dec!(-1000));
        assert_eq!(derived.weight, Decimal::ZERO);
        assert_eq!(derived.rate, Decimal::ZERO);
        assert_eq!(derived.commute_rent, Decimal::ZERO);
        assert_eq!(derived.debit, dec!(1000));
    }

    #[test]
    fn test_payment_only_requires_positive_debit() {
        assert_eq!(
            derive_selling_fields(&payment_input(None)),
            Err(ValidationError::Missing("debit"))
        );
        assert_eq!(
            derive_selling_fields(&payment_input(Some(dec!(0)))),
            Err(ValidationError::NotPositive("debit"))
        );
    }

    #[test]
    fn test_weight_and_rate_required_positive() {
        assert_eq!(
            derive_selling_fields(&sale_input(None, Some(dec!(90)), None, None)),
            Err(ValidationError::Missing("weight"))
        );
        assert_eq!(
            derive_selling_fields(&sale_input(Some(dec!(0)), Some(dec!(90)), None, None)),
            Err(ValidationError::NotPositive("weight"))
        );
        assert_eq!(
            derive_selling_fields(&sale_input(Some(dec!(10)), None, None, None)),
            Err(ValidationError::Missing("rate"))
        );
    }

    #[test]
    fn test_negative_commute_rent_is_rejected() {
        assert_eq!(
            derive_selling_fields(&sale_input(
                Some(dec!(10)),
                Some(dec!(90)),
                Some(dec!(-1)),
                None
            )),
            Err(ValidationError::Negative("commuteRent"))
        );
    }

    #[test]
    fn test_derivation_is_idempotent() {
        let input = sale_input(Some(dec!(33.33)), Some(dec!(91.7)), Some(dec!(450)), None);
        let first = derive_selling_fields(&input).unwrap();
        let second = derive_selling_fields(&input).unwrap();
        assert_eq!(first, second);
    }

    fn sale(input: &LeadSellingInput) -> SellingDerived {
        derive_selling_fields(input).unwrap()
    }
}
