//! Running-balance replay over any credit/debit history.
//!
//! The stored `balance` on a record is a point-in-time snapshot; the replay
//! implemented here is the authoritative view. Ledger order is primary sort
//! by business date ascending, secondary by creation time ascending, so two
//! entries on the same date replay in the order they were recorded.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

#[cfg(test)]
mod props;

/// A record that participates in running-balance replay.
pub trait BalanceSource {
    /// The business date of the record.
    fn entry_date(&self) -> NaiveDate;

    /// The creation timestamp, used as the same-date tie-break.
    fn recorded_at(&self) -> DateTime<Utc>;

    /// Amount owed to the business for this record.
    fn credit(&self) -> Decimal;

    /// Amount paid out against this record.
    fn debit(&self) -> Decimal;

    /// The record's net effect on the running balance.
    fn signed_delta(&self) -> Decimal {
        self.credit() - self.debit()
    }
}

/// A record paired with its running balance at that point in the history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceLine<T> {
    /// The underlying record.
    pub record: T,
    /// Cumulative `credit - debit` up to and including this record.
    pub running_balance: Decimal,
}

/// Sorts records into ledger order: date ascending, then creation time
/// ascending.
pub fn sort_into_ledger_order<T: BalanceSource>(records: &mut [T]) {
    records.sort_by_key(|r| (r.entry_date(), r.recorded_at()));
}

/// Replays a history in ledger order, assigning each record its running
/// balance.
///
/// The input may arrive in any order; it is sorted before replay. The last
/// emitted balance equals `sum(credit) - sum(debit)` over the whole
/// sequence.
#[must_use]
pub fn replay<T: BalanceSource>(mut records: Vec<T>) -> Vec<BalanceLine<T>> {
    sort_into_ledger_order(&mut records);

    let mut running = Decimal::ZERO;
    records
        .into_iter()
        .map(|record| {
            running += record.signed_delta();
            BalanceLine {
                record,
                running_balance: running,
            }
        })
        .collect()
}

/// Computes the closing balance `sum(credit) - sum(debit)` over a set of
/// records.
///
/// Addition is order-independent, so no sorting is required.
pub fn closing_balance<'a, T, I>(records: I) -> Decimal
where
    T: BalanceSource + 'a,
    I: IntoIterator<Item = &'a T>,
{
    records
        .into_iter()
        .map(BalanceSource::signed_delta)
        .sum()
}

/// Computes the cumulative balance through the end of the given day.
///
/// A single day's balance is a snapshot of the running total from the
/// beginning of history, not that day's net change: every record dated on or
/// before `day` contributes.
#[must_use]
pub fn balance_through<T: BalanceSource>(records: &[T], day: NaiveDate) -> Decimal {
    closing_balance(records.iter().filter(|r| r.entry_date() <= day))
}
