//! Property tests for running-balance replay.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::{BalanceSource, closing_balance, replay};

#[derive(Debug, Clone)]
struct Row {
    date: NaiveDate,
    recorded_at: DateTime<Utc>,
    credit: Decimal,
    debit: Decimal,
}

impl BalanceSource for Row {
    fn entry_date(&self) -> NaiveDate {
        self.date
    }

    fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }

    fn credit(&self) -> Decimal {
        self.credit
    }

    fn debit(&self) -> Decimal {
        self.debit
    }
}

/// Strategy for cent-denominated amounts in [0, 1000.00].
fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..100_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for a history of rows spread over a few days, each with a
/// distinct creation timestamp.
fn history_strategy(max_len: usize) -> impl Strategy<Value = Vec<Row>> {
    prop::collection::vec((0u32..5u32, amount_strategy(), amount_strategy()), 1..=max_len)
        .prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (day_offset, credit, debit))| Row {
                    date: NaiveDate::from_ymd_opt(2024, 1, 1 + day_offset).unwrap(),
                    recorded_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
                        + chrono::Duration::seconds(i64::try_from(i).unwrap_or(0)),
                    credit,
                    debit,
                })
                .collect()
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The last replayed balance equals sum(credit) - sum(debit), exact to
    /// the cent, for any history.
    #[test]
    fn prop_final_balance_equals_sum_of_deltas(rows in history_strategy(30)) {
        let expected: Decimal = rows.iter().map(|r| r.credit - r.debit).sum();

        let lines = replay(rows);
        prop_assert_eq!(lines.last().unwrap().running_balance, expected);
    }

    /// `closing_balance` agrees with the replay regardless of input order.
    #[test]
    fn prop_closing_balance_is_order_independent(rows in history_strategy(30)) {
        let closing = closing_balance(rows.iter());

        let mut reversed = rows.clone();
        reversed.reverse();
        prop_assert_eq!(closing_balance(reversed.iter()), closing);

        let lines = replay(rows);
        prop_assert_eq!(lines.last().unwrap().running_balance, closing);
    }

    /// Replay is deterministic: the same history always produces the same
    /// line balances.
    #[test]
    fn prop_replay_is_deterministic(rows in history_strategy(20)) {
        let first: Vec<Decimal> = replay(rows.clone())
            .into_iter()
            .map(|l| l.running_balance)
            .collect();
        let second: Vec<Decimal> = replay(rows)
            .into_iter()
            .map(|l| l.running_balance)
            .collect();
        prop_assert_eq!(first, second);
    }

    /// Each line's balance is the previous line's balance plus the record's
    /// delta.
    #[test]
    fn prop_each_line_extends_previous(rows in history_strategy(20)) {
        let lines = replay(rows);

        let mut previous = Decimal::ZERO;
        for line in &lines {
            prop_assert_eq!(
                line.running_balance,
                previous + line.record.signed_delta()
            );
            previous = line.running_balance;
        }
    }

    /// Swapping the creation order of two same-date records never changes
    /// the final total.
    #[test]
    fn prop_same_date_swap_preserves_total(
        credit_a in amount_strategy(),
        debit_b in amount_strategy(),
    ) {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        let t1 = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();

        let forward = vec![
            Row { date, recorded_at: t0, credit: credit_a, debit: Decimal::ZERO },
            Row { date, recorded_at: t1, credit: Decimal::ZERO, debit: debit_b },
        ];
        let swapped = vec![
            Row { date, recorded_at: t0, credit: Decimal::ZERO, debit: debit_b },
            Row { date, recorded_at: t1, credit: credit_a, debit: Decimal::ZERO },
        ];

        let forward_last = replay(forward).last().unwrap().running_balance;
        let swapped_last = replay(swapped).last().unwrap().running_balance;
        prop_assert_eq!(forward_last, swapped_last);
    }
}
