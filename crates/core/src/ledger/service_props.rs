//! Property-based tests for LedgerService.
//!
//! Covers the algebraic laws the rest of the system relies on:
//! - Balance integrity: composed entries always have equal totals
//! - Net-zero deltas: a balanced entry over debit-normal accounts of one
//!   type nets to zero across the ledger
//! - Reversal mirror law: reversing a composed entry negates every delta
//! - Commutativity: line order never changes totals or deltas

use std::collections::HashMap;

use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::accounts::AccountRole;
use super::service::{AccountSnapshot, LedgerService};
use super::types::LineInput;

/// Strategy to generate positive decimal amounts (0.01 to 10,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy picking any default-chart role.
fn role_strategy() -> impl Strategy<Value = AccountRole> {
    (0..AccountRole::ALL.len()).prop_map(|i| AccountRole::ALL[i])
}

/// A fixed lookup over the whole default chart.
fn chart() -> HashMap<String, AccountSnapshot> {
    AccountRole::ALL
        .iter()
        .map(|role| {
            (
                role.code().to_string(),
                AccountSnapshot {
                    id: Uuid::new_v4(),
                    account_type: role.account_type(),
                    is_active: true,
                },
            )
        })
        .collect()
}

/// Builds a balanced line set: each amount debited against one role and
/// credited against another.
fn balanced_lines(pairs: &[(AccountRole, AccountRole, Decimal)]) -> Vec<LineInput> {
    pairs
        .iter()
        .flat_map(|(debit_role, credit_role, amount)| {
            [
                LineInput::debit(debit_role.code(), *amount, "debit side"),
                LineInput::credit(credit_role.code(), *amount, "credit side"),
            ]
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Any composed entry has equal debit and credit totals.
    #[test]
    fn prop_composed_entries_balance(
        pairs in prop::collection::vec(
            (role_strategy(), role_strategy(), positive_amount()),
            1..8,
        )
    ) {
        let accounts = chart();
        let lines = balanced_lines(&pairs);
        let entry = LedgerService::compose(&lines, |code| accounts.get(code).copied()).unwrap();

        prop_assert!(entry.totals.is_balanced());
        let line_debit: Decimal = entry.lines.iter().map(|l| l.debit).sum();
        let line_credit: Decimal = entry.lines.iter().map(|l| l.credit).sum();
        prop_assert_eq!(line_debit, entry.totals.debit);
        prop_assert_eq!(line_credit, entry.totals.credit);
    }

    /// Reversing a composed entry negates every account delta exactly.
    #[test]
    fn prop_reversal_negates_deltas(
        pairs in prop::collection::vec(
            (role_strategy(), role_strategy(), positive_amount()),
            1..8,
        )
    ) {
        let accounts = chart();
        let lookup = |code: &str| accounts.get(code).copied();

        let lines = balanced_lines(&pairs);
        let entry = LedgerService::compose(&lines, lookup).unwrap();

        let mirrored = LedgerService::reversal_lines(
            entry.lines.iter().map(|l| {
                (l.account_code.as_str(), l.debit, l.credit, l.memo.as_deref())
            }),
        );
        let mirror = LedgerService::compose(&mirrored, lookup).unwrap();

        prop_assert_eq!(mirror.totals.debit, entry.totals.credit);
        prop_assert_eq!(mirror.totals.credit, entry.totals.debit);
        prop_assert_eq!(entry.deltas.len(), mirror.deltas.len());
        for (account_id, delta) in &entry.deltas {
            prop_assert_eq!(-delta, mirror.deltas[account_id]);
        }
    }

    /// Line order never affects totals or per-account deltas.
    #[test]
    fn prop_composition_is_order_independent(
        pairs in prop::collection::vec(
            (role_strategy(), role_strategy(), positive_amount()),
            2..8,
        )
    ) {
        let accounts = chart();
        let lookup = |code: &str| accounts.get(code).copied();

        let lines = balanced_lines(&pairs);
        let mut shuffled = lines.clone();
        shuffled.reverse();

        let a = LedgerService::compose(&lines, lookup).unwrap();
        let b = LedgerService::compose(&shuffled, lookup).unwrap();

        prop_assert_eq!(a.totals, b.totals);
        prop_assert_eq!(a.deltas, b.deltas);
    }

    /// Removing one side of any pair always produces an Unbalanced or
    /// distinct rejection, never a silently accepted entry.
    #[test]
    fn prop_one_sided_entries_rejected(
        role_a in role_strategy(),
        role_b in role_strategy(),
        amount in positive_amount(),
        extra in positive_amount(),
    ) {
        let accounts = chart();
        let lines = vec![
            LineInput::debit(role_a.code(), amount + extra, "debit"),
            LineInput::credit(role_b.code(), amount, "credit"),
        ];

        let result = LedgerService::compose(&lines, |code| accounts.get(code).copied());
        prop_assert!(result.is_err());
    }
}
