//! Ledger service for entry composition and validation.
//!
//! This module provides the core business logic for turning requested
//! journal lines into a validated, balanced entry before persistence.

use std::collections::HashMap;

use rust_decimal::Decimal;
use uuid::Uuid;

use super::balance::balance_delta;
use super::error::LedgerError;
use super::types::{AccountType, ComposedEntry, ComposedLine, EntryTotals, LineInput};

/// Information about an account needed for composition.
#[derive(Debug, Clone, Copy)]
pub struct AccountSnapshot {
    /// The account id.
    pub id: Uuid,
    /// The account type (determines the sign convention).
    pub account_type: AccountType,
    /// Whether the account accepts postings.
    pub is_active: bool,
}

/// Ledger service for entry composition.
///
/// Contains pure business logic with no database dependencies. Account
/// resolution goes through a caller-supplied lookup so the posting
/// transaction can serve snapshots from rows it has already locked.
pub struct LedgerService;

impl LedgerService {
    /// Composes a journal entry from requested lines.
    ///
    /// 1. Drops lines where both debit and credit are zero.
    /// 2. Rejects negative amounts and lines carrying both sides.
    /// 3. Resolves every surviving account code; an unresolvable code
    ///    rejects the whole entry.
    /// 4. Accumulates totals and the signed balance delta per account,
    ///    as pure data. Nothing is mutated here; the posting transaction
    ///    applies deltas only after validation passes.
    /// 5. Rejects empty or unbalanced entries.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError` describing the first rejection encountered.
    pub fn compose<L>(lines: &[LineInput], lookup: L) -> Result<ComposedEntry, LedgerError>
    where
        L: Fn(&str) -> Option<AccountSnapshot>,
    {
        let mut composed = Vec::with_capacity(lines.len());
        let mut deltas: HashMap<Uuid, Decimal> = HashMap::new();
        let mut total_debit = Decimal::ZERO;
        let mut total_credit = Decimal::ZERO;

        for line in lines {
            if line.is_noop() {
                continue;
            }
            if line.debit < Decimal::ZERO || line.credit < Decimal::ZERO {
                return Err(LedgerError::NegativeAmount);
            }
            if line.debit > Decimal::ZERO && line.credit > Decimal::ZERO {
                return Err(LedgerError::BothSidesSet);
            }

            let account = lookup(&line.account_code)
                .ok_or_else(|| LedgerError::AccountNotFound(line.account_code.clone()))?;
            if !account.is_active {
                return Err(LedgerError::AccountInactive(line.account_code.clone()));
            }

            total_debit += line.debit;
            total_credit += line.credit;
            *deltas.entry(account.id).or_insert(Decimal::ZERO) +=
                balance_delta(account.account_type, line.debit, line.credit);

            composed.push(ComposedLine {
                account_id: account.id,
                account_code: line.account_code.clone(),
                debit: line.debit,
                credit: line.credit,
                memo: line.memo.clone(),
            });
        }

        if composed.is_empty() {
            return Err(LedgerError::EmptyEntry);
        }

        let totals = EntryTotals::new(total_debit, total_credit);
        if !totals.is_balanced() {
            return Err(LedgerError::Unbalanced {
                debit: totals.debit,
                credit: totals.credit,
            });
        }

        Ok(ComposedEntry {
            lines: composed,
            totals,
            deltas,
        })
    }

    /// Builds the mirror line set for a reversal.
    ///
    /// Debit and credit are swapped on every line and memos are prefixed
    /// with `Reverse:` so statements show the undo explicitly.
    #[must_use]
    pub fn reversal_lines<'a, I>(lines: I) -> Vec<LineInput>
    where
        I: IntoIterator<Item = (&'a str, Decimal, Decimal, Option<&'a str>)>,
    {
        lines
            .into_iter()
            .map(|(code, debit, credit, memo)| LineInput {
                account_code: code.to_string(),
                debit: credit,
                credit: debit,
                memo: Some(match memo {
                    Some(m) => format!("Reverse: {m}"),
                    None => "Reverse:".to_string(),
                }),
            })
            .collect()
    }
}
