//! Account balance arithmetic.
//!
//! The sign convention is the one rule every adapter and the reversal
//! engine must agree on:
//! - Asset/Expense: balance += debit - credit (debit-normal)
//! - Liability/Equity/Revenue: balance += credit - debit (credit-normal)

use rust_decimal::Decimal;

use super::types::AccountType;

/// Signed contribution of one line to an account's running balance.
#[must_use]
pub fn balance_delta(account_type: AccountType, debit: Decimal, credit: Decimal) -> Decimal {
    if account_type.is_debit_normal() {
        debit - credit
    } else {
        credit - debit
    }
}
