//! Ledger error types for entry composition.
//!
//! Every rejection is a distinct variant so callers and tests can
//! discriminate failure causes without string-matching log output.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur while composing a journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// No lines survived no-op filtering.
    #[error("Entry has no effective lines")]
    EmptyEntry,

    /// Entry is not balanced (debits != credits).
    #[error("Entry is not balanced. Debit: {debit}, Credit: {credit}")]
    Unbalanced {
        /// Total debit amount.
        debit: Decimal,
        /// Total credit amount.
        credit: Decimal,
    },

    /// Line amounts cannot be negative.
    #[error("Line amount cannot be negative")]
    NegativeAmount,

    /// A line must carry a debit or a credit, not both.
    #[error("Line must carry either a debit or a credit, not both")]
    BothSidesSet,

    /// No account with this code exists in the tenant's chart.
    ///
    /// The whole entry is rejected: dropping the line instead would let
    /// an unbalanced entry slip through with totals that happen to match.
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// The account exists but is deactivated.
    #[error("Account {0} is inactive")]
    AccountInactive(String),
}

impl LedgerError {
    /// Stable error code for API consumers.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyEntry => "EMPTY_ENTRY",
            Self::Unbalanced { .. } => "UNBALANCED_ENTRY",
            Self::NegativeAmount => "NEGATIVE_AMOUNT",
            Self::BothSidesSet => "BOTH_SIDES_SET",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::AccountInactive(_) => "ACCOUNT_INACTIVE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_codes() {
        assert_eq!(LedgerError::EmptyEntry.error_code(), "EMPTY_ENTRY");
        assert_eq!(
            LedgerError::Unbalanced {
                debit: dec!(100.00),
                credit: dec!(50.00),
            }
            .error_code(),
            "UNBALANCED_ENTRY"
        );
        assert_eq!(
            LedgerError::AccountNotFound("9999".to_string()).error_code(),
            "ACCOUNT_NOT_FOUND"
        );
    }

    #[test]
    fn test_error_display() {
        let err = LedgerError::Unbalanced {
            debit: dec!(100.00),
            credit: dec!(50.00),
        };
        assert_eq!(
            err.to_string(),
            "Entry is not balanced. Debit: 100.00, Credit: 50.00"
        );

        let err = LedgerError::AccountNotFound("9999".to_string());
        assert_eq!(err.to_string(), "Account not found: 9999");
    }
}
