//! Ledger domain types for journal entry composition and posting.
//!
//! This module defines the core types used for composing and validating
//! journal entries in the double-entry bookkeeping system.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account classification determining the balance sign convention.
///
/// In double-entry bookkeeping:
/// - Asset/Expense accounts are debit-normal: `balance += debit - credit`
/// - Liability/Equity/Revenue accounts are credit-normal: `balance += credit - debit`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Resources owned (cash, receivables, inventory).
    Asset,
    /// Obligations owed (payables, customer credits).
    Liability,
    /// Owner's stake and retained earnings.
    Equity,
    /// Income from sales and other sources.
    Revenue,
    /// Costs of operating the business.
    Expense,
}

impl AccountType {
    /// Returns true if debits increase this account's balance.
    #[must_use]
    pub fn is_debit_normal(self) -> bool {
        matches!(self, Self::Asset | Self::Expense)
    }

    /// Stable string form, matching the database enum.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asset => "asset",
            Self::Liability => "liability",
            Self::Equity => "equity",
            Self::Revenue => "revenue",
            Self::Expense => "expense",
        }
    }
}

/// The business event that produced a journal entry.
///
/// Every posted entry records its origin so business records and ledger
/// entries can be reconciled later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceType {
    /// Customer order checkout.
    Order,
    /// Direct (counter) sale.
    Sale,
    /// Debt collection from a customer.
    Collection,
    /// Approved operating expense.
    Expense,
    /// Supplier invoice received.
    SupplierInvoice,
    /// Payment made to a supplier.
    SupplierPayment,
    /// Payroll or commission run.
    Payroll,
    /// Production order completion.
    Production,
    /// Customer return.
    Return,
    /// Van cash deposited to safe or bank.
    Deposit,
    /// Raw material purchase.
    RawMaterialPurchase,
    /// Free-form manual journal entry.
    Manual,
    /// Mirror entry undoing a prior entry.
    Reversal,
}

impl ReferenceType {
    /// Stable string form, matching the database enum.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Order => "order",
            Self::Sale => "sale",
            Self::Collection => "collection",
            Self::Expense => "expense",
            Self::SupplierInvoice => "supplier_invoice",
            Self::SupplierPayment => "supplier_payment",
            Self::Payroll => "payroll",
            Self::Production => "production",
            Self::Return => "return",
            Self::Deposit => "deposit",
            Self::RawMaterialPurchase => "raw_material_purchase",
            Self::Manual => "manual",
            Self::Reversal => "reversal",
        }
    }
}

/// One requested journal line: account code plus debit/credit amounts.
///
/// Lines where both sides are zero are no-ops and are dropped during
/// composition. At most one side should carry an amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineInput {
    /// Canonical account code within the tenant's chart.
    pub account_code: String,
    /// Debit amount (zero if this is a credit line).
    pub debit: Decimal,
    /// Credit amount (zero if this is a debit line).
    pub credit: Decimal,
    /// Optional per-line memo.
    pub memo: Option<String>,
}

impl LineInput {
    /// Creates a line from raw parts.
    #[must_use]
    pub fn new(
        account_code: impl Into<String>,
        debit: Decimal,
        credit: Decimal,
        memo: Option<String>,
    ) -> Self {
        Self {
            account_code: account_code.into(),
            debit,
            credit,
            memo,
        }
    }

    /// Creates a debit line.
    #[must_use]
    pub fn debit(account_code: impl Into<String>, amount: Decimal, memo: impl Into<String>) -> Self {
        Self::new(account_code, amount, Decimal::ZERO, Some(memo.into()))
    }

    /// Creates a credit line.
    #[must_use]
    pub fn credit(account_code: impl Into<String>, amount: Decimal, memo: impl Into<String>) -> Self {
        Self::new(account_code, Decimal::ZERO, amount, Some(memo.into()))
    }

    /// True if both sides are zero (the line contributes nothing).
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.debit == Decimal::ZERO && self.credit == Decimal::ZERO
    }
}

/// A composed line with its account resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedLine {
    /// Resolved account id.
    pub account_id: Uuid,
    /// The account code the line was requested against.
    pub account_code: String,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
    /// Optional per-line memo.
    pub memo: Option<String>,
}

/// A validated, balanced entry ready for persistence.
///
/// Carries the resolved lines, the equal totals, and the signed balance
/// delta per touched account. Deltas are pure data: nothing is mutated
/// until the posting transaction applies them.
#[derive(Debug, Clone)]
pub struct ComposedEntry {
    /// Resolved lines surviving no-op filtering.
    pub lines: Vec<ComposedLine>,
    /// Entry totals (balanced by construction).
    pub totals: EntryTotals,
    /// Signed balance delta per account id (sign convention applied).
    pub deltas: HashMap<Uuid, Decimal>,
}

/// Debit/credit totals for an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryTotals {
    /// Sum of all debit amounts.
    pub debit: Decimal,
    /// Sum of all credit amounts.
    pub credit: Decimal,
}

impl EntryTotals {
    /// Creates totals from debit and credit sums.
    #[must_use]
    pub fn new(debit: Decimal, credit: Decimal) -> Self {
        Self { debit, credit }
    }

    /// Whether debits equal credits.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.debit == self.credit
    }

    /// Difference between debits and credits.
    #[must_use]
    pub fn difference(&self) -> Decimal {
        self.debit - self.credit
    }
}

/// Formats a sequential entry number as `JE-00001`.
///
/// Sequence values come from the per-tenant counter row advanced inside
/// the posting transaction, so numbers are unique and monotonic even
/// under concurrent posting.
#[must_use]
pub fn format_entry_number(sequence: i64) -> String {
    format!("JE-{sequence:05}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_account_type_normal_side() {
        assert!(AccountType::Asset.is_debit_normal());
        assert!(AccountType::Expense.is_debit_normal());
        assert!(!AccountType::Liability.is_debit_normal());
        assert!(!AccountType::Equity.is_debit_normal());
        assert!(!AccountType::Revenue.is_debit_normal());
    }

    #[test]
    fn test_entry_totals_balanced() {
        let totals = EntryTotals::new(dec!(100.00), dec!(100.00));
        assert!(totals.is_balanced());
        assert_eq!(totals.difference(), Decimal::ZERO);
    }

    #[test]
    fn test_entry_totals_unbalanced() {
        let totals = EntryTotals::new(dec!(100.00), dec!(50.00));
        assert!(!totals.is_balanced());
        assert_eq!(totals.difference(), dec!(50.00));
    }

    #[test]
    fn test_line_noop_detection() {
        let line = LineInput::new("1000", Decimal::ZERO, Decimal::ZERO, None);
        assert!(line.is_noop());

        let line = LineInput::debit("1000", dec!(10), "cash in");
        assert!(!line.is_noop());
    }

    #[test]
    fn test_entry_number_format() {
        assert_eq!(format_entry_number(1), "JE-00001");
        assert_eq!(format_entry_number(42), "JE-00042");
        assert_eq!(format_entry_number(99999), "JE-99999");
        // Width grows past the pad, numbers never wrap or truncate
        assert_eq!(format_entry_number(123_456), "JE-123456");
    }

    #[test]
    fn test_reference_type_strings() {
        assert_eq!(ReferenceType::Order.as_str(), "order");
        assert_eq!(ReferenceType::SupplierInvoice.as_str(), "supplier_invoice");
        assert_eq!(ReferenceType::RawMaterialPurchase.as_str(), "raw_material_purchase");
        assert_eq!(ReferenceType::Reversal.as_str(), "reversal");
    }
}
