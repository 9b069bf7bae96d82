//! Postgres enum types shared by the ledger entities.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use vendra_core::ledger;

/// Account classification, mirrors `vendra_core::ledger::AccountType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "account_type")]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Asset account (debit-normal).
    #[sea_orm(string_value = "asset")]
    Asset,
    /// Liability account (credit-normal).
    #[sea_orm(string_value = "liability")]
    Liability,
    /// Equity account (credit-normal).
    #[sea_orm(string_value = "equity")]
    Equity,
    /// Revenue account (credit-normal).
    #[sea_orm(string_value = "revenue")]
    Revenue,
    /// Expense account (debit-normal).
    #[sea_orm(string_value = "expense")]
    Expense,
}

impl From<ledger::AccountType> for AccountType {
    fn from(value: ledger::AccountType) -> Self {
        match value {
            ledger::AccountType::Asset => Self::Asset,
            ledger::AccountType::Liability => Self::Liability,
            ledger::AccountType::Equity => Self::Equity,
            ledger::AccountType::Revenue => Self::Revenue,
            ledger::AccountType::Expense => Self::Expense,
        }
    }
}

impl From<AccountType> for ledger::AccountType {
    fn from(value: AccountType) -> Self {
        match value {
            AccountType::Asset => Self::Asset,
            AccountType::Liability => Self::Liability,
            AccountType::Equity => Self::Equity,
            AccountType::Revenue => Self::Revenue,
            AccountType::Expense => Self::Expense,
        }
    }
}

/// Business-event origin of a journal entry, mirrors
/// `vendra_core::ledger::ReferenceType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "reference_type")]
#[serde(rename_all = "snake_case")]
pub enum ReferenceType {
    /// Customer order checkout.
    #[sea_orm(string_value = "order")]
    Order,
    /// Direct (counter) sale.
    #[sea_orm(string_value = "sale")]
    Sale,
    /// Debt collection from a customer.
    #[sea_orm(string_value = "collection")]
    Collection,
    /// Approved operating expense.
    #[sea_orm(string_value = "expense")]
    Expense,
    /// Supplier invoice received.
    #[sea_orm(string_value = "supplier_invoice")]
    SupplierInvoice,
    /// Payment made to a supplier.
    #[sea_orm(string_value = "supplier_payment")]
    SupplierPayment,
    /// Payroll or commission run.
    #[sea_orm(string_value = "payroll")]
    Payroll,
    /// Production order completion.
    #[sea_orm(string_value = "production")]
    Production,
    /// Customer return.
    #[sea_orm(string_value = "return")]
    Return,
    /// Van cash deposited to safe or bank.
    #[sea_orm(string_value = "deposit")]
    Deposit,
    /// Raw material purchase.
    #[sea_orm(string_value = "raw_material_purchase")]
    RawMaterialPurchase,
    /// Free-form manual journal entry.
    #[sea_orm(string_value = "manual")]
    Manual,
    /// Mirror entry undoing a prior entry.
    #[sea_orm(string_value = "reversal")]
    Reversal,
}

impl From<ledger::ReferenceType> for ReferenceType {
    fn from(value: ledger::ReferenceType) -> Self {
        match value {
            ledger::ReferenceType::Order => Self::Order,
            ledger::ReferenceType::Sale => Self::Sale,
            ledger::ReferenceType::Collection => Self::Collection,
            ledger::ReferenceType::Expense => Self::Expense,
            ledger::ReferenceType::SupplierInvoice => Self::SupplierInvoice,
            ledger::ReferenceType::SupplierPayment => Self::SupplierPayment,
            ledger::ReferenceType::Payroll => Self::Payroll,
            ledger::ReferenceType::Production => Self::Production,
            ledger::ReferenceType::Return => Self::Return,
            ledger::ReferenceType::Deposit => Self::Deposit,
            ledger::ReferenceType::RawMaterialPurchase => Self::RawMaterialPurchase,
            ledger::ReferenceType::Manual => Self::Manual,
            ledger::ReferenceType::Reversal => Self::Reversal,
        }
    }
}
