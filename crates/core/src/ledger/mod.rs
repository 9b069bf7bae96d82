//! Double-entry bookkeeping logic.
//!
//! This module implements the core ledger functionality:
//! - Canonical account roles and the default chart of accounts
//! - Journal line inputs and composed entries
//! - Balance sign convention (debit-normal vs credit-normal)
//! - Entry composition and validation
//! - Posting recipes for business events
//! - Error types for ledger operations

pub mod accounts;
pub mod balance;
pub mod error;
pub mod recipes;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use accounts::{AccountRole, DefaultAccount, DEFAULT_CHART};
pub use balance::balance_delta;
pub use recipes::{CashChannel, SalesChannel};
pub use error::LedgerError;
pub use service::{AccountSnapshot, LedgerService};
pub use types::{
    format_entry_number, AccountType, ComposedEntry, ComposedLine, EntryTotals, LineInput,
    ReferenceType,
};
