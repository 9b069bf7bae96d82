//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the
//! application.

pub mod account;
pub mod journal;

pub use account::{
    AccountError, AccountFilter, AccountRepository, CreateAccountInput, TrialBalance,
    TrialBalanceRow,
};
pub use journal::{
    EntryFilter, JournalEntryWithLines, JournalError, JournalRepository, PostEntryInput,
};
