//! Database layer with `SeaORM` entities and ledger repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions for the ledger tables
//! - Repository abstractions for chart-of-accounts and journal access
//! - The business-event adapter boundary
//! - Database migrations

pub mod adapters;
pub mod entities;
pub mod migration;
pub mod repositories;

pub use adapters::LedgerEvents;
pub use repositories::{AccountRepository, JournalRepository};

use sea_orm::{Database, DatabaseConnection, DbErr};

/// Establishes a connection to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}
