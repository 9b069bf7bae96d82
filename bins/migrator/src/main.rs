//! Schema migration runner for the Vendra ledger.
//!
//! Thin wrapper around the sea-orm-migration CLI over
//! [`vendra_db::migration::Migrator`], which currently carries a single
//! migration creating the ledger tables (chart of accounts, journal
//! entries/lines, per-tenant sequences).
//!
//! Common invocations:
//!   migrator up       - apply pending migrations
//!   migrator status   - list applied and pending migrations
//!   migrator down     - roll back the last migration
//!   migrator fresh    - drop everything and re-apply (development only)
//!
//! Reads `DATABASE_URL` from the environment or a local `.env` file.

use sea_orm_migration::prelude::*;
use vendra_db::migration::Migrator;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // The migration CLI installs its own tracing subscriber.
    cli::run_cli(Migrator).await;
}
