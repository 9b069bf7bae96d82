//! Core business logic for the Vendra ledger engine.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and posting recipes live here.
//!
//! # Modules
//!
//! - `ledger` - Double-entry bookkeeping: chart roles, entry composition, recipes

pub mod ledger;
