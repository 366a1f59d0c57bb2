//! SQLite database modules.
//!
//! Provides connection management, schema definitions, and Diesel row
//! types for the offender ledger.

pub mod connection;
pub mod model;
pub mod schema;
