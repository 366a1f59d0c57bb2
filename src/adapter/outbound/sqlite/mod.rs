//! SQLite persistence adapters.
//!
//! Provides the per-table [`RecordStore`](store::RecordStore), whitelisted
//! statement building, and the schema installer, using Diesel ORM.

pub mod database;
pub mod install;
pub mod query;
pub mod store;

pub use database::model::{CitationRow, OffenderRow, Row};
pub use install::{install, InstallReport};
pub use query::{attributes, Attributes, Filter, Operator, Statement, Table, Value};
pub use store::{RecordStore, StoreOptions};
