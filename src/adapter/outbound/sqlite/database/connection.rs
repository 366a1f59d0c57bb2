//! Database connection management using Diesel ORM.
//!
//! Every store owns one connection; there is no pool. Connections are
//! configured with foreign keys enabled so cascading deletes apply.

use std::path::Path;

use diesel::prelude::*;
use diesel::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::debug;

use crate::error::StoreError;

/// Embedded database migrations compiled from the migrations/ directory.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Open a connection to the SQLite database at `path` and apply pragmas.
///
/// # Errors
/// Returns an error if the connection cannot be established or a pragma
/// fails to apply.
pub fn establish(path: &Path) -> Result<SqliteConnection, StoreError> {
    let url = path.to_string_lossy().into_owned();
    let mut conn = SqliteConnection::establish(&url).map_err(|source| StoreError::Connection {
        path: url.clone(),
        source,
    })?;
    configure_sqlite_connection(&mut conn)?;
    debug!(path = %url, "Opened database connection");
    Ok(conn)
}

/// Configure SQLite connection pragmas.
///
/// # Errors
/// Returns an error if a pragma fails to apply.
pub fn configure_sqlite_connection(conn: &mut SqliteConnection) -> Result<(), StoreError> {
    diesel::sql_query("PRAGMA foreign_keys = ON").execute(conn)?;
    diesel::sql_query("PRAGMA busy_timeout = 5000").execute(conn)?;
    Ok(())
}

/// Run all pending database migrations.
///
/// Returns the number of migrations applied by this call.
///
/// # Errors
/// Returns an error if migrations fail.
pub fn run_migrations(conn: &mut SqliteConnection) -> Result<usize, StoreError> {
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| StoreError::Migration(e.to_string()))?;
    Ok(applied.len())
}
