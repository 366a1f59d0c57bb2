//! One-shot schema installation.
//!
//! Makes sure the database file exists, applies the embedded migrations and
//! reads back the offender table as a sanity check. Running it again on an
//! installed database is a no-op.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::adapter::outbound::sqlite::database::connection::{establish, run_migrations};
use crate::adapter::outbound::sqlite::query::Table;
use crate::adapter::outbound::sqlite::store::{RecordStore, StoreOptions};
use crate::error::StoreError;

/// Outcome of a schema installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    /// Database file the schema was installed into.
    pub path: PathBuf,
    /// Whether the file had to be created.
    pub created_file: bool,
    /// Migrations applied by this run (zero on a re-run).
    pub migrations_applied: usize,
    /// Offender rows present after installation.
    pub offender_count: usize,
}

/// Install the schema into the database at `path`.
///
/// # Errors
/// Returns an error if the file cannot be created, the connection cannot be
/// opened, or a migration fails.
pub fn install(path: &Path) -> Result<InstallReport, StoreError> {
    info!(path = %path.display(), "Installing database schema");

    let created_file = ensure_file(path)?;

    let mut connection = establish(path)?;
    let migrations_applied = run_migrations(&mut connection)?;

    let mut offenders =
        RecordStore::with_connection(connection, StoreOptions::table(Table::Offenders));
    let offender_count = offenders.all(None)?.len();
    offenders.disconnect();

    info!(
        created_file,
        migrations_applied,
        offender_count,
        "Database schema installed"
    );

    Ok(InstallReport {
        path: path.to_path_buf(),
        created_file,
        migrations_applied,
        offender_count,
    })
}

/// Create `path` (and its parent directory) as an empty file if absent.
fn ensure_file(path: &Path) -> Result<bool, StoreError> {
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().write(true).create(true).truncate(false).open(path)?;
    Ok(true)
}
