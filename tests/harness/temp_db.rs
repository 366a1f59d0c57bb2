use std::path::{Path, PathBuf};

use gdps::adapter::outbound::sqlite::{install, RecordStore, StoreOptions, Table};
use gdps::app::Container;
use tempfile::TempDir;

/// Installed SQLite database in a temporary directory, removed on drop.
pub struct TempDb {
    _dir: TempDir,
    path: PathBuf,
}

impl TempDb {
    pub fn create() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join("gdps.db");
        install(&path).expect("install schema");
        Self { _dir: dir, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn store(&self, table: Table) -> RecordStore {
        RecordStore::open(&self.path, StoreOptions::table(table)).expect("open store")
    }

    pub fn container(&self, roe: &str) -> Container {
        Container::new(&self.path, "/", roe)
    }
}
