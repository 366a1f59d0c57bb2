//! SQLite record store.
//!
//! An active-record style wrapper over exactly one table. The store keeps
//! the attributes of its last insert and the rows of its last multi-row
//! read as scratch state; neither is persisted.

use std::path::Path;

use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::query_builder::{BoxedSqlQuery, SqlQuery};
use diesel::sql_types::BigInt;
use diesel::sqlite::Sqlite;
use diesel::SqliteConnection;
use tracing::debug;

use crate::adapter::outbound::sqlite::database::connection::establish;
use crate::adapter::outbound::sqlite::database::model::{CitationRow, OffenderRow, Row};
use crate::adapter::outbound::sqlite::query::{
    Attributes, Filter, Operator, Statement, Table, Value,
};
use crate::error::StoreError;

/// Options accepted when opening a store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreOptions {
    /// Target table. A store without one rejects every statement.
    pub table: Option<Table>,
}

impl StoreOptions {
    #[must_use]
    pub const fn table(table: Table) -> Self {
        Self { table: Some(table) }
    }
}

/// Per-table CRUD wrapper owning a single connection.
pub struct RecordStore {
    connection: SqliteConnection,
    table: Option<Table>,
    attributes: Attributes,
    rows: Vec<Row>,
    last_insert_id: Option<i64>,
}

impl RecordStore {
    /// Open a connection to `path` and bind the store to the configured table.
    ///
    /// # Errors
    /// Returns an error if the connection cannot be established.
    pub fn open(path: &Path, options: StoreOptions) -> Result<Self, StoreError> {
        let connection = establish(path)?;
        Ok(Self::with_connection(connection, options))
    }

    /// Wrap an already configured connection.
    #[must_use]
    pub fn with_connection(connection: SqliteConnection, options: StoreOptions) -> Self {
        Self {
            connection,
            table: options.table,
            attributes: Attributes::new(),
            rows: Vec::new(),
            last_insert_id: None,
        }
    }

    /// The table this store targets.
    ///
    /// # Errors
    /// Returns [`StoreError::NoTable`] when the store was opened without one.
    pub fn table(&self) -> Result<Table, StoreError> {
        self.table.ok_or(StoreError::NoTable)
    }

    /// Retarget the store at another table.
    pub fn set_table(&mut self, table: Table) {
        self.table = Some(table);
    }

    /// Attributes of the most recent insert.
    #[must_use]
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Column names of the active attributes, in insertion order.
    #[must_use]
    pub fn columns(&self) -> Vec<&str> {
        self.attributes.keys().map(String::as_str).collect()
    }

    /// Values of the active attributes, in insertion order.
    #[must_use]
    pub fn values(&self) -> Vec<&Value> {
        self.attributes.values().collect()
    }

    /// Row id generated by the most recent successful insert.
    #[must_use]
    pub fn last_insert_id(&self) -> Option<i64> {
        self.last_insert_id
    }

    /// Rows returned by the most recent [`RecordStore::all`].
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Direct access to the underlying connection.
    pub fn connection(&mut self) -> &mut SqliteConnection {
        &mut self.connection
    }

    /// Insert a row and return it as stored.
    ///
    /// The attributes become the store's active attribute map. After the
    /// insert the new row is re-read by primary key so server-set columns
    /// are populated.
    ///
    /// # Errors
    /// Fails on an empty map, an unknown column, or a constraint violation.
    pub fn create(&mut self, attributes: Attributes) -> Result<Row, StoreError> {
        self.attributes = attributes;
        let statement = Statement::insert(self.table()?, &self.attributes)?;

        self.build(statement).execute(&mut self.connection)?;

        let id = diesel::select(sql::<BigInt>("last_insert_rowid()"))
            .get_result::<i64>(&mut self.connection)?;
        self.last_insert_id = Some(id);

        self.find_by("id", id)?
            .ok_or(StoreError::MissingInsert(id))
    }

    /// Delete rows whose `id` equals `value`. Returns the affected row count.
    ///
    /// # Errors
    /// Fails when the statement cannot be executed.
    pub fn delete(&mut self, value: impl Into<Value>) -> Result<usize, StoreError> {
        self.delete_where("id", value)
    }

    /// Delete rows whose `column` equals `value`.
    ///
    /// No existence check is made; a value matching nothing affects zero
    /// rows. Foreign-key cascades apply.
    ///
    /// # Errors
    /// Fails for an unknown column or a storage error.
    pub fn delete_where(
        &mut self,
        column: &str,
        value: impl Into<Value>,
    ) -> Result<usize, StoreError> {
        let statement = Statement::delete(self.table()?, column, value.into())?;
        let affected = self.build(statement).execute(&mut self.connection)?;
        Ok(affected)
    }

    /// First row whose `column` equals `value`.
    ///
    /// # Errors
    /// Fails for an unknown column or a storage error.
    pub fn find_by(
        &mut self,
        column: &str,
        value: impl Into<Value>,
    ) -> Result<Option<Row>, StoreError> {
        self.find_where(column, Operator::Eq, value)
    }

    /// First row matching `column <operator> value`, or `None`.
    ///
    /// # Errors
    /// Fails for an unknown column or a storage error.
    pub fn find_where(
        &mut self,
        column: &str,
        operator: Operator,
        value: impl Into<Value>,
    ) -> Result<Option<Row>, StoreError> {
        let filter = Filter::eq(column, value).with_operator(operator);
        let statement = Statement::select_first(self.table()?, filter)?;
        Ok(self.fetch(statement)?.into_iter().next())
    }

    /// Every row of the table, optionally filtered.
    ///
    /// The result is also kept as the store's row buffer until the next
    /// call or [`RecordStore::clear`].
    ///
    /// # Errors
    /// Fails for an unknown filter column or a storage error.
    pub fn all(&mut self, filter: Option<Filter>) -> Result<Vec<Row>, StoreError> {
        let statement = Statement::select(self.table()?, filter)?;
        self.rows = self.fetch(statement)?;
        Ok(self.rows.clone())
    }

    /// Compile a statement into a query with its values bound.
    ///
    /// Queries are not cached between calls.
    #[must_use]
    pub fn build(&self, statement: Statement) -> BoxedSqlQuery<'static, Sqlite, SqlQuery> {
        debug!(
            table = ?self.table.map(Table::name),
            sql = %statement.sql,
            binds = ?statement.binds,
            "Executing statement"
        );
        statement.into_query()
    }

    /// Forget the active attributes and the cached rows.
    pub fn clear(&mut self) {
        self.attributes.clear();
        self.rows.clear();
    }

    /// Close the connection.
    pub fn disconnect(self) {
        debug!(table = ?self.table.map(Table::name), "Closing database connection");
        drop(self.connection);
    }

    fn fetch(&mut self, statement: Statement) -> Result<Vec<Row>, StoreError> {
        let table = self.table()?;
        let query = self.build(statement);
        let rows = match table {
            Table::Offenders => query
                .load::<OffenderRow>(&mut self.connection)?
                .into_iter()
                .map(Row::Offender)
                .collect(),
            Table::Citations => query
                .load::<CitationRow>(&mut self.connection)?
                .into_iter()
                .map(Row::Citation)
                .collect(),
        };
        Ok(rows)
    }
}
