//! Whitelisted statement building for the record store.
//!
//! Table names, column names and comparison operators are checked against
//! fixed lists before they reach SQL text. Values are only ever bound as
//! parameters.

use std::fmt;
use std::str::FromStr;

use diesel::query_builder::{BoxedSqlQuery, SqlQuery};
use diesel::sql_types::{BigInt, Nullable, Text};
use diesel::sqlite::Sqlite;
use indexmap::IndexMap;
use serde::Serialize;

use crate::error::StoreError;

/// Tables the store may target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Offenders,
    Citations,
}

impl Table {
    pub const ALL: [Table; 2] = [Table::Offenders, Table::Citations];

    /// SQL name of the table.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Offenders => "offenders",
            Self::Citations => "citations",
        }
    }

    /// Columns that may appear in statements against this table.
    #[must_use]
    pub const fn columns(self) -> &'static [&'static str] {
        match self {
            Self::Offenders => &[
                "id",
                "name",
                "alliance",
                "created_at",
                "updated_at",
                "deleted_at",
            ],
            Self::Citations => &[
                "id",
                "offender_id",
                "note",
                "created_at",
                "updated_at",
                "deleted_at",
            ],
        }
    }

    /// Validate `name` as one of this table's columns.
    ///
    /// # Errors
    /// Returns [`StoreError::UnknownColumn`] when the column is not listed.
    pub fn column(self, name: &str) -> Result<&'static str, StoreError> {
        self.columns()
            .iter()
            .copied()
            .find(|c| *c == name)
            .ok_or_else(|| StoreError::UnknownColumn {
                table: self.name(),
                column: name.to_string(),
            })
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Table {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| StoreError::UnknownTable(s.to_string()))
    }
}

/// Comparison operators accepted in `WHERE` clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Operator {
    #[default]
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Like,
}

impl Operator {
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Like => "LIKE",
        }
    }
}

impl FromStr for Operator {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "=" | "==" => Ok(Self::Eq),
            "!=" | "<>" => Ok(Self::Ne),
            "<" => Ok(Self::Lt),
            "<=" => Ok(Self::Le),
            ">" => Ok(Self::Gt),
            ">=" => Ok(Self::Ge),
            other if other.eq_ignore_ascii_case("like") => Ok(Self::Like),
            other => Err(StoreError::UnknownOperator(other.to_string())),
        }
    }
}

/// A value bound into a statement or read from a row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Integer(i64),
    Text(String),
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Integer(v) => write!(f, "{v}"),
            Self::Text(v) => f.write_str(v),
        }
    }
}

impl Value {
    /// Parse a value typed on a command line: integers become
    /// [`Value::Integer`], `null` becomes [`Value::Null`], anything else text.
    #[must_use]
    pub fn parse_loose(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("null") {
            return Self::Null;
        }
        raw.parse::<i64>()
            .map_or_else(|_| Self::Text(raw.to_string()), Self::Integer)
    }
}

/// Column-to-value map for inserts. Iteration order is insertion order.
pub type Attributes = IndexMap<String, Value>;

/// Build an [`Attributes`] map from `(column, value)` pairs.
pub fn attributes<I, K, V>(pairs: I) -> Attributes
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// Optional `WHERE <column> <operator> ?` clause for multi-row reads.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub column: String,
    pub value: Value,
    pub operator: Operator,
}

impl Filter {
    #[must_use]
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
            operator: Operator::Eq,
        }
    }

    #[must_use]
    pub fn with_operator(mut self, operator: Operator) -> Self {
        self.operator = operator;
        self
    }
}

/// SQL text plus the values to bind, in placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub binds: Vec<Value>,
}

impl Statement {
    /// `INSERT INTO <table> (<columns>) VALUES (?, ...)`.
    ///
    /// # Errors
    /// Fails for an empty map or a column outside the table's whitelist.
    pub fn insert(table: Table, attributes: &Attributes) -> Result<Self, StoreError> {
        if attributes.is_empty() {
            return Err(StoreError::EmptyAttributes);
        }
        let columns = attributes
            .keys()
            .map(|k| table.column(k))
            .collect::<Result<Vec<_>, _>>()?;
        let placeholders = vec!["?"; columns.len()].join(",");

        Ok(Self {
            sql: format!(
                "INSERT INTO {table} ({}) VALUES ({placeholders});",
                columns.join(",")
            ),
            binds: attributes.values().cloned().collect(),
        })
    }

    /// `DELETE FROM <table> WHERE <column> = ?`.
    ///
    /// # Errors
    /// Fails for a column outside the table's whitelist.
    pub fn delete(table: Table, column: &str, value: Value) -> Result<Self, StoreError> {
        let column = table.column(column)?;
        Ok(Self {
            sql: format!("DELETE FROM {table} WHERE {column} = ?;"),
            binds: vec![value],
        })
    }

    /// `SELECT * FROM <table>` with an optional filter.
    ///
    /// # Errors
    /// Fails for a filter column outside the table's whitelist.
    pub fn select(table: Table, filter: Option<Filter>) -> Result<Self, StoreError> {
        Self::select_limited(table, filter, None)
    }

    /// `SELECT * FROM <table> WHERE ... LIMIT 1`, for single-row lookups.
    ///
    /// # Errors
    /// Fails for a filter column outside the table's whitelist.
    pub fn select_first(table: Table, filter: Filter) -> Result<Self, StoreError> {
        Self::select_limited(table, Some(filter), Some(1))
    }

    fn select_limited(
        table: Table,
        filter: Option<Filter>,
        limit: Option<u32>,
    ) -> Result<Self, StoreError> {
        let mut sql = format!("SELECT * FROM {table}");
        let mut binds = Vec::new();
        if let Some(filter) = filter {
            let column = table.column(&filter.column)?;
            sql.push_str(&format!(" WHERE {column} {} ?", filter.operator.as_sql()));
            binds.push(filter.value);
        }
        if let Some(limit) = limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }
        sql.push(';');
        Ok(Self { sql, binds })
    }

    /// Number of `?` placeholders in the SQL text.
    #[must_use]
    pub fn placeholder_count(&self) -> usize {
        self.sql.matches('?').count()
    }

    /// Turn the statement into a Diesel query with every value bound.
    #[must_use]
    pub fn into_query(self) -> BoxedSqlQuery<'static, Sqlite, SqlQuery> {
        self.binds
            .into_iter()
            .fold(diesel::sql_query(self.sql).into_boxed(), bind_value)
    }
}

fn bind_value(
    query: BoxedSqlQuery<'static, Sqlite, SqlQuery>,
    value: Value,
) -> BoxedSqlQuery<'static, Sqlite, SqlQuery> {
    match value {
        Value::Null => query.bind::<Nullable<Text>, _>(None::<String>),
        Value::Integer(v) => query.bind::<BigInt, _>(v),
        Value::Text(v) => query.bind::<Text, _>(v),
    }
}
